//! Domain types and pure logic for the project financial health engine.
//!
//! Everything in this crate is free of I/O except the [`evaluation`]
//! orchestrator, which talks to storage only through the
//! [`evaluation::EvaluationStore`] trait.

pub mod alert;
pub mod burndown;
pub mod error;
pub mod evaluation;
pub mod health;
pub mod metrics;
pub mod phase;
pub mod portfolio;
pub mod types;
