//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Writes that must join a
//! caller-owned transaction take `&mut PgConnection` instead.

pub mod health_alert_repo;
pub mod health_snapshot_repo;
pub mod phase_repo;
pub mod project_repo;
pub mod time_entry_repo;

pub use health_alert_repo::HealthAlertRepo;
pub use health_snapshot_repo::HealthSnapshotRepo;
pub use phase_repo::PhaseRepo;
pub use project_repo::ProjectRepo;
pub use time_entry_repo::TimeEntryRepo;
