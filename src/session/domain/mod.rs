//! Operating-session domain: the singleton session record and the snapshot
//! aggregate its advance/rollback embed.

mod error;
mod ids;
mod session;
mod snapshot;

pub use error::SessionDomainError;
pub use ids::SessionId;
pub use session::OperatingSession;
pub use snapshot::{validate_snapshot, Snapshot, SnapshotCar};
