//! Orchestration service for the session lifecycle.

mod session_service;

pub use session_service::{
    AdvanceStats, RollbackStats, SessionService, SessionServiceError, SessionServiceResult,
};
