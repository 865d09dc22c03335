//! The singleton operating-session record: "what session number are we in",
//! and the atomic advance/rollback of world state.

use super::{SessionDomainError, SessionId, Snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MAX_DESCRIPTION_LEN: usize = 500;

/// A discrete tick of simulated layout time. Modeled as a degenerate
/// single-record collection rather than module-level state, so the service
/// layer stays testable and concurrency-safe without globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingSession {
    id: SessionId,
    current_session_number: u32,
    session_date: DateTime<Utc>,
    description: String,
    previous_session_snapshot: Option<Snapshot>,
}

impl OperatingSession {
    /// Creates the first session record: `currentSessionNumber = 1`, the
    /// given timestamp, an empty description, and no snapshot.
    #[must_use]
    pub fn first(now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            current_session_number: 1,
            session_date: now,
            description: String::new(),
            previous_session_snapshot: None,
        }
    }

    /// Reconstructs a session from persisted fields.
    #[must_use]
    pub const fn from_parts(
        id: SessionId,
        current_session_number: u32,
        session_date: DateTime<Utc>,
        description: String,
        previous_session_snapshot: Option<Snapshot>,
    ) -> Self {
        Self {
            id,
            current_session_number,
            session_date,
            description,
            previous_session_snapshot,
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the current session number.
    #[must_use]
    pub const fn current_session_number(&self) -> u32 {
        self.current_session_number
    }

    /// Returns the timestamp this session state was last written at.
    #[must_use]
    pub const fn session_date(&self) -> DateTime<Utc> {
        self.session_date
    }

    /// Returns the session description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the captured pre-advance snapshot, present iff the last
    /// operation was an advance that has not been rolled back.
    #[must_use]
    pub const fn previous_session_snapshot(&self) -> Option<&Snapshot> {
        self.previous_session_snapshot.as_ref()
    }

    /// Returns whether `rollbackSession` may proceed: session number greater
    /// than 1, and a snapshot present.
    #[must_use]
    pub const fn can_roll_back(&self) -> bool {
        self.current_session_number > 1 && self.previous_session_snapshot.is_some()
    }

    /// Advances to the next session, embedding `snapshot` as the
    /// pre-advance world state. This is the singleton write step; the
    /// caller is responsible for performing the car/train mutations the
    /// advance algorithm requires before calling this.
    pub fn advance(&mut self, snapshot: Snapshot, now: DateTime<Utc>, description: Option<String>) {
        self.current_session_number = self.current_session_number.saturating_add(1);
        self.session_date = now;
        self.description = description
            .unwrap_or_else(|| format!("Operating session {}", self.current_session_number));
        self.previous_session_snapshot = Some(snapshot);
    }

    /// Rolls back to the previous session, clearing the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::CannotRollback`] if
    /// [`Self::can_roll_back`] is `false`.
    pub fn rollback(
        &mut self,
        now: DateTime<Utc>,
        description: Option<String>,
    ) -> Result<Snapshot, SessionDomainError> {
        if self.current_session_number <= 1 {
            return Err(SessionDomainError::CannotRollback(
                "already at session 1",
            ));
        }
        let Some(snapshot) = self.previous_session_snapshot.take() else {
            return Err(SessionDomainError::CannotRollback("no snapshot present"));
        };
        self.current_session_number = self.current_session_number.saturating_sub(1);
        self.session_date = now;
        self.description = description
            .unwrap_or_else(|| format!("Rolled back to session {}", self.current_session_number));
        Ok(snapshot)
    }

    /// Replaces the session description.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::InvalidDescription`] if `description`
    /// is empty or exceeds 500 characters.
    pub fn update_description(
        &mut self,
        description: String,
        now: DateTime<Utc>,
    ) -> Result<(), SessionDomainError> {
        if description.is_empty() || description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(SessionDomainError::InvalidDescription(
                description.chars().count(),
            ));
        }
        self.description = description;
        self.session_date = now;
        Ok(())
    }
}
