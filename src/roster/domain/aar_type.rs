//! AAR type reference data (boxcar, flatcar, and so on).

use super::{AarTypeId, RosterDomainError};
use serde::{Deserialize, Serialize};

/// A railroad-industry code classifying a freight car by physical design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AarType {
    id: AarTypeId,
    code: String,
    description: String,
}

impl AarType {
    /// Creates a new AAR type.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::InvalidAarTypeCode`] if `code` is empty
    /// after trimming. Cross-record uniqueness of `code` is enforced by the
    /// repository, not here.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Result<Self, RosterDomainError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(RosterDomainError::InvalidAarTypeCode(code));
        }
        Ok(Self {
            id: AarTypeId::new(),
            code,
            description: description.into(),
        })
    }

    /// Reconstructs an AAR type from persisted fields.
    #[must_use]
    pub const fn from_parts(id: AarTypeId, code: String, description: String) -> Self {
        Self { id, code, description }
    }

    /// Returns the AAR type identifier.
    #[must_use]
    pub const fn id(&self) -> AarTypeId {
        self.id
    }

    /// Returns the AAR type code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the AAR type description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_or_whitespace_only_code() {
        assert!(matches!(
            AarType::new("", "Boxcar"),
            Err(RosterDomainError::InvalidAarTypeCode(_))
        ));
        assert!(matches!(
            AarType::new("   ", "Boxcar"),
            Err(RosterDomainError::InvalidAarTypeCode(_))
        ));
    }

    #[test]
    fn accepts_a_trimmed_nonempty_code() {
        let aar_type = AarType::new("XM", "Boxcar").expect("valid code");
        assert_eq!(aar_type.code(), "XM");
        assert_eq!(aar_type.description(), "Boxcar");
    }
}
