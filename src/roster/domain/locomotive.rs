//! Locomotive rolling stock.

use super::{LocomotiveId, RosterDomainError};
use serde::{Deserialize, Serialize};

/// Locomotive manufacturer, drawn from a fixed enumeration of the makes
/// modeled by this layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Manufacturer {
    /// Electro-Motive Division.
    Emd,
    /// General Electric.
    Ge,
    /// American Locomotive Company.
    Alco,
    /// Baldwin Locomotive Works.
    Baldwin,
    /// Fairbanks-Morse.
    FairbanksMorse,
    /// Manufacturer not represented by a named enum member.
    Other,
}

fn is_digits_in_range(value: &str, min_len: usize, max_len: usize) -> bool {
    let len = value.chars().count();
    (min_len..=max_len).contains(&len) && value.chars().all(|ch| ch.is_ascii_digit())
}

/// A locomotive assigned to at most one non-terminal train at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locomotive {
    id: LocomotiveId,
    reporting_marks: String,
    reporting_number: String,
    model: String,
    manufacturer: Manufacturer,
    is_dcc: bool,
    dcc_address: Option<u32>,
    home_yard: super::IndustryId,
    is_in_service: bool,
}

impl Locomotive {
    /// Creates a new locomotive.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::InvalidReportingNumber`] if
    /// `reporting_number` is not 1-6 ASCII digits, or
    /// [`RosterDomainError::InvalidDccAddress`] if `is_dcc` and
    /// `dcc_address` disagree, or the address is outside `1..=9999`.
    #[expect(clippy::too_many_arguments, reason = "mirrors the flat persisted record shape")]
    pub fn new(
        reporting_marks: impl Into<String>,
        reporting_number: impl Into<String>,
        model: impl Into<String>,
        manufacturer: Manufacturer,
        is_dcc: bool,
        dcc_address: Option<u32>,
        home_yard: super::IndustryId,
        is_in_service: bool,
    ) -> Result<Self, RosterDomainError> {
        let reporting_number = reporting_number.into();
        if !is_digits_in_range(&reporting_number, 1, 6) {
            return Err(RosterDomainError::InvalidReportingNumber(reporting_number));
        }
        Self::validate_dcc_address(is_dcc, dcc_address)?;

        Ok(Self {
            id: LocomotiveId::new(),
            reporting_marks: reporting_marks.into(),
            reporting_number,
            model: model.into(),
            manufacturer,
            is_dcc,
            dcc_address,
            home_yard,
            is_in_service,
        })
    }

    fn validate_dcc_address(is_dcc: bool, dcc_address: Option<u32>) -> Result<(), RosterDomainError> {
        let in_range = dcc_address.is_some_and(|address| (1..=9999).contains(&address));
        let valid = if is_dcc { in_range } else { dcc_address.is_none() };
        if valid {
            Ok(())
        } else {
            Err(RosterDomainError::InvalidDccAddress {
                is_dcc,
                address: dcc_address,
            })
        }
    }

    /// Returns the locomotive identifier.
    #[must_use]
    pub const fn id(&self) -> LocomotiveId {
        self.id
    }

    /// Returns the reporting marks.
    #[must_use]
    pub fn reporting_marks(&self) -> &str {
        &self.reporting_marks
    }

    /// Returns the reporting number.
    #[must_use]
    pub fn reporting_number(&self) -> &str {
        &self.reporting_number
    }

    /// Returns the model designation.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the manufacturer.
    #[must_use]
    pub const fn manufacturer(&self) -> Manufacturer {
        self.manufacturer
    }

    /// Returns whether the locomotive is DCC-equipped.
    #[must_use]
    pub const fn is_dcc(&self) -> bool {
        self.is_dcc
    }

    /// Returns the DCC address, if any.
    #[must_use]
    pub const fn dcc_address(&self) -> Option<u32> {
        self.dcc_address
    }

    /// Returns the home yard industry id.
    #[must_use]
    pub const fn home_yard(&self) -> super::IndustryId {
        self.home_yard
    }

    /// Returns whether the locomotive is currently in service.
    #[must_use]
    pub const fn is_in_service(&self) -> bool {
        self.is_in_service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::domain::IndustryId;
    use rstest::rstest;

    #[rstest]
    #[case("1", true)]
    #[case("123456", true)]
    #[case("1234567", false)]
    #[case("", false)]
    #[case("12a", false)]
    fn reporting_number_must_be_one_to_six_digits(#[case] reporting_number: &str, #[case] valid: bool) {
        let result = Locomotive::new(
            "PRR",
            reporting_number,
            "GP9",
            Manufacturer::Emd,
            false,
            None,
            IndustryId::new(),
            true,
        );
        assert_eq!(result.is_ok(), valid);
    }

    #[rstest]
    #[case(false, None, true)]
    #[case(false, Some(5), false)]
    #[case(true, Some(1), true)]
    #[case(true, Some(9999), true)]
    #[case(true, Some(10000), false)]
    #[case(true, Some(0), false)]
    #[case(true, None, false)]
    fn dcc_address_must_agree_with_is_dcc(#[case] is_dcc: bool, #[case] dcc_address: Option<u32>, #[case] valid: bool) {
        let result = Locomotive::new("PRR", "100", "GP9", Manufacturer::Emd, is_dcc, dcc_address, IndustryId::new(), true);
        assert_eq!(result.is_ok(), valid);
    }
}
