//! Validation errors for reference data and rolling stock.

use super::{AarTypeId, IndustryId, StationId};
use thiserror::Error;

/// Errors returned while constructing or validating roster domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterDomainError {
    /// A station reference does not resolve to a known station.
    #[error("station {0} does not exist")]
    UnknownStation(StationId),

    /// An AAR type reference does not resolve to a known type.
    #[error("AAR type {0} does not exist")]
    UnknownAarType(AarTypeId),

    /// An industry reference does not resolve to a known industry.
    #[error("industry {0} does not exist")]
    UnknownIndustry(IndustryId),

    /// An industry was required to be a yard (route origin/termination) but
    /// is not flagged as one.
    #[error("industry {0} is not a yard")]
    NotAYard(IndustryId),

    /// An AAR type code was empty or already used by another AAR type.
    #[error("invalid or duplicate AAR type code: {0}")]
    InvalidAarTypeCode(String),

    /// An industry's demand configuration has more than one entry for the
    /// same `(goodsId, direction)` pair.
    #[error("industry {industry} has duplicate demand config for goods {goods_id} direction {direction:?}")]
    DuplicateDemandConfig {
        /// The offending industry.
        industry: IndustryId,
        /// The goods identifier shared by the duplicate configs.
        goods_id: String,
        /// The direction shared by the duplicate configs.
        direction: super::Direction,
    },

    /// A demand config's `compatibleCarTypes` set was empty.
    #[error("demand config for industry {0} must name at least one compatible car type")]
    EmptyCompatibleCarTypes(IndustryId),

    /// A demand config's `carsPerSession` or `frequency` was zero.
    #[error("demand config for industry {0} must have carsPerSession >= 1 and frequency >= 1")]
    InvalidDemandQuantities(IndustryId),

    /// A route's station sequence referenced a station id more than zero
    /// times but failed to resolve it against the roster.
    #[error("route station sequence references unknown station {0}")]
    UnknownRouteStation(StationId),

    /// A route's name was empty, or collided with an existing route.
    #[error("invalid or duplicate route name: {0}")]
    InvalidRouteName(String),

    /// A locomotive's reporting number was not 1-6 digits.
    #[error("invalid reporting number: {0}")]
    InvalidReportingNumber(String),

    /// A locomotive has `isDCC = true` but no (or an out-of-range) DCC
    /// address, or `isDCC = false` with an address set.
    #[error("invalid DCC address for locomotive (isDCC={is_dcc}): {address:?}")]
    InvalidDccAddress {
        /// Whether the locomotive is flagged as DCC-equipped.
        is_dcc: bool,
        /// The offending address, if any was supplied.
        address: Option<u32>,
    },

    /// A (reportingMarks, reportingNumber) pair collided with an existing
    /// locomotive or car.
    #[error("reporting marks/number already in use: {0} {1}")]
    DuplicateReportingMarks(String, String),

    /// A DCC address collided with another in-service DCC locomotive.
    #[error("DCC address already in use: {0}")]
    DuplicateDccAddress(u32),
}
