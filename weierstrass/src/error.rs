//! Error types.

use core::fmt::{self, Display};

/// Group arithmetic errors.
///
/// Arithmetic itself is total: only curve construction, point construction,
/// decoding and explicit subgroup checks can fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Malformed curve coefficient, generator or order parameter, or a
    /// parameter which doesn't match the field it is meant for.
    InvalidParameter,

    /// Wrong buffer length, bad tag or flag byte, non-canonical field
    /// element, or an `x`-coordinate without a matching `y`.
    InvalidEncoding,

    /// Coordinates which don't satisfy the curve equation.
    InvalidPoint,

    /// Point outside of the configured prime order subgroup.
    InvalidOrder,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidParameter => "invalid curve parameter",
            Error::InvalidEncoding => "invalid point encoding",
            Error::InvalidPoint => "point is not on the curve",
            Error::InvalidOrder => "point is not in the prime order subgroup",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
