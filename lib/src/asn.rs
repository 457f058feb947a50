use std::{fmt, str::FromStr};

use rpsl::names::AutNum;

use crate::error::Error;

/// An autonomous system number.
///
/// Parsed from either the bare number (`65000`) or the RPSL `aut-num` form (`AS65000`, with the
/// prefix matched case-insensitively), and always displayed in the latter form.
///
/// # Examples
///
/// ```
/// use ripe_routes::Asn;
///
/// let asn: Asn = "as13238".parse()?;
/// assert_eq!(asn, "13238".parse()?);
/// assert_eq!(asn.to_string(), "AS13238");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Asn(u32);

impl Asn {
    /// Construct a new [`Asn`].
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Convert to the RPSL `aut-num` name used in IRR queries.
    ///
    /// # Errors
    ///
    /// An [`Error::Parse`] is returned if the RPSL parser rejects the name.
    pub fn to_autnum(self) -> Result<AutNum, Error> {
        Ok(self.to_string().parse()?)
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl FromStr for Asn {
    type Err = ParseAsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = match s.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("as") => &s[2..],
            _ => s,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAsnError(s.to_string()));
        }
        digits
            .parse()
            .map(Self)
            .map_err(|_| ParseAsnError(s.to_string()))
    }
}

/// Error returned when parsing an invalid [`Asn`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid AS number '{0}': expected 'AS' followed by a number from 0 to 4294967295")]
pub struct ParseAsnError(String);
