//! City code types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid city code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid city code: {reason}")]
pub struct InvalidCityCode {
    reason: &'static str,
}

/// A valid 3-letter IATA-style city code.
///
/// City codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `CityCode` value is valid by construction. Codes order
/// lexicographically, which is what gives candidate sets their stable order.
///
/// # Examples
///
/// ```
/// use trip_server::domain::CityCode;
///
/// let bcn = CityCode::parse("BCN").unwrap();
/// assert_eq!(bcn.as_str(), "BCN");
///
/// // Lowercase is rejected by `parse`...
/// assert!(CityCode::parse("bcn").is_err());
/// // ...but accepted by `parse_normalized`.
/// assert_eq!(CityCode::parse_normalized(" bcn ").unwrap(), bcn);
///
/// // Wrong length is rejected
/// assert!(CityCode::parse("BC").is_err());
/// assert!(CityCode::parse("BCNX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityCode([u8; 3]);

impl CityCode {
    /// Parse a city code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCityCode> {
        let bytes = s.as_bytes();

        let [a, b, c] = bytes else {
            return Err(InvalidCityCode {
                reason: "must be exactly 3 characters",
            });
        };

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidCityCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(CityCode([*a, *b, *c]))
    }

    /// Parse a city code after trimming whitespace and uppercasing.
    ///
    /// Used at the edges of the system where codes arrive from users.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidCityCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the city code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for CityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CityCode({})", self.as_str())
    }
}

impl fmt::Display for CityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CityCode {
    type Err = InvalidCityCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CityCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CityCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CityCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(CityCode::parse("BCN").is_ok());
        assert!(CityCode::parse("NYC").is_ok());
        assert!(CityCode::parse("AAA").is_ok());
        assert!(CityCode::parse("ZZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(CityCode::parse("bcn").is_err());
        assert!(CityCode::parse("Bcn").is_err());
        assert!(CityCode::parse("BCn").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(CityCode::parse("").is_err());
        assert!(CityCode::parse("B").is_err());
        assert!(CityCode::parse("BC").is_err());
        assert!(CityCode::parse("BCNX").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(CityCode::parse("B1N").is_err());
        assert!(CityCode::parse("B-N").is_err());
        assert!(CityCode::parse("B N").is_err());
        assert!(CityCode::parse("BÖ").is_err());
    }

    #[test]
    fn normalized_parse_trims_and_uppercases() {
        assert_eq!(
            CityCode::parse_normalized("  lis\n").unwrap(),
            CityCode::parse("LIS").unwrap()
        );
        assert!(CityCode::parse_normalized("lisb").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = CityCode::parse("PAR").unwrap();
        assert_eq!(format!("{code}"), "PAR");
        assert_eq!(format!("{code:?}"), "CityCode(PAR)");
    }

    #[test]
    fn orders_lexicographically() {
        let mut codes = vec![
            CityCode::parse("ROM").unwrap(),
            CityCode::parse("AMS").unwrap(),
            CityCode::parse("MAD").unwrap(),
        ];
        codes.sort();
        let strs: Vec<_> = codes.iter().map(CityCode::as_str).collect();
        assert_eq!(strs, vec!["AMS", "MAD", "ROM"]);
    }

    #[test]
    fn serde_as_plain_string() {
        let code = CityCode::parse("ATH").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"ATH\"");

        let back: CityCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);

        assert!(serde_json::from_str::<CityCode>("\"ath\"").is_err());
    }
}
