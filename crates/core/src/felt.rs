use alloc::{
    string::{String, ToString as _},
    vec::Vec,
};
use core::{fmt, str::FromStr};

use num_bigint::BigUint;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::FeltError;

/// Width of a field element, in bytes.
pub const FELT_BYTES: usize = 32;

/// An opaque limb of a verifier response.
///
/// The value is kept as 32 big-endian bytes. No field arithmetic is performed
/// on it; the decoder only checks it against zero and truncates it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldElement([u8; FELT_BYTES]);

impl FieldElement {
    pub const ZERO: Self = Self([0u8; FELT_BYTES]);

    pub const fn from_be_bytes(bytes: [u8; FELT_BYTES]) -> Self {
        Self(bytes)
    }

    /// Builds an element from big-endian bytes, ignoring leading zeroes.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, FeltError> {
        let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        let bytes = &bytes[start..];

        if bytes.len() > FELT_BYTES {
            return Err(FeltError::Overflow { len: bytes.len() });
        }

        let mut out = [0u8; FELT_BYTES];

        out[FELT_BYTES - bytes.len()..].copy_from_slice(bytes);

        Ok(Self(out))
    }

    pub const fn to_be_bytes(&self) -> [u8; FELT_BYTES] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Truncates the element to its low 8 bits.
    pub const fn low_u8(&self) -> u8 {
        self.0[FELT_BYTES - 1]
    }

    /// Returns `true` if truncation with [`Self::low_u8`] loses no bits.
    pub fn fits_u8(&self) -> bool {
        self.0[..FELT_BYTES - 1].iter().all(|b| *b == 0)
    }

    /// Big-endian bytes without leading zeroes; empty for zero.
    pub fn significant_bytes(&self) -> &[u8] {
        let start = self.0.iter().position(|b| *b != 0).unwrap_or(FELT_BYTES);

        &self.0[start..]
    }

    pub fn to_decimal_string(&self) -> String {
        BigUint::from_bytes_be(&self.0).to_string()
    }
}

impl From<u8> for FieldElement {
    fn from(value: u8) -> Self {
        Self::from(value as u64)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        let mut out = [0u8; FELT_BYTES];

        out[FELT_BYTES - 8..].copy_from_slice(&value.to_be_bytes());

        Self(out)
    }
}

impl FromStr for FieldElement {
    type Err = FeltError;

    /// Parses `0x`-prefixed hex or base-10 text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || FeltError::InvalidDigit {
            token: s.to_string(),
        };

        if s.is_empty() {
            return Err(FeltError::Empty);
        }

        if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if digits.is_empty() {
                return Err(invalid());
            }

            let digits = if digits.len() % 2 == 1 {
                ["0", digits].concat()
            } else {
                digits.to_string()
            };
            let bytes = hex::decode(digits).map_err(|_| invalid())?;

            return Self::from_be_slice(&bytes);
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let value = BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(invalid)?;

        Self::from_be_slice(&value.to_bytes_be())
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = hex::encode(self.significant_bytes());
        let digits = digits.trim_start_matches('0');

        if f.alternate() {
            f.write_str("0x")?;
        }

        if digits.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(digits)
        }
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FeltVisitor;

        impl de::Visitor<'_> for FeltVisitor {
            type Value = FieldElement;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a hex string, a decimal string or an unsigned integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(FieldElement::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(FieldElement::from)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(FeltVisitor)
    }
}

/// Parses a textual felt list such as `[0x0, 0x20, 0xee, 0x0]`.
///
/// Brackets are optional, tokens are separated by commas and/or whitespace
/// and may be quoted, so a JSON array of numbers or strings parses as well.
pub fn parse_felt_array(input: &str) -> Result<Vec<FieldElement>, FeltError> {
    let input = input.trim();
    let input = input
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(input);

    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|t| t.trim_matches('"'))
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, vec};

    #[test]
    fn parses_hex_and_decimal() {
        let hex: FieldElement = "0xee".parse().unwrap();
        let dec: FieldElement = "238".parse().unwrap();

        assert_eq!(hex, dec);
        assert_eq!(hex.low_u8(), 0xee);
        assert!(hex.fits_u8());
        assert_eq!("0x7".parse::<FieldElement>().unwrap(), FieldElement::from(7u8));
    }

    #[test]
    fn rejects_invalid_text() {
        assert_eq!("".parse::<FieldElement>(), Err(FeltError::Empty));
        assert!(matches!(
            "0xzz".parse::<FieldElement>(),
            Err(FeltError::InvalidDigit { .. })
        ));
        assert!(matches!(
            "-1".parse::<FieldElement>(),
            Err(FeltError::InvalidDigit { .. })
        ));
        assert!(matches!(
            "0x".parse::<FieldElement>(),
            Err(FeltError::InvalidDigit { .. })
        ));
    }

    #[test]
    fn rejects_wider_than_256_bits() {
        let wide = format!("0x1{}", "00".repeat(32));

        assert_eq!(
            wide.parse::<FieldElement>(),
            Err(FeltError::Overflow { len: 33 })
        );

        let max = format!("0x{}", "ff".repeat(32));

        assert!(max.parse::<FieldElement>().is_ok());
    }

    #[test]
    fn displays_minimal_hex() {
        assert_eq!(format!("{}", FieldElement::ZERO), "0x0");
        assert_eq!(format!("{}", FieldElement::from(0x20u8)), "0x20");
        assert_eq!(format!("{}", FieldElement::from(0x7u8)), "0x7");
        assert_eq!(format!("{:x}", FieldElement::from(0x1234u64)), "1234");
        assert_eq!(FieldElement::from(0x20u8).to_decimal_string(), "32");
    }

    #[test]
    fn truncation_keeps_low_byte() {
        let felt: FieldElement = "0x1ff".parse().unwrap();

        assert_eq!(felt.low_u8(), 0xff);
        assert!(!felt.fits_u8());
        assert!(!felt.is_zero());
        assert!(FieldElement::ZERO.is_zero());
    }

    #[test]
    fn parses_felt_arrays() {
        let felts = parse_felt_array("[0x0, 0x20,\n 0xee 7]").unwrap();

        assert_eq!(
            felts,
            vec![
                FieldElement::ZERO,
                FieldElement::from(0x20u8),
                FieldElement::from(0xeeu8),
                FieldElement::from(7u8),
            ]
        );

        let json = parse_felt_array(r#"["0x1", 2, "3"]"#).unwrap();

        assert_eq!(json.len(), 3);
        assert_eq!(json[1], FieldElement::from(2u8));
        assert_eq!(parse_felt_array("[]").unwrap(), Vec::new());
        assert!(parse_felt_array("[0x1, nope]").is_err());
    }

    #[test]
    fn serde_accepts_numbers_and_strings() {
        let felts: Vec<FieldElement> = serde_json::from_str(r#"["0x2a", "42", 42]"#).unwrap();

        assert!(felts.iter().all(|f| *f == FieldElement::from(42u8)));
        assert_eq!(
            serde_json::to_string(&FieldElement::from(42u8)).unwrap(),
            r#""0x2a""#
        );
        assert!(serde_json::from_str::<FieldElement>("-1").is_err());
    }
}
