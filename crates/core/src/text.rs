//! Starknet short strings: up to 31 ASCII bytes packed big-endian in a felt.

use alloc::{string::String, vec::Vec};

use crate::{FeltError, FieldElement};

/// Maximum number of bytes a short string can hold.
pub const SHORT_STRING_MAX: usize = 31;

pub fn felt_to_string(felt: &FieldElement) -> Result<String, FeltError> {
    let bytes = felt.significant_bytes();

    if !bytes.is_ascii() {
        return Err(FeltError::NonAscii);
    }

    String::from_utf8(bytes.to_vec()).map_err(|_| FeltError::NonAscii)
}

pub fn string_to_felt(text: &str) -> Result<FieldElement, FeltError> {
    if !text.is_ascii() {
        return Err(FeltError::NonAscii);
    }

    if text.len() > SHORT_STRING_MAX {
        return Err(FeltError::ShortStringTooLong { len: text.len() });
    }

    FieldElement::from_be_slice(text.as_bytes())
}

/// Splits `text` into consecutive short strings.
pub fn string_to_felts(text: &str) -> Result<Vec<FieldElement>, FeltError> {
    if !text.is_ascii() {
        return Err(FeltError::NonAscii);
    }

    text.as_bytes()
        .chunks(SHORT_STRING_MAX)
        .map(FieldElement::from_be_slice)
        .collect()
}

/// Text recovered from a felt array.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,

    /// Indices of non-zero felts that do not hold ASCII.
    pub skipped: Vec<usize>,
}

/// Concatenates the short strings of `felts`.
///
/// Zero felts are padding or length markers and are dropped.
pub fn felts_to_string(felts: &[FieldElement]) -> DecodedText {
    let mut decoded = DecodedText::default();

    for (i, felt) in felts.iter().enumerate().filter(|(_, f)| !f.is_zero()) {
        match felt_to_string(felt) {
            Ok(s) => decoded.text.push_str(&s),
            Err(_) => decoded.skipped.push(i),
        }
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_felt_array;
    use alloc::vec;

    #[test]
    fn short_string_roundtrip() {
        let felt = string_to_felt("hello").unwrap();

        assert_eq!(felt.to_decimal_string(), "448378203247");
        assert_eq!(felt_to_string(&felt).unwrap(), "hello");
        assert_eq!(felt_to_string(&FieldElement::ZERO).unwrap(), "");
    }

    #[test]
    fn short_string_limits() {
        assert_eq!(
            string_to_felt(&"a".repeat(32)),
            Err(FeltError::ShortStringTooLong { len: 32 })
        );
        assert_eq!(string_to_felt("caf\u{e9}"), Err(FeltError::NonAscii));
        assert_eq!(string_to_felts(&"a".repeat(63)).unwrap().len(), 3);
    }

    #[test]
    fn decodes_byte_array_response() {
        let felts = parse_felt_array(
            "[0x2, 0x68747470733a2f2f697066732e696f2f697066732f516d646e323837666757, \
             0x387367456a64476a5858426258786846585a67383861657043717033386d36, \
             0x6551623539, 0x5]",
        )
        .unwrap();

        let decoded = felts_to_string(&felts[1..]);

        assert_eq!(
            decoded.text,
            "https://ipfs.io/ipfs/Qmdn287fgW8sgEjdGjXXBbXxhFXZg88aepCqp38m6eQb59\u{5}"
        );
        assert!(decoded.skipped.is_empty());
    }

    #[test]
    fn skips_non_ascii_felts() {
        let felts = vec![
            FieldElement::ZERO,
            string_to_felt("ok").unwrap(),
            FieldElement::from(0xffu8),
        ];
        let decoded = felts_to_string(&felts);

        assert_eq!(decoded.text, "ok");
        assert_eq!(decoded.skipped, vec![2]);
    }
}
