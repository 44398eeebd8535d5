use alloc::string::String;

/// Failure to turn a response vector into public outputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The vector is shorter than the `[indicator, count]` header.
    #[error("response vector of length {len} is missing its header")]
    EmptyOrMalformedVector { len: usize },

    /// The payload does not have the length required by the decoding strategy.
    #[error("unexpected response payload length {observed}")]
    UnexpectedPayloadLength { observed: usize },
}

/// Failure to compare two byte sequences.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("decoded length {actual_len} does not match reference length {expected_len}")]
    LengthMismatch {
        actual_len: usize,
        expected_len: usize,
    },
}

/// Failure to parse or convert a field element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeltError {
    #[error("empty field element")]
    Empty,

    #[error("invalid field element `{token}`")]
    InvalidDigit { token: String },

    /// The value needs more than 32 bytes.
    #[error("field element of {len} bytes exceeds 32 bytes")]
    Overflow { len: usize },

    #[error("value is not ascii")]
    NonAscii,

    #[error("short string of {len} bytes exceeds 31 bytes")]
    ShortStringTooLong { len: usize },
}
