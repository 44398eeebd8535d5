use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::{DecodeError, FieldElement, ResponseVector};

/// Length of the decoded digest, in bytes.
pub const DIGEST_LEN: usize = 32;

/// A hash digest recovered from a response payload.
pub type DecodedDigest = [u8; DIGEST_LEN];

/// A non-fatal anomaly found while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// Both limbs of a pair were non-zero; the first limb was truncated.
    NonZeroPairViolation {
        pair_index: usize,
        a: FieldElement,
        b: FieldElement,
    },

    /// A byte element did not fit in 8 bits and was truncated.
    OversizedByte { index: usize, value: FieldElement },
}

/// The public outputs recovered from a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedOutputs {
    pub digest: DecodedDigest,

    /// The address, for strategies whose layout carries it.
    pub address: Option<FieldElement>,

    pub warnings: Vec<DecodeWarning>,
}

/// A layout of the public outputs inside a response payload.
pub trait DecodeStrategy {
    fn decode(&self, response: &ResponseVector) -> Result<DecodedOutputs, DecodeError>;
}

/// Every digest byte is widened to a two-limb value, one limb of which is zero.
///
/// The payload is read two limbs at a time. A pair `(0, b)` decodes to `b`, a
/// pair `(a, 0)` to `a`, and a pair with two non-zero limbs decodes to the
/// first limb while recording a [`DecodeWarning::NonZeroPairViolation`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PairedLimbs;

impl PairedLimbs {
    pub const PAYLOAD_LEN: usize = 2 * DIGEST_LEN;
}

impl DecodeStrategy for PairedLimbs {
    fn decode(&self, response: &ResponseVector) -> Result<DecodedOutputs, DecodeError> {
        let payload = response.payload();

        if payload.len() != Self::PAYLOAD_LEN {
            return Err(DecodeError::UnexpectedPayloadLength {
                observed: payload.len(),
            });
        }

        let mut digest = [0u8; DIGEST_LEN];
        let mut warnings = Vec::new();

        for (pair_index, (pair, byte)) in payload.chunks_exact(2).zip(&mut digest).enumerate() {
            let (a, b) = (pair[0], pair[1]);

            *byte = if a.is_zero() {
                b.low_u8()
            } else if b.is_zero() {
                a.low_u8()
            } else {
                warnings.push(DecodeWarning::NonZeroPairViolation { pair_index, a, b });
                a.low_u8()
            };
        }

        Ok(DecodedOutputs {
            digest,
            address: None,
            warnings,
        })
    }
}

/// One limb for the address followed by one limb per digest byte.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlattenedOutputs;

impl FlattenedOutputs {
    pub const PAYLOAD_LEN: usize = 1 + DIGEST_LEN;
}

impl DecodeStrategy for FlattenedOutputs {
    fn decode(&self, response: &ResponseVector) -> Result<DecodedOutputs, DecodeError> {
        let payload = response.payload();

        if payload.len() != Self::PAYLOAD_LEN {
            return Err(DecodeError::UnexpectedPayloadLength {
                observed: payload.len(),
            });
        }

        let mut digest = [0u8; DIGEST_LEN];
        let mut warnings = Vec::new();

        for (i, (value, byte)) in payload[1..].iter().zip(&mut digest).enumerate() {
            if !value.fits_u8() {
                warnings.push(DecodeWarning::OversizedByte {
                    index: i,
                    value: *value,
                });
            }

            *byte = value.low_u8();
        }

        Ok(DecodedOutputs {
            digest,
            address: Some(payload[0]),
            warnings,
        })
    }
}

/// Runtime selection of a [`DecodeStrategy`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Paired,
    Flattened,
}

impl DecodeStrategy for Strategy {
    fn decode(&self, response: &ResponseVector) -> Result<DecodedOutputs, DecodeError> {
        match self {
            Strategy::Paired => PairedLimbs.decode(response),
            Strategy::Flattened => FlattenedOutputs.decode(response),
        }
    }
}

/// Decodes the response with the [`PairedLimbs`] layout.
pub fn decode(response: &ResponseVector) -> Result<DecodedOutputs, DecodeError> {
    PairedLimbs.decode(response)
}
