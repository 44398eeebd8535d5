use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::{CompareError, DecodeWarning, DecodedOutputs, ReferenceRecord};

/// A differing index between a decoded and a reference sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub index: usize,
    pub expected: u8,
    pub actual: u8,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub matched: bool,

    /// Every differing index, in ascending order.
    pub mismatches: Vec<Mismatch>,
}

/// Compares `actual` against `expected`, element by element.
pub fn compare(actual: &[u8], expected: &[u8]) -> Result<ComparisonResult, CompareError> {
    if actual.len() != expected.len() {
        return Err(CompareError::LengthMismatch {
            actual_len: actual.len(),
            expected_len: expected.len(),
        });
    }

    let mismatches: Vec<_> = actual
        .iter()
        .zip(expected)
        .enumerate()
        .filter(|(_, (a, e))| a != e)
        .map(|(index, (a, e))| Mismatch {
            index,
            expected: *e,
            actual: *a,
        })
        .collect();

    Ok(ComparisonResult {
        matched: mismatches.is_empty(),
        mismatches,
    })
}

/// The outcome of checking decoded outputs against a reference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub digest: ComparisonResult,

    /// `None` when the decoding strategy does not carry the address.
    pub address_matched: Option<bool>,

    pub warnings: Vec<DecodeWarning>,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        self.digest.matched && self.address_matched != Some(false)
    }
}

pub fn check(
    decoded: &DecodedOutputs,
    reference: &ReferenceRecord,
) -> Result<Verdict, CompareError> {
    let digest = compare(&decoded.digest, &reference.hashed_message)?;
    let address_matched = decoded
        .address
        .map(|address| address == reference.expected_address);

    Ok(Verdict {
        digest,
        address_matched,
        warnings: decoded.warnings.clone(),
    })
}
