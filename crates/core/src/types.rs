use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::FieldElement;

/// The locally held inputs the verifier outputs are checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// The reference digest, as decimal byte values.
    pub hashed_message: Vec<u8>,

    /// Passed through as-is; only the flattened layout decodes an address.
    pub expected_address: FieldElement,
}

impl ReferenceRecord {
    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
