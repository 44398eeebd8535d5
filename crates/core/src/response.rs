use alloc::vec::Vec;

use crate::{DecodeError, FieldElement};

/// A verifier response: `[indicator, declared count, payload...]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseVector {
    elements: Vec<FieldElement>,
}

impl ResponseVector {
    /// Number of header elements preceding the payload.
    pub const HEADER_LEN: usize = 2;

    pub fn new(elements: Vec<FieldElement>) -> Result<Self, DecodeError> {
        if elements.len() < Self::HEADER_LEN {
            return Err(DecodeError::EmptyOrMalformedVector {
                len: elements.len(),
            });
        }

        Ok(Self { elements })
    }

    /// Option indicator; zero encodes `Some`.
    pub fn indicator(&self) -> FieldElement {
        self.elements[0]
    }

    /// Returns `true` if the indicator is the `Some` sentinel.
    pub fn is_some(&self) -> bool {
        self.indicator().is_zero()
    }

    /// The count reported by the response itself. Advisory only.
    pub fn declared_count(&self) -> FieldElement {
        self.elements[1]
    }

    pub fn payload(&self) -> &[FieldElement] {
        &self.elements[Self::HEADER_LEN..]
    }

    pub fn elements(&self) -> &[FieldElement] {
        &self.elements
    }
}

impl TryFrom<Vec<FieldElement>> for ResponseVector {
    type Error = DecodeError;

    fn try_from(elements: Vec<FieldElement>) -> Result<Self, Self::Error> {
        Self::new(elements)
    }
}
