#![no_std]

extern crate alloc;

mod decoder;
mod error;
mod felt;
mod response;
mod text;
mod types;
mod verifier;

pub use decoder::*;
pub use error::*;
pub use felt::*;
pub use response::*;
pub use text::*;
pub use types::*;
pub use verifier::*;

#[test]
fn sample_response_matches_reference() {
    let response = include_str!("../../../assets/response.txt");
    let response = ResponseVector::new(parse_felt_array(response).unwrap()).unwrap();

    assert_eq!(response.elements().len(), 66);
    assert!(response.is_some());
    assert_eq!(response.declared_count(), FieldElement::from(0x20u8));

    let decoded = decode(&response).unwrap();

    assert_eq!(&decoded.digest[..5], &[0xee, 0x55, 0xc9, 0x9d, 0x12]);
    assert!(decoded.warnings.is_empty());

    let reference = include_bytes!("../../../assets/inputs.json");
    let mut reference = ReferenceRecord::from_json_slice(reference).unwrap();
    let verdict = check(&decoded, &reference).unwrap();

    assert!(verdict.is_valid());
    assert_eq!(verdict.address_matched, None);

    reference.hashed_message[31] ^= 1;

    let verdict = check(&decoded, &reference).unwrap();

    assert!(!verdict.is_valid());
    assert_eq!(
        verdict.digest.mismatches,
        [Mismatch {
            index: 31,
            expected: 0x55,
            actual: 0x54,
        }]
    );
}
