use felt_response_check::{check, DecodeStrategy, ResponseVector, Strategy};

mod report;
mod source;

pub use report::*;
pub use source::*;

/// Decodes `response`, checks it against the reference from `source` and
/// hands the result to `reporter`. Returns `true` if the response is valid.
pub async fn run_check<S, R>(
    response: &ResponseVector,
    source: &S,
    strategy: Strategy,
    strict: bool,
    reporter: &mut R,
) -> anyhow::Result<bool>
where
    S: ReferenceSource,
    R: Reporter,
{
    if !response.is_some() {
        tracing::warn!(
            "option indicator is `{}`, expected the `Some` sentinel `0x0`...",
            response.indicator()
        );
    }

    let reference = source.load().await?;
    let decoded = strategy.decode(response)?;

    tracing::debug!(
        "decoded digest `{}` with {} warnings...",
        hex::encode(decoded.digest),
        decoded.warnings.len()
    );

    for warning in &decoded.warnings {
        tracing::warn!("decode warning: {warning:?}");
    }

    let verdict = check(&decoded, &reference)?;
    let report = Report {
        indicator: response.indicator(),
        declared_count: response.declared_count(),
        payload_len: response.payload().len(),
        strategy,
        received: decoded.digest.to_vec(),
        expected: reference.hashed_message,
        decoded_address: decoded.address,
        expected_address: reference.expected_address,
        verdict,
        strict,
    };

    reporter.report(&report)?;

    Ok(report.is_valid())
}

#[cfg(test)]
mod tests {
    use felt_response_check::{
        parse_felt_array, CompareError, FieldElement, ReferenceRecord, DIGEST_LEN,
    };

    use super::*;

    fn sample() -> (ResponseVector, ReferenceRecord) {
        let response = include_str!("../../../assets/response.txt");
        let response = ResponseVector::new(parse_felt_array(response).unwrap()).unwrap();
        let reference = include_bytes!("../../../assets/inputs.json");
        let reference = ReferenceRecord::from_json_slice(reference).unwrap();

        (response, reference)
    }

    #[tokio::test]
    async fn sample_checks_out() {
        let (response, reference) = sample();
        let mut reporter = ConsoleReporter::new(Vec::new(), 5);

        let valid = run_check(
            &response,
            &InMemoryReference(reference),
            Strategy::Paired,
            true,
            &mut reporter,
        )
        .await
        .unwrap();

        assert!(valid);

        let out = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(out.contains("declared count: 32 (0x20)"));
        assert!(out.contains("payload elements: 64"));
        assert!(out.contains("verdict: valid"));
    }

    #[tokio::test]
    async fn tampered_reference_fails() {
        let (response, mut reference) = sample();

        reference.hashed_message[0] = 0;

        let mut reporter = JsonReporter::new(Vec::new());
        let valid = run_check(
            &response,
            &InMemoryReference(reference),
            Strategy::Paired,
            false,
            &mut reporter,
        )
        .await
        .unwrap();

        assert!(!valid);
    }

    #[tokio::test]
    async fn short_reference_is_a_length_mismatch() {
        let (response, mut reference) = sample();

        reference.hashed_message.truncate(16);

        let mut reporter = JsonReporter::new(Vec::new());
        let err = run_check(
            &response,
            &InMemoryReference(reference),
            Strategy::Paired,
            false,
            &mut reporter,
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<CompareError>(),
            Some(&CompareError::LengthMismatch {
                actual_len: DIGEST_LEN,
                expected_len: 16,
            })
        );
        assert!(reporter.into_inner().is_empty());
    }

    #[tokio::test]
    async fn flattened_layout_checks_address() {
        let (_, reference) = sample();
        let mut elements = vec![FieldElement::ZERO, FieldElement::from(33u8)];

        elements.push(reference.expected_address);
        elements.extend(reference.hashed_message.iter().map(|b| FieldElement::from(*b)));

        let response = ResponseVector::new(elements).unwrap();
        let mut reporter = ConsoleReporter::new(Vec::new(), 5);
        let valid = run_check(
            &response,
            &InMemoryReference(reference),
            Strategy::Flattened,
            false,
            &mut reporter,
        )
        .await
        .unwrap();

        assert!(valid);

        let out = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(out.contains("address matches `0x71c7656ec7ab88b098defb751b7401b5f6d8976f`."));
    }
}
