use std::io::Write;

use felt_response_check::{DecodeWarning, FieldElement, Strategy, Verdict};
use serde::Serialize;

/// Everything gathered while checking one response.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub indicator: FieldElement,
    pub declared_count: FieldElement,
    pub payload_len: usize,
    pub strategy: Strategy,
    pub received: Vec<u8>,
    pub expected: Vec<u8>,
    pub decoded_address: Option<FieldElement>,
    pub expected_address: FieldElement,
    pub verdict: Verdict,

    /// Decode warnings fail the check.
    pub strict: bool,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid() && !(self.strict && !self.verdict.warnings.is_empty())
    }
}

/// Consumes a finished [`Report`].
pub trait Reporter {
    fn report(&mut self, report: &Report) -> anyhow::Result<()>;
}

/// Human readable summary.
pub struct ConsoleReporter<W> {
    out: W,
    max_listed: usize,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, max_listed: usize) -> Self {
        Self { out, max_listed }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, report: &Report) -> anyhow::Result<()> {
        let out = &mut self.out;

        writeln!(out, "response:")?;
        writeln!(out, "  option indicator: {}", report.indicator)?;
        writeln!(
            out,
            "  declared count: {} ({})",
            report.declared_count.to_decimal_string(),
            report.declared_count
        )?;
        writeln!(out, "  payload elements: {}", report.payload_len)?;
        writeln!(out, "  strategy: {:?}", report.strategy)?;
        writeln!(out, "expected digest: {:?}", report.expected)?;
        writeln!(out, "received digest: {:?}", report.received)?;

        for warning in &report.verdict.warnings {
            match warning {
                DecodeWarning::NonZeroPairViolation { pair_index, a, b } => writeln!(
                    out,
                    "warning: non-zero limb pair {pair_index}: [{a}, {b}]"
                )?,
                DecodeWarning::OversizedByte { index, value } => {
                    writeln!(out, "warning: byte {index} does not fit in 8 bits: {value}")?
                }
            }
        }

        let digest = &report.verdict.digest;

        if digest.matched {
            writeln!(out, "digest matches the reference.")?;
        } else {
            writeln!(
                out,
                "digest does not match the reference ({} differing bytes):",
                digest.mismatches.len()
            )?;

            for m in digest.mismatches.iter().take(self.max_listed) {
                writeln!(
                    out,
                    "  index {}: expected={}, received={}",
                    m.index, m.expected, m.actual
                )?;
            }

            if digest.mismatches.len() > self.max_listed {
                writeln!(out, "  ...")?;
            }
        }

        match report.verdict.address_matched {
            Some(true) => writeln!(out, "address matches `{}`.", report.expected_address)?,
            Some(false) => writeln!(
                out,
                "address mismatch: expected `{}`, received `{}`.",
                report.expected_address,
                report.decoded_address.unwrap_or_default()
            )?,
            None => writeln!(out, "address not carried by the `{:?}` layout.", report.strategy)?,
        }

        writeln!(
            out,
            "verdict: {}",
            if report.is_valid() { "valid" } else { "invalid" }
        )?;

        Ok(())
    }
}

/// Machine readable report.
pub struct JsonReporter<W> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, report: &Report) -> anyhow::Result<()> {
        #[derive(Serialize)]
        struct Output<'a> {
            valid: bool,
            report: &'a Report,
        }

        let output = Output {
            valid: report.is_valid(),
            report,
        };

        serde_json::to_writer_pretty(&mut self.out, &output)?;
        writeln!(self.out)?;

        Ok(())
    }
}
