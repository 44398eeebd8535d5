use std::{future::Future, path::PathBuf};

use anyhow::Context as _;
use felt_response_check::{parse_felt_array, ReferenceRecord, ResponseVector};

/// Yields the reference record the response is checked against.
pub trait ReferenceSource {
    fn load(&self) -> impl Future<Output = anyhow::Result<ReferenceRecord>> + Send;
}

/// A JSON reference record on disk.
#[derive(Debug, Clone)]
pub struct FileReference {
    path: PathBuf,
}

impl FileReference {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl ReferenceSource for FileReference {
    async fn load(&self) -> anyhow::Result<ReferenceRecord> {
        tracing::debug!("reading reference `{}`...", self.path.display());

        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read `{}`", self.path.display()))?;

        let record = ReferenceRecord::from_json_slice(&bytes)
            .with_context(|| format!("failed to parse `{}`", self.path.display()))?;

        tracing::info!("reference loaded from `{}`.", self.path.display());

        Ok(record)
    }
}

/// An already resolved reference record.
#[derive(Debug, Clone)]
pub struct InMemoryReference(pub ReferenceRecord);

impl ReferenceSource for InMemoryReference {
    async fn load(&self) -> anyhow::Result<ReferenceRecord> {
        Ok(self.0.clone())
    }
}

/// Reads a response either inline (`[0x0, 0x20, ...]`) or from a file.
pub async fn load_response(arg: &str) -> anyhow::Result<ResponseVector> {
    let text = if is_inline_list(arg) {
        arg.to_string()
    } else {
        tokio::fs::read_to_string(arg)
            .await
            .with_context(|| format!("failed to read response `{arg}`"))?
    };

    let elements = parse_felt_array(&text).context("failed to parse response")?;

    tracing::debug!("parsed {} response elements...", elements.len());

    Ok(ResponseVector::new(elements)?)
}

pub fn is_inline_list(arg: &str) -> bool {
    arg.contains('[') || arg.contains(',')
}
