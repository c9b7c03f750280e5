use std::sync::Arc;

use bytes::Bytes;

use crate::analysis::DocumentAnalyzer;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyzer: Arc<DocumentAnalyzer>,
}

/// A single uploaded file, owned by the request that received it
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(
        filename: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes: bytes.into(),
        }
    }
}

/// Response body for `POST /analyze`
///
/// `analysis` is itself a JSON document encoded as a string, either the
/// model's cleaned output or the fallback analysis.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResponse {
    pub filename: String,
    pub analysis: String,
}
