use std::{fs, path::Path, str::FromStr, time::Duration};

use serde_json::Value;
use tracing::{debug, info};

use super::ExtractionDocument;
use crate::error::ExtractionError;

const EXTRACTION_MODE: &str = "ocr_layout";
const OUTPUT_FORMAT: &str = "training";

/// Oldest extractor release that emits `document_metadata`.
pub const MIN_EXTRACTOR_VERSION: &str = "2.0.0";

/// Blocking client for the PDF extraction service.
pub struct ExtractorClient {
    agent: ureq::Agent,
    url: String,
}

impl ExtractorClient {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            url: url.to_string(),
        }
    }

    pub fn extract_file(&self, path: &Path) -> Result<ExtractionDocument, ExtractionError> {
        let bytes = fs::read(path)?;
        info!(path = %path.display(), bytes = bytes.len(), "sending document to extractor");
        self.extract(&bytes)
    }

    /// One request per source file; failures are not retried.
    pub fn extract(&self, pdf: &[u8]) -> Result<ExtractionDocument, ExtractionError> {
        let response = self
            .agent
            .post(&self.url)
            .query("mode", EXTRACTION_MODE)
            .query("output_format", OUTPUT_FORMAT)
            .set("Content-Type", "application/pdf")
            .send_bytes(pdf)
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => ExtractionError::ServerError {
                    status,
                    body: response
                        .into_string()
                        .unwrap_or_else(|_| String::from("Unknown error")),
                },
                other => ExtractionError::Http(other),
            })?;

        let body: Value = response.into_json()?;
        parse_response(body)
    }
}

/// Unwraps the `{ ok, error, result }` envelope the extractor answers with.
pub fn parse_response(body: Value) -> Result<ExtractionDocument, ExtractionError> {
    if get_attribute::<bool>(&body, "ok") == Some(false) {
        let message = get_attribute::<String>(&body, "error")
            .unwrap_or_else(|| String::from("PDF extraction returned an error"));
        return Err(ExtractionError::Service(message));
    }

    let result = match body {
        Value::Object(mut map) => map.remove("result"),
        _ => None,
    }
    .filter(|r| !r.is_null())
    .ok_or(ExtractionError::MissingResult)?;

    check_extractor_version(&result)?;

    let document: ExtractionDocument = serde_json::from_value(result)?;
    debug!(
        lessons = document.lessons.len(),
        tables = document.tables.len(),
        "extraction decoded"
    );
    Ok(document)
}

/// Rejects payloads from extractors too old to emit `document_metadata`.
pub fn check_extractor_version(result: &Value) -> Result<(), ExtractionError> {
    if result.get("document_metadata").is_some() {
        return Ok(());
    }

    let version: Option<String> = get_attribute(result, "extractor_version");
    match version {
        Some(v) if !is_older(&v, MIN_EXTRACTOR_VERSION) => Ok(()),
        other => Err(ExtractionError::OutdatedExtractor {
            found: other.unwrap_or_else(|| String::from("unknown")),
            minimum: MIN_EXTRACTOR_VERSION,
        }),
    }
}

fn version_parts(version: &str) -> Vec<u32> {
    version
        .trim_start_matches('v')
        .split('.')
        .map(|part| {
            part.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
                .parse()
                .unwrap_or(0)
        })
        .collect()
}

fn is_older(version: &str, minimum: &str) -> bool {
    let (mut found, mut required) = (version_parts(version), version_parts(minimum));
    let len = found.len().max(required.len());
    found.resize(len, 0);
    required.resize(len, 0);
    found < required
}

fn get_attribute<T>(value: &Value, attribute: &str) -> Option<T>
where
    T: FromStr,
{
    value.get(attribute).and_then(|v| match v {
        Value::String(s) => T::from_str(s).ok(),
        Value::Bool(b) => T::from_str(&b.to_string()).ok(),
        Value::Number(n) => T::from_str(&n.to_string()).ok(),
        _ => None,
    })
}
