use thiserror::Error;

/// Every structural rule an extraction document broke, reported together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .violations.join(", "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

#[derive(Error, Debug)]
pub enum TransformError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("No lessons found in extraction. The PDF may not contain structured content.")]
    NoLessons,

    #[error("None of the {lessons} extracted lessons contain usable content")]
    NoUsableContent { lessons: usize },
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("PDF extraction failed ({status}): {body}")]
    ServerError { status: u16, body: String },

    #[error("{0}")]
    Service(String),

    #[error("Unexpected API response: missing 'result' field")]
    MissingResult,

    #[error(
        "PDF extractor is outdated (version {found}); version {minimum} or newer is required to produce document_metadata"
    )]
    OutdatedExtractor { found: String, minimum: &'static str },

    #[error("Failed to read extraction: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed extraction document: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Supabase rejected insert into {table} ({status}): {body}")]
    Rejected {
        table: &'static str,
        status: u16,
        body: String,
    },

    #[error("Supabase returned no row for {table}")]
    EmptyResponse { table: &'static str },

    #[error("Failed to read response body: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("environment variable {name} is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_joins_all_violations() {
        let err = ValidationError {
            violations: vec![
                "Missing document_metadata.title".into(),
                "Missing or empty sections[]".into(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Missing document_metadata.title, Missing or empty sections[]"
        );
    }

    #[test]
    fn transform_error_is_transparent_over_validation() {
        let err: TransformError = ValidationError {
            violations: vec!["Missing document_metadata".into()],
        }
        .into();
        assert_eq!(err.to_string(), "Missing document_metadata");
    }
}
