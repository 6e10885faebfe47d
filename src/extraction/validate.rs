use tracing::warn;

use super::ExtractionDocument;
use crate::error::ValidationError;

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Checks the structural guarantees the seeding pipeline relies on.
///
/// All rules are evaluated before anything is reported, so a single error
/// lists every violation. Lesson presence is not checked here; see
/// [`ExtractionDocument::lesson_source`].
pub fn validate_extraction(extraction: &ExtractionDocument) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    match extraction.document_metadata.as_ref() {
        None => violations.push("Missing document_metadata".to_string()),
        Some(meta) => {
            if is_blank(meta.title.as_ref()) {
                violations.push("Missing document_metadata.title".to_string());
            }
            if is_blank(meta.organization.as_ref()) {
                violations.push("Missing document_metadata.carrier".to_string());
            }
            if is_blank(meta.subject.as_ref()) {
                violations.push("Missing document_metadata.product".to_string());
            }
        }
    }

    if extraction.sections.as_ref().map_or(true, Vec::is_empty) {
        violations.push("Missing or empty sections[]".to_string());
    }

    if extraction.key_points.as_ref().map_or(true, Vec::is_empty) {
        warn!("no key_points found in extraction, quiz coverage may be thin");
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
