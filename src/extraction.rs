mod client;
mod document;
mod validate;

pub use client::{check_extractor_version, parse_response, ExtractorClient, MIN_EXTRACTOR_VERSION};
pub use document::{
    DocumentMetadata, ExtractionBlock, ExtractionDocument, ExtractionLesson, ExtractionOption,
    ExtractionQuestion, ExtractionTable, LessonSource, ModuleSeedHint,
};
pub use validate::validate_extraction;
