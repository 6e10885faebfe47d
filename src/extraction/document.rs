use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured output of the extraction service for one source document.
///
/// Every field is optional on the wire: validation decides which absences
/// are fatal, so deserialization never fails on a merely incomplete payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionDocument {
    #[serde(default)]
    pub document_metadata: Option<DocumentMetadata>,

    /// Sections are opaque here; only their presence is checked.
    #[serde(default)]
    pub sections: Option<Vec<Value>>,

    #[serde(default)]
    pub key_points: Option<Vec<Value>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub lessons: Vec<ExtractionLesson>,

    /// Alternate lesson location used by some extractor output formats.
    #[serde(default)]
    pub module_seed: Option<ModuleSeedHint>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tables: Vec<ExtractionTable>,

    #[serde(default)]
    pub extractor_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub title: Option<String>,

    /// source organization
    #[serde(default, rename = "carrier")]
    pub organization: Option<String>,

    /// subject of the document, e.g. a product line
    #[serde(default, rename = "product")]
    pub subject: Option<String>,
}

/// Module-level overrides the extractor may supply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleSeedHint {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lessons: Vec<ExtractionLesson>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionLesson {
    pub title: String,
    #[serde(default)]
    pub learning_objective: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_numbers: Vec<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_blocks: Vec<ExtractionBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quizzes: Vec<ExtractionQuestion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionBlock {
    #[serde(default)]
    pub title: Option<String>,
    /// rendered markup, passed through unsanitized
    #[serde(default, deserialize_with = "null_as_default")]
    pub html: String,
    #[serde(default)]
    pub table_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionQuestion {
    pub question_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<ExtractionOption>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionOption {
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionTable {
    pub table_id: String,
    pub page_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<Vec<String>>,
}

// `null` decodes like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Where a document's lessons were found.
#[derive(Debug, Clone, Copy)]
pub enum LessonSource<'a> {
    /// top-level `lessons[]`
    Lessons(&'a [ExtractionLesson]),
    /// `module_seed.lessons[]`, consulted only when `lessons[]` is empty
    ModuleSeed(&'a [ExtractionLesson]),
}

impl<'a> LessonSource<'a> {
    pub fn lessons(&self) -> &'a [ExtractionLesson] {
        match *self {
            LessonSource::Lessons(l) | LessonSource::ModuleSeed(l) => l,
        }
    }
}

impl ExtractionDocument {
    /// Resolves the lesson list. Top-level lessons win; the module seed is the
    /// fallback. `None` when both are empty.
    pub fn lesson_source(&self) -> Option<LessonSource<'_>> {
        if !self.lessons.is_empty() {
            return Some(LessonSource::Lessons(&self.lessons));
        }

        self.module_seed
            .as_ref()
            .filter(|seed| !seed.lessons.is_empty())
            .map(|seed| LessonSource::ModuleSeed(&seed.lessons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn deserializes_sparse_payload() {
        let doc: ExtractionDocument = serde_json::from_value(json!({
            "document_metadata": { "title": "Guide", "carrier": "Acme" },
            "lessons": [{ "title": "Intro" }]
        }))
        .unwrap();

        let meta = doc.document_metadata.unwrap();
        assert_eq!(meta.organization.as_deref(), Some("Acme"));
        assert!(meta.subject.is_none());
        assert!(doc.sections.is_none());
        assert!(doc.lessons[0].content_blocks.is_empty());
    }

    #[test]
    fn top_level_lessons_take_precedence() {
        let doc = ExtractionDocument {
            lessons: vec![ExtractionLesson {
                title: "Top".into(),
                ..Default::default()
            }],
            module_seed: Some(ModuleSeedHint {
                lessons: vec![ExtractionLesson::default()],
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_matches!(doc.lesson_source(), Some(LessonSource::Lessons(l)) if l[0].title == "Top");
    }

    #[test]
    fn module_seed_lessons_are_the_fallback() {
        let doc = ExtractionDocument {
            module_seed: Some(ModuleSeedHint {
                lessons: vec![ExtractionLesson::default()],
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_matches!(doc.lesson_source(), Some(LessonSource::ModuleSeed(_)));
        assert!(ExtractionDocument::default().lesson_source().is_none());
    }

    #[test]
    fn null_lists_fall_back_to_module_seed_lessons() {
        let doc: ExtractionDocument = serde_json::from_value(json!({
            "lessons": null,
            "tables": null,
            "module_seed": {
                "lessons": [{
                    "title": "A",
                    "page_numbers": null,
                    "content_blocks": [{ "html": null }, { "html": "<p>x</p>" }],
                    "quizzes": null
                }]
            }
        }))
        .unwrap();

        assert!(doc.tables.is_empty());
        let lessons = assert_matches!(doc.lesson_source(), Some(LessonSource::ModuleSeed(l)) => l);
        assert!(lessons[0].quizzes.is_empty());
        assert_eq!(lessons[0].content_blocks[0].html, "");
        assert_eq!(lessons[0].content_blocks[1].html, "<p>x</p>");
    }
}
