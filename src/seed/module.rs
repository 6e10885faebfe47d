use serde::Serialize;

use super::lesson::LessonSeed;
use crate::extraction::ExtractionDocument;

pub const DEFAULT_CATEGORY: &str = "carrier_training";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// A training module ready to be persisted, lessons in final order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ModuleSeed {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty_level: DifficultyLevel,
    /// sum over `lessons`
    pub estimated_duration_minutes: u32,
    /// sum over `lessons`
    pub xp_reward: u32,
    pub tags: Vec<String>,
    pub lessons: Vec<LessonSeed>,
}

impl ModuleSeed {
    pub fn content_lesson_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.quiz().is_none()).count()
    }

    pub fn block_count(&self) -> usize {
        self.lessons.iter().map(|l| l.content_blocks().len()).sum()
    }

    pub fn question_count(&self) -> usize {
        self.lessons
            .iter()
            .filter_map(LessonSeed::quiz)
            .map(|q| q.questions.len())
            .sum()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Derives module metadata and totals from the final lesson sequence.
///
/// Extractor-supplied title, description and tags win over the ones built
/// from the document metadata.
pub fn assemble_module(
    extraction: &ExtractionDocument,
    category: &str,
    lessons: Vec<LessonSeed>,
) -> ModuleSeed {
    let meta = extraction.document_metadata.as_ref();
    let named = meta.and_then(|m| {
        Some((
            non_empty(m.organization.as_ref())?,
            non_empty(m.subject.as_ref())?,
        ))
    });

    let (title, description, tags) = match named {
        Some((organization, subject)) => (
            format!("{} {} Training", organization, subject),
            format!(
                "Comprehensive training module for {} {}.",
                organization, subject
            ),
            vec![
                organization.to_lowercase(),
                subject.to_lowercase(),
                String::from("training"),
            ],
        ),
        None => (
            String::from("Imported Training Module"),
            String::from("Training module imported from PDF."),
            vec![String::from("training")],
        ),
    };

    let hint = extraction.module_seed.as_ref();
    let title = hint
        .and_then(|h| non_empty(h.title.as_ref()))
        .map_or(title, str::to_string);
    let description = hint
        .and_then(|h| non_empty(h.description.as_ref()))
        .map_or(description, str::to_string);
    let tags = hint.and_then(|h| h.tags.clone()).unwrap_or(tags);

    ModuleSeed {
        title,
        description,
        category: category.to_string(),
        difficulty_level: DifficultyLevel::Intermediate,
        estimated_duration_minutes: lessons.iter().map(|l| l.estimated_duration_minutes).sum(),
        xp_reward: lessons.iter().map(|l| l.xp_reward).sum(),
        tags,
        lessons,
    }
}
