mod content;
mod interleave;
mod lesson;
mod module;
mod quiz;
mod table;

use tracing::info;

use crate::error::TransformError;
use crate::extraction::{validate_extraction, ExtractionDocument};

pub use content::{
    count_words, map_content_blocks, reading_minutes, transform_lesson, transform_lessons,
    MIN_LESSON_MINUTES, WORDS_PER_MINUTE,
};
pub use interleave::interleave;
pub use lesson::{
    ContentBlockSeed, ContentType, LessonBody, LessonKind, LessonSeed, OptionSeed, QuestionSeed,
    QuestionType, QuizPolicy, QuizSeed, CHECKPOINT_DURATION_MINUTES, CHECKPOINT_XP_REWARD,
    CONTENT_XP_REWARD,
};
pub use module::{assemble_module, DifficultyLevel, ModuleSeed, DEFAULT_CATEGORY};
pub use quiz::{aggregate_quizzes, QUESTION_POINTS};
pub use table::table_to_html;

/// Turns an extraction into a module seed without touching the store.
///
/// Structural problems are reported before content poverty: a malformed
/// document fails with [`TransformError::Invalid`] even if it also has no
/// lessons.
pub fn transform_extraction(
    extraction: &ExtractionDocument,
    category: &str,
) -> Result<ModuleSeed, TransformError> {
    validate_extraction(extraction)?;

    let source = extraction.lesson_source().ok_or(TransformError::NoLessons)?;
    let lessons = source.lessons();

    let content = transform_lessons(lessons, &extraction.tables);
    if content.is_empty() {
        return Err(TransformError::NoUsableContent {
            lessons: lessons.len(),
        });
    }
    let quizzes = aggregate_quizzes(lessons);

    info!(
        extracted = lessons.len(),
        content = content.len(),
        quizzes = quizzes.len(),
        "lessons mapped"
    );

    Ok(assemble_module(
        extraction,
        category,
        interleave(content, quizzes),
    ))
}
