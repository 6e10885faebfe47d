use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::lesson::{ContentBlockSeed, ContentType, LessonSeed};
use super::table::{table_to_html, tables_for_pages};
use crate::extraction::{ExtractionBlock, ExtractionLesson, ExtractionTable};

pub const WORDS_PER_MINUTE: usize = 200;

/// Floor so that very short lessons still carry a plausible engagement time.
pub const MIN_LESSON_MINUTES: u32 = 5;

fn tag_regex() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

/// Keeps blocks with a non-blank body; markup is passed through untouched.
pub fn map_content_blocks(blocks: &[ExtractionBlock]) -> Vec<ContentBlockSeed> {
    blocks
        .iter()
        .filter(|b| !b.html.trim().is_empty())
        .map(|b| ContentBlockSeed {
            content_type: ContentType::RichText,
            title: b
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| String::from("Content")),
            rich_text_content: b.html.clone(),
        })
        .collect()
}

/// Approximate word count of the blocks once markup tags are stripped.
pub fn count_words(blocks: &[ContentBlockSeed]) -> usize {
    let text = blocks
        .iter()
        .map(|b| tag_regex().replace_all(&b.rich_text_content, ""))
        .collect::<Vec<_>>()
        .join(" ");

    text.split_whitespace().count()
}

pub fn reading_minutes(words: usize) -> u32 {
    let minutes = u32::try_from(words.div_ceil(WORDS_PER_MINUTE)).unwrap_or(u32::MAX);
    minutes.max(MIN_LESSON_MINUTES)
}

fn describe(lesson: &ExtractionLesson) -> String {
    match lesson.learning_objective.as_deref().map(str::trim) {
        Some(objective) if !objective.is_empty() => objective.to_string(),
        _ => format!("Learn about {}.", lesson.title.to_lowercase()),
    }
}

// Tables on the lesson's pages that no block already renders. Skipped
// entirely once any block carries its own table markup.
fn inject_tables(
    blocks: &mut Vec<ContentBlockSeed>,
    lesson: &ExtractionLesson,
    tables: &[ExtractionTable],
) {
    if blocks.iter().any(|b| b.rich_text_content.contains("<table")) {
        return;
    }

    let rendered: HashSet<&str> = lesson
        .content_blocks
        .iter()
        .filter(|b| b.html.contains("<table"))
        .filter_map(|b| b.table_id.as_deref())
        .collect();

    for table in tables_for_pages(tables, &lesson.page_numbers) {
        if rendered.contains(table.table_id.as_str()) {
            continue;
        }
        if let Some(html) = table_to_html(&table.values) {
            let title = table
                .values
                .first()
                .and_then(|header| header.first())
                .filter(|cell| !cell.is_empty())
                .cloned()
                .unwrap_or_else(|| String::from("Table"));

            blocks.push(ContentBlockSeed {
                content_type: ContentType::RichText,
                title,
                rich_text_content: html,
            });
        }
    }
}

/// Maps one extracted lesson to a content lesson, or `None` when nothing
/// readable survives.
pub fn transform_lesson(
    lesson: &ExtractionLesson,
    tables: &[ExtractionTable],
) -> Option<LessonSeed> {
    let mut blocks = map_content_blocks(&lesson.content_blocks);
    inject_tables(&mut blocks, lesson, tables);

    if blocks.is_empty() {
        debug!(title = %lesson.title, "dropping lesson without content");
        return None;
    }

    let minutes = reading_minutes(count_words(&blocks));
    Some(LessonSeed::content(
        lesson.title.clone(),
        describe(lesson),
        minutes,
        blocks,
    ))
}

/// Content lessons in extraction order, empty ones dropped.
pub fn transform_lessons(
    lessons: &[ExtractionLesson],
    tables: &[ExtractionTable],
) -> Vec<LessonSeed> {
    lessons
        .iter()
        .filter_map(|lesson| transform_lesson(lesson, tables))
        .collect()
}
