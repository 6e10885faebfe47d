use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::seed::{ContentType, DifficultyLevel, LessonKind, QuestionType, QuizPolicy};

/// Who a seeding run acts for. Threaded into every record's ownership fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub user_id: String,
    pub tenant_id: String,
}

impl Owner {
    pub fn new(user_id: &str, tenant_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            tenant_id: tenant_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Module,
    Lesson,
    ContentBlock,
    Quiz,
    Question,
    Option,
}

impl EntityKind {
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Module => "training_modules",
            EntityKind::Lesson => "training_lessons",
            EntityKind::ContentBlock => "training_lesson_content",
            EntityKind::Quiz => "training_quizzes",
            EntityKind::Question => "training_quiz_questions",
            EntityKind::Option => "training_quiz_options",
        }
    }
}

/// A created row: the submitted fields plus the store-assigned id and
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct NewModule<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub difficulty_level: DifficultyLevel,
    pub estimated_duration_minutes: u32,
    pub xp_reward: u32,
    pub tags: &'a [String],
    #[serde(rename = "imo_id")]
    pub tenant_id: &'a str,
    pub created_by: &'a str,
    pub metadata: Map<String, Value>,
}

#[derive(Serialize, Debug, Clone)]
pub struct NewLesson<'a> {
    pub module_id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub sort_order: usize,
    pub lesson_type: LessonKind,
    pub xp_reward: u32,
    pub is_required: bool,
    pub estimated_duration_minutes: u32,
    #[serde(rename = "imo_id")]
    pub tenant_id: &'a str,
}

#[derive(Serialize, Debug, Clone)]
pub struct NewContentBlock<'a> {
    pub lesson_id: &'a str,
    pub content_type: ContentType,
    pub sort_order: usize,
    pub title: &'a str,
    pub rich_text_content: &'a str,
    #[serde(rename = "imo_id")]
    pub tenant_id: &'a str,
}

#[derive(Serialize, Debug, Clone)]
pub struct NewQuiz<'a> {
    pub lesson_id: &'a str,
    #[serde(flatten)]
    pub policy: QuizPolicy,
    #[serde(rename = "imo_id")]
    pub tenant_id: &'a str,
}

#[derive(Serialize, Debug, Clone)]
pub struct NewQuestion<'a> {
    pub quiz_id: &'a str,
    pub question_text: &'a str,
    pub question_type: QuestionType,
    pub explanation: &'a str,
    pub sort_order: usize,
    pub points: u32,
    #[serde(rename = "imo_id")]
    pub tenant_id: &'a str,
}

/// Options carry no ownership fields; they belong to their question.
#[derive(Serialize, Debug, Clone)]
pub struct NewOption<'a> {
    pub question_id: &'a str,
    pub option_text: &'a str,
    pub is_correct: bool,
    pub sort_order: usize,
}
