use serde::Serialize;

/// Reward for finishing a content lesson.
pub const CONTENT_XP_REWARD: u32 = 25;
pub const CHECKPOINT_DURATION_MINUTES: u32 = 10;
pub const CHECKPOINT_XP_REWARD: u32 = 50;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonKind {
    #[serde(rename = "content")]
    Content,
    #[serde(rename = "quiz")]
    Quiz,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    #[serde(rename = "rich_text")]
    RichText,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    #[serde(rename = "multiple_choice")]
    MultipleChoice,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ContentBlockSeed {
    pub content_type: ContentType,
    pub title: String,
    pub rich_text_content: String,
}

/// Assessment settings shared by every generated quiz.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizPolicy {
    /// percentage needed to pass
    pub pass_threshold: u32,
    pub max_attempts: u32,
    pub shuffle_questions: bool,
    pub show_correct_answers: bool,
    pub shuffle_options: bool,
    pub xp_bonus_perfect: u32,
}

impl Default for QuizPolicy {
    fn default() -> Self {
        Self {
            pass_threshold: 70,
            max_attempts: 3,
            shuffle_questions: true,
            show_correct_answers: true,
            shuffle_options: true,
            xp_bonus_perfect: 25,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QuizSeed {
    #[serde(flatten)]
    pub policy: QuizPolicy,
    pub questions: Vec<QuestionSeed>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QuestionSeed {
    pub question_type: QuestionType,
    pub question_text: String,
    pub explanation: String,
    pub points: u32,
    pub options: Vec<OptionSeed>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OptionSeed {
    pub option_text: String,
    pub is_correct: bool,
}

/// What a lesson holds: reading material or a single quiz, never both.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "lesson_type", rename_all = "lowercase")]
pub enum LessonBody {
    Content { content_blocks: Vec<ContentBlockSeed> },
    Quiz { quiz: QuizSeed },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LessonSeed {
    pub title: String,
    pub estimated_duration_minutes: u32,
    pub xp_reward: u32,
    pub description: String,
    pub is_required: bool,
    #[serde(flatten)]
    pub body: LessonBody,
}

impl LessonSeed {
    pub fn content(
        title: String,
        description: String,
        estimated_duration_minutes: u32,
        content_blocks: Vec<ContentBlockSeed>,
    ) -> Self {
        Self {
            title,
            estimated_duration_minutes,
            xp_reward: CONTENT_XP_REWARD,
            description,
            is_required: true,
            body: LessonBody::Content { content_blocks },
        }
    }

    pub fn checkpoint(title: String, description: &str, quiz: QuizSeed) -> Self {
        Self {
            title,
            estimated_duration_minutes: CHECKPOINT_DURATION_MINUTES,
            xp_reward: CHECKPOINT_XP_REWARD,
            description: description.to_string(),
            is_required: true,
            body: LessonBody::Quiz { quiz },
        }
    }

    pub fn kind(&self) -> LessonKind {
        match self.body {
            LessonBody::Content { .. } => LessonKind::Content,
            LessonBody::Quiz { .. } => LessonKind::Quiz,
        }
    }

    pub fn content_blocks(&self) -> &[ContentBlockSeed] {
        match &self.body {
            LessonBody::Content { content_blocks } => content_blocks,
            LessonBody::Quiz { .. } => &[],
        }
    }

    pub fn quiz(&self) -> Option<&QuizSeed> {
        match &self.body {
            LessonBody::Quiz { quiz } => Some(quiz),
            LessonBody::Content { .. } => None,
        }
    }
}
