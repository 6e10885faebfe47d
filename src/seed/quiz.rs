use super::lesson::{OptionSeed, QuestionSeed, QuestionType, QuizPolicy, QuizSeed};
use crate::extraction::{ExtractionLesson, ExtractionQuestion};

pub const QUESTION_POINTS: u32 = 10;

fn map_question(question: &ExtractionQuestion) -> QuestionSeed {
    QuestionSeed {
        question_type: QuestionType::MultipleChoice,
        question_text: question.question_text.clone(),
        explanation: question.explanation.clone().unwrap_or_default(),
        points: QUESTION_POINTS,
        options: question
            .options
            .iter()
            .map(|o| OptionSeed {
                option_text: o.text.clone(),
                is_correct: o.is_correct,
            })
            .collect(),
    }
}

/// Pools the question candidates of every lesson, including lessons the
/// content transformer dropped, into at most one quiz.
///
/// Options are copied as-is; whether a question has a correct answer is left
/// to the assessment layer.
pub fn aggregate_quizzes(lessons: &[ExtractionLesson]) -> Vec<QuizSeed> {
    let questions: Vec<QuestionSeed> = lessons
        .iter()
        .flat_map(|l| l.quizzes.iter())
        .map(map_question)
        .collect();

    if questions.is_empty() {
        return Vec::new();
    }

    vec![QuizSeed {
        policy: QuizPolicy::default(),
        questions,
    }]
}
