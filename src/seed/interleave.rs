use super::lesson::{LessonSeed, QuizSeed};

const CHECKPOINT_DESCRIPTION: &str = "Test your understanding of the material covered so far.";
const FINAL_CHECKPOINT_TITLE: &str = "Final Knowledge Check";
const FINAL_CHECKPOINT_DESCRIPTION: &str = "Final assessment covering all module content.";

/// Spreads quiz checkpoints evenly through the content lessons.
///
/// A checkpoint follows every `ceil(content / quizzes)`-th content lesson
/// while quizzes remain; leftovers are appended as final checkpoints. Every
/// quiz is placed exactly once.
pub fn interleave(content: Vec<LessonSeed>, quizzes: Vec<QuizSeed>) -> Vec<LessonSeed> {
    if quizzes.is_empty() {
        return content;
    }

    let content_per_quiz = content.len().div_ceil(quizzes.len()).max(1);
    let mut lessons = Vec::with_capacity(content.len() + quizzes.len());
    let mut quizzes = quizzes.into_iter();
    let mut placed = 0;

    for (i, lesson) in content.into_iter().enumerate() {
        lessons.push(lesson);

        if (i + 1) % content_per_quiz == 0 {
            if let Some(quiz) = quizzes.next() {
                placed += 1;
                lessons.push(LessonSeed::checkpoint(
                    format!("Knowledge Check {}", placed),
                    CHECKPOINT_DESCRIPTION,
                    quiz,
                ));
            }
        }
    }

    lessons.extend(quizzes.map(|quiz| {
        LessonSeed::checkpoint(
            FINAL_CHECKPOINT_TITLE.to_string(),
            FINAL_CHECKPOINT_DESCRIPTION,
            quiz,
        )
    }));

    lessons
}
