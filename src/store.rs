mod records;
mod supabase;

pub use records::{
    EntityKind, NewContentBlock, NewLesson, NewModule, NewOption, NewQuestion, NewQuiz, Owner,
    Record,
};
pub use supabase::SupabaseStore;

/// Create-one persistence for training entities.
///
/// Every call is a single remote write returning the created row. There is
/// no batch or transaction support; `delete` exists only so callers can
/// clean up after a failed seeding run.
pub trait TrainingStore {
    type Error: std::error::Error;

    fn create_module(&self, module: &NewModule<'_>) -> Result<Record, Self::Error>;
    fn create_lesson(&self, lesson: &NewLesson<'_>) -> Result<Record, Self::Error>;
    fn create_content_block(&self, block: &NewContentBlock<'_>) -> Result<Record, Self::Error>;
    fn create_quiz(&self, quiz: &NewQuiz<'_>) -> Result<Record, Self::Error>;
    fn create_question(&self, question: &NewQuestion<'_>) -> Result<Record, Self::Error>;
    fn create_option(&self, option: &NewOption<'_>) -> Result<Record, Self::Error>;
    fn delete(&self, kind: EntityKind, id: &str) -> Result<(), Self::Error>;
}
