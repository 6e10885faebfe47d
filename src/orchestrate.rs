use serde::Serialize;
use tracing::{debug, info, warn};

use crate::seed::{LessonBody, LessonSeed, ModuleSeed, QuizSeed};
use crate::store::{
    EntityKind, NewContentBlock, NewLesson, NewModule, NewOption, NewQuestion, NewQuiz, Owner,
    Record, TrainingStore,
};

/// Stages of the public progress contract.
///
/// The seeder only ever reports `Inserting`, `Done` and `Error`; callers
/// report `Extracting` and `Transforming` around the steps they run
/// themselves.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeedStage {
    Extracting,
    Transforming,
    Inserting,
    Done,
    Error,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonProgress {
    pub current: usize,
    pub total: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeedProgress {
    pub stage: SeedStage,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_progress: Option<LessonProgress>,
}

impl SeedProgress {
    pub fn new(stage: SeedStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            lesson_progress: None,
        }
    }
}

/// Persists a [`ModuleSeed`] one record at a time.
///
/// Each create call completes before the next is issued: a lesson is written
/// after its module, and all of a lesson's children are written before the
/// next lesson. The first store error aborts the run and is returned as-is.
/// Nothing is rolled back automatically; every created record is kept in a
/// ledger so the caller can [`compensate`](Seeder::compensate).
pub struct Seeder<'a, S: TrainingStore> {
    store: &'a S,
    owner: &'a Owner,
    progress: Option<SeedProgress>,
    listener: Option<Box<dyn FnMut(&SeedProgress) + 'a>>,
    created: Vec<(EntityKind, String)>,
}

impl<'a, S: TrainingStore> Seeder<'a, S> {
    pub fn new(store: &'a S, owner: &'a Owner) -> Self {
        Self {
            store,
            owner,
            progress: None,
            listener: None,
            created: Vec::new(),
        }
    }

    pub fn on_progress(mut self, listener: impl FnMut(&SeedProgress) + 'a) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Latest reported progress.
    pub fn progress(&self) -> Option<&SeedProgress> {
        self.progress.as_ref()
    }

    /// Records created so far, in creation order.
    pub fn created(&self) -> &[(EntityKind, String)] {
        &self.created
    }

    fn report(&mut self, progress: SeedProgress) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&progress);
        }
        self.progress = Some(progress);
    }

    fn track(&mut self, kind: EntityKind, record: &Record) {
        self.created.push((kind, record.id.clone()));
    }

    pub fn seed(&mut self, seed: &ModuleSeed) -> Result<Record, S::Error> {
        match self.persist(seed) {
            Ok(module) => {
                self.report(SeedProgress::new(
                    SeedStage::Done,
                    format!(
                        "Created \"{}\" with {} lessons",
                        seed.title,
                        seed.lessons.len()
                    ),
                ));
                Ok(module)
            }
            Err(err) => {
                self.report(SeedProgress::new(SeedStage::Error, err.to_string()));
                Err(err)
            }
        }
    }

    fn persist(&mut self, seed: &ModuleSeed) -> Result<Record, S::Error> {
        let owner = self.owner;
        let module = self.store.create_module(&NewModule {
            title: &seed.title,
            description: &seed.description,
            category: &seed.category,
            difficulty_level: seed.difficulty_level,
            estimated_duration_minutes: seed.estimated_duration_minutes,
            xp_reward: seed.xp_reward,
            tags: &seed.tags,
            tenant_id: &owner.tenant_id,
            created_by: &owner.user_id,
            metadata: serde_json::Map::new(),
        })?;
        self.track(EntityKind::Module, &module);
        info!(module_id = %module.id, title = %seed.title, "module created");

        let total = seed.lessons.len();
        for (index, lesson) in seed.lessons.iter().enumerate() {
            self.report(SeedProgress {
                stage: SeedStage::Inserting,
                message: format!(
                    "Creating lesson {}/{}: \"{}\"",
                    index + 1,
                    total,
                    lesson.title
                ),
                lesson_progress: Some(LessonProgress {
                    current: index + 1,
                    total,
                }),
            });
            self.persist_lesson(&module.id, index, lesson)?;
        }

        Ok(module)
    }

    fn persist_lesson(
        &mut self,
        module_id: &str,
        sort_order: usize,
        lesson: &LessonSeed,
    ) -> Result<(), S::Error> {
        let owner = self.owner;
        let tenant_id = owner.tenant_id.as_str();
        let record = self.store.create_lesson(&NewLesson {
            module_id,
            title: &lesson.title,
            description: &lesson.description,
            sort_order,
            lesson_type: lesson.kind(),
            xp_reward: lesson.xp_reward,
            is_required: lesson.is_required,
            estimated_duration_minutes: lesson.estimated_duration_minutes,
            tenant_id,
        })?;
        self.track(EntityKind::Lesson, &record);
        info!(lesson_id = %record.id, sort_order, title = %lesson.title, "lesson created");

        match &lesson.body {
            LessonBody::Content { content_blocks } => {
                for (index, block) in content_blocks.iter().enumerate() {
                    let created = self.store.create_content_block(&NewContentBlock {
                        lesson_id: &record.id,
                        content_type: block.content_type,
                        sort_order: index,
                        title: &block.title,
                        rich_text_content: &block.rich_text_content,
                        tenant_id,
                    })?;
                    self.track(EntityKind::ContentBlock, &created);
                    debug!(block_id = %created.id, sort_order = index, "content block created");
                }
            }
            LessonBody::Quiz { quiz } => self.persist_quiz(&record.id, quiz)?,
        }

        Ok(())
    }

    fn persist_quiz(&mut self, lesson_id: &str, quiz: &QuizSeed) -> Result<(), S::Error> {
        let owner = self.owner;
        let tenant_id = owner.tenant_id.as_str();
        let record = self.store.create_quiz(&NewQuiz {
            lesson_id,
            policy: quiz.policy,
            tenant_id,
        })?;
        self.track(EntityKind::Quiz, &record);

        for (index, question) in quiz.questions.iter().enumerate() {
            let created = self.store.create_question(&NewQuestion {
                quiz_id: &record.id,
                question_text: &question.question_text,
                question_type: question.question_type,
                explanation: &question.explanation,
                sort_order: index,
                points: question.points,
                tenant_id,
            })?;
            self.track(EntityKind::Question, &created);

            for (position, option) in question.options.iter().enumerate() {
                let opt = self.store.create_option(&NewOption {
                    question_id: &created.id,
                    option_text: &option.option_text,
                    is_correct: option.is_correct,
                    sort_order: position,
                })?;
                self.track(EntityKind::Option, &opt);
            }
            debug!(
                question_id = %created.id,
                options = question.options.len(),
                "question created"
            );
        }

        Ok(())
    }

    /// Best-effort removal of everything this seeder created, newest first.
    /// Returns how many deletes failed; failures are logged and skipped.
    pub fn compensate(&mut self) -> usize {
        let mut failures = 0;
        while let Some((kind, id)) = self.created.pop() {
            if let Err(e) = self.store.delete(kind, &id) {
                warn!(table = kind.table(), id = %id, error = %e, "compensating delete failed");
                failures += 1;
            }
        }
        failures
    }
}

/// Persists `seed` for `owner`, forwarding progress to `on_progress`.
pub fn seed_module<'a, S: TrainingStore>(
    store: &'a S,
    seed: &ModuleSeed,
    owner: &'a Owner,
    on_progress: Option<&'a mut dyn FnMut(&SeedProgress)>,
) -> Result<Record, S::Error> {
    let mut seeder = Seeder::new(store, owner);
    if let Some(listener) = on_progress {
        seeder = seeder.on_progress(listener);
    }
    seeder.seed(seed)
}
