mod common;

use std::cell::RefCell;

use common::{RecordingStore, StoreFailure};
use curriculum::seed::{transform_extraction, ModuleSeed, DEFAULT_CATEGORY};
use curriculum::store::{EntityKind, Owner};
use curriculum::{seed_module, SeedProgress, SeedStage, Seeder};
use serde_json::json;

use EntityKind::*;

// 3 content lessons, one 2-question quiz: [L1, L2, L3, Knowledge Check 1]
fn module() -> ModuleSeed {
    transform_extraction(&common::extraction(3, 20, 2), DEFAULT_CATEGORY).unwrap()
}

fn owner() -> Owner {
    Owner::new("user-7", "imo-3")
}

#[test]
fn creates_records_strictly_in_order() {
    let store = RecordingStore::default();
    let owner = owner();
    seed_module(&store, &module(), &owner, None).unwrap();

    assert_eq!(
        store.kinds(),
        [
            Module,
            Lesson, ContentBlock,
            Lesson, ContentBlock,
            Lesson, ContentBlock,
            Lesson, Quiz, Question, Option, Option, Question, Option, Option,
        ]
    );
}

#[test]
fn records_reference_their_parents() {
    let store = RecordingStore::default();
    let owner = owner();
    let created = seed_module(&store, &module(), &owner, None).unwrap();

    assert_eq!(created.field("created_by"), Some(&json!("user-7")));
    assert_eq!(created.field("imo_id"), Some(&json!("imo-3")));
    assert_eq!(created.field("difficulty_level"), Some(&json!("intermediate")));

    let lessons = store.records_of(Lesson);
    for (i, lesson) in lessons.iter().enumerate() {
        assert_eq!(lesson.field("module_id"), Some(&json!(created.id)));
        assert_eq!(lesson.field("sort_order"), Some(&json!(i)));
        assert_eq!(lesson.field("imo_id"), Some(&json!("imo-3")));
    }
    assert_eq!(lessons[3].field("lesson_type"), Some(&json!("quiz")));

    let quiz = &store.records_of(Quiz)[0];
    assert_eq!(quiz.field("lesson_id"), Some(&json!(lessons[3].id)));
    assert_eq!(quiz.field("pass_threshold"), Some(&json!(70)));

    let questions = store.records_of(Question);
    assert_eq!(questions[1].field("sort_order"), Some(&json!(1)));
    assert_eq!(questions[1].field("quiz_id"), Some(&json!(quiz.id)));

    let options = store.records_of(Option);
    assert_eq!(options[2].field("question_id"), Some(&json!(questions[1].id)));
    assert_eq!(options[3].field("sort_order"), Some(&json!(1)));
    assert_eq!(options[3].field("is_correct"), Some(&json!(false)));
    assert!(options[0].field("imo_id").is_none());
}

#[test]
fn reports_progress_per_lesson_then_done() {
    let store = RecordingStore::default();
    let owner = owner();
    let events = RefCell::new(Vec::<SeedProgress>::new());
    let mut listener = |p: &SeedProgress| events.borrow_mut().push(p.clone());

    seed_module(&store, &module(), &owner, Some(&mut listener)).unwrap();

    let events = events.into_inner();
    assert_eq!(events.len(), 5);
    assert!(events[..4].iter().all(|e| e.stage == SeedStage::Inserting));
    assert_eq!(events[0].message, "Creating lesson 1/4: \"Lesson 1\"");
    let counter = events[3].lesson_progress.unwrap();
    assert_eq!((counter.current, counter.total), (4, 4));
    assert_eq!(events[4].stage, SeedStage::Done);
    assert!(events
        .iter()
        .all(|e| e.stage != SeedStage::Extracting && e.stage != SeedStage::Transforming));
}

#[test]
fn third_lesson_failure_propagates_unchanged() {
    let store = RecordingStore::failing_on(Lesson, 3);
    let owner = owner();
    let mut seeder = Seeder::new(&store, &owner);

    let err = seeder.seed(&module()).unwrap_err();
    assert_eq!(err, StoreFailure("insert into training_lessons rejected".into()));

    assert_eq!(
        store.kinds(),
        [Module, Lesson, ContentBlock, Lesson, ContentBlock]
    );

    let progress = seeder.progress().unwrap();
    assert_eq!(progress.stage, SeedStage::Error);
    assert_eq!(progress.message, "insert into training_lessons rejected");
}

#[test]
fn child_failure_leaves_earlier_siblings() {
    let store = RecordingStore::failing_on(Option, 3);
    let owner = owner();
    let err = seed_module(&store, &module(), &owner, None).unwrap_err();

    assert_eq!(err.0, "insert into training_quiz_options rejected");
    assert_eq!(store.records_of(Question).len(), 2);
    assert_eq!(store.records_of(Option).len(), 2);
}

#[test]
fn compensation_deletes_newest_first() {
    let store = RecordingStore::failing_on(Lesson, 2);
    let owner = owner();
    let mut seeder = Seeder::new(&store, &owner);
    seeder.seed(&module()).unwrap_err();

    assert_eq!(seeder.created().len(), 3);
    assert_eq!(seeder.compensate(), 0);
    assert!(seeder.created().is_empty());

    let deleted = store.deleted.borrow();
    assert_eq!(
        *deleted,
        vec![
            (ContentBlock, "training_lesson_content-1".to_string()),
            (Lesson, "training_lessons-1".to_string()),
            (Module, "training_modules-1".to_string()),
        ]
    );
}

#[test]
fn module_failure_creates_nothing() {
    let store = RecordingStore::failing_on(Module, 1);
    let owner = owner();
    let mut seeder = Seeder::new(&store, &owner);

    assert!(seeder.seed(&module()).is_err());
    assert!(store.kinds().is_empty());
    assert!(seeder.created().is_empty());
}
