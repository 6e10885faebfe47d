#![allow(dead_code)]

use std::cell::RefCell;
use std::fmt;

use curriculum::extraction::ExtractionDocument;
use curriculum::store::{
    EntityKind, NewContentBlock, NewLesson, NewModule, NewOption, NewQuestion, NewQuiz, Record,
    TrainingStore,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Builds an extraction with `lessons` lessons of `words` words each and
/// `questions` two-option questions attached to the first lesson.
pub fn extraction(lessons: usize, words: usize, questions: usize) -> ExtractionDocument {
    let body = format!("<p>{}</p>", vec!["word"; words].join(" "));
    let lessons: Vec<Value> = (1..=lessons)
        .map(|i| {
            let quizzes: Vec<Value> = if i == 1 {
                (1..=questions)
                    .map(|q| {
                        json!({
                            "question_text": format!("Question {}", q),
                            "options": [
                                { "text": "Right", "is_correct": true },
                                { "text": "Wrong", "is_correct": false }
                            ]
                        })
                    })
                    .collect()
            } else {
                Vec::new()
            };

            json!({
                "title": format!("Lesson {}", i),
                "content_blocks": [{ "title": "Body", "html": body }],
                "quizzes": quizzes
            })
        })
        .collect();

    serde_json::from_value(json!({
        "document_metadata": { "title": "Guide", "carrier": "Acme", "product": "Term Life" },
        "sections": [{ "title": "Overview" }],
        "key_points": ["one"],
        "lessons": lessons
    }))
    .expect("fixture deserializes")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure(pub String);

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StoreFailure {}

/// In-memory store that records every call and can fail the nth create of a
/// given kind.
#[derive(Default)]
pub struct RecordingStore {
    pub calls: RefCell<Vec<(EntityKind, Record)>>,
    pub deleted: RefCell<Vec<(EntityKind, String)>>,
    pub fail_on: Option<(EntityKind, usize)>,
}

impl RecordingStore {
    pub fn failing_on(kind: EntityKind, nth: usize) -> Self {
        Self {
            fail_on: Some((kind, nth)),
            ..Default::default()
        }
    }

    pub fn kinds(&self) -> Vec<EntityKind> {
        self.calls.borrow().iter().map(|(k, _)| *k).collect()
    }

    pub fn records_of(&self, kind: EntityKind) -> Vec<Record> {
        self.calls
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, r)| r.clone())
            .collect()
    }

    fn create(&self, kind: EntityKind, row: &impl Serialize) -> Result<Record, StoreFailure> {
        let nth = self.calls.borrow().iter().filter(|(k, _)| *k == kind).count() + 1;
        if self.fail_on == Some((kind, nth)) {
            return Err(StoreFailure(format!("insert into {} rejected", kind.table())));
        }

        let fields: Map<String, Value> = match serde_json::to_value(row) {
            Ok(Value::Object(map)) => map,
            _ => panic!("rows serialize to objects"),
        };
        let record = Record {
            id: format!("{}-{}", kind.table(), nth),
            created_at: Some("2024-05-01T12:00:00Z".into()),
            updated_at: None,
            fields,
        };
        self.calls.borrow_mut().push((kind, record.clone()));
        Ok(record)
    }
}

impl TrainingStore for RecordingStore {
    type Error = StoreFailure;

    fn create_module(&self, module: &NewModule<'_>) -> Result<Record, StoreFailure> {
        self.create(EntityKind::Module, module)
    }

    fn create_lesson(&self, lesson: &NewLesson<'_>) -> Result<Record, StoreFailure> {
        self.create(EntityKind::Lesson, lesson)
    }

    fn create_content_block(&self, block: &NewContentBlock<'_>) -> Result<Record, StoreFailure> {
        self.create(EntityKind::ContentBlock, block)
    }

    fn create_quiz(&self, quiz: &NewQuiz<'_>) -> Result<Record, StoreFailure> {
        self.create(EntityKind::Quiz, quiz)
    }

    fn create_question(&self, question: &NewQuestion<'_>) -> Result<Record, StoreFailure> {
        self.create(EntityKind::Question, question)
    }

    fn create_option(&self, option: &NewOption<'_>) -> Result<Record, StoreFailure> {
        self.create(EntityKind::Option, option)
    }

    fn delete(&self, kind: EntityKind, id: &str) -> Result<(), StoreFailure> {
        self.deleted.borrow_mut().push((kind, id.to_string()));
        Ok(())
    }
}
