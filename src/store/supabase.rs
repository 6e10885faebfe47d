use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::records::{
    EntityKind, NewContentBlock, NewLesson, NewModule, NewOption, NewQuestion, NewQuiz, Record,
};
use super::TrainingStore;
use crate::error::StoreError;

/// Row-at-a-time writes against Supabase's REST API.
pub struct SupabaseStore {
    agent: ureq::Agent,
    url: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(url: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, kind: EntityKind) -> String {
        format!("{}/rest/v1/{}", self.url, kind.table())
    }

    fn insert<T: Serialize>(&self, kind: EntityKind, row: &T) -> Result<Record, StoreError> {
        let table = kind.table();
        let response = self
            .agent
            .post(&self.endpoint(kind))
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .set("Prefer", "return=representation")
            .send_json(row)
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => StoreError::Rejected {
                    table,
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                other => StoreError::Http(other),
            })?;

        let rows: Vec<Record> = response.into_json()?;
        let record = rows
            .into_iter()
            .next()
            .ok_or(StoreError::EmptyResponse { table })?;

        debug!(table, id = %record.id, "row inserted");
        Ok(record)
    }
}

impl TrainingStore for SupabaseStore {
    type Error = StoreError;

    fn create_module(&self, module: &NewModule<'_>) -> Result<Record, StoreError> {
        self.insert(EntityKind::Module, module)
    }

    fn create_lesson(&self, lesson: &NewLesson<'_>) -> Result<Record, StoreError> {
        self.insert(EntityKind::Lesson, lesson)
    }

    fn create_content_block(&self, block: &NewContentBlock<'_>) -> Result<Record, StoreError> {
        self.insert(EntityKind::ContentBlock, block)
    }

    fn create_quiz(&self, quiz: &NewQuiz<'_>) -> Result<Record, StoreError> {
        self.insert(EntityKind::Quiz, quiz)
    }

    fn create_question(&self, question: &NewQuestion<'_>) -> Result<Record, StoreError> {
        self.insert(EntityKind::Question, question)
    }

    fn create_option(&self, option: &NewOption<'_>) -> Result<Record, StoreError> {
        self.insert(EntityKind::Option, option)
    }

    fn delete(&self, kind: EntityKind, id: &str) -> Result<(), StoreError> {
        let table = kind.table();
        self.agent
            .delete(&self.endpoint(kind))
            .query("id", &format!("eq.{}", id))
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => StoreError::Rejected {
                    table,
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                other => StoreError::Http(other),
            })?;

        debug!(table, id, "row deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_table_name() {
        let store = SupabaseStore::new("https://db.example.co/", "key", Duration::from_secs(5));
        assert_eq!(
            store.endpoint(EntityKind::Question),
            "https://db.example.co/rest/v1/training_quiz_questions"
        );
    }
}
