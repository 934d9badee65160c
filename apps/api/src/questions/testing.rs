//! In-memory `QuestionStore` used by handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::question::{NewQuestion, Question};
use crate::questions::store::{QuestionStore, QuestionStoreError};

#[derive(Default)]
pub struct InMemoryQuestionStore {
    questions: Mutex<Vec<Question>>,
    next_id: Mutex<u32>,
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn list(&self) -> Result<Vec<Question>, QuestionStoreError> {
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn create(&self, question: &NewQuestion) -> Result<String, QuestionStoreError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = format!("q{next_id}");
        self.questions.lock().unwrap().push(Question {
            id: id.clone(),
            creation_time: None,
            title: question.title.clone(),
            description: question.description.clone(),
            examples: question.examples.clone(),
            constraints: question.constraints.clone(),
            created_by: Some(String::new()),
        });
        Ok(id)
    }

    async fn delete(&self, id: &str) -> Result<(), QuestionStoreError> {
        let mut questions = self.questions.lock().unwrap();
        let before = questions.len();
        questions.retain(|q| q.id != id);
        if questions.len() == before {
            return Err(QuestionStoreError::Function(format!(
                "Delete on nonexistent document ID {id}"
            )));
        }
        Ok(())
    }
}
