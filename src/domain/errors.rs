use crate::domain::Field;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field-level validation messages for the step being left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.messages.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.messages.contains_key(&field)
    }

    /// Drops the message for one field, leaving the others untouched.
    pub fn clear(&mut self, field: Field) {
        self.messages.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.messages.keys().copied()
    }
}

/// Failure to hand the application to its destination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("could not reach submission endpoint: {0}")]
    Transport(String),
    #[error("submission endpoint answered with status {0}")]
    Rejected(u16),
    #[error("could not encode application: {0}")]
    Encode(String),
    #[error("submission worker stopped before reporting a result")]
    Interrupted,
}

pub type SubmissionResult = Result<(), SubmissionError>;
