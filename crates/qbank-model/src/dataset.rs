//! The canonical dataset and its shareable handle.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

use crate::error::{ModelError, Result};
use crate::question::Question;

/// An immutable, merged set of questions.
///
/// Replaced wholesale by each merge; never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    questions: Vec<Question>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Builds a dataset, rejecting duplicate ids.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if index.insert(question.id.clone(), position).is_some() {
                return Err(ModelError::DuplicateId(question.id.clone()));
            }
        }
        Ok(Self { questions, index })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|&position| &self.questions[position])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Cheap, cloneable reference to one published [`Dataset`].
///
/// A newer merge publishes a new handle; readers holding an older one keep a
/// consistent snapshot.
#[derive(Debug, Clone)]
pub struct DatasetHandle(Arc<Dataset>);

impl DatasetHandle {
    pub fn new(dataset: Dataset) -> Self {
        Self(Arc::new(dataset))
    }

    /// True if both handles point at the same published dataset.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for DatasetHandle {
    type Target = Dataset;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
