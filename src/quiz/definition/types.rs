use serde::Deserialize;
use std::collections::BTreeMap;

use super::question::QuestionType;
use crate::error::QuizError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TypeInfo {
    #[serde(default)]
    pub is_key_only: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Every question type the bank may use, with its drawing rules. Built once from the
/// configuration and never modified afterwards.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct QuestionTypes {
    types: BTreeMap<QuestionType, TypeInfo>,
}

impl QuestionTypes {
    pub fn new<I>(types: I) -> Self
    where
        I: IntoIterator<Item = (QuestionType, TypeInfo)>,
    {
        QuestionTypes {
            types: types.into_iter().collect(),
        }
    }

    pub fn get(&self, question_type: &QuestionType) -> Result<&TypeInfo, QuizError> {
        self.types
            .get(question_type)
            .ok_or_else(|| QuizError::UnknownQuestionType(question_type.to_string()))
    }

    pub fn is_key_only(&self, question_type: &QuestionType) -> bool {
        self.types
            .get(question_type)
            .map(|info| info.is_key_only)
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionType, &TypeInfo)> {
        self.types.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &QuestionType> {
        self.types.keys()
    }
}
