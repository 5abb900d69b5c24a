use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

use super::verse::{parse_references, Verse};
use crate::error::QuizError;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "String")]
pub struct QuestionType(String);

impl QuestionType {
    pub fn new(code: &str) -> Self {
        QuestionType(code.trim().to_uppercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl From<String> for QuestionType {
    fn from(code: String) -> Self {
        QuestionType::new(&code)
    }
}

impl From<&str> for QuestionType {
    fn from(code: &str) -> Self {
        QuestionType::new(code)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawQuestion {
    pub book: String,
    pub question_type: String,
    pub reference: String,
    pub prompt: String,
    pub answer: String,
}

impl RawQuestion {
    pub fn into_question(self, id: usize) -> Result<Question, QuizError> {
        let verses = parse_references(self.book.trim(), &self.reference)?;
        Ok(Question {
            id,
            question_type: QuestionType::new(&self.question_type),
            verses,
            prompt: self.prompt,
            answer: self.answer,
        })
    }
}

/// A question from the bank. `id` is its row position, so two questions are equal only
/// when they come from the same row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: usize,
    pub question_type: QuestionType,
    pub verses: Vec<Verse>,
    pub prompt: String,
    pub answer: String,
}

impl Question {
    pub fn reference(&self) -> String {
        let first = &self.verses[0];
        let last = &self.verses[self.verses.len() - 1];
        if self.verses.len() == 1 {
            first.to_string()
        } else if self.verses.iter().all(|v| v.chapter == first.chapter) {
            format!("{}-{}", first, last.verse)
        } else {
            format!("{}-{}:{}", first, last.chapter, last.verse)
        }
    }

    pub fn touches_any(&self, verses: &HashSet<Verse>) -> bool {
        self.verses.iter().any(|v| verses.contains(v))
    }
}
