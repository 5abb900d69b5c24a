use thiserror::Error;

use crate::quiz::definition::QuestionType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuizError {
    #[error("Malformed reference `{reference}`: {reason}")]
    MalformedReference { reference: String, reason: String },

    #[error("Invalid verse range `{reference}`: {low} is greater than {high}")]
    InvalidRange {
        reference: String,
        low: u32,
        high: u32,
    },

    #[error("Quiz asks for {total} questions but the question types already claim {allocated}")]
    OverAllocation { total: usize, allocated: usize },

    #[error("Ran out of key questions of type {0}")]
    KeyPoolExhausted(QuestionType),

    #[error("No {question_type} questions remaining ({} other questions left)", remaining.len())]
    RegularPoolExhausted {
        question_type: QuestionType,
        remaining: Vec<String>,
    },

    #[error("Drew {drawn} questions for a quiz of {expected}")]
    InternalConsistency { expected: usize, drawn: usize },

    #[error("Unknown question type `{0}`")]
    UnknownQuestionType(String),

    #[error("Invalid range for {question_type}: min {min} is greater than max {max}")]
    InvalidDistribution {
        question_type: QuestionType,
        min: usize,
        max: usize,
    },

    #[error("Key ratio must be between 0 and 1 (got {0})")]
    InvalidKeyRatio(f64),
}
