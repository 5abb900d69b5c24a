use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub mod question;
pub mod types;
pub mod verse;

pub use question::{Question, QuestionType, RawQuestion};
pub use types::{QuestionTypes, TypeInfo};
pub use verse::{parse_reference, parse_references, Verse};

use crate::error::QuizError;

/// Rows of the question CSV, header discarded.
#[derive(Debug)]
pub struct QuestionBank {
    questions: Vec<RawQuestion>,
}

impl QuestionBank {
    /// When `book` is given, rows are `type, reference, prompt, answer` and every question
    /// belongs to that book. Otherwise rows start with the book name.
    pub fn open(source: &Path, book: Option<&str>) -> Result<QuestionBank> {
        let file = File::open(source)
            .with_context(|| format!("Could not open question file {}", source.display()))?;
        QuestionBank::from_reader(file, book)
            .with_context(|| format!("Could not read question file {}", source.display()))
    }

    pub fn from_reader<R: Read>(reader: R, book: Option<&str>) -> Result<QuestionBank> {
        let mut questions = Vec::new();
        let mut csv_reader = csv::Reader::from_reader(reader);
        match book {
            Some(book) => {
                for row in csv_reader.deserialize() {
                    let (question_type, reference, prompt, answer): (String, String, String, String) =
                        row?;
                    questions.push(RawQuestion {
                        book: book.to_owned(),
                        question_type,
                        reference,
                        prompt,
                        answer,
                    });
                }
            }
            None => {
                for row in csv_reader.deserialize() {
                    let (book, question_type, reference, prompt, answer): (
                        String,
                        String,
                        String,
                        String,
                        String,
                    ) = row?;
                    questions.push(RawQuestion {
                        book,
                        question_type,
                        reference,
                        prompt,
                        answer,
                    });
                }
            }
        }
        Ok(QuestionBank { questions })
    }

    pub fn check_types(&self, types: &QuestionTypes) -> Result<(), QuizError> {
        for question in &self.questions {
            types.get(&QuestionType::new(&question.question_type))?;
        }
        Ok(())
    }

    pub fn get_questions(&self) -> &Vec<RawQuestion> {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<RawQuestion> {
        self.questions
    }
}

/// Reads rows of `book, reference, reference, ...`. Blank cells are skipped.
pub fn read_key_verses<R: Read>(reader: R) -> Result<HashSet<Verse>> {
    let mut key_verses = HashSet::new();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    for record in csv_reader.records() {
        let record = record?;
        let mut cells = record.iter();
        let book = match cells.next() {
            Some(book) if !book.trim().is_empty() => book.trim(),
            _ => continue,
        };
        for reference in cells.filter(|cell| !cell.trim().is_empty()) {
            key_verses.extend(parse_references(book, reference)?);
        }
    }
    Ok(key_verses)
}

pub fn open_key_verses(source: &Path) -> Result<HashSet<Verse>> {
    let file = File::open(source)
        .with_context(|| format!("Could not open key verse file {}", source.display()))?;
    read_key_verses(file)
        .with_context(|| format!("Could not read key verse file {}", source.display()))
}
