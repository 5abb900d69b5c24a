use anyhow::Result;

use crate::output::QuizOutput;
use crate::quiz::Quiz;

#[derive(Debug, PartialEq, Eq)]
pub struct PublishedQuiz {
    pub title: String,
    pub quiz: Quiz,
}

#[derive(Default)]
pub struct MockOutput {
    published: Vec<PublishedQuiz>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.published.iter().map(|p| p.title.as_str()).collect()
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.published.iter().any(|p| p.title == title)
    }

    pub fn flush(&mut self) -> Vec<PublishedQuiz> {
        std::mem::replace(&mut self.published, Vec::new())
    }
}

impl QuizOutput for MockOutput {
    fn publish(&mut self, title: &str, quiz: &Quiz) -> Result<()> {
        self.published.push(PublishedQuiz {
            title: title.to_owned(),
            quiz: quiz.clone(),
        });
        Ok(())
    }
}
