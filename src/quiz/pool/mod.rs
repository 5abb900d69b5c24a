use log::{debug, info, warn};
use rand::Rng;
use std::collections::{BTreeMap, HashSet};

use crate::error::QuizError;
use crate::quiz::definition::{Question, QuestionType, RawQuestion, Verse};
use crate::quiz::substitution::{Substitution, SubstitutionPolicy};


/// Questions not drawn yet, grouped by type. Order within a type is the bank order.
#[derive(Clone, Debug, Default)]
pub struct Pool {
    questions: BTreeMap<QuestionType, Vec<Question>>,
}

impl Pool {
    fn insert(&mut self, question: Question) {
        self.questions
            .entry(question.question_type.clone())
            .or_insert_with(Vec::new)
            .push(question);
    }

    pub fn len(&self) -> usize {
        self.questions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, question_type: &QuestionType) -> usize {
        self.questions.get(question_type).map_or(0, Vec::len)
    }

    pub fn get_questions(&self, question_type: &QuestionType) -> &[Question] {
        self.questions
            .get(question_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.values().flatten()
    }

    #[cfg(test)]
    pub fn contains(&self, question: &Question) -> bool {
        self.get_questions(&question.question_type)
            .iter()
            .any(|q| q == question)
    }

    /// Picks a question of the given type uniformly at random.
    pub fn take<R: Rng>(
        &mut self,
        question_type: &QuestionType,
        rng: &mut R,
        remove: bool,
    ) -> Option<Question> {
        let candidates = self.questions.get_mut(question_type)?;
        if candidates.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..candidates.len());
        if remove {
            Some(candidates.remove(index))
        } else {
            Some(candidates[index].clone())
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolCount {
    pub key: usize,
    pub regular: usize,
}

/// A question drawn for a key slot, and whether it had to come from the regular pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDraw {
    pub question: Question,
    pub substituted: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Pools {
    pub regular: Pool,
    pub key: Pool,
}

impl Pools {
    /// Splits the bank into key and regular questions. A question is key as soon as one of
    /// its verses is a key verse.
    pub fn partition(
        rows: Vec<RawQuestion>,
        key_verses: &HashSet<Verse>,
    ) -> Result<Pools, QuizError> {
        let mut pools = Pools::default();
        for (id, row) in rows.into_iter().enumerate() {
            let question = row.into_question(id)?;
            if question.touches_any(key_verses) {
                pools.key.insert(question);
            } else {
                pools.regular.insert(question);
            }
        }
        info!(
            "Found {} key questions and {} regular questions",
            pools.key.len(),
            pools.regular.len()
        );
        for (question_type, count) in pools.counts() {
            debug!(
                "{}: {} key, {} regular",
                question_type, count.key, count.regular
            );
        }
        Ok(pools)
    }

    pub fn counts(&self) -> BTreeMap<QuestionType, PoolCount> {
        let mut counts = BTreeMap::new();
        for (question_type, questions) in &self.key.questions {
            counts
                .entry(question_type.clone())
                .or_insert(PoolCount { key: 0, regular: 0 })
                .key = questions.len();
        }
        for (question_type, questions) in &self.regular.questions {
            counts
                .entry(question_type.clone())
                .or_insert(PoolCount { key: 0, regular: 0 })
                .regular = questions.len();
        }
        counts
    }

    pub fn draw_question<R: Rng>(
        &mut self,
        question_type: &QuestionType,
        rng: &mut R,
        remove: bool,
    ) -> Result<Question, QuizError> {
        self.regular
            .take(question_type, rng, remove)
            .ok_or_else(|| QuizError::RegularPoolExhausted {
                question_type: question_type.clone(),
                remaining: self
                    .regular
                    .iter()
                    .map(|q| format!("{},{},{},{}", q.reference(), q.question_type, q.prompt, q.answer))
                    .collect(),
            })
    }

    pub fn draw_key_question<R, S>(
        &mut self,
        question_type: &QuestionType,
        rng: &mut R,
        remove: bool,
        substitution: &mut S,
    ) -> Result<KeyDraw, QuizError>
    where
        R: Rng,
        S: SubstitutionPolicy + ?Sized,
    {
        if let Some(question) = self.key.take(question_type, rng, remove) {
            return Ok(KeyDraw {
                question,
                substituted: false,
            });
        }
        match substitution.decide(question_type) {
            Substitution::Substitute => {
                let question = self.draw_question(question_type, rng, remove)?;
                warn!(
                    "Ran out of key {} questions, substituted regular question {}",
                    question_type,
                    question.reference()
                );
                Ok(KeyDraw {
                    question,
                    substituted: true,
                })
            }
            Substitution::Fail => Err(QuizError::KeyPoolExhausted(question_type.clone())),
        }
    }
}
