use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use self::definition::{Question, QuestionType};
use self::plan::plan_quantities;
use self::pool::Pools;
use self::settings::TypeDistributionPolicy;
use self::substitution::SubstitutionPolicy;
use crate::error::QuizError;

pub mod definition;
mod plan;
pub mod pool;
pub mod settings;
pub mod substitution;


const BACKUPS_PER_TYPE: usize = 2;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Quiz {
    pub questions: Vec<Question>,
    pub backup_questions: Vec<Question>,
    /// Types whose key slots were filled from the regular pool.
    pub substitutions: Vec<QuestionType>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Planning,
    DrawingPrimary,
    DrawingBackup,
    Shuffling,
    Complete,
    Failed,
}

pub struct Composer<R, S> {
    rng: R,
    substitution: S,
}

impl<R: Rng, S: SubstitutionPolicy> Composer<R, S> {
    pub fn new(rng: R, substitution: S) -> Self {
        Composer { rng, substitution }
    }

    fn set_stage(&self, stage: Stage) {
        debug!("Entering quiz stage: {:?}", stage);
    }

    /// Draws one quiz from `pools`. Primary questions leave the pools; backup questions are
    /// drawn from the pools as they were before this quiz and leave them untouched.
    pub fn compose(
        &mut self,
        policy: &TypeDistributionPolicy,
        pools: &mut Pools,
    ) -> Result<Quiz, QuizError> {
        let result = self.build(policy, pools);
        if let Err(e) = &result {
            self.set_stage(Stage::Failed);
            debug!("Quiz composition failed: {}", e);
        }
        result
    }

    fn build(
        &mut self,
        policy: &TypeDistributionPolicy,
        pools: &mut Pools,
    ) -> Result<Quiz, QuizError> {
        self.set_stage(Stage::Planning);
        let quantities = plan_quantities(policy, &mut self.rng)?;
        let mut backup_source = pools.clone();
        let mut quiz = Quiz::default();

        self.set_stage(Stage::DrawingPrimary);
        for (question_type, quantity) in &quantities {
            for _ in 0..*quantity {
                let wants_key = policy.is_key_only(question_type)
                    || self.rng.gen::<f64>() <= policy.key_ratio;
                if wants_key {
                    let draw = pools.draw_key_question(
                        question_type,
                        &mut self.rng,
                        true,
                        &mut self.substitution,
                    )?;
                    if draw.substituted {
                        quiz.substitutions.push(question_type.clone());
                    }
                    quiz.questions.push(draw.question);
                } else {
                    let question = pools.draw_question(question_type, &mut self.rng, true)?;
                    quiz.questions.push(question);
                }
            }
        }
        if quiz.questions.len() != policy.total {
            return Err(QuizError::InternalConsistency {
                expected: policy.total,
                drawn: quiz.questions.len(),
            });
        }

        if policy.backup_count > 0 {
            self.set_stage(Stage::DrawingBackup);
            for question_type in quantities.keys() {
                if *question_type == policy.default_type {
                    for _ in 0..policy.backup_count {
                        let question =
                            backup_source.draw_question(question_type, &mut self.rng, false)?;
                        quiz.backup_questions.push(question);
                    }
                } else {
                    for _ in 0..BACKUPS_PER_TYPE {
                        let question = if policy.is_key_only(question_type) {
                            let draw = backup_source.draw_key_question(
                                question_type,
                                &mut self.rng,
                                false,
                                &mut self.substitution,
                            )?;
                            if draw.substituted {
                                quiz.substitutions.push(question_type.clone());
                            }
                            draw.question
                        } else {
                            backup_source.draw_question(question_type, &mut self.rng, false)?
                        };
                        quiz.backup_questions.push(question);
                    }
                }
            }
        }

        self.set_stage(Stage::Shuffling);
        quiz.questions.shuffle(&mut self.rng);

        self.set_stage(Stage::Complete);
        Ok(quiz)
    }

    /// Composes `count` quizzes that share one set of pools, so no question is asked twice
    /// in the batch.
    pub fn compose_batch(
        &mut self,
        policy: &TypeDistributionPolicy,
        pools: &mut Pools,
        count: usize,
    ) -> Result<Vec<Quiz>, QuizError> {
        let mut quizzes = Vec::with_capacity(count);
        for index in 0..count {
            let quiz = self.compose(policy, pools)?;
            info!(
                "Composed quiz #{} ({} questions, {} backups)",
                index + 1,
                quiz.questions.len(),
                quiz.backup_questions.len()
            );
            quizzes.push(quiz);
        }
        Ok(quizzes)
    }
}
