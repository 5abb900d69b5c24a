use crate::quiz::definition::QuestionType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Substitution {
    Substitute,
    Fail,
}

/// Decides what happens when the key pool has no question left of some type: draw a
/// regular question of that type instead, or give up on the batch.
pub trait SubstitutionPolicy {
    fn decide(&mut self, question_type: &QuestionType) -> Substitution;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FailFast;

impl SubstitutionPolicy for FailFast {
    fn decide(&mut self, _question_type: &QuestionType) -> Substitution {
        Substitution::Fail
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysSubstitute;

impl SubstitutionPolicy for AlwaysSubstitute {
    fn decide(&mut self, _question_type: &QuestionType) -> Substitution {
        Substitution::Substitute
    }
}

impl<S: SubstitutionPolicy + ?Sized> SubstitutionPolicy for Box<S> {
    fn decide(&mut self, question_type: &QuestionType) -> Substitution {
        (**self).decide(question_type)
    }
}
