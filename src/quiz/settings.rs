use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;

use crate::error::QuizError;
use crate::quiz::definition::{QuestionType, QuestionTypes};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RangeForm")]
pub struct DistributionRange {
    pub min: usize,
    pub max: usize,
}

impl DistributionRange {
    pub fn new(min: usize, max: usize) -> Self {
        DistributionRange { min, max }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RangeForm {
    Text(String),
    Bounds { min: usize, max: usize },
}

impl TryFrom<RangeForm> for DistributionRange {
    type Error = String;

    fn try_from(form: RangeForm) -> Result<Self, Self::Error> {
        match form {
            RangeForm::Bounds { min, max } => Ok(DistributionRange { min, max }),
            RangeForm::Text(text) => {
                let bounds: Vec<&str> = text.split(',').map(str::trim).collect();
                match bounds.as_slice() {
                    [min, max] => {
                        let min = min
                            .parse()
                            .map_err(|_| format!("`{}` is not a question count", min))?;
                        let max = max
                            .parse()
                            .map_err(|_| format!("`{}` is not a question count", max))?;
                        Ok(DistributionRange { min, max })
                    }
                    _ => Err(format!("expected `min,max`, got `{}`", text)),
                }
            }
        }
    }
}

/// How one quiz should be put together, as written in the configuration file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizSettings {
    pub questions: usize,
    pub key_ratio: f64,
    pub default: QuestionType,
    pub backups: usize,
    pub distribution: BTreeMap<QuestionType, DistributionRange>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        QuizSettings {
            questions: 20,
            key_ratio: 0.5,
            default: QuestionType::new("INT"),
            backups: 0,
            distribution: BTreeMap::new(),
        }
    }
}

/// Validated drawing rules for one quiz.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDistributionPolicy {
    pub total: usize,
    pub key_ratio: f64,
    pub default_type: QuestionType,
    pub backup_count: usize,
    pub distribution: BTreeMap<QuestionType, DistributionRange>,
    pub key_only: BTreeSet<QuestionType>,
    pub known_types: BTreeSet<QuestionType>,
}

impl TypeDistributionPolicy {
    pub fn new(
        settings: &QuizSettings,
        types: &QuestionTypes,
    ) -> Result<TypeDistributionPolicy, QuizError> {
        if !(0.0..=1.0).contains(&settings.key_ratio) {
            return Err(QuizError::InvalidKeyRatio(settings.key_ratio));
        }
        types.get(&settings.default)?;
        for (question_type, range) in &settings.distribution {
            types.get(question_type)?;
            if range.min > range.max {
                return Err(QuizError::InvalidDistribution {
                    question_type: question_type.clone(),
                    min: range.min,
                    max: range.max,
                });
            }
        }

        let policy = TypeDistributionPolicy {
            total: settings.questions,
            key_ratio: settings.key_ratio,
            default_type: settings.default.clone(),
            backup_count: settings.backups,
            distribution: settings.distribution.clone(),
            key_only: types
                .iter()
                .filter(|(_, info)| info.is_key_only)
                .map(|(code, _)| code.clone())
                .collect(),
            known_types: types.codes().cloned().collect(),
        };
        policy.check_allocation()?;
        Ok(policy)
    }

    /// Ranges of every type except the default one, which takes whatever is left.
    pub fn ranged_types(&self) -> impl Iterator<Item = (&QuestionType, &DistributionRange)> {
        self.distribution
            .iter()
            .filter(move |(question_type, _)| **question_type != self.default_type)
    }

    pub fn check_allocation(&self) -> Result<(), QuizError> {
        let allocated: usize = self.ranged_types().map(|(_, range)| range.min).sum();
        if allocated > self.total {
            return Err(QuizError::OverAllocation {
                total: self.total,
                allocated,
            });
        }
        Ok(())
    }

    pub fn is_key_only(&self, question_type: &QuestionType) -> bool {
        self.key_only.contains(question_type)
    }
}
