use anyhow::{Context, Result};
use directories_next::BaseDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::QuizError;
use crate::output::Format;
use crate::quiz::definition::QuestionTypes;
use crate::quiz::settings::{QuizSettings, TypeDistributionPolicy};

const CONFIG_DIRECTORY: &'static str = "quizgen";
const CONFIG_FILE: &'static str = "quizgen.yml";

pub fn default_config_path() -> Result<PathBuf> {
    let mut path = BaseDirs::new()
        .context("could not locate system directories")?
        .config_dir()
        .to_path_buf();
    path.push(CONFIG_DIRECTORY);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Paths {
    pub questions: PathBuf,
    pub key_verses: PathBuf,
    #[serde(default)]
    pub results_directory: Option<PathBuf>,
}

fn default_title() -> String {
    "Quiz".to_owned()
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub paths: Paths,
    /// Set when the question file leaves out the book column.
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub number_to_generate: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub format: Format,
    pub question_types: QuestionTypes,
    #[serde(default)]
    pub quiz: QuizSettings,
    #[serde(default)]
    pub backup_set: Option<QuizSettings>,
}

impl Config {
    pub fn open(path: &Path) -> Result<Config> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let base_directory = path.parent().unwrap_or_else(|| Path::new("."));
        Config::parse(&yaml, base_directory)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Relative paths in the file are taken relative to `base_directory`.
    pub fn parse(yaml: &str, base_directory: &Path) -> Result<Config> {
        let mut config: Config = serde_yaml::from_str(yaml)?;
        config.paths.questions = base_directory.join(&config.paths.questions);
        config.paths.key_verses = base_directory.join(&config.paths.key_verses);
        config.paths.results_directory = config
            .paths
            .results_directory
            .map(|directory| base_directory.join(directory));
        Ok(config)
    }

    pub fn quiz_count(&self) -> usize {
        self.number_to_generate.max(1)
    }

    pub fn policy(&self) -> Result<TypeDistributionPolicy, QuizError> {
        TypeDistributionPolicy::new(&self.quiz, &self.question_types)
    }

    pub fn backup_set_policy(&self) -> Result<Option<TypeDistributionPolicy>, QuizError> {
        self.backup_set
            .as_ref()
            .map(|settings| TypeDistributionPolicy::new(settings, &self.question_types))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::definition::QuestionType;

    const CONFIG: &'static str = r#"
paths:
  questions: data/questions.csv
  key_verses: /srv/quizzing/key_verses.csv
  results_directory: results
book: Hebrews
title: Hebrews Practice
number_to_generate: 3
seed: 42
format: text
question_types:
  INT: {}
  FTV: { is_key_only: true }
  MA: { description: Multiple answer }
quiz:
  questions: 20
  key_ratio: 0.6
  default: INT
  backups: 3
  distribution:
    FTV: "1,2"
    MA: { min: 1, max: 3 }
backup_set:
  questions: 10
  key_ratio: 0.5
  default: INT
"#;

    #[test]
    fn parses_full_config() {
        let config = Config::parse(CONFIG, Path::new("/home/quizmaster")).unwrap();
        assert_eq!(
            config.paths.questions,
            PathBuf::from("/home/quizmaster/data/questions.csv")
        );
        assert_eq!(
            config.paths.key_verses,
            PathBuf::from("/srv/quizzing/key_verses.csv")
        );
        assert_eq!(
            config.paths.results_directory,
            Some(PathBuf::from("/home/quizmaster/results"))
        );
        assert_eq!(config.book.as_deref(), Some("Hebrews"));
        assert_eq!(config.quiz_count(), 3);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.format, Format::Text);

        let policy = config.policy().unwrap();
        assert_eq!(policy.total, 20);
        assert_eq!(policy.backup_count, 3);
        assert!(policy.is_key_only(&QuestionType::new("FTV")));

        let backup_policy = config.backup_set_policy().unwrap().unwrap();
        assert_eq!(backup_policy.total, 10);
        assert_eq!(backup_policy.backup_count, 0);
    }

    #[test]
    fn applies_defaults() {
        let yaml = "paths:\n  questions: q.csv\n  key_verses: k.csv\nquestion_types:\n  INT: {}\n";
        let config = Config::parse(yaml, Path::new(".")).unwrap();
        assert_eq!(config.title, "Quiz");
        assert_eq!(config.quiz_count(), 1);
        assert_eq!(config.format, Format::Html);
        assert_eq!(config.paths.results_directory, None);
        assert!(config.backup_set_policy().unwrap().is_none());
        assert_eq!(config.policy().unwrap().total, 20);
    }

    #[test]
    fn reports_policy_errors() {
        let yaml = "paths:\n  questions: q.csv\n  key_verses: k.csv\nquestion_types:\n  MA: {}\n";
        let config = Config::parse(yaml, Path::new(".")).unwrap();
        assert_eq!(
            config.policy(),
            Err(QuizError::UnknownQuestionType("INT".to_owned()))
        );
    }

    #[test]
    fn rejects_missing_paths() {
        assert!(Config::parse("question_types: {}\n", Path::new(".")).is_err());
    }
}
