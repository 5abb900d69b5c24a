use anyhow::{Context, Result};
use itertools::Itertools;
use log::{info, warn};
use rand::Rng;

use crate::config::Config;
use crate::output::{publish_batch, QuizOutput};
use crate::quiz::definition::{open_key_verses, QuestionBank};
use crate::quiz::pool::Pools;
use crate::quiz::substitution::SubstitutionPolicy;
use crate::quiz::{Composer, Quiz};

pub fn load_pools(config: &Config) -> Result<Pools> {
    let bank = QuestionBank::open(&config.paths.questions, config.book.as_deref())?;
    bank.check_types(&config.question_types)
        .context("Question file uses a type missing from the configuration")?;
    info!("Read {} questions", bank.get_questions().len());
    let key_verses = open_key_verses(&config.paths.key_verses)?;
    info!("Read {} key verses", key_verses.len());
    let pools = Pools::partition(bank.into_questions(), &key_verses)?;
    Ok(pools)
}

/// Composes the configured number of quizzes, then the standalone backup set if any, all
/// from the same pools, and hands them to `output`.
pub fn run_batch<R, S, O>(
    config: &Config,
    pools: &mut Pools,
    quiz_count: usize,
    composer: &mut Composer<R, S>,
    output: &mut O,
) -> Result<()>
where
    R: Rng,
    S: SubstitutionPolicy,
    O: QuizOutput + ?Sized,
{
    let policy = config.policy().context("Invalid quiz settings")?;
    let backup_policy = config
        .backup_set_policy()
        .context("Invalid backup set settings")?;

    let quizzes = composer.compose_batch(&policy, pools, quiz_count)?;
    let backup_set: Option<Quiz> = match &backup_policy {
        Some(backup_policy) => Some(composer.compose(backup_policy, pools)?),
        None => None,
    };

    let substituted = quizzes
        .iter()
        .chain(backup_set.iter())
        .flat_map(|quiz| quiz.substitutions.iter())
        .collect::<Vec<_>>();
    if !substituted.is_empty() {
        warn!(
            "Regular questions stood in for key questions {} times ({})",
            substituted.len(),
            substituted.iter().unique().join(", ")
        );
    }

    publish_batch(output, &config.title, &quizzes, backup_set.as_ref())?;
    info!(
        "{} key and {} regular questions left unused",
        pools.key.len(),
        pools.regular.len()
    );
    Ok(())
}
