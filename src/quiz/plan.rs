use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use crate::error::QuizError;
use crate::quiz::definition::QuestionType;
use crate::quiz::settings::{DistributionRange, TypeDistributionPolicy};

/// Decides how many questions of each type go into one quiz.
///
/// Every ranged type gets a uniform draw within its range. The upper end of each draw is
/// capped so the types drawn later can still reach their minimum, and the order of the
/// draws is shuffled so no type is favored by that cap. The default type takes whatever
/// remains, and types the policy does not mention get zero.
pub fn plan_quantities<R: Rng>(
    policy: &TypeDistributionPolicy,
    rng: &mut R,
) -> Result<BTreeMap<QuestionType, usize>, QuizError> {
    policy.check_allocation()?;

    let mut ranged: Vec<(&QuestionType, &DistributionRange)> = policy.ranged_types().collect();
    ranged.shuffle(rng);

    let mut quantities = BTreeMap::new();
    let mut allocated = 0;
    let mut pending_minimums: usize = ranged.iter().map(|(_, range)| range.min).sum();
    for (question_type, range) in ranged {
        pending_minimums -= range.min;
        let budget = policy.total - allocated - pending_minimums;
        let quantity = rng.gen_range(range.min..=range.max.min(budget));
        allocated += quantity;
        quantities.insert(question_type.clone(), quantity);
    }

    if allocated > policy.total {
        return Err(QuizError::OverAllocation {
            total: policy.total,
            allocated,
        });
    }
    quantities.insert(policy.default_type.clone(), policy.total - allocated);

    for question_type in &policy.known_types {
        quantities.entry(question_type.clone()).or_insert(0);
    }
    Ok(quantities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::definition::{QuestionTypes, TypeInfo};
    use crate::quiz::settings::QuizSettings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn types() -> QuestionTypes {
        QuestionTypes::new(
            ["INT", "FTV", "MA", "CR", "QT", "SIT"]
                .iter()
                .map(|code| (QuestionType::new(code), TypeInfo::default())),
        )
    }

    fn policy(total: usize, ranges: &[(&str, usize, usize)]) -> TypeDistributionPolicy {
        let settings = QuizSettings {
            questions: total,
            key_ratio: 0.5,
            default: "INT".into(),
            backups: 0,
            distribution: ranges
                .iter()
                .map(|(code, min, max)| (QuestionType::new(code), DistributionRange::new(*min, *max)))
                .collect(),
        };
        TypeDistributionPolicy::new(&settings, &types()).unwrap()
    }

    #[test]
    fn quantities_sum_to_total_within_ranges() {
        let policy = policy(20, &[("FTV", 1, 3), ("MA", 2, 5), ("CR", 0, 4), ("QT", 1, 1)]);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quantities = plan_quantities(&policy, &mut rng).unwrap();
            assert_eq!(quantities.values().sum::<usize>(), 20);
            for (question_type, range) in policy.ranged_types() {
                let quantity = quantities[question_type];
                assert!(range.min <= quantity && quantity <= range.max);
            }
            assert_eq!(quantities[&QuestionType::new("SIT")], 0);
        }
    }

    #[test]
    fn tight_policies_never_overshoot() {
        let policy = policy(6, &[("FTV", 0, 6), ("MA", 0, 6), ("CR", 2, 6)]);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quantities = plan_quantities(&policy, &mut rng).unwrap();
            assert_eq!(quantities.values().sum::<usize>(), 6);
            assert!(quantities[&QuestionType::new("CR")] >= 2);
        }
    }

    #[test]
    fn default_type_fills_the_quiz() {
        let policy = policy(10, &[("FTV", 0, 0), ("MA", 0, 0), ("CR", 0, 0), ("QT", 0, 0)]);
        let mut rng = StdRng::seed_from_u64(5);
        let quantities = plan_quantities(&policy, &mut rng).unwrap();
        assert_eq!(quantities[&QuestionType::new("INT")], 10);
        assert_eq!(
            quantities
                .iter()
                .filter(|(question_type, _)| question_type.code() != "INT")
                .map(|(_, quantity)| quantity)
                .sum::<usize>(),
            0
        );
        assert_eq!(quantities.len(), 6);
    }

    #[test]
    fn varies_between_quizzes() {
        let policy = policy(20, &[("MA", 0, 10)]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let quantities = plan_quantities(&policy, &mut rng).unwrap();
            seen.insert(quantities[&QuestionType::new("MA")]);
        }
        assert!(seen.len() > 3);
    }

    #[test]
    fn rejects_over_allocation() {
        let mut policy = policy(10, &[("MA", 2, 4)]);
        policy.total = 1;
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            plan_quantities(&policy, &mut rng),
            Err(QuizError::OverAllocation {
                total: 1,
                allocated: 2,
            })
        );
    }
}
