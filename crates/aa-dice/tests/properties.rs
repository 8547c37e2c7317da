//! Property-based tests for the aa-dice crate.
use aa_dice::{Anchor, WeightedOption, decompose_total, pick_biased_total, resolve_roll, weighted_pick};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn anchor() -> impl Strategy<Value = Anchor> {
    prop_oneof![Just(Anchor::Low), Just(Anchor::High)]
}

proptest! {
    #[test]
    fn decomposition_sums_to_total(total in 2u32..=12, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (d1, d2) = decompose_total(total, &mut rng);
        prop_assert_eq!(d1 + d2, total);
        prop_assert!((1..=6).contains(&d1));
        prop_assert!((1..=6).contains(&d2));
    }

    #[test]
    fn impossible_totals_give_snake_eyes(total in prop_oneof![0u32..2, 13u32..1000], seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert_eq!(decompose_total(total, &mut rng), (1, 1));
    }

    #[test]
    fn biased_total_stays_in_anchor_range(anchor in anchor(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let total = pick_biased_total(anchor, &mut rng);
        prop_assert!(anchor.permits(total));
    }

    #[test]
    fn resolved_rolls_are_consistent(anchor in anchor(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let roll = resolve_roll(anchor, &mut rng);
        prop_assert!(roll.is_consistent());
        prop_assert!(anchor.permits(roll.total()));
        prop_assert_eq!(roll.anchor(), anchor);
    }

    #[test]
    fn weighted_pick_returns_a_candidate(
        weights in prop::collection::vec(1u32..50, 1..8),
        seed in any::<u64>(),
    ) {
        let table: Vec<WeightedOption<usize>> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| WeightedOption::new(i, *w))
            .collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = weighted_pick(&table, &mut rng).copied();
        prop_assert!(matches!(picked, Some(i) if i < table.len()));
    }
}
