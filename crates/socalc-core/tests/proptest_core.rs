//! Property-based tests for the mix engine.
//!
//! Uses proptest to generate random substances and mixin sequences, then
//! verifies the structural invariants of the transition and valuation.

use proptest::prelude::*;
use socalc_core::catalog::Catalog;
use socalc_core::effect::{EffectSet, MAX_EFFECTS};
use socalc_core::id::*;
use socalc_core::recorder::Recorder;
use socalc_core::substance::Substance;
use socalc_core::test_utils::*;
use socalc_core::valuation::evaluate;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_substance() -> impl Strategy<Value = SubstanceId> {
    (0..6u8).prop_map(SubstanceId)
}

fn arb_recipe(max_len: usize) -> impl Strategy<Value = Vec<MixinId>> {
    proptest::collection::vec((0..16u8).prop_map(MixinId), 0..=max_len)
}

/// Any set of at most `MAX_EFFECTS` standard effect ids.
fn arb_effects() -> impl Strategy<Value = EffectSet> {
    proptest::collection::btree_set(0..35u8, 0..=MAX_EFFECTS)
        .prop_map(|ids| ids.into_iter().map(EffectId).collect())
}

fn mixed(cat: &Catalog, substance: SubstanceId, recipe: &[MixinId]) -> Substance {
    let mut state = Substance::new(cat, substance).unwrap();
    state.apply_recipe(cat, recipe).unwrap();
    state
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The effect cap holds after every single application.
    #[test]
    fn effect_count_never_exceeds_cap(substance in arb_substance(), recipe in arb_recipe(40)) {
        let cat = Catalog::standard();
        let mut state = Substance::new(&cat, substance).unwrap();
        for &id in &recipe {
            state.apply_mixin(&cat, id).unwrap();
            prop_assert!(state.effects.len() <= MAX_EFFECTS);
        }
        prop_assert_eq!(state.history, recipe);
    }

    /// Arbitrary starting sets (not only reachable ones) also stay capped.
    #[test]
    fn cap_holds_from_any_start(start in arb_effects(), id in 0..16u8) {
        let cat = Catalog::standard();
        let mut state = Substance::new(&cat, cocaine()).unwrap();
        state.effects = start;
        state.apply_mixin(&cat, MixinId(id)).unwrap();
        prop_assert!(state.effects.len() <= MAX_EFFECTS);
    }

    /// Same state and mixin always give the same result.
    #[test]
    fn apply_is_deterministic(start in arb_effects(), id in 0..16u8) {
        let cat = Catalog::standard();
        let mut a = state_with(&cat, og_kush(), &[]);
        a.effects = start;
        let mut b = a.clone();
        a.apply_mixin(&cat, MixinId(id)).unwrap();
        b.apply_mixin(&cat, MixinId(id)).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Cost rises by the mixin cost exactly when the cap allowed the main
    /// effect, and the history always grows by one.
    #[test]
    fn cost_and_history_follow_the_cap(start in arb_effects(), id in 0..16u8) {
        let cat = Catalog::standard();
        let def = cat.mixin(MixinId(id)).unwrap();
        let mut state = state_with(&cat, og_kush(), &[]);
        state.effects = start;
        let before = state.clone();
        state.apply_mixin(&cat, MixinId(id)).unwrap();

        prop_assert_eq!(state.history.len(), before.history.len() + 1);
        // Every built-in mixin costs something, so a charge is visible.
        if state.cost == before.cost + def.cost {
            prop_assert!(state.effects.contains(def.effect));
        } else {
            prop_assert_eq!(state.cost, before.cost);
            prop_assert_eq!(state.effects.len(), MAX_EFFECTS);
        }
    }

    /// Profit is floor(base * (1 + sum of multipliers)) - cost, in exact
    /// integer arithmetic.
    #[test]
    fn profit_formula_is_exact(substance in arb_substance(), recipe in arb_recipe(12)) {
        let cat = Catalog::standard();
        let state = mixed(&cat, substance, &recipe);
        let hundredths: u64 = 100 + state
            .effects
            .iter()
            .map(|id| u64::from(cat.effect(id).unwrap().multiplier.hundredths()))
            .sum::<u64>();
        let value = u64::from(state.base_value) * hundredths / 100;
        let v = evaluate(&cat, &state);
        prop_assert_eq!(v.value, value);
        prop_assert_eq!(v.profit, value as i64 - i64::from(state.cost));
    }

    /// Mutating a clone never touches the original.
    #[test]
    fn clones_are_independent(substance in arb_substance(), recipe in arb_recipe(8), extra in arb_recipe(8)) {
        let cat = Catalog::standard();
        let original = mixed(&cat, substance, &recipe);
        let snapshot = (original.effects, original.cost, original.history.len());

        let mut copy = original.clone();
        copy.apply_recipe(&cat, &extra).unwrap();

        prop_assert_eq!((original.effects, original.cost, original.history.len()), snapshot);
    }

    /// The recorder only ever moves to strictly better profits.
    #[test]
    fn recorder_is_monotonic(substance in arb_substance(), recipes in proptest::collection::vec(arb_recipe(6), 1..20)) {
        let cat = Catalog::standard();
        let mut recorder = Recorder::new();
        let mut best: Option<i64> = None;
        for recipe in &recipes {
            let state = mixed(&cat, substance, recipe);
            let profit = evaluate(&cat, &state).profit;
            let stored = recorder.record(&cat, &state);
            prop_assert_eq!(stored, best.is_none_or(|b| profit > b));
            if stored {
                best = Some(profit);
            }
            prop_assert_eq!(recorder.get(substance).map(|r| r.profit()), best);
        }
    }
}
