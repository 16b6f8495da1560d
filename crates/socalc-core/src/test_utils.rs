//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::catalog::{Catalog, CatalogBuilder, Conversion};
use crate::effect::{EffectSet, Multiplier};
use crate::id::*;
use crate::search::SearchDepth;
use crate::substance::Substance;
use crate::valuation::{Valuation, evaluate};

// ===========================================================================
// Standard substance ids
// ===========================================================================

pub fn og_kush() -> SubstanceId {
    SubstanceId(0)
}
pub fn sour_diesel() -> SubstanceId {
    SubstanceId(1)
}
pub fn green_crack() -> SubstanceId {
    SubstanceId(2)
}
pub fn grandaddy_purple() -> SubstanceId {
    SubstanceId(3)
}
pub fn methamphetamine() -> SubstanceId {
    SubstanceId(4)
}
pub fn cocaine() -> SubstanceId {
    SubstanceId(5)
}

// ===========================================================================
// Lookups and constructors
// ===========================================================================

/// Mixin id by name. Panics on unknown names.
pub fn mixin(catalog: &Catalog, name: &str) -> MixinId {
    catalog
        .mixin_id(name)
        .unwrap_or_else(|| panic!("no mixin named {name}"))
}

/// Effect set from raw effect ids.
pub fn effects(ids: &[u8]) -> EffectSet {
    ids.iter().map(|&id| EffectId(id)).collect()
}

/// Validated depth. Panics outside `1..=100`.
pub fn depth(n: u32) -> SearchDepth {
    SearchDepth::new(n).unwrap_or_else(|e| panic!("bad test depth {n}: {e}"))
}

/// A fresh state for `substance` with its effects replaced by `ids`.
pub fn state_with(catalog: &Catalog, substance: SubstanceId, ids: &[u8]) -> Substance {
    let mut state = Substance::new(catalog, substance)
        .unwrap_or_else(|e| panic!("bad test substance: {e}"));
    state.effects = effects(ids);
    state
}

/// Apply `recipe` (by mixin name) to a fresh `substance` and value it.
pub fn mix(catalog: &Catalog, substance: SubstanceId, recipe: &[&str]) -> (Substance, Valuation) {
    let mut state = Substance::new(catalog, substance)
        .unwrap_or_else(|e| panic!("bad test substance: {e}"));
    for name in recipe {
        state.apply(mixin(catalog, name), mixin_def(catalog, name));
    }
    let valuation = evaluate(catalog, &state);
    (state, valuation)
}

fn mixin_def<'a>(catalog: &'a Catalog, name: &str) -> &'a crate::catalog::MixinDef {
    catalog
        .mixin(mixin(catalog, name))
        .unwrap_or_else(|| panic!("no mixin named {name}"))
}

// ===========================================================================
// Small catalogs
// ===========================================================================

/// Two mixins that produce the same profit from the one substance, "plain"
/// (value 100, no effects). `first` adds `alpha`, `second` adds `beta`; both
/// cost 1 and both effects are worth +0.10, so either single mix profits 109.
pub fn tie_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    let alpha = b.register_effect("alpha", Multiplier::from_hundredths(10));
    let beta = b.register_effect("beta", Multiplier::from_hundredths(10));
    b.register_mixin("first", 1, alpha, vec![]);
    b.register_mixin("second", 1, beta, vec![]);
    b.register_substance("plain", 0, 100, EffectSet::empty());
    b.build().unwrap_or_else(|e| panic!("tie catalog: {e}"))
}

/// Same as [`tie_catalog`] with the mixin registration order swapped.
pub fn tie_catalog_swapped() -> Catalog {
    let mut b = CatalogBuilder::new();
    let alpha = b.register_effect("alpha", Multiplier::from_hundredths(10));
    let beta = b.register_effect("beta", Multiplier::from_hundredths(10));
    b.register_mixin("second", 1, beta, vec![]);
    b.register_mixin("first", 1, alpha, vec![]);
    b.register_substance("plain", 0, 100, EffectSet::empty());
    b.build().unwrap_or_else(|e| panic!("tie catalog: {e}"))
}

/// A catalog with one substance and no mixins.
pub fn tie_catalog_without_mixins() -> Catalog {
    let mut b = CatalogBuilder::new();
    b.register_effect("alpha", Multiplier::from_hundredths(10));
    b.register_substance("plain", 0, 100, EffectSet::empty());
    b.build().unwrap_or_else(|e| panic!("empty catalog: {e}"))
}

/// A mixin list `rules` reversed, for order-sensitivity checks.
pub fn reversed(rules: &[Conversion]) -> Vec<Conversion> {
    rules.iter().rev().copied().collect()
}
