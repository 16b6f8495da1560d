//! Multiplier, sale value and profit of a substance state.

use crate::catalog::Catalog;
use crate::effect::Multiplier;
use crate::substance::Substance;
use serde::{Deserialize, Serialize};

/// Derived valuation of one substance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    /// 1.00 plus the multiplier of every present effect.
    pub multiplier: Multiplier,
    /// Base value scaled by `multiplier`, truncated.
    pub value: u64,
    /// `value` minus accumulated cost. Negative when cost exceeds value.
    pub profit: i64,
}

/// Total multiplier of a state.
pub fn multiplier(catalog: &Catalog, state: &Substance) -> Multiplier {
    Multiplier::ONE + catalog.effect_multiplier_sum(state.effects)
}

pub fn evaluate(catalog: &Catalog, state: &Substance) -> Valuation {
    let multiplier = multiplier(catalog, state);
    let value = multiplier.apply(state.base_value);
    Valuation {
        multiplier,
        value,
        profit: value as i64 - i64::from(state.cost),
    }
}
