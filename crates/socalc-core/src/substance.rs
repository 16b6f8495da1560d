//! Substance state and the mixin transition.
//!
//! A [`Substance`] is a base substance in play: its current effects, the
//! cost accumulated so far, and every mixin applied to it in order. Cloning
//! a substance copies its history, so clones never share storage.
//!
//! # Applying a mixin
//!
//! [`Substance::apply`] works against a snapshot of the effect set taken
//! before any rule runs:
//!
//! 1. Rules run in their catalog order. A rule `from -> to` fires when `from`
//!    is in the snapshot and `to` is either absent from the snapshot or
//!    already scheduled for removal by an earlier rule of the same mixin.
//! 2. The new set is the snapshot minus every fired source, plus every fired
//!    target.
//! 3. If fewer than [`MAX_EFFECTS`] effects remain, the mixin's main effect
//!    is added and its cost is charged, even when the main effect was already
//!    present.
//! 4. The mixin is appended to the history either way.

use crate::catalog::{Catalog, CatalogError, Conversion, MixinDef, SubstanceDef};
use crate::effect::{EffectSet, MAX_EFFECTS};
use crate::id::{MixinId, SubstanceId};
use serde::{Deserialize, Serialize};

/// A base substance in play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substance {
    /// Which base substance this state started from.
    pub id: SubstanceId,
    /// Base sale value before multipliers.
    pub base_value: u32,
    pub effects: EffectSet,
    /// Accumulated cost. Starts at the base cost and never decreases.
    pub cost: u32,
    /// Mixins in application order, including ones that hit the effect cap.
    pub history: Vec<MixinId>,
}

impl Substance {
    /// A fresh state for the catalog substance `id`.
    pub fn new(catalog: &Catalog, id: SubstanceId) -> Result<Self, CatalogError> {
        catalog
            .substance(id)
            .map(|def| Self::from_def(id, def))
            .ok_or(CatalogError::InvalidSubstanceRef(id))
    }

    pub fn from_def(id: SubstanceId, def: &SubstanceDef) -> Self {
        Self {
            id,
            base_value: def.value,
            effects: def.effects,
            cost: def.cost,
            history: Vec::new(),
        }
    }

    /// Apply one mixin in place. Never fails; at the effect cap it only
    /// converts and records the attempt.
    pub fn apply(&mut self, id: MixinId, mixin: &MixinDef) {
        let converted = apply_conversions(self.effects, &mixin.conversions);

        if converted.len() < MAX_EFFECTS {
            self.effects = converted.union(EffectSet::single(mixin.effect));
            self.cost = self.cost.saturating_add(mixin.cost);
        } else {
            self.effects = converted;
        }

        self.history.push(id);
    }

    /// Look up `id` in the catalog and apply it.
    pub fn apply_mixin(&mut self, catalog: &Catalog, id: MixinId) -> Result<(), CatalogError> {
        let mixin = catalog.mixin(id).ok_or(CatalogError::InvalidMixinRef(id))?;
        self.apply(id, mixin);
        Ok(())
    }

    /// By-value form of [`Substance::apply_mixin`].
    pub fn with_mixin(mut self, catalog: &Catalog, id: MixinId) -> Result<Self, CatalogError> {
        self.apply_mixin(catalog, id)?;
        Ok(self)
    }

    /// Apply every mixin in `recipe`, in order.
    pub fn apply_recipe(&mut self, catalog: &Catalog, recipe: &[MixinId]) -> Result<(), CatalogError> {
        for &id in recipe {
            self.apply_mixin(catalog, id)?;
        }
        Ok(())
    }
}

/// Run `rules` in order against `snapshot` and return the converted set.
///
/// Source presence is always read from `snapshot`, never from effects added
/// by earlier rules.
pub fn apply_conversions(snapshot: EffectSet, rules: &[Conversion]) -> EffectSet {
    let mut to_remove = EffectSet::empty();
    let mut to_add = EffectSet::empty();

    for rule in rules {
        let target_free = !snapshot.contains(rule.to) || to_remove.contains(rule.to);
        if snapshot.contains(rule.from) && target_free {
            to_remove.insert(rule.from);
            to_add.insert(rule.to);
        }
    }

    snapshot.difference(to_remove).union(to_add)
}
