//! Immutable catalog of effects, mixins and base substances.
//!
//! A [`Catalog`] is assembled through a [`CatalogBuilder`] and frozen by
//! [`CatalogBuilder::build`], which validates every cross-reference. The
//! game's own tables are available through [`Catalog::standard`].

use crate::effect::{EFFECT_CAPACITY, EffectSet, MAX_EFFECTS, Multiplier};
use crate::id::{EffectId, MixinId, SubstanceId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Largest number of mixins or substances a catalog can hold (`u8` ids).
pub const MAX_ENTRIES: usize = u8::MAX as usize + 1;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// An effect definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDef {
    pub name: String,
    pub multiplier: Multiplier,
}

/// Rewrites effect `from` into effect `to` when a mixin is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conversion {
    pub from: EffectId,
    pub to: EffectId,
}

impl Conversion {
    pub const fn new(from: EffectId, to: EffectId) -> Self {
        Self { from, to }
    }
}

/// A mixin definition. `conversions` are evaluated in order; reordering
/// them changes the outcome of chained rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixinDef {
    pub name: String,
    pub cost: u32,
    /// Main effect added when the effect cap allows it.
    pub effect: EffectId,
    pub conversions: Vec<Conversion>,
}

/// A base substance definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstanceDef {
    pub name: String,
    pub cost: u32,
    /// Base sale value before multipliers.
    pub value: u32,
    pub effects: EffectSet,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for constructing an immutable [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    effects: Vec<EffectDef>,
    effect_name_to_id: HashMap<String, EffectId>,
    mixins: Vec<MixinDef>,
    mixin_name_to_id: HashMap<String, MixinId>,
    substances: Vec<SubstanceDef>,
    substance_name_to_id: HashMap<String, SubstanceId>,
    duplicates: Vec<String>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect. Returns its ID.
    pub fn register_effect(&mut self, name: &str, multiplier: Multiplier) -> EffectId {
        let id = EffectId(self.effects.len() as u8);
        self.effects.push(EffectDef {
            name: name.to_string(),
            multiplier,
        });
        if self.effect_name_to_id.insert(name.to_string(), id).is_some() {
            self.duplicates.push(name.to_string());
        }
        id
    }

    /// Register a mixin. Returns its ID.
    pub fn register_mixin(
        &mut self,
        name: &str,
        cost: u32,
        effect: EffectId,
        conversions: Vec<Conversion>,
    ) -> MixinId {
        let id = MixinId(self.mixins.len() as u8);
        self.mixins.push(MixinDef {
            name: name.to_string(),
            cost,
            effect,
            conversions,
        });
        if self.mixin_name_to_id.insert(name.to_string(), id).is_some() {
            self.duplicates.push(name.to_string());
        }
        id
    }

    /// Register a base substance. Returns its ID.
    pub fn register_substance(
        &mut self,
        name: &str,
        cost: u32,
        value: u32,
        effects: EffectSet,
    ) -> SubstanceId {
        let id = SubstanceId(self.substances.len() as u8);
        self.substances.push(SubstanceDef {
            name: name.to_string(),
            cost,
            value,
            effects,
        });
        if self.substance_name_to_id.insert(name.to_string(), id).is_some() {
            self.duplicates.push(name.to_string());
        }
        id
    }

    /// Lookup effect ID by name.
    pub fn effect_id(&self, name: &str) -> Option<EffectId> {
        self.effect_name_to_id.get(name).copied()
    }

    /// Validate every reference and freeze the catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        if let Some(name) = self.duplicates.first() {
            return Err(CatalogError::DuplicateName(name.clone()));
        }
        if self.effects.len() > EFFECT_CAPACITY {
            return Err(CatalogError::TooManyEffects(self.effects.len()));
        }
        if self.mixins.len() > MAX_ENTRIES {
            return Err(CatalogError::TooManyEntries {
                kind: "mixin",
                count: self.mixins.len(),
            });
        }
        if self.substances.len() > MAX_ENTRIES {
            return Err(CatalogError::TooManyEntries {
                kind: "substance",
                count: self.substances.len(),
            });
        }

        let known = self.effects.len();
        let check = |id: EffectId| {
            if (id.0 as usize) < known {
                Ok(())
            } else {
                Err(CatalogError::InvalidEffectRef(id))
            }
        };

        for mixin in &self.mixins {
            check(mixin.effect)?;
            for conv in &mixin.conversions {
                check(conv.from)?;
                check(conv.to)?;
            }
        }

        for substance in &self.substances {
            for id in substance.effects {
                check(id)?;
            }
            if substance.effects.len() > MAX_EFFECTS {
                return Err(CatalogError::TooManyInitialEffects {
                    substance: substance.name.clone(),
                    count: substance.effects.len(),
                });
            }
        }

        Ok(self.finish())
    }

    /// Freeze without validation. Only used for the built-in tables, which a
    /// unit test runs through [`CatalogBuilder::build`].
    pub(crate) fn finish(self) -> Catalog {
        Catalog {
            effects: self.effects,
            effect_name_to_id: self.effect_name_to_id,
            mixins: self.mixins,
            mixin_name_to_id: self.mixin_name_to_id,
            substances: self.substances,
            substance_name_to_id: self.substance_name_to_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable catalog. Frozen after build(). Safe to share across threads.
#[derive(Debug, Clone)]
pub struct Catalog {
    effects: Vec<EffectDef>,
    effect_name_to_id: HashMap<String, EffectId>,
    mixins: Vec<MixinDef>,
    mixin_name_to_id: HashMap<String, MixinId>,
    substances: Vec<SubstanceDef>,
    substance_name_to_id: HashMap<String, SubstanceId>,
}

impl Catalog {
    /// The Schedule I tables: 35 effects, 16 mixins, 6 substances.
    pub fn standard() -> Catalog {
        crate::standard::builder().finish()
    }

    pub fn effect(&self, id: EffectId) -> Option<&EffectDef> {
        self.effects.get(id.0 as usize)
    }

    pub fn mixin(&self, id: MixinId) -> Option<&MixinDef> {
        self.mixins.get(id.0 as usize)
    }

    pub fn substance(&self, id: SubstanceId) -> Option<&SubstanceDef> {
        self.substances.get(id.0 as usize)
    }

    pub fn effect_id(&self, name: &str) -> Option<EffectId> {
        self.effect_name_to_id.get(name).copied()
    }

    pub fn mixin_id(&self, name: &str) -> Option<MixinId> {
        self.mixin_name_to_id.get(name).copied()
    }

    pub fn substance_id(&self, name: &str) -> Option<SubstanceId> {
        self.substance_name_to_id.get(name).copied()
    }

    /// Like [`Catalog::substance_id`], but unknown names are an error.
    pub fn resolve_substance(&self, name: &str) -> Result<SubstanceId, CatalogError> {
        self.substance_id(name).ok_or_else(|| CatalogError::NotFound {
            kind: "substance",
            name: name.to_string(),
        })
    }

    /// Like [`Catalog::mixin_id`], but unknown names are an error.
    pub fn resolve_mixin(&self, name: &str) -> Result<MixinId, CatalogError> {
        self.mixin_id(name).ok_or_else(|| CatalogError::NotFound {
            kind: "mixin",
            name: name.to_string(),
        })
    }

    /// All effects in ascending id order.
    pub fn effects(&self) -> impl Iterator<Item = (EffectId, &EffectDef)> {
        self.effects
            .iter()
            .enumerate()
            .map(|(i, def)| (EffectId(i as u8), def))
    }

    /// All mixins in ascending id order. The search relies on this order.
    pub fn mixins(&self) -> impl Iterator<Item = (MixinId, &MixinDef)> {
        self.mixins
            .iter()
            .enumerate()
            .map(|(i, def)| (MixinId(i as u8), def))
    }

    /// All substances in ascending id order.
    pub fn substances(&self) -> impl Iterator<Item = (SubstanceId, &SubstanceDef)> {
        self.substances
            .iter()
            .enumerate()
            .map(|(i, def)| (SubstanceId(i as u8), def))
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn mixin_count(&self) -> usize {
        self.mixins.len()
    }

    pub fn substance_count(&self) -> usize {
        self.substances.len()
    }

    /// Sum of the multipliers of every effect in `effects`. Unknown ids
    /// contribute nothing.
    pub fn effect_multiplier_sum(&self, effects: EffectSet) -> Multiplier {
        effects
            .iter()
            .filter_map(|id| self.effect(id))
            .map(|def| def.multiplier)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown {kind}: {name}")]
    NotFound { kind: &'static str, name: String },
    #[error("invalid effect reference: {0:?}")]
    InvalidEffectRef(EffectId),
    #[error("invalid mixin reference: {0:?}")]
    InvalidMixinRef(MixinId),
    #[error("invalid substance reference: {0:?}")]
    InvalidSubstanceRef(SubstanceId),
    #[error("duplicate name: {0}")]
    DuplicateName(String),
    #[error("too many effects: {0} (at most {max})", max = EFFECT_CAPACITY)]
    TooManyEffects(usize),
    #[error("too many {kind} entries: {count} (at most {max})", max = MAX_ENTRIES)]
    TooManyEntries { kind: &'static str, count: usize },
    #[error("substance {substance} starts with {count} effects (at most {max})", max = MAX_EFFECTS)]
    TooManyInitialEffects { substance: String, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_builder() -> CatalogBuilder {
        let mut b = CatalogBuilder::new();
        let calm = b.register_effect("calming", Multiplier::from_hundredths(10));
        let sneaky = b.register_effect("sneaky", Multiplier::from_hundredths(24));
        b.register_mixin("banana", 2, sneaky, vec![Conversion::new(calm, sneaky)]);
        b.register_substance("og_kush", 0, 35, EffectSet::single(calm));
        b
    }

    #[test]
    fn register_and_build() {
        let cat = setup_builder().build().unwrap();
        assert_eq!(cat.effect_count(), 2);
        assert_eq!(cat.mixin_count(), 1);
        assert_eq!(cat.substance_count(), 1);
    }

    #[test]
    fn lookup_by_name() {
        let cat = setup_builder().build().unwrap();
        assert_eq!(cat.substance_id("og_kush"), Some(SubstanceId(0)));
        assert_eq!(cat.mixin_id("banana"), Some(MixinId(0)));
        assert_eq!(cat.effect_id("sneaky"), Some(EffectId(1)));
        assert!(cat.mixin_id("nonexistent").is_none());
    }

    #[test]
    fn resolve_unknown_name_is_not_found() {
        let cat = setup_builder().build().unwrap();
        match cat.resolve_substance("white_widow") {
            Err(CatalogError::NotFound { kind, name }) => {
                assert_eq!(kind, "substance");
                assert_eq!(name, "white_widow");
            }
            other => panic!("expected NotFound, got: {other:?}"),
        }
        let msg = cat.resolve_mixin("salt").unwrap_err().to_string();
        assert_eq!(msg, "unknown mixin: salt");
    }

    #[test]
    fn invalid_main_effect_ref_fails() {
        let mut b = CatalogBuilder::new();
        b.register_effect("calming", Multiplier::from_hundredths(10));
        b.register_mixin("bad", 1, EffectId(7), vec![]);
        match b.build() {
            Err(CatalogError::InvalidEffectRef(id)) => assert_eq!(id, EffectId(7)),
            other => panic!("expected InvalidEffectRef, got: {other:?}"),
        }
    }

    #[test]
    fn invalid_conversion_ref_fails() {
        let mut b = CatalogBuilder::new();
        let calm = b.register_effect("calming", Multiplier::from_hundredths(10));
        b.register_mixin("bad", 1, calm, vec![Conversion::new(calm, EffectId(40))]);
        assert!(matches!(
            b.build(),
            Err(CatalogError::InvalidEffectRef(EffectId(40)))
        ));
    }

    #[test]
    fn invalid_substance_effect_fails() {
        let mut b = CatalogBuilder::new();
        b.register_effect("calming", Multiplier::from_hundredths(10));
        b.register_substance("weed", 0, 35, EffectSet::single(EffectId(3)));
        assert!(b.build().is_err());
    }

    #[test]
    fn duplicate_name_fails() {
        let mut b = setup_builder();
        b.register_substance("og_kush", 0, 40, EffectSet::empty());
        match b.build() {
            Err(CatalogError::DuplicateName(name)) => assert_eq!(name, "og_kush"),
            other => panic!("expected DuplicateName, got: {other:?}"),
        }
    }

    #[test]
    fn too_many_effects_fails() {
        let mut b = CatalogBuilder::new();
        for i in 0..=EFFECT_CAPACITY {
            b.register_effect(&format!("e{i}"), Multiplier::ZERO);
        }
        assert!(matches!(b.build(), Err(CatalogError::TooManyEffects(65))));
    }

    #[test]
    fn too_many_initial_effects_fails() {
        let mut b = CatalogBuilder::new();
        let ids: Vec<EffectId> = (0..9)
            .map(|i| b.register_effect(&format!("e{i}"), Multiplier::ZERO))
            .collect();
        b.register_substance("overloaded", 0, 10, ids.into_iter().collect());
        assert!(matches!(
            b.build(),
            Err(CatalogError::TooManyInitialEffects { count: 9, .. })
        ));
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let cat = setup_builder().build().unwrap();
        assert!(cat.effect(EffectId(99)).is_none());
        assert!(cat.mixin(MixinId(99)).is_none());
        assert!(cat.substance(SubstanceId(99)).is_none());
    }

    #[test]
    fn empty_catalog_builds_successfully() {
        let cat = CatalogBuilder::new().build().unwrap();
        assert_eq!(cat.effect_count(), 0);
        assert_eq!(cat.mixins().count(), 0);
    }

    #[test]
    fn multiplier_sum_ignores_unknown_ids() {
        let cat = setup_builder().build().unwrap();
        let effects: EffectSet = [EffectId(0), EffectId(1), EffectId(30)]
            .into_iter()
            .collect();
        assert_eq!(cat.effect_multiplier_sum(effects).hundredths(), 34);
    }

    // -----------------------------------------------------------------------
    // Built-in tables
    // -----------------------------------------------------------------------

    #[test]
    fn standard_tables_pass_validation() {
        let validated = crate::standard::builder().build().unwrap();
        assert_eq!(validated.effect_count(), 35);
        assert_eq!(validated.mixin_count(), 16);
        assert_eq!(validated.substance_count(), 6);
    }

    #[test]
    fn standard_multipliers() {
        let cat = Catalog::standard();
        for (id, def) in cat.effects() {
            let expected = if id.0 < 9 { 0 } else { 10 + 2 * (u32::from(id.0) - 9) };
            assert_eq!(def.multiplier.hundredths(), expected, "{}", def.name);
        }
        assert_eq!(cat.effect(EffectId(34)).unwrap().multiplier.to_string(), "x0.60");
    }

    #[test]
    fn standard_lookups() {
        let cat = Catalog::standard();
        assert_eq!(cat.resolve_substance("og_kush").unwrap(), SubstanceId(0));
        assert_eq!(cat.resolve_substance("cocaine").unwrap(), SubstanceId(5));
        assert_eq!(cat.resolve_mixin("cuke").unwrap(), MixinId(0));
        assert_eq!(cat.resolve_mixin("horse_semen").unwrap(), MixinId(15));
        assert_eq!(cat.effect_id("calming"), Some(EffectId(9)));

        let flu = cat.mixin(cat.mixin_id("flu_medicine").unwrap()).unwrap();
        assert_eq!(flu.cost, 5);
        assert_eq!(flu.effect, EffectId(17));
        assert_eq!(flu.conversions.len(), 10);
    }

    #[test]
    fn standard_substances_start_with_at_most_one_effect() {
        let cat = Catalog::standard();
        let with_effect = cat.substances().filter(|(_, s)| s.effects.len() == 1).count();
        let without = cat.substances().filter(|(_, s)| s.effects.is_empty()).count();
        assert_eq!(with_effect, 4);
        assert_eq!(without, 2);
    }
}
