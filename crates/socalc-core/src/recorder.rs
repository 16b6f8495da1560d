//! Best-result table, one slot per base substance.
//!
//! The first state offered for a substance always fills its slot. After
//! that a state replaces the record only when its profit is strictly
//! greater, so among equal profits the earliest offer is kept. Records own
//! deep copies of the offered states.

use crate::catalog::Catalog;
use crate::id::SubstanceId;
use crate::substance::Substance;
use crate::valuation::{Valuation, evaluate};
use serde::{Deserialize, Serialize};

/// The best state seen for one substance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub valuation: Valuation,
    pub state: Substance,
}

impl Record {
    pub fn profit(&self) -> i64 {
        self.valuation.profit
    }

    pub fn substance(&self) -> SubstanceId {
        self.state.id
    }
}

/// Owned best-result table. Dropping it (or calling [`Recorder::clear`])
/// releases every stored state.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    slots: Vec<Option<Record>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `state` for its substance's slot. Returns `true` if it was stored.
    pub fn record(&mut self, catalog: &Catalog, state: &Substance) -> bool {
        let valuation = evaluate(catalog, state);
        let index = state.id.0 as usize;
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }

        let slot = &mut self.slots[index];
        let improves = slot
            .as_ref()
            .is_none_or(|best| valuation.profit > best.valuation.profit);
        if improves {
            log::trace!(
                "substance {:?}: new best profit {} after {} mixins",
                state.id,
                valuation.profit,
                state.history.len()
            );
            *slot = Some(Record {
                valuation,
                state: state.clone(),
            });
        }
        improves
    }

    pub fn get(&self, id: SubstanceId) -> Option<&Record> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn has_record(&self, id: SubstanceId) -> bool {
        self.get(id).is_some()
    }

    /// Remove and return the record for `id`.
    pub fn take(&mut self, id: SubstanceId) -> Option<Record> {
        self.slots.get_mut(id.0 as usize).and_then(Option::take)
    }

    /// Populated records in substance id order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.slots.iter().flatten()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Consume the recorder, returning exactly `count` slots indexed by
    /// substance id.
    pub fn into_slots(mut self, count: usize) -> Vec<Option<Record>> {
        self.slots.resize(count, None);
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn single(cat: &Catalog, name: &str) -> Substance {
        Substance::new(cat, og_kush())
            .unwrap()
            .with_mixin(cat, mixin(cat, name))
            .unwrap()
    }

    #[test]
    fn first_observation_always_stored() {
        let cat = Catalog::standard();
        let mut rec = Recorder::new();
        // gasoline on og_kush is a poor result (profit 33), still the baseline.
        assert!(rec.record(&cat, &single(&cat, "gasoline")));
        let best = rec.get(og_kush()).unwrap();
        assert_eq!(best.profit(), 33);
        assert_eq!(best.substance(), og_kush());
    }

    #[test]
    fn strictly_better_replaces() {
        let cat = Catalog::standard();
        let mut rec = Recorder::new();
        rec.record(&cat, &single(&cat, "gasoline"));
        assert!(rec.record(&cat, &single(&cat, "mouth_wash")));
        assert_eq!(rec.get(og_kush()).unwrap().profit(), 60);
        assert!(!rec.record(&cat, &single(&cat, "cuke")));
        assert_eq!(rec.get(og_kush()).unwrap().profit(), 60);
    }

    #[test]
    fn equal_profit_keeps_first() {
        let cat = Catalog::standard();
        let mut rec = Recorder::new();
        // energy_drink and motor_oil both yield profit 43 on og_kush.
        rec.record(&cat, &single(&cat, "energy_drink"));
        assert!(!rec.record(&cat, &single(&cat, "motor_oil")));
        let best = rec.get(og_kush()).unwrap();
        assert_eq!(best.profit(), 43);
        assert_eq!(best.state.history, vec![mixin(&cat, "energy_drink")]);
    }

    #[test]
    fn record_is_a_deep_copy() {
        let cat = Catalog::standard();
        let mut rec = Recorder::new();
        let mut s = single(&cat, "mouth_wash");
        rec.record(&cat, &s);
        s.apply_mixin(&cat, mixin(&cat, "cuke")).unwrap();
        assert_eq!(rec.get(og_kush()).unwrap().state.history.len(), 1);
    }

    #[test]
    fn slots_are_per_substance() {
        let cat = Catalog::standard();
        let mut rec = Recorder::new();
        rec.record(&cat, &Substance::new(&cat, cocaine()).unwrap());
        assert!(rec.has_record(cocaine()));
        assert!(!rec.has_record(og_kush()));
        assert_eq!(rec.len(), 1);

        let slots = rec.clone().into_slots(cat.substance_count());
        assert_eq!(slots.len(), 6);
        assert!(slots[5].is_some());
        assert!(slots[0].is_none());
    }

    #[test]
    fn clear_and_take_release_records() {
        let cat = Catalog::standard();
        let mut rec = Recorder::new();
        rec.record(&cat, &single(&cat, "cuke"));
        assert!(rec.take(og_kush()).is_some());
        assert!(rec.take(og_kush()).is_none());

        rec.record(&cat, &single(&cat, "cuke"));
        rec.clear();
        assert!(rec.is_empty());
    }
}
