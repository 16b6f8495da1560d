//! Effect multipliers and effect sets.
//!
//! Multipliers are stored as whole hundredths so that sale values truncate
//! exactly. An [`EffectSet`] is a 64-bit mask indexed by [`EffectId`].

use crate::id::EffectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Most effects a substance can carry at once. Mixins stop adding their main
/// effect once conversions leave this many in place.
pub const MAX_EFFECTS: usize = 8;

/// Number of distinct effect ids an [`EffectSet`] can address.
pub const EFFECT_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// Multiplier
// ---------------------------------------------------------------------------

/// A sale-value multiplier in whole hundredths (`Multiplier::from_hundredths(110)`
/// is x1.10).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Multiplier(u32);

impl Multiplier {
    pub const ZERO: Multiplier = Multiplier(0);
    pub const ONE: Multiplier = Multiplier(100);

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Multiplier(hundredths)
    }

    pub const fn hundredths(self) -> u32 {
        self.0
    }

    /// Nearest multiplier to a decimal ratio. Negative or non-finite ratios
    /// become zero.
    pub fn from_f64(ratio: f64) -> Self {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Multiplier::ZERO;
        }
        // `as` saturates for out-of-range floats.
        Multiplier((ratio * 100.0).round() as u32)
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Scale `base` by this multiplier, truncating toward zero.
    pub fn apply(self, base: u32) -> u64 {
        u64::from(base) * u64::from(self.0) / 100
    }
}

impl Add for Multiplier {
    type Output = Multiplier;

    fn add(self, rhs: Multiplier) -> Multiplier {
        Multiplier(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Multiplier {
    fn sum<I: Iterator<Item = Multiplier>>(iter: I) -> Multiplier {
        iter.fold(Multiplier::ZERO, Add::add)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ---------------------------------------------------------------------------
// Effect set
// ---------------------------------------------------------------------------

/// A set of effect ids. Iteration is in ascending id order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectSet(u64);

impl EffectSet {
    pub const fn empty() -> Self {
        EffectSet(0)
    }

    pub fn single(id: EffectId) -> Self {
        EffectSet(mask(id))
    }

    pub const fn from_bits(bits: u64) -> Self {
        EffectSet(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, id: EffectId) -> bool {
        self.0 & mask(id) != 0
    }

    /// Adds `id`. Returns `true` if it was not already present.
    pub fn insert(&mut self, id: EffectId) -> bool {
        let had = self.contains(id);
        self.0 |= mask(id);
        !had
    }

    /// Removes `id`. Returns `true` if it was present.
    pub fn remove(&mut self, id: EffectId) -> bool {
        let had = self.contains(id);
        self.0 &= !mask(id);
        had
    }

    pub fn union(self, other: EffectSet) -> EffectSet {
        EffectSet(self.0 | other.0)
    }

    pub fn difference(self, other: EffectSet) -> EffectSet {
        EffectSet(self.0 & !other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> Iter {
        Iter { bits: self.0 }
    }
}

/// Ids past the addressable range have no bit and are never members.
fn mask(id: EffectId) -> u64 {
    1u64.checked_shl(u32::from(id.0)).unwrap_or(0)
}

impl FromIterator<EffectId> for EffectSet {
    fn from_iter<I: IntoIterator<Item = EffectId>>(iter: I) -> Self {
        let mut set = EffectSet::empty();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl IntoIterator for EffectSet {
    type Item = EffectId;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Ascending iterator over the ids in an [`EffectSet`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u64,
}

impl Iterator for Iter {
    type Item = EffectId;

    fn next(&mut self) -> Option<EffectId> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(EffectId(index as u8))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}
