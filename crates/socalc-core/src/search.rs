//! Exhaustive depth-bounded mix search.
//!
//! Every sequence of up to `depth` mixins is explored depth-first, trying
//! mixins in ascending id order at each level. Each successor state is
//! offered to a [`Recorder`]; because the recorder keeps the first of several
//! equal-profit states, this visiting order decides ties and must not change.
//!
//! The search is brute force by construction: `mixins^1 + ... + mixins^depth`
//! states are evaluated with no pruning.

use crate::catalog::{Catalog, CatalogError};
use crate::id::SubstanceId;
use crate::recorder::{Record, Recorder};
use crate::substance::Substance;
use serde::{Deserialize, Serialize};

/// Deepest search the engine accepts.
pub const MAX_SEARCH_DEPTH: u32 = 100;

/// Depth used when the caller does not pick one.
pub const DEFAULT_SEARCH_DEPTH: u32 = 4;

// ---------------------------------------------------------------------------
// Depth
// ---------------------------------------------------------------------------

/// Number of mixin applications to explore, within `1..=MAX_SEARCH_DEPTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SearchDepth(u32);

impl SearchDepth {
    pub fn new(depth: u32) -> Result<Self, SearchError> {
        match depth {
            0 => Err(SearchError::ZeroDepth),
            d if d > MAX_SEARCH_DEPTH => Err(SearchError::DepthTooLarge(d)),
            d => Ok(SearchDepth(d)),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SearchDepth {
    fn default() -> Self {
        SearchDepth(DEFAULT_SEARCH_DEPTH)
    }
}

impl TryFrom<u32> for SearchDepth {
    type Error = SearchError;

    fn try_from(depth: u32) -> Result<Self, SearchError> {
        SearchDepth::new(depth)
    }
}

impl From<SearchDepth> for u32 {
    fn from(depth: SearchDepth) -> u32 {
        depth.0
    }
}

// ---------------------------------------------------------------------------
// Errors and stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("search depth {0} exceeds the maximum of {max}", max = MAX_SEARCH_DEPTH)]
    DepthTooLarge(u32),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Counters from one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States produced and offered to the recorder.
    pub nodes: u64,
    /// Offers that replaced (or first filled) the record.
    pub improvements: u64,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Best mix for one substance. `None` only when the catalog has no mixins.
pub fn search(
    catalog: &Catalog,
    substance: SubstanceId,
    depth: SearchDepth,
) -> Result<Option<Record>, SearchError> {
    search_with_stats(catalog, substance, depth).map(|(record, _)| record)
}

/// [`search`], also returning the run's counters.
pub fn search_with_stats(
    catalog: &Catalog,
    substance: SubstanceId,
    depth: SearchDepth,
) -> Result<(Option<Record>, SearchStats), SearchError> {
    let mut recorder = Recorder::new();
    let stats = search_into(catalog, substance, depth, &mut recorder)?;
    Ok((recorder.take(substance), stats))
}

/// Best mix for every catalog substance, indexed by substance id.
pub fn search_all(catalog: &Catalog, depth: SearchDepth) -> Result<Vec<Option<Record>>, SearchError> {
    let mut recorder = Recorder::new();
    for (id, _) in catalog.substances() {
        search_into(catalog, id, depth, &mut recorder)?;
    }
    Ok(recorder.into_slots(catalog.substance_count()))
}

/// Search `substance`, offering every state to a caller-owned recorder.
pub fn search_into(
    catalog: &Catalog,
    substance: SubstanceId,
    depth: SearchDepth,
    recorder: &mut Recorder,
) -> Result<SearchStats, SearchError> {
    let base = Substance::new(catalog, substance)?;
    let name = catalog.substance(substance).map_or("?", |def| def.name.as_str());
    log::debug!("searching {name} to depth {}", depth.get());

    let mut stats = SearchStats::default();
    explore(catalog, &base, depth.get(), recorder, &mut stats);

    log::debug!(
        "search of {name} finished: {} states, {} improvements, best profit {:?}",
        stats.nodes,
        stats.improvements,
        recorder.get(substance).map(Record::profit)
    );
    Ok(stats)
}

fn explore(
    catalog: &Catalog,
    state: &Substance,
    remaining: u32,
    recorder: &mut Recorder,
    stats: &mut SearchStats,
) {
    let remaining = remaining - 1;
    for (id, mixin) in catalog.mixins() {
        let mut next = state.clone();
        next.apply(id, mixin);

        stats.nodes += 1;
        if recorder.record(catalog, &next) {
            stats.improvements += 1;
        }

        if remaining > 0 {
            explore(catalog, &next, remaining, recorder, stats);
        }
    }
}
