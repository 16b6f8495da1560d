//! Socalc Core -- the mix engine behind the Schedule I mix calculator.
//!
//! A base substance carries a set of effects. Mixing in an ingredient (a
//! *mixin*) rewrites existing effects through the mixin's ordered conversion
//! rules and may add the mixin's own main effect, at a cost. This crate finds
//! the mixin sequence that maximizes sale value minus total cost.
//!
//! # Pipeline
//!
//! 1. **Catalog** -- immutable effect, mixin and substance tables
//!    ([`catalog::Catalog`]).
//! 2. **Transition** -- [`substance::Substance::apply`] applies one mixin to
//!    one state.
//! 3. **Valuation** -- [`valuation::evaluate`] derives multiplier, sale value
//!    and profit.
//! 4. **Search** -- [`search::search`] enumerates every mixin sequence up to a
//!    bounded depth, depth-first and in ascending mixin order.
//! 5. **Recording** -- [`recorder::Recorder`] keeps the best state per
//!    substance; ties go to whichever state the search reached first.
//!
//! # Example
//!
//! ```rust
//! use socalc_core::catalog::Catalog;
//! use socalc_core::search::{search, SearchDepth};
//!
//! let catalog = Catalog::standard();
//! let og_kush = catalog.resolve_substance("og_kush").unwrap();
//! let depth = SearchDepth::new(1).unwrap();
//! let best = search(&catalog, og_kush, depth).unwrap().unwrap();
//! assert_eq!(best.state.history.len(), 1);
//! ```

pub mod catalog;
#[cfg(feature = "data-loader")]
pub mod data_loader;
pub mod effect;
pub mod id;
pub mod recorder;
pub mod search;
mod standard;
pub mod substance;
pub mod valuation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
