//! Height-balanced ordered index of integer counters.
//!
//! This crate provides [`TallyTree`], an AVL tree mapping unique `i32` keys to `i32`
//! counters, with the queries that order books, rate limiters and rank indexes lean on:
//!
//! - [`get`](TallyTree::get) / [`count`](TallyTree::count) - exact lookup
//! - [`next`](TallyTree::next) / [`previous`](TallyTree::previous) - successor and predecessor
//! - [`range_counters`](TallyTree::range_counters) - counters of every key in an inclusive range
//! - [`increase`](TallyTree::increase) / [`reduce`](TallyTree::reduce) - counter arithmetic that
//!   creates entries on demand and drops them once they fall below one
//!
//! # Example
//!
//! ```
//! use tally_tree::TallyTree;
//!
//! let mut tally = TallyTree::new();
//! tally.insert(5, 10);
//! tally.insert(3, 7);
//! tally.insert(8, 2);
//!
//! assert_eq!(tally.count(3), 7);
//! assert_eq!(tally.next(5), Some((8, 2)));
//! assert_eq!(tally.previous(5), Some((3, 7)));
//!
//! assert_eq!(tally.increase(3, 5), 12);
//! assert_eq!(tally.range_counters(3, 8), [12, 10, 2]);
//!
//! // Reducing to below one removes the entry.
//! assert_eq!(tally.reduce(8, 2), 0);
//! assert!(!tally.contains_key(8));
//! ```
//!
//! The [`command`] and [`bootstrap`] modules implement the line protocol used by the
//! `tally` binary: a bootstrap file of `id count` records followed by commands such
//! as `next 5` or `inrange 3 8`.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **`cli`** (default) - Builds the `tally` command-line driver
//!
//! # Implementation
//!
//! Nodes live in an arena and are linked by compact handles. Insertion rebalances with
//! the four classic AVL rotations. Removal promotes the in-order successor for nodes
//! with two children and refreshes heights, but does not rotate; the tree stays a valid
//! search tree with exact heights, while its balance is only guaranteed for histories
//! without removals. No operation recurses, so stack use does not depend on tree shape.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod bootstrap;
pub mod command;
pub mod tally_tree;

pub use error::{Error, Result};
pub use tally_tree::TallyTree;

/// Key type of a [`TallyTree`].
pub type Key = i32;

/// Counter type of a [`TallyTree`].
pub type Counter = i32;
