//! Loading a tree from bootstrap input.
//!
//! The input starts with a record count `N`, followed by `N` lines of
//! `<id> <count>`:
//!
//! ```text
//! 3
//! 5 10
//! 3 7
//! 8 2
//! ```
//!
//! Records are inserted in input order, so a repeated id keeps the count of its
//! first occurrence.
//!
//! The record count is authoritative: exactly `N` records are read, and lines
//! after the `N`-th record are not inserted, even if they look like records.
//! They are reported with a `warn!` event instead.

use alloc::vec::Vec;

use crate::{Counter, Error, Key, Result, TallyTree};

/// Outcome of [`load`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// Records read from the input.
    pub records: usize,
    /// Records that created a new key. The rest repeated an earlier id.
    pub inserted: usize,
}

/// Parses bootstrap input into its records, in input order.
///
/// Blank lines are skipped. Anything after the last announced record is ignored,
/// including well-formed records beyond the announced count.
///
/// # Errors
///
/// Fails if the record count is missing or malformed, a record is not two `i32`s,
/// or fewer records follow than announced.
///
/// # Examples
///
/// ```
/// use tally_tree::bootstrap;
///
/// let records = bootstrap::parse("2\n5 10\n3 7\n")?;
/// assert_eq!(records, [(5, 10), (3, 7)]);
/// # Ok::<(), tally_tree::Error>(())
/// ```
pub fn parse(input: &str) -> Result<Vec<(Key, Counter)>> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line, count) = lines.next().ok_or(Error::MissingRecordCount)?;
    let expected: usize = count.parse().map_err(|_| Error::InvalidRecordCount { line })?;

    // Capacity is capped by the input length; the count itself is untrusted.
    let mut records = Vec::with_capacity(expected.min(input.len() / 4 + 1));
    for (line, text) in lines.by_ref().take(expected) {
        records.push(parse_record(text).ok_or(Error::MalformedRecord { line })?);
    }

    if records.len() < expected {
        return Err(Error::MissingRecords {
            expected,
            found: records.len(),
        });
    }

    if let Some((line, _)) = lines.next() {
        tracing::warn!(line, expected, "ignoring bootstrap content after the last record");
    }

    Ok(records)
}

fn parse_record(text: &str) -> Option<(Key, Counter)> {
    let mut tokens = text.split_whitespace();
    let key = tokens.next()?.parse().ok()?;
    let counter = tokens.next()?.parse().ok()?;
    match tokens.next() {
        Some(_) => None,
        None => Some((key, counter)),
    }
}

/// Parses `input` and inserts every record into `tree`.
///
/// Nothing is inserted unless the whole input parses.
///
/// # Errors
///
/// Returns the first parse error; see [`parse`].
///
/// # Examples
///
/// ```
/// use tally_tree::TallyTree;
/// use tally_tree::bootstrap::{self, Summary};
///
/// let mut tally = TallyTree::new();
/// let summary = bootstrap::load(&mut tally, "3\n5 10\n3 7\n5 1\n")?;
/// assert_eq!(summary, Summary { records: 3, inserted: 2 });
/// assert_eq!(tally.count(5), 10);
/// # Ok::<(), tally_tree::Error>(())
/// ```
pub fn load(tree: &mut TallyTree, input: &str) -> Result<Summary> {
    let records = parse(input)?;

    let mut summary = Summary {
        records: records.len(),
        inserted: 0,
    };
    for (key, counter) in records {
        if tree.insert(key, counter) {
            summary.inserted += 1;
        } else {
            tracing::debug!(key, counter, "ignoring repeated bootstrap id");
        }
    }

    tracing::debug!(records = summary.records, inserted = summary.inserted, "bootstrap loaded");
    Ok(summary)
}
