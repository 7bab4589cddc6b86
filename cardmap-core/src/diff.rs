//! Keyed list diffing for the card carousel.
//!
//! [`diff`] compares two key sequences and produces a [`Changeset`] in batch
//! form: removals refer to positions in the old list, insertions to positions
//! in the new list, and moves pair an old position with a new one. Items that
//! keep their relative order stay put; only items off a longest increasing
//! subsequence of new positions are reported as moves, so the number of moves
//! is minimal.

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

/// Which side of a diff an offending key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSide {
    /// The list being replaced.
    Old,
    /// The replacement list.
    New,
}

/// Errors returned by [`diff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiffError {
    /// A key appeared twice in one list.
    #[error("duplicate key at index {index} of the {side:?} list")]
    DuplicateKey {
        /// List containing the duplicate.
        side: DiffSide,
        /// Position of the second occurrence.
        index: usize,
    },
}

/// An item that changes position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Position in the old list.
    pub from: usize,
    /// Position in the new list.
    pub to: usize,
}

/// Batch of edits turning one list into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    /// Old positions that disappear, ascending.
    pub removed: Vec<usize>,
    /// New positions that appear, ascending.
    pub inserted: Vec<usize>,
    /// Items that survive but change relative order, ordered by `from`.
    pub moved: Vec<Move>,
    old_len: usize,
    new_len: usize,
}

impl Changeset {
    /// Replace every old item with every new item.
    #[must_use]
    pub fn reload(old_len: usize, new_len: usize) -> Self {
        Self {
            removed: (0..old_len).collect(),
            inserted: (0..new_len).collect(),
            moved: Vec::new(),
            old_len,
            new_len,
        }
    }

    /// Length of the list the changeset applies to.
    #[must_use]
    pub const fn old_len(&self) -> usize {
        self.old_len
    }

    /// Length of the list the changeset produces.
    #[must_use]
    pub const fn new_len(&self) -> usize {
        self.new_len
    }

    /// Return `true` when applying the changeset leaves the list untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.inserted.is_empty() && self.moved.is_empty()
    }

    /// Rebuild the new list from `old`.
    ///
    /// Kept and moved items are taken from `old`; inserted items are taken
    /// from `new` at their destination. Returns `None` when either slice does
    /// not have the length the changeset was computed for.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardmap_core::diff::diff;
    ///
    /// let old = ["a", "b", "c"];
    /// let new = ["c", "a", "d"];
    /// let changes = diff(&old, &new)?;
    /// assert_eq!(changes.apply(&old, &new), Some(new.to_vec()));
    /// # Ok::<(), cardmap_core::diff::DiffError>(())
    /// ```
    #[must_use]
    pub fn apply<T: Clone>(&self, old: &[T], new: &[T]) -> Option<Vec<T>> {
        if old.len() != self.old_len || new.len() != self.new_len {
            return None;
        }
        let mut slots: Vec<Option<T>> = vec![None; self.new_len];
        let mut vacated = vec![false; self.old_len];

        for &index in &self.removed {
            *vacated.get_mut(index)? = true;
        }
        for step in &self.moved {
            *vacated.get_mut(step.from)? = true;
            *slots.get_mut(step.to)? = Some(old.get(step.from)?.clone());
        }
        for &index in &self.inserted {
            *slots.get_mut(index)? = Some(new.get(index)?.clone());
        }

        let mut kept = old
            .iter()
            .zip(&vacated)
            .filter(|(_, gone)| !**gone)
            .map(|(item, _)| item);
        for slot in &mut slots {
            if slot.is_none() {
                *slot = Some(kept.next()?.clone());
            }
        }
        if kept.next().is_some() {
            return None;
        }
        slots.into_iter().collect()
    }
}

/// Compute the changeset turning `old` into `new`.
///
/// Keys must be unique within each list.
///
/// # Errors
///
/// Returns [`DiffError::DuplicateKey`] when a key repeats within a list.
pub fn diff<K: Hash + Eq>(old: &[K], new: &[K]) -> Result<Changeset, DiffError> {
    let old_positions = index_keys(old, DiffSide::Old)?;
    let new_positions = index_keys(new, DiffSide::New)?;

    let mut removed = Vec::new();
    let mut retained = Vec::new();
    for (from, key) in old.iter().enumerate() {
        match new_positions.get(key) {
            Some(&to) => retained.push(Move { from, to }),
            None => removed.push(from),
        }
    }
    let inserted = new
        .iter()
        .enumerate()
        .filter(|(_, key)| !old_positions.contains_key(key))
        .map(|(index, _)| index)
        .collect();

    let targets: Vec<usize> = retained.iter().map(|step| step.to).collect();
    let stable = longest_increasing_run(&targets);
    let moved = retained
        .into_iter()
        .zip(stable)
        .filter(|(_, keep)| !keep)
        .map(|(step, _)| step)
        .collect();

    Ok(Changeset {
        removed,
        inserted,
        moved,
        old_len: old.len(),
        new_len: new.len(),
    })
}

fn index_keys<K: Hash + Eq>(keys: &[K], side: DiffSide) -> Result<HashMap<&K, usize>, DiffError> {
    let mut positions = HashMap::with_capacity(keys.len());
    for (index, key) in keys.iter().enumerate() {
        if positions.insert(key, index).is_some() {
            return Err(DiffError::DuplicateKey { side, index });
        }
    }
    Ok(positions)
}

/// Mark the members of one longest strictly increasing subsequence.
fn longest_increasing_run(values: &[usize]) -> Vec<bool> {
    // `tails[k]` holds the position of the smallest tail of any increasing run
    // of length `k + 1` seen so far.
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = Vec::with_capacity(values.len());
    for (position, value) in values.iter().enumerate() {
        let length =
            tails.partition_point(|&tail| values.get(tail).is_some_and(|held| held < value));
        previous.push(length.checked_sub(1).and_then(|below| tails.get(below)).copied());
        match tails.get_mut(length) {
            Some(slot) => *slot = position,
            None => tails.push(position),
        }
    }

    let mut members = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(position) = cursor {
        if let Some(member) = members.get_mut(position) {
            *member = true;
        }
        cursor = previous.get(position).copied().flatten();
    }
    members
}
