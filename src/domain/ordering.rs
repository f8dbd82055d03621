//! Pure ordering arithmetic for items within a list.
//!
//! Items carry an integer sort position. Storage keeps positions dense
//! (`1..=N`) by rewriting the whole order after every reorder or deletion,
//! which means collisions can never accumulate. The functions here compute the
//! new order; persisting it is the storage layer's job.
//!
//! All functions are total: empty and singleton sequences are valid input and
//! out-of-range indices leave the sequence untouched.

use super::checklist::Item;

/// Anything that has a sort position.
pub trait Positioned {
    fn position(&self) -> i64;
    fn set_position(&mut self, position: i64);
}

impl Positioned for Item {
    fn position(&self) -> i64 {
        self.sort_order
    }

    fn set_position(&mut self, position: i64) {
        self.sort_order = position;
    }
}

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards position 1 (`-1`).
    Up,
    /// Towards the end of the list (`+1`).
    Down,
}

impl Direction {
    /// Signed step applied to an index.
    #[must_use]
    pub const fn offset(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }

    /// Index reached by stepping from `index`, or `None` if it leaves `0..len`.
    ///
    /// ```
    /// use lyst::domain::ordering::Direction;
    ///
    /// assert_eq!(Direction::Up.target(0, 3), None);
    /// assert_eq!(Direction::Down.target(0, 3), Some(1));
    /// assert_eq!(Direction::Down.target(2, 3), None);
    /// ```
    #[must_use]
    pub fn target(self, index: usize, len: usize) -> Option<usize> {
        let target = index.checked_add_signed(self.offset())?;
        (index < len && target < len).then_some(target)
    }
}

/// Swaps the elements at `i` and `j`.
///
/// Returns the sequence unchanged if either index is out of bounds.
#[must_use]
pub fn swap<T>(mut seq: Vec<T>, i: usize, j: usize) -> Vec<T> {
    if i < seq.len() && j < seq.len() {
        seq.swap(i, j);
    }
    seq
}

/// Position for a new element appended after `positions`.
///
/// The result is one past the largest existing position, or `1` when there
/// are none.
///
/// ```
/// use lyst::domain::ordering::append_position;
///
/// assert_eq!(append_position([]), 1);
/// assert_eq!(append_position([1, 2, 7]), 8);
/// assert_eq!(append_position(None), 1);
/// ```
#[must_use]
pub fn append_position(positions: impl IntoIterator<Item = i64>) -> i64 {
    positions.into_iter().max().unwrap_or(0).max(0) + 1
}

/// Reassigns positions `1..=N` following the current sequence order.
#[must_use]
pub fn renumber<T: Positioned>(mut seq: Vec<T>) -> Vec<T> {
    for (position, element) in (1_i64..).zip(seq.iter_mut()) {
        element.set_position(position);
    }
    seq
}

/// Moves the element at `index` one step in `direction` and renumbers.
///
/// Returns `None` when the step would leave the sequence; callers treat that
/// as a no-op rather than an error.
#[must_use]
pub fn move_by<T: Positioned>(seq: Vec<T>, index: usize, direction: Direction) -> Option<Vec<T>> {
    let target = direction.target(index, seq.len())?;
    Some(renumber(swap(seq, index, target)))
}

/// Returns `true` if positions run `1, 2, ..., N` with no gaps or duplicates.
#[must_use]
pub fn is_dense<T: Positioned>(seq: &[T]) -> bool {
    seq.iter().map(Positioned::position).eq(1..=seq.len() as i64)
}
