//! Reordering of positioned lists.
//!
//! Moving an item swaps it with its neighbour in memory. The new sequence is
//! then persisted by assigning every item its index as position. How that is
//! sent to the backend depends on [`ReorderMode`]:
//!
//! - `Sequential` issues one update per item in list order and stops at the
//!   first failure. Items before the failure keep their new position.
//! - `Saga` does the same but on failure restores the previous position of
//!   every item already updated, newest first.
//! - `Batch` sends all positions in a single request.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::error::ApiError;

/// Strategy for persisting a reordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderMode {
    Sequential,
    #[default]
    Saga,
    Batch,
}

impl ReorderMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Saga => "saga",
            Self::Batch => "batch",
        }
    }
}

impl Display for ReorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReorderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "saga" => Ok(Self::Saga),
            "batch" => Ok(Self::Batch),
            other => Err(format!("expected sequential, saga or batch, got {other}")),
        }
    }
}

/// Entities carrying an explicit display position.
pub trait Positioned {
    type Id: Clone + Debug + Display + Send + Sync;

    fn position_id(&self) -> &Self::Id;
    fn position(&self) -> i32;
}

/// Backend operations used to persist positions of `T`.
pub trait PositionStore<T: Positioned>: Sync {
    /// Set the position of a single item.
    fn set_position(
        &self,
        id: &T::Id,
        position: i32,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Set all positions in one request.
    fn set_positions(
        &self,
        positions: &[(T::Id, i32)],
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Move the item at `index` one step towards the front.
///
/// Returns `false` (and leaves `items` untouched) at the first position.
pub fn move_up<T>(items: &mut [T], index: usize) -> bool {
    if index == 0 || index >= items.len() {
        return false;
    }
    items.swap(index, index - 1);
    true
}

/// Move the item at `index` one step towards the back.
///
/// Returns `false` (and leaves `items` untouched) at the last position.
pub fn move_down<T>(items: &mut [T], index: usize) -> bool {
    if index + 1 >= items.len() {
        return false;
    }
    items.swap(index, index + 1);
    true
}

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Move the item at `index` one step in `direction`.
pub fn move_item<T>(items: &mut [T], index: usize, direction: Direction) -> bool {
    match direction {
        Direction::Up => move_up(items, index),
        Direction::Down => move_down(items, index),
    }
}

/// Position change for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionChange<Id> {
    pub id: Id,
    pub previous: i32,
    pub next: i32,
}

/// Plan the position update for `items` in their new display order.
///
/// Every item gets its index as position, including items whose position
/// does not change. `previous` is the position the item carried before.
#[must_use]
pub fn plan<T: Positioned>(items: &[T]) -> Vec<PositionChange<T::Id>> {
    items
        .iter()
        .zip(0_i32..)
        .map(|(item, index)| PositionChange {
            id: item.position_id().clone(),
            previous: item.position(),
            next: index,
        })
        .collect()
}

/// Outcome of compensating a failed saga.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rollback {
    /// No compensation was attempted.
    NotAttempted,
    /// Every earlier update was reverted.
    Complete,
    /// Some reverts failed; these ids still carry their new position.
    Incomplete(Vec<String>),
}

/// Errors that can occur while persisting a new order.
#[derive(Debug, Error)]
pub enum ReorderError {
    /// An individual update failed.
    #[error("{source}")]
    Partial {
        /// Index in the plan of the update that failed.
        failed_index: usize,
        #[source]
        source: ApiError,
        rollback: Rollback,
    },

    /// The single batch request failed; nothing was changed.
    #[error("{0}")]
    Batch(#[source] ApiError),
}

impl ReorderError {
    /// The underlying backend error.
    #[must_use]
    pub const fn api_error(&self) -> &ApiError {
        match self {
            Self::Partial { source, .. } | Self::Batch(source) => source,
        }
    }
}

/// Persist `changes` through `store` using `mode`.
///
/// Returns the number of positions written.
///
/// # Errors
///
/// Returns `ReorderError::Partial` when an individual update fails and
/// `ReorderError::Batch` when the batch request fails.
#[instrument(skip(store, changes), fields(count = changes.len()))]
pub async fn persist<T, S>(
    store: &S,
    changes: &[PositionChange<T::Id>],
    mode: ReorderMode,
) -> Result<usize, ReorderError>
where
    T: Positioned,
    S: PositionStore<T>,
{
    if mode == ReorderMode::Batch {
        let positions: Vec<(T::Id, i32)> = changes
            .iter()
            .map(|change| (change.id.clone(), change.next))
            .collect();
        store
            .set_positions(&positions)
            .await
            .map_err(ReorderError::Batch)?;
        return Ok(changes.len());
    }

    for (index, change) in changes.iter().enumerate() {
        let Err(source) = store.set_position(&change.id, change.next).await else {
            continue;
        };
        warn!(id = %change.id, index, error = %source, "Position update failed");

        let rollback = if mode == ReorderMode::Saga {
            compensate::<T, S>(store, &changes[..index]).await
        } else {
            Rollback::NotAttempted
        };
        return Err(ReorderError::Partial {
            failed_index: index,
            source,
            rollback,
        });
    }

    debug!("All positions written");
    Ok(changes.len())
}

async fn compensate<T, S>(store: &S, applied: &[PositionChange<T::Id>]) -> Rollback
where
    T: Positioned,
    S: PositionStore<T>,
{
    let mut failed = Vec::new();
    for change in applied.iter().rev() {
        if let Err(e) = store.set_position(&change.id, change.previous).await {
            warn!(id = %change.id, error = %e, "Rollback of position failed");
            failed.push(change.id.to_string());
        }
    }
    if failed.is_empty() {
        Rollback::Complete
    } else {
        Rollback::Incomplete(failed)
    }
}
