//! Placement and trash rules.
//!
//! Every function here is pure: it reads a [`GameState`] snapshot and never
//! mutates it. [`draw_next`] additionally consumes randomness from the
//! supplied [`DrawSource`].
//!
//! A placement is legal when the number fits between its filled neighbours
//! *and* the row can still be completed to a strictly increasing sequence
//! from the numbers left in the pool. Completability is decided greedily:
//! each empty box, left to right, takes the smallest available number above
//! its left neighbour. Any other choice only raises the bar for the boxes to
//! its right, so if the greedy fill fails no fill succeeds.
//!
//! ```
//! use roskis::boxes::Boxes;
//! use roskis::config::GameConfig;
//! use roskis::rules::{can_place, is_stuck};
//! use roskis::state::GameState;
//!
//! let cfg = GameConfig::clamped(5, 6);
//! let state = GameState::from_parts(cfg, Boxes::empty(5), Vec::new(), Some(3));
//! // Only 1 and 2 lie below 3 and only 4, 5, 6 above it.
//! assert!(!can_place(&state, 3, 0));
//! assert!(can_place(&state, 3, 1));
//! assert!(can_place(&state, 3, 2));
//! assert!(!can_place(&state, 3, 3));
//! assert!(!can_place(&state, 3, 4));
//! assert!(!is_stuck(&state));
//! ```

use crate::boxes::Boxes;
use crate::pool::{DrawSource, Pool};
use crate::state::GameState;
use tracing::trace;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoveError {
    #[error("no game in progress")]
    NotInProgress,
    #[error("no number is waiting to be placed")]
    NoCurrentNumber,
    #[error("box {index} out of range (row has {len} boxes)")]
    BoxOutOfRange { index: usize, len: usize },
    #[error("box {0} is already filled")]
    BoxOccupied(usize),
    #[error("{number} does not fit between the neighbours of box {index}")]
    OrderViolation { number: u16, index: usize },
    #[error("{number} in box {index} leaves the row impossible to finish")]
    Infeasible { number: u16, index: usize },
    #[error("{number} can still be placed, trash refused")]
    TrashWhilePlaceable { number: u16 },
}

/// Explain why `number` may or may not go into box `index`.
pub fn check_place(state: &GameState, number: u16, index: usize) -> Result<(), MoveError> {
    let boxes = state.boxes();
    if index >= boxes.len() {
        return Err(MoveError::BoxOutOfRange { index, len: boxes.len() });
    }
    if boxes.is_occupied(index) {
        return Err(MoveError::BoxOccupied(index));
    }
    if !boxes.respects_order(number, index) {
        return Err(MoveError::OrderViolation { number, index });
    }
    let hypothetical = boxes.with(index, number);
    let available =
        Pool::remaining_without(state.config().max_number(), state.used_numbers(), number);
    if !is_completable(&hypothetical, available.as_slice()) {
        return Err(MoveError::Infeasible { number, index });
    }
    Ok(())
}

/// Whether `number` may legally go into box `index`.
pub fn can_place(state: &GameState, number: u16, index: usize) -> bool {
    let verdict = check_place(state, number, index);
    trace!(number, index, ?verdict, "can_place");
    verdict.is_ok()
}

/// Every box index `number` may legally go into, ascending.
pub fn placeable_boxes(state: &GameState, number: u16) -> Vec<usize> {
    (0..state.boxes().len()).filter(|&i| can_place(state, number, i)).collect()
}

/// True when there is a current number and it fits in no box.
///
/// With no current number there is nothing to be stuck on, so this is false.
pub fn is_stuck(state: &GameState) -> bool {
    match state.current_number() {
        Some(n) => (0..state.boxes().len()).all(|i| !can_place(state, n, i)),
        None => false,
    }
}

/// Whether the current number may be thrown away. Trashing is only allowed
/// once no box can take it.
pub fn check_trash(state: &GameState) -> Result<(), MoveError> {
    let Some(number) = state.current_number() else {
        return Err(MoveError::NoCurrentNumber);
    };
    if is_stuck(state) {
        Ok(())
    } else {
        Err(MoveError::TrashWhilePlaceable { number })
    }
}

pub fn can_trash(state: &GameState) -> bool {
    check_trash(state).is_ok()
}

/// Draw uniformly from the numbers not yet used. `None` once the pool is empty.
pub fn draw_next<S: DrawSource + ?Sized>(state: &GameState, source: &mut S) -> Option<u16> {
    state.pool().draw_with(source)
}

/// Whether the state as it stands can still be finished from its pool.
pub fn is_feasible(state: &GameState) -> bool {
    let pool = state.pool();
    is_completable(state.boxes(), pool.as_slice())
}

/// Greedy completion check over `row` using the ascending `available` numbers.
pub fn is_completable(row: &Boxes, available: &[u16]) -> bool {
    let mut prev: Option<u16> = None;
    let mut cursor = 0;
    for slot in row.as_slice() {
        match *slot {
            Some(v) => {
                if prev.is_some_and(|p| v <= p) {
                    return false;
                }
                prev = Some(v);
            }
            None => {
                while cursor < available.len() && prev.is_some_and(|p| available[cursor] <= p) {
                    cursor += 1;
                }
                let Some(&next) = available.get(cursor) else {
                    return false;
                };
                prev = Some(next);
                cursor += 1;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::pool::Scripted;

    fn state(boxes: Vec<Option<u16>>, max: u16, trash: Vec<u16>, current: Option<u16>) -> GameState {
        let cfg = GameConfig::clamped(boxes.len(), max);
        let row = Boxes::try_from_slots(boxes).unwrap();
        GameState::from_parts(cfg, row, trash, current)
    }

    #[test]
    fn occupied_box_is_rejected() {
        let s = state(vec![None, Some(5), None, None, None], 20, vec![], Some(9));
        assert_eq!(check_place(&s, 9, 1), Err(MoveError::BoxOccupied(1)));
    }

    #[test]
    fn neighbour_order_is_enforced() {
        let s = state(vec![None, Some(5), None, Some(12), None], 20, vec![], Some(9));
        assert_eq!(check_place(&s, 4, 2), Err(MoveError::OrderViolation { number: 4, index: 2 }));
        assert_eq!(check_place(&s, 13, 2), Err(MoveError::OrderViolation { number: 13, index: 2 }));
        assert_eq!(check_place(&s, 9, 0), Err(MoveError::OrderViolation { number: 9, index: 0 }));
        assert!(can_place(&s, 9, 2));
    }

    #[test]
    fn infeasible_gap_is_rejected() {
        // 5 in box 1 leaves 6 for box 2 but nothing between 6 and 7 for box 3.
        let s = state(vec![None, None, None, None, Some(7)], 7, vec![], Some(5));
        assert_eq!(check_place(&s, 5, 1), Err(MoveError::Infeasible { number: 5, index: 1 }));
        assert!(can_place(&s, 5, 2));
        assert!(can_place(&s, 5, 3));
        assert!(!can_place(&s, 5, 0));
    }

    #[test]
    fn left_edge_needs_room_to_the_right() {
        let s = state(vec![None; 5], 10, vec![], Some(8));
        assert_eq!(placeable_boxes(&s, 8), vec![2, 3, 4]);
        assert_eq!(placeable_boxes(&s, 1), vec![0]);
        assert_eq!(placeable_boxes(&s, 10), vec![4]);
    }

    #[test]
    fn used_numbers_do_not_count_as_available() {
        // With 2 and 3 trashed, 1 is the only number left below 4.
        let s = state(vec![None; 5], 8, vec![2, 3], Some(4));
        assert_eq!(placeable_boxes(&s, 4), vec![0, 1]);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let s = state(vec![None; 5], 10, vec![], Some(3));
        assert_eq!(check_place(&s, 3, 5), Err(MoveError::BoxOutOfRange { index: 5, len: 5 }));
    }

    #[test]
    fn stuck_only_when_no_box_fits() {
        let s = state(vec![Some(1), Some(2), None, Some(4), Some(5)], 6, vec![], Some(6));
        assert!(is_stuck(&s));
        assert!(can_trash(&s));

        let s = state(vec![Some(1), Some(2), None, Some(5), Some(6)], 6, vec![], Some(3));
        assert!(!is_stuck(&s));
        assert_eq!(check_trash(&s), Err(MoveError::TrashWhilePlaceable { number: 3 }));
    }

    #[test]
    fn no_current_number_is_not_stuck() {
        let s = state(vec![None; 5], 10, vec![], None);
        assert!(!is_stuck(&s));
        assert_eq!(check_trash(&s), Err(MoveError::NoCurrentNumber));
    }

    #[test]
    fn completable_walk_uses_smallest_successor() {
        let row = Boxes::try_from_slots(vec![None, Some(3), None, None]).unwrap();
        assert!(is_completable(&row, &[1, 4, 5]));
        assert!(!is_completable(&row, &[2, 4]));
        assert!(!is_completable(&row, &[4, 5, 6]));
    }

    #[test]
    fn draw_next_skips_used_numbers() {
        let s = state(vec![Some(1), Some(2), None, None, None], 5, vec![], None);
        let mut src = Scripted::new([1, 2, 4]);
        assert_eq!(draw_next(&s, &mut src), Some(4));
    }

    #[test]
    fn draw_next_empty_when_pool_exhausted() {
        let s = state(vec![Some(1), Some(2), Some(3), Some(4), None], 5, vec![5], None);
        assert_eq!(draw_next(&s, &mut Scripted::default()), None);
    }

    #[test]
    fn feasible_state_reports_true() {
        let s = state(vec![Some(2), None, None, None, Some(6)], 6, vec![], None);
        assert!(is_feasible(&s));
        let s = state(vec![Some(2), None, None, None, Some(5)], 6, vec![], None);
        assert!(!is_feasible(&s));
    }
}
