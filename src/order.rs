//! Ordering and merge rules for the task list.
//!
//! Canonical order is `(sort_index asc, created_at asc)`. After every
//! structural change the indices are rewritten to the dense range `0..N-1`
//! so the order survives restarts without gaps or collisions.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use uuid::Uuid;

use crate::task::TaskItem;

/// Canonical comparator: `sort_index` ascending, creation time breaking
/// ties.
pub fn canonical_cmp(a: &TaskItem, b: &TaskItem) -> Ordering {
    a.sort_index
        .cmp(&b.sort_index)
        .then(a.created_at.cmp(&b.created_at))
}

/// Rewrite every `sort_index` to the task's current position in the list.
pub fn assign_positions(tasks: &mut [TaskItem]) {
    for (i, task) in tasks.iter_mut().enumerate() {
        task.sort_index = i as i64;
    }
}

/// Sort into canonical order, then assign dense positions.
pub fn renormalize(tasks: &mut [TaskItem]) {
    tasks.sort_by(canonical_cmp);
    assign_positions(tasks);
}

/// Repair a freshly loaded list. Colliding `sort_index` values mean the
/// stored order is unusable, so fall back to creation order before
/// assigning dense positions.
pub fn repair_loaded(tasks: &mut [TaskItem]) {
    let mut seen = BTreeSet::new();
    let unique = tasks.iter().all(|t| seen.insert(t.sort_index));
    if unique {
        renormalize(tasks);
    } else {
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        assign_positions(tasks);
    }
}

/// Standard array-move: remove the items at the `from` offsets, then insert
/// them as one block at `to`, shifted down by however many removed offsets
/// preceded it. Offsets past the end are dropped.
pub fn array_move<T>(items: &mut Vec<T>, from: &BTreeSet<usize>, to: usize) {
    let valid: Vec<usize> = from.iter().copied().filter(|&i| i < items.len()).collect();
    let mut moved = Vec::with_capacity(valid.len());
    for &i in valid.iter().rev() {
        moved.push(items.remove(i));
    }
    moved.reverse();
    let shift = valid.iter().filter(|&&i| i < to).count();
    let target = to.saturating_sub(shift).min(items.len());
    for (k, item) in moved.into_iter().enumerate() {
        items.insert(target + k, item);
    }
}

/// Reorder the subset of `tasks` identified by `visible_ids`, taken in
/// canonical order, leaving every other task's slot untouched. `from` and
/// `to` are offsets into that subset. Returns the ids that moved; fewer
/// than two visible ids is a no-op.
pub fn move_visible(
    tasks: &mut Vec<TaskItem>,
    visible_ids: &[Uuid],
    from: &BTreeSet<usize>,
    to: usize,
) -> Vec<Uuid> {
    if visible_ids.len() < 2 {
        return Vec::new();
    }
    tasks.sort_by(canonical_cmp);
    let slots: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| visible_ids.contains(&t.id))
        .map(|(i, _)| i)
        .collect();
    if slots.len() < 2 {
        return Vec::new();
    }
    let mut subset: Vec<TaskItem> = slots.iter().map(|&i| tasks[i].clone()).collect();
    let moved: Vec<Uuid> = from
        .iter()
        .filter(|&&i| i < subset.len())
        .map(|&i| subset[i].id)
        .collect();
    if moved.is_empty() {
        return Vec::new();
    }
    array_move(&mut subset, from, to);
    for (&slot, task) in slots.iter().zip(subset.into_iter()) {
        tasks[slot] = task;
    }
    assign_positions(tasks);
    moved
}

/// Passive merge: append remote tasks whose id is unknown locally; local
/// entries are never overwritten. Returns whether anything was added.
pub fn merge_missing(tasks: &mut Vec<TaskItem>, remote: Vec<TaskItem>) -> bool {
    let mut added = false;
    for task in remote {
        if !tasks.iter().any(|t| t.id == task.id) {
            tasks.push(task);
            added = true;
        }
    }
    if added {
        renormalize(tasks);
    }
    added
}
