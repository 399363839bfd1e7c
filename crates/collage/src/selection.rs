//! Multi-select over an ordered list of ids.
//!
//! Every operation returns a fresh set; the previous selection is never
//! modified in place.

use std::collections::HashSet;
use std::hash::Hash;

/// Modifier keys held during a click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    /// Meta (cmd) or ctrl.
    pub meta: bool,
}

impl Modifiers {
    pub fn from_keys(shift: bool, meta: bool, ctrl: bool) -> Self {
        Self {
            shift,
            meta: meta || ctrl,
        }
    }
}

/// Add `all_ids[min(last, index)..=max(last, index)]` to a copy of `prev`.
///
/// Without an anchor the copy is returned unchanged.
pub fn range_selection<T: Clone + Eq + Hash>(
    all_ids: &[T],
    last_index: Option<usize>,
    index: usize,
    prev: &HashSet<T>,
) -> HashSet<T> {
    let mut next = prev.clone();
    if let Some(last) = last_index {
        let start = last.min(index);
        let end = last.max(index);
        if let Some(range) = all_ids.get(start..=end.min(all_ids.len().saturating_sub(1))) {
            next.extend(range.iter().cloned());
        }
    }
    next
}

/// Flip membership of `id` in a copy of `prev`.
pub fn toggle_selection<T: Clone + Eq + Hash>(id: &T, prev: &HashSet<T>) -> HashSet<T> {
    let mut next = prev.clone();
    if !next.remove(id) {
        next.insert(id.clone());
    }
    next
}

/// The selection after clicking `id` at `index`.
pub fn next_selection<T: Clone + Eq + Hash>(
    prev: &HashSet<T>,
    id: &T,
    index: usize,
    all_ids: &[T],
    last_index: Option<usize>,
    modifiers: Modifiers,
) -> HashSet<T> {
    if modifiers.shift {
        return range_selection(all_ids, last_index, index, prev);
    }
    // Meta-click and a plain click both toggle.
    toggle_selection(id, prev)
}

/// Click-driven selection state with a shift-click anchor.
#[derive(Clone, Debug)]
pub struct Selection<T> {
    selected: HashSet<T>,
    last_clicked_index: Option<usize>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
            last_clicked_index: None,
        }
    }
}

impl<T: Clone + Eq + Hash> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &HashSet<T> {
        &self.selected
    }

    pub fn last_clicked_index(&self) -> Option<usize> {
        self.last_clicked_index
    }

    pub fn contains(&self, id: &T) -> bool {
        self.selected.contains(id)
    }

    /// Handle a click on `id`, the entry at `index` of `all_ids`.
    ///
    /// Shift-clicks extend from the anchor and leave it in place; any other
    /// click toggles and moves the anchor.
    pub fn toggle(&mut self, id: &T, index: usize, modifiers: Modifiers, all_ids: &[T]) {
        self.selected = next_selection(
            &self.selected,
            id,
            index,
            all_ids,
            self.last_clicked_index,
            modifiers,
        );
        if !modifiers.shift {
            self.last_clicked_index = Some(index);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_clicked_index = None;
    }

    /// Forget ids that are no longer in `all_ids`.
    pub fn retain_existing(&mut self, all_ids: &[T]) {
        self.selected.retain(|id| all_ids.contains(id));
        if self.last_clicked_index.is_some_and(|index| index >= all_ids.len()) {
            self.last_clicked_index = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<&'static str> {
        vec!["a", "b", "c", "d", "e"]
    }

    fn set(items: &[&'static str]) -> HashSet<&'static str> {
        items.iter().copied().collect()
    }

    const SHIFT: Modifiers = Modifiers {
        shift: true,
        meta: false,
    };

    #[test]
    fn range_with_equal_bounds_is_a_singleton() {
        let result = range_selection(&ids(), Some(1), 1, &HashSet::new());
        assert_eq!(result, set(&["b"]));
    }

    #[test]
    fn range_is_inclusive_in_either_direction() {
        let forward = range_selection(&ids(), Some(1), 3, &HashSet::new());
        let backward = range_selection(&ids(), Some(3), 1, &HashSet::new());
        assert_eq!(forward, set(&["b", "c", "d"]));
        assert_eq!(forward, backward);
    }

    #[test]
    fn range_without_anchor_clones_previous() {
        let prev = set(&["e"]);
        assert_eq!(range_selection(&ids(), None, 2, &prev), prev);
    }

    #[test]
    fn range_unions_with_previous() {
        let result = range_selection(&ids(), Some(0), 1, &set(&["e"]));
        assert_eq!(result, set(&["a", "b", "e"]));
    }

    #[test]
    fn range_past_the_end_is_clipped() {
        let result = range_selection(&ids(), Some(3), 9, &HashSet::new());
        assert_eq!(result, set(&["d", "e"]));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let once = toggle_selection(&"a", &HashSet::new());
        assert_eq!(once, set(&["a"]));
        assert!(toggle_selection(&"a", &once).is_empty());
    }

    #[test]
    fn previous_set_is_not_mutated() {
        let prev = set(&["a"]);
        let _ = next_selection(&prev, &"b", 1, &ids(), Some(0), Modifiers::default());
        let _ = next_selection(&prev, &"c", 2, &ids(), Some(0), SHIFT);
        assert_eq!(prev, set(&["a"]));
    }

    #[test]
    fn shift_click_keeps_anchor() {
        let all = ids();
        let mut selection = Selection::new();
        selection.toggle(&"b", 1, Modifiers::default(), &all);
        selection.toggle(&"d", 3, SHIFT, &all);

        assert_eq!(selection.selected(), &set(&["b", "c", "d"]));
        assert_eq!(selection.last_clicked_index(), Some(1));

        selection.toggle(&"a", 0, SHIFT, &all);
        assert_eq!(selection.selected(), &set(&["a", "b", "c", "d"]));
    }

    #[test]
    fn meta_click_toggles_and_moves_anchor() {
        let all = ids();
        let mut selection = Selection::new();
        let meta = Modifiers::from_keys(false, false, true);
        selection.toggle(&"a", 0, meta, &all);
        selection.toggle(&"c", 2, meta, &all);
        selection.toggle(&"a", 0, meta, &all);

        assert_eq!(selection.selected(), &set(&["c"]));
        assert_eq!(selection.last_clicked_index(), Some(0));
    }

    #[test]
    fn retain_existing_drops_removed_ids() {
        let all = ids();
        let mut selection = Selection::new();
        selection.toggle(&"e", 4, Modifiers::default(), &all);
        selection.toggle(&"a", 0, Modifiers::default(), &all);

        selection.retain_existing(&["a", "b"]);
        assert_eq!(selection.selected(), &set(&["a"]));
        assert_eq!(selection.last_clicked_index(), Some(0));
    }
}
