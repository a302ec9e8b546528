use alloc::vec::Vec;

use crate::Rect;

/// The result of a layout pass: a contiguous run of item indices plus a rectangle per slot.
///
/// Slot `k` describes index `start + k` (modulo the repeat period in repeat mode). A slot holds
/// `None` when its index is in the run but must not be shown: a column clipped by the cross-axis
/// scroll, or an empty grid position in the last row of a repeating grid. Only shown slots count
/// against the pool budget; shown slots past the budget are *starved* and keep no rectangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutWindow {
    start: usize,
    len: usize,
    period: Option<usize>,
    slots: Vec<Option<Rect>>,
    budget: usize,
    placed: usize,
    starved: usize,
}

impl LayoutWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.start = 0;
        self.len = 0;
        self.period = None;
        self.slots.clear();
        self.budget = 0;
        self.placed = 0;
        self.starved = 0;
    }

    pub(crate) fn reset(
        &mut self,
        start: usize,
        len: usize,
        period: Option<usize>,
        slot_limit: usize,
    ) {
        debug_assert!(
            period.is_none_or(|p| p > 0 && len <= p),
            "LayoutWindow: window must fit in one period (len={len}, period={period:?})"
        );
        self.start = start;
        self.len = len;
        self.period = period;
        self.slots.clear();
        self.slots.resize(len, None);
        self.budget = slot_limit;
        self.placed = 0;
        self.starved = 0;
    }

    /// Stores the rectangle for slot `k`. Returns `false` when the budget is spent and the slot
    /// is starved instead.
    pub(crate) fn set_slot(&mut self, k: usize, rect: Rect) -> bool {
        let Some(slot) = self.slots.get_mut(k) else {
            return false;
        };
        if slot.is_some() {
            *slot = Some(rect);
            return true;
        }
        if self.placed >= self.budget {
            self.starved += 1;
            return false;
        }
        *slot = Some(rect);
        self.placed += 1;
        true
    }

    /// Number of slots holding a rectangle.
    pub fn placed(&self) -> usize {
        self.placed
    }

    pub fn start_index(&self) -> usize {
        self.start
    }

    /// One past the last index of the run. In repeat mode this may exceed the period; use
    /// [`Self::indices`] to get wrapped indices.
    pub fn end_index(&self) -> usize {
        self.start + self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The wrap period (grid positions per repetition) in repeat mode.
    pub fn period(&self) -> Option<usize> {
        self.period
    }

    /// Shown indices that got no rectangle because the pool budget was exceeded.
    pub fn starved(&self) -> usize {
        self.starved
    }

    /// Item index of slot `k`.
    pub fn index_at(&self, k: usize) -> usize {
        match self.period {
            Some(p) => (self.start + k) % p,
            None => self.start + k,
        }
    }

    /// Slot of `index`, when it is part of the run.
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        let k = match self.period {
            Some(p) => {
                if index >= p {
                    return None;
                }
                (index + p - self.start % p) % p
            }
            None => index.checked_sub(self.start)?,
        };
        (k < self.len).then_some(k)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slot_of(index).is_some()
    }

    pub fn rect_of(&self, index: usize) -> Option<Rect> {
        let k = self.slot_of(index)?;
        self.slots.get(k).copied().flatten()
    }

    /// Indices of the run, in slot order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(|k| self.index_at(k))
    }

    /// `(index, rect)` for every slot that should be shown, in slot order.
    pub fn placements(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(k, slot)| slot.map(|rect| (self.index_at(k), rect)))
    }
}
