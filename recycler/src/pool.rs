use alloc::vec::Vec;

use crate::DataSource;
use crate::binding::BindingMap;

/// Position of a cell inside its [`CellPool`]. Stable for the pool's lifetime (growth only
/// appends).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(usize);

impl CellId {
    pub fn slot(self) -> usize {
        self.0
    }
}

/// A recyclable view slot.
#[derive(Clone, Debug)]
pub struct Cell<H> {
    view: H,
    bound: Option<usize>,
    active: bool,
}

impl<H> Cell<H> {
    fn new(view: H) -> Self {
        Self {
            view,
            bound: None,
            active: false,
        }
    }

    pub fn view(&self) -> &H {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut H {
        &mut self.view
    }

    /// The item index this cell currently shows, if any.
    pub fn bound_index(&self) -> Option<usize> {
        self.bound
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Counters produced by a single [`CellPool::reconcile`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconcileReport {
    /// Requested indices that ended up with a cell.
    pub bound: usize,
    /// Of `bound`, how many were bound this call (and had `set_up_cell` invoked).
    pub newly_bound: usize,
    /// Cells released because their index left the request.
    pub released: usize,
    /// Cells appended to the pool.
    pub grown: usize,
    /// Requested indices that received no cell.
    pub lacking: usize,
}

/// A bounded (optionally growable) pool of recyclable cells.
///
/// At most one active cell is bound to any index. Cells are never destroyed; leaving the window
/// only deactivates them.
#[derive(Clone, Debug)]
pub struct CellPool<H> {
    cells: Vec<Cell<H>>,
    bindings: BindingMap,
    keep: Vec<bool>,
    report_lack_of_cell: bool,

    high_water_mark: usize,
    growth_events: usize,
    lack_of_cell_events: usize,
}

impl<H> CellPool<H> {
    /// Creates a pool from the host's template views. All cells start inactive.
    pub fn new(views: impl IntoIterator<Item = H>) -> Self {
        let cells: Vec<Cell<H>> = views.into_iter().map(Cell::new).collect();
        Self {
            keep: Vec::with_capacity(cells.len()),
            cells,
            bindings: BindingMap::default(),
            report_lack_of_cell: false,
            high_water_mark: 0,
            growth_events: 0,
            lack_of_cell_events: 0,
        }
    }

    /// Enables a warning log for every index that could not get a cell.
    pub fn set_report_lack_of_cell(&mut self, report: bool) {
        self.report_lack_of_cell = report;
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn active_count(&self) -> usize {
        self.bindings.len()
    }

    /// The largest number of cells requested by a single reconcile so far.
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    /// How many cells were appended by growth over the pool's lifetime.
    pub fn growth_events(&self) -> usize {
        self.growth_events
    }

    /// How many requested indices went without a cell over the pool's lifetime.
    pub fn lack_of_cell_events(&self) -> usize {
        self.lack_of_cell_events
    }

    pub fn cell_for(&self, index: usize) -> Option<CellId> {
        self.bindings.get(&index).map(|&slot| CellId(slot))
    }

    pub fn get(&self, id: CellId) -> Option<&Cell<H>> {
        self.cells.get(id.0)
    }

    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell<H>> {
        self.cells.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell<H>)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (CellId, &Cell<H>)> + '_ {
        self.iter().filter(|(_, c)| c.active)
    }

    /// Highest index bound to an active cell.
    pub fn last_bound_index(&self) -> Option<usize> {
        self.bindings.keys().copied().max()
    }

    /// Consumes the pool and hands the views back to the host.
    pub fn into_views(self) -> Vec<H> {
        self.cells.into_iter().map(|c| c.view).collect()
    }

    /// Checks the binding invariants: every active cell is bound and mapped back to its slot,
    /// every inactive cell is unbound, and no index is held twice.
    pub fn is_consistent(&self) -> bool {
        let mut active = 0usize;
        for (slot, cell) in self.cells.iter().enumerate() {
            match (cell.active, cell.bound) {
                (true, Some(index)) => {
                    active += 1;
                    if self.bindings.get(&index) != Some(&slot) {
                        return false;
                    }
                }
                (false, None) => {}
                _ => return false,
            }
        }
        active == self.bindings.len()
    }

    /// Deactivates every cell.
    pub fn release_all<S>(&mut self, source: &mut S) -> usize
    where
        S: DataSource<Cell = H>,
    {
        let mut released = 0usize;
        for cell in self.cells.iter_mut().filter(|c| c.active) {
            source.deactivate_cell(&mut cell.view);
            cell.active = false;
            cell.bound = None;
            released += 1;
        }
        self.bindings.clear();
        released
    }

    /// Binds a cell to every index in `requested`.
    ///
    /// For each index, in order: the active cell already bound to it is kept; otherwise the first
    /// inactive cell is bound (and populated through `set_up_cell`); otherwise, when
    /// `allow_growth` is set, a new cell is instantiated from the first pool member. An index that
    /// gets none of these is counted as lacking and simply left unpopulated.
    ///
    /// Active cells whose index is not requested are released first, so their slots can be reused
    /// in the same call.
    pub fn reconcile<S>(
        &mut self,
        requested: &[usize],
        source: &mut S,
        allow_growth: bool,
    ) -> ReconcileReport
    where
        S: DataSource<Cell = H>,
    {
        let mut report = ReconcileReport::default();
        self.high_water_mark = self.high_water_mark.max(requested.len());

        self.keep.clear();
        self.keep.resize(self.cells.len(), false);
        for index in requested {
            if let Some(&slot) = self.bindings.get(index) {
                self.keep[slot] = true;
            }
        }

        for (slot, cell) in self.cells.iter_mut().enumerate() {
            if !cell.active || self.keep[slot] {
                continue;
            }
            if let Some(index) = cell.bound.take() {
                self.bindings.remove(&index);
            }
            cell.active = false;
            source.deactivate_cell(&mut cell.view);
            report.released += 1;
        }

        let mut free_cursor = 0usize;
        for &index in requested {
            if self.bindings.contains_key(&index) {
                report.bound += 1;
                continue;
            }

            while free_cursor < self.cells.len() && self.cells[free_cursor].active {
                free_cursor += 1;
            }

            let slot = if free_cursor < self.cells.len() {
                Some(free_cursor)
            } else if allow_growth {
                self.grow(source).inspect(|_| report.grown += 1)
            } else {
                None
            };
            let Some(slot) = slot else {
                report.lacking += 1;
                if self.report_lack_of_cell {
                    rwarn!(
                        index,
                        capacity = self.cells.len(),
                        "CellPool: lack of cell"
                    );
                }
                continue;
            };

            let cell = &mut self.cells[slot];
            cell.bound = Some(index);
            cell.active = true;
            self.bindings.insert(index, slot);
            source.set_up_cell(index, &mut cell.view);
            report.bound += 1;
            report.newly_bound += 1;
        }

        self.lack_of_cell_events = self.lack_of_cell_events.saturating_add(report.lacking);
        debug_assert!(self.is_consistent(), "CellPool: binding invariant violated");
        report
    }

    fn grow<S>(&mut self, source: &mut S) -> Option<usize>
    where
        S: DataSource<Cell = H>,
    {
        let template = self.cells.first()?;
        let view = source.instantiate_cell(&template.view)?;
        self.cells.push(Cell::new(view));
        self.growth_events = self.growth_events.saturating_add(1);
        rwarn!(
            capacity = self.cells.len(),
            growth_events = self.growth_events,
            "CellPool: grew pool; pre-size it to avoid growth"
        );
        Some(self.cells.len() - 1)
    }
}
