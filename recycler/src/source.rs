use crate::Size;

/// The host's data + view capability.
///
/// The core never owns a data source: every call that needs one borrows it for the duration of
/// that call. `Cell` is the host's view handle; the pool owns the handles it was given but never
/// destroys the views behind them.
pub trait DataSource {
    type Cell;

    /// Number of items in the collection.
    fn total_count(&self) -> usize;

    /// Size of the item at `index`.
    ///
    /// The single-column jagged layout reads the main-axis component; the multi-column jagged
    /// layout reads both. The fixed grid never calls this (it uses its configured cell size).
    ///
    /// Must return the same value for the same index until the host invalidates the layout
    /// (`mark_needs_relayout` / `refresh`).
    fn item_size(&mut self, index: usize) -> Size;

    /// Populates a cell that was just bound to `index`.
    ///
    /// Called once per binding, not every tick.
    fn set_up_cell(&mut self, index: usize, cell: &mut Self::Cell);

    /// Called when a cell leaves the window and becomes inactive.
    fn deactivate_cell(&mut self, cell: &mut Self::Cell) {
        let _ = cell;
    }

    /// Builds a new view from `template` (the first pool member) when the pool needs to grow.
    ///
    /// Returning `None` refuses growth; the index is then reported as lacking a cell.
    fn instantiate_cell(&mut self, template: &Self::Cell) -> Option<Self::Cell> {
        let _ = template;
        None
    }
}
