use crate::{Point, Size};

/// A lightweight, serializable snapshot of a table's scroll state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`. Useful for restoring
/// the scroll position across sessions without coupling the controller to a host framework.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableState {
    pub content_offset: Point,
    pub viewport: Option<Size>,
}
