#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Bound item index -> pool slot, for active cells only.
#[cfg(feature = "std")]
pub(crate) type BindingMap = HashMap<usize, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type BindingMap = BTreeMap<usize, usize>;
