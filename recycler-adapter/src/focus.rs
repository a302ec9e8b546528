/// Remembers the last focused item for a short grace period after focus is lost.
///
/// Focus often clears for a tick or two while it moves between items; following the remembered
/// index in the meantime keeps the scroll target from flickering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FocusMemory {
    remembered: Option<usize>,
    lost_for: f32,
}

impl FocusMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds this tick's focus and returns the index to follow.
    ///
    /// With no focus, the remembered index is returned until it has been lost for longer than
    /// `grace` seconds.
    pub fn observe(&mut self, focused: Option<usize>, dt: f32, grace: f32) -> Option<usize> {
        if let Some(index) = focused {
            self.remembered = Some(index);
            self.lost_for = 0.0;
            return Some(index);
        }
        let index = self.remembered?;
        self.lost_for += dt.max(0.0);
        if self.lost_for > grace {
            self.clear();
            return None;
        }
        Some(index)
    }

    pub fn remembered(&self) -> Option<usize> {
        self.remembered
    }

    pub fn clear(&mut self) {
        self.remembered = None;
        self.lost_for = 0.0;
    }
}
