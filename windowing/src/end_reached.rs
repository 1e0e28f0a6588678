/// Fires at most once per crossing of the end-reached threshold.
///
/// The gate is armed while the remaining distance is at or above the threshold. Dropping below
/// it fires once and disarms; it re-arms when the distance climbs back (typically because more
/// items were appended) or when the item count changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EndReachedGate {
    armed: bool,
}

impl EndReachedGate {
    pub(crate) fn new() -> Self {
        Self { armed: true }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed
    }

    pub(crate) fn rearm(&mut self) {
        self.armed = true;
    }

    /// Returns `true` if the callback should fire now.
    ///
    /// While `is_loading` the gate neither fires nor disarms, so the crossing is still reported
    /// once loading finishes without new items.
    pub(crate) fn observe(&mut self, remaining: f64, threshold: f64, is_loading: bool) -> bool {
        if remaining.is_nan() || remaining >= threshold {
            self.armed = true;
            return false;
        }
        if is_loading || !self.armed {
            return false;
        }
        self.armed = false;
        true
    }
}
