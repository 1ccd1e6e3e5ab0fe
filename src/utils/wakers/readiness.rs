use std::task::Waker;

/// Tracks which sides are "ready" and should be polled.
#[derive(Debug)]
pub(crate) struct ReadinessPair {
    readiness: [bool; 2],
    parent_waker: Option<Waker>,
}

impl ReadinessPair {
    /// Create a new instance of readiness; both sides start ready.
    pub(crate) fn new() -> Self {
        Self {
            readiness: [true; 2],
            parent_waker: None,
        }
    }

    /// Returns the old ready state for this side.
    pub(crate) fn set_ready(&mut self, id: usize) -> bool {
        let old = self.readiness[id];
        self.readiness[id] = true;
        old
    }

    /// Returns whether the side was previously ready.
    pub(crate) fn clear_ready(&mut self, id: usize) -> bool {
        let old = self.readiness[id];
        self.readiness[id] = false;
        old
    }

    /// Access the parent waker.
    #[inline]
    pub(crate) fn parent_waker(&self) -> Option<&Waker> {
        self.parent_waker.as_ref()
    }

    /// Set the parent `Waker`. This needs to be called at the start of every
    /// `poll` function.
    pub(crate) fn set_waker(&mut self, parent_waker: &Waker) {
        self.parent_waker = Some(parent_waker.clone());
    }
}
