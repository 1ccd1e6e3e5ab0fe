use std::sync::{Arc, Mutex};
use std::task::Wake;

use super::ReadinessPair;

/// An efficient waker which delegates wake events.
#[derive(Debug, Clone)]
pub(crate) struct InlineWaker {
    pub(crate) id: usize,
    pub(crate) readiness: Arc<Mutex<ReadinessPair>>,
}

impl InlineWaker {
    /// Create a new instance of `InlineWaker`.
    pub(crate) fn new(id: usize, readiness: Arc<Mutex<ReadinessPair>>) -> Self {
        Self { id, readiness }
    }
}

impl Wake for InlineWaker {
    fn wake(self: Arc<Self>) {
        let mut readiness = self.readiness.lock().unwrap();
        if !readiness.set_ready(self.id) {
            readiness
                .parent_waker()
                .expect("`parent_waker` not available from `ReadinessPair`. Did you forget to call `ReadinessPair::set_waker`?")
                .wake_by_ref()
        }
    }
}
