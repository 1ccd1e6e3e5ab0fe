use std::array;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::Waker;

use super::{InlineWaker, ReadinessPair};

/// A pair of wakers which delegate to an in-line waker.
#[derive(Debug)]
pub(crate) struct WakerPair {
    wakers: [Waker; 2],
    readiness: Arc<Mutex<ReadinessPair>>,
}

impl WakerPair {
    /// Create a new instance of `WakerPair`.
    pub(crate) fn new() -> Self {
        let readiness = Arc::new(Mutex::new(ReadinessPair::new()));
        Self {
            wakers: array::from_fn(|i| Arc::new(InlineWaker::new(i, readiness.clone())).into()),
            readiness,
        }
    }

    pub(crate) fn get(&self, index: usize) -> &Waker {
        &self.wakers[index]
    }

    /// Access the `ReadinessPair`.
    pub(crate) fn readiness(&self) -> MutexGuard<'_, ReadinessPair> {
        self.readiness.as_ref().lock().unwrap()
    }
}
