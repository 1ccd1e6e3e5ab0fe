mod readiness;
mod waker;
mod waker_pair;

pub(crate) use readiness::ReadinessPair;
pub(crate) use waker::InlineWaker;
pub(crate) use waker_pair::WakerPair;
