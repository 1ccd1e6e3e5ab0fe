mod wakers;

pub(crate) use wakers::WakerPair;
