//! Driving machines against live streams.
//!
//! [`WyeStream`] binds two input streams to a [`Wye`][crate::Wye] machine
//! and is itself a stream of the machine's outputs. The machine decides, at
//! every step, which side may be polled: a side the machine has not asked
//! for is never touched. When the machine wants both sides, the one that
//! delivered most recently is polled second, so neither input can
//! monopolize the output under load.
//!
//! Items come out as `Result<O, Cause>`: a run of `Ok` values followed by
//! clean exhaustion, or by a single `Err` carrying the cause when the merge
//! stopped early.
//!
//! # Examples
//!
//! ```
//! use futures_wye::{prelude::*, wye};
//! use futures_lite::future::block_on;
//! use futures_lite::prelude::*;
//! use futures_lite::stream;
//!
//! block_on(async {
//!     let a = stream::iter([1u32, 2]);
//!     let b = stream::iter([10u32, 20]);
//!     let mut s = a.wye(b, wye::merge());
//!
//!     let mut out = vec![];
//!     while let Some(item) = s.next().await {
//!         out.push(item.unwrap());
//!     }
//!     out.sort_unstable();
//!     assert_eq!(out, [1, 2, 10, 20]);
//! })
//! ```

pub use wye_stream::WyeStream;

mod wye_stream;

use crate::machine::Wye;
use futures_core::Stream;

/// An extension trait binding a stream and a machine into a [`WyeStream`].
pub trait WyeExt: Stream {
    /// Combine this stream with `other` under the control of `machine`.
    fn wye<S2, O>(self, other: S2, machine: Wye<Self::Item, S2::Item, O>) -> WyeStream<Self, S2, O>
    where
        Self: Sized,
        S2: Stream;
}

impl<S1> WyeExt for S1
where
    S1: Stream,
{
    fn wye<S2, O>(self, other: S2, machine: Wye<S1::Item, S2::Item, O>) -> WyeStream<S1, S2, O>
    where
        S2: Stream,
    {
        WyeStream::new(self, other, machine)
    }
}
