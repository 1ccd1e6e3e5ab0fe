//! Two-input nondeterministic stream combinators.
//!
//! This crate merges two independent streams into one under the control of a
//! [`Wye`]: a pure state machine which decides, at every step, whether it
//! wants a value from the left input, from the right input, or from
//! whichever responds first, and how to react when either side stops. The
//! [`wye`] module provides a menu of ready-made machines (nondeterministic
//! merges, tagged unions, zips, bounded and timed queues, interrupts), and
//! the primitives on [`Wye`] build custom ones.
//!
//! Machines are plain values: they can be fed, killed, flipped, and
//! pre-composed with single-input [`Pipe`][pipe::Pipe]s without any executor
//! in sight. Running one against live inputs is a single call away:
//!
//! ```rust
//! use futures_wye::{prelude::*, wye};
//! use futures_lite::future::block_on;
//! use futures_lite::prelude::*;
//! use futures_lite::stream;
//!
//! fn main() {
//!     block_on(async {
//!         let a = stream::iter([1u32, 2]);
//!         let b = stream::iter([10u32, 20]);
//!         let mut s = a.wye(b, wye::merge());
//!
//!         let mut out = vec![];
//!         while let Some(item) = s.next().await {
//!             out.push(item.unwrap());
//!         }
//!         out.sort_unstable();
//!         assert_eq!(out, [1, 2, 10, 20]);
//!     })
//! }
//! ```
//!
//! The merge is explicitly nondeterministic: values of one side stay in
//! order, but the interleaving between sides depends on which input responds
//! first.

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod cause;
mod machine;
mod utils;

/// The wye prelude.
pub mod prelude {
    pub use super::stream::WyeExt as _;
}

pub mod pipe;
pub mod stream;
pub mod wye;

pub use cause::{BoxError, Cause};
pub use machine::{BothRecv, Demand, LeftRecv, ReceiveY, Request, RightRecv, Wye};
