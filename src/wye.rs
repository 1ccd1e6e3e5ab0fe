//! A menu of ready-made two-input machines.
//!
//! Everything here is a plain value built from the primitives on
//! [`Wye`]; pick one and hand it to
//! [`WyeExt::wye`][crate::stream::WyeExt::wye] together with two input
//! streams.
//!
//! # Examples
//!
//! ```rust
//! use futures_wye::{prelude::*, wye};
//! use futures_lite::future::block_on;
//! use futures_lite::prelude::*;
//! use futures_lite::stream;
//!
//! block_on(async {
//!     let a = stream::iter([1u32, 2, 3]);
//!     let b = stream::iter([10u32, 20, 30]);
//!     let mut s = a.wye(b, wye::yip_with(|a, b| a + b));
//!
//!     let mut out = vec![];
//!     while let Some(item) = s.next().await {
//!         out.push(item.unwrap());
//!     }
//!     assert_eq!(out, [11, 22, 33]);
//! })
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use either::Either;

use crate::cause::Cause;
use crate::machine::{ReceiveY, Request, Wye};

/// Echo the remaining left values, ignoring the right side.
fn pass_l<T: 'static, R: 'static>() -> Wye<T, R, T> {
    Wye::await_l(|res| match res {
        Ok(value) => Wye::emit_one(value, pass_l()),
        Err(cause) => Wye::fail(cause),
    })
}

/// Echo the remaining right values, ignoring the left side.
fn pass_r<L: 'static, T: 'static>() -> Wye<L, T, T> {
    Wye::await_r(|res| match res {
        Ok(value) => Wye::emit_one(value, pass_r()),
        Err(cause) => Wye::fail(cause),
    })
}

/// Echo the remaining left values wrapped in [`Either::Left`].
fn tag_l<A: 'static, B: 'static>() -> Wye<A, B, Either<A, B>> {
    Wye::await_l(|res| match res {
        Ok(value) => Wye::emit_one(Either::Left(value), tag_l()),
        Err(cause) => Wye::fail(cause),
    })
}

/// Echo the remaining right values wrapped in [`Either::Right`].
fn tag_r<A: 'static, B: 'static>() -> Wye<A, B, Either<A, B>> {
    Wye::await_r(|res| match res {
        Ok(value) => Wye::emit_one(Either::Right(value), tag_r()),
        Err(cause) => Wye::fail(cause),
    })
}

/// Emit values from either side as they arrive.
///
/// When one side ends gracefully the other is drained to completion, so the
/// machine stops only once both sides have stopped. A side stopping early
/// (kill or error) stops the machine with that cause.
pub fn merge<T>() -> Wye<T, T, T>
where
    T: Send + 'static,
{
    Wye::await_both(|ev| match ev {
        ReceiveY::ReceiveL(value) | ReceiveY::ReceiveR(value) => Wye::emit_one(value, merge()),
        ReceiveY::HaltL(Cause::End) => pass_r(),
        ReceiveY::HaltR(Cause::End) => pass_l(),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
    })
}

/// Like [`merge`], but stop as soon as either side stops.
pub fn merge_halt_both<T>() -> Wye<T, T, T>
where
    T: Send + 'static,
{
    Wye::await_both(|ev| match ev {
        ReceiveY::ReceiveL(value) | ReceiveY::ReceiveR(value) => {
            Wye::emit_one(value, merge_halt_both())
        }
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
    })
}

/// Like [`merge`], but stop as soon as the left side stops.
///
/// A right side that ends gracefully degrades the machine to a pure left
/// echo.
pub fn merge_halt_l<T>() -> Wye<T, T, T>
where
    T: Send + 'static,
{
    Wye::await_both(|ev| match ev {
        ReceiveY::ReceiveL(value) | ReceiveY::ReceiveR(value) => {
            Wye::emit_one(value, merge_halt_l())
        }
        ReceiveY::HaltR(Cause::End) => pass_l(),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
    })
}

/// Like [`merge`], but stop as soon as the right side stops.
pub fn merge_halt_r<T>() -> Wye<T, T, T>
where
    T: Send + 'static,
{
    merge_halt_l().flip()
}

/// Emit values from either side, tagged with the side they arrived on.
///
/// Stops only once both sides have stopped; the tags make the interleaving
/// lossless.
pub fn either<A, B>() -> Wye<A, B, Either<A, B>>
where
    A: Send + 'static,
    B: Send + 'static,
{
    Wye::await_both(|ev| match ev {
        ReceiveY::ReceiveL(value) => Wye::emit_one(Either::Left(value), either()),
        ReceiveY::ReceiveR(value) => Wye::emit_one(Either::Right(value), either()),
        ReceiveY::HaltL(Cause::End) => tag_r(),
        ReceiveY::HaltR(Cause::End) => tag_l(),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
    })
}

/// Pair values from the two sides, requesting both in parallel.
///
/// Stops as soon as either side stops, so exactly
/// `min(left.len(), right.len())` pairs come out.
pub fn yip<A, B>() -> Wye<A, B, (A, B)>
where
    A: Send + 'static,
    B: Send + 'static,
{
    yip_with(|a, b| (a, b))
}

/// Like [`yip`], combining each pair with `f`.
pub fn yip_with<A, B, O, F>(f: F) -> Wye<A, B, O>
where
    A: Send + 'static,
    B: Send + 'static,
    O: Send + 'static,
    F: Fn(A, B) -> O + Clone + Send + 'static,
{
    Wye::await_both(move |ev| match ev {
        ReceiveY::ReceiveL(a) => Wye::receive_r(move |b| {
            let out = f(a, b);
            Wye::emit_one(out, yip_with(f))
        }),
        ReceiveY::ReceiveR(b) => Wye::receive_l(move |a| {
            let out = f(a, b);
            Wye::emit_one(out, yip_with(f))
        }),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
    })
}

/// Left-biased buffered pairing: up to `n` left values may run ahead of the
/// right side.
pub fn yip_l<A, B>(n: usize) -> Wye<A, B, (A, B)>
where
    A: Send + 'static,
    B: Send + 'static,
{
    yip_with_l(n, |a, b| (a, b))
}

/// Like [`yip_with`], but the left side may run up to `n` values ahead.
///
/// With an empty buffer only the left side is read; once the buffer
/// overflows `n` only the right side is read; in between, whichever side
/// responds first is accepted. Stops as soon as either side stops.
pub fn yip_with_l<A, B, O, F>(n: usize, f: F) -> Wye<A, B, O>
where
    A: Send + 'static,
    B: Send + 'static,
    O: Send + 'static,
    F: Fn(A, B) -> O + Clone + Send + 'static,
{
    yip_buffered(VecDeque::new(), n, f)
}

fn yip_buffered<A, B, O, F>(buf: VecDeque<A>, n: usize, f: F) -> Wye<A, B, O>
where
    A: Send + 'static,
    B: Send + 'static,
    O: Send + 'static,
    F: Fn(A, B) -> O + Clone + Send + 'static,
{
    if buf.len() > n {
        Wye::receive_r(move |b| {
            let mut buf = buf;
            let a = buf.pop_front().unwrap();
            let out = f(a, b);
            Wye::emit_one(out, yip_buffered(buf, n, f))
        })
    } else if buf.is_empty() {
        Wye::receive_l(move |a| {
            let mut buf = buf;
            buf.push_back(a);
            yip_buffered(buf, n, f)
        })
    } else {
        Wye::await_both(move |ev| match ev {
            ReceiveY::ReceiveL(a) => {
                let mut buf = buf;
                buf.push_back(a);
                yip_buffered(buf, n, f)
            }
            ReceiveY::ReceiveR(b) => {
                let mut buf = buf;
                let a = buf.pop_front().unwrap();
                let out = f(a, b);
                Wye::emit_one(out, yip_buffered(buf, n, f))
            }
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
        })
    }
}

/// Pass the right side through while allowing `n` unacknowledged left
/// values.
///
/// Each right value released consumes the oldest pending left value; with no
/// pending left value the right side is not read at all.
pub fn bounded_queue<S, I>(n: usize) -> Wye<S, I, I>
where
    S: Send + 'static,
    I: Send + 'static,
{
    yip_with_l(n, |_, value| value)
}

/// Emit everything from the right side, unchecked.
///
/// The left side is a kill switch: if it ever produces a value the machine
/// ends immediately, whatever the value was.
pub fn unbounded_queue<S, I>() -> Wye<S, I, I>
where
    S: Send + 'static,
    I: Send + 'static,
{
    Wye::await_both(|ev| match ev {
        ReceiveY::ReceiveL(_) => Wye::halt(),
        ReceiveY::ReceiveR(value) => Wye::emit_one(value, unbounded_queue()),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
    })
}

/// Echo the left side at the pace of the right side, discarding right
/// values.
///
/// Left values buffer up to `n` ahead of the right side; each right arrival
/// releases the oldest buffered value. A right side that ends gracefully
/// flushes the buffer and degrades to a plain left echo; a left halt flushes
/// the buffer and then reports the left cause.
pub fn drain_r<I, D>(n: usize) -> Wye<I, D, I>
where
    I: Send + 'static,
    D: Send + 'static,
{
    drain_buffered(VecDeque::new(), n)
}

/// The mirror image of [`drain_r`]: echo the right side, drain the left.
pub fn drain_l<D, I>(n: usize) -> Wye<D, I, I>
where
    I: Send + 'static,
    D: Send + 'static,
{
    drain_r(n).flip()
}

fn drain_buffered<I, D>(buf: VecDeque<I>, n: usize) -> Wye<I, D, I>
where
    I: Send + 'static,
    D: Send + 'static,
{
    fn flush<I: 'static, D: 'static>(buf: VecDeque<I>, rest: Wye<I, D, I>) -> Wye<I, D, I> {
        Wye::emit(buf.into_iter().collect(), rest)
    }

    if buf.len() > n {
        Wye::await_r(move |res| match res {
            Ok(_) => {
                let mut buf = buf;
                let value = buf.pop_front().unwrap();
                Wye::emit_one(value, drain_buffered(buf, n))
            }
            Err(Cause::End) => flush(buf, pass_l()),
            Err(cause) => flush(buf, Wye::fail(cause)),
        })
    } else if buf.is_empty() {
        Wye::await_both(move |ev| match ev {
            ReceiveY::ReceiveL(value) => {
                let mut buf = VecDeque::new();
                buf.push_back(value);
                drain_buffered(buf, n)
            }
            ReceiveY::ReceiveR(_) => drain_buffered(VecDeque::new(), n),
            ReceiveY::HaltR(Cause::End) => pass_l(),
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
        })
    } else {
        Wye::await_both(move |ev| match ev {
            ReceiveY::ReceiveL(value) => {
                let mut buf = buf;
                buf.push_back(value);
                drain_buffered(buf, n)
            }
            ReceiveY::ReceiveR(_) => {
                let mut buf = buf;
                let value = buf.pop_front().unwrap();
                Wye::emit_one(value, drain_buffered(buf, n))
            }
            ReceiveY::HaltR(Cause::End) => flush(buf, pass_l()),
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => flush(buf, Wye::fail(cause)),
        })
    }
}

/// Seed with the first left value, then answer every right arrival with the
/// most recent left value seen. Stops when either side stops.
pub fn echo_left<A, D>() -> Wye<A, D, A>
where
    A: Clone + Send + 'static,
    D: Send + 'static,
{
    Wye::receive_l(|seed: A| Wye::emit_one(seed.clone(), echo_from(seed)))
}

fn echo_from<A, D>(last: A) -> Wye<A, D, A>
where
    A: Clone + Send + 'static,
    D: Send + 'static,
{
    Wye::await_both(move |ev: ReceiveY<A, D>| match ev {
        ReceiveY::ReceiveL(value) => Wye::emit_one(value.clone(), echo_from(value)),
        ReceiveY::ReceiveR(_) => Wye::emit_one(last.clone(), echo_from(last)),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
    })
}

/// Pass the right side through until the left side says stop.
///
/// A `true` on the left ends the machine gracefully; `false` is ignored.
pub fn interrupt<I>() -> Wye<bool, I, I>
where
    I: Send + 'static,
{
    Wye::await_both(|ev| match ev {
        ReceiveY::ReceiveL(stop) => {
            if stop {
                Wye::halt()
            } else {
                interrupt()
            }
        }
        ReceiveY::ReceiveR(value) => Wye::emit_one(value, interrupt()),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
    })
}

/// A queue paced by timestamps arriving on the left.
///
/// Each left value is a timestamp recording when a slot was handed out; each
/// right value is released against the oldest outstanding timestamp. When a
/// new timestamp finds the queue full (`max_size`) or the oldest outstanding
/// timestamp older than `d`, the machine blocks on the right side until a
/// value flows. Stops when either side stops.
pub fn timed_queue<I>(d: Duration, max_size: usize) -> Wye<Duration, I, I>
where
    I: Send + 'static,
{
    timed_buffered(VecDeque::new(), d, max_size)
}

fn timed_buffered<I>(q: VecDeque<Duration>, d: Duration, max_size: usize) -> Wye<Duration, I, I>
where
    I: Send + 'static,
{
    Wye::await_both(move |ev| match ev {
        ReceiveY::ReceiveL(now) => {
            let mut q = q;
            let overdue = q.front().map_or(false, |&oldest| oldest + d < now);
            if q.len() >= max_size || overdue {
                Wye::receive_r(move |value| {
                    let mut q = q;
                    q.pop_front();
                    Wye::emit_one(value, timed_buffered(q, d, max_size))
                })
            } else {
                q.push_back(now);
                timed_buffered(q, d, max_size)
            }
        }
        ReceiveY::ReceiveR(value) => {
            let mut q = q;
            q.pop_front();
            Wye::emit_one(value, timed_buffered(q, d, max_size))
        }
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
    })
}

/// Route between the two sides under the control of request functions.
///
/// Starts by reading the left side. After every delivered value the matching
/// function (`f` for left values, `g` for right values) picks which side to
/// query next. Each delivery is emitted with its side tag.
pub fn dynamic<I, J, F, G>(f: F, g: G) -> Wye<I, J, ReceiveY<I, J>>
where
    I: Send + 'static,
    J: Send + 'static,
    F: Fn(&I) -> Request + Clone + Send + 'static,
    G: Fn(&J) -> Request + Clone + Send + 'static,
{
    dynamic_from(Request::L, f, g)
}

fn dynamic_from<I, J, F, G>(req: Request, f: F, g: G) -> Wye<I, J, ReceiveY<I, J>>
where
    I: Send + 'static,
    J: Send + 'static,
    F: Fn(&I) -> Request + Clone + Send + 'static,
    G: Fn(&J) -> Request + Clone + Send + 'static,
{
    match req {
        Request::L => Wye::receive_l(move |value| {
            let next = f(&value);
            Wye::emit_one(ReceiveY::ReceiveL(value), dynamic_from(next, f, g))
        }),
        Request::R => Wye::receive_r(move |value| {
            let next = g(&value);
            Wye::emit_one(ReceiveY::ReceiveR(value), dynamic_from(next, f, g))
        }),
        Request::Both => Wye::await_both(move |ev| match ev {
            ReceiveY::ReceiveL(value) => {
                let next = f(&value);
                Wye::emit_one(ReceiveY::ReceiveL(value), dynamic_from(next, f, g))
            }
            ReceiveY::ReceiveR(value) => {
                let next = g(&value);
                Wye::emit_one(ReceiveY::ReceiveR(value), dynamic_from(next, f, g))
            }
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
        }),
    }
}

/// [`dynamic`] for sides carrying the same type, emitting values without
/// their side tags.
pub fn dynamic1<I, F>(f: F) -> Wye<I, I, I>
where
    I: Send + 'static,
    F: Fn(&I) -> Request + Clone + Send + 'static,
{
    dynamic1_from(Request::L, f)
}

fn dynamic1_from<I, F>(req: Request, f: F) -> Wye<I, I, I>
where
    I: Send + 'static,
    F: Fn(&I) -> Request + Clone + Send + 'static,
{
    match req {
        Request::L => Wye::receive_l(move |value| {
            let next = f(&value);
            Wye::emit_one(value, dynamic1_from(next, f))
        }),
        Request::R => Wye::receive_r(move |value| {
            let next = f(&value);
            Wye::emit_one(value, dynamic1_from(next, f))
        }),
        Request::Both => Wye::await_both(move |ev| match ev {
            ReceiveY::ReceiveL(value) | ReceiveY::ReceiveR(value) => {
                let next = f(&value);
                Wye::emit_one(value, dynamic1_from(next, f))
            }
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Demand;

    /// Drive a machine from scripted inputs, preferring the left side when
    /// both are wanted and announcing a side's end when its script runs out.
    fn run<L, R, O>(machine: Wye<L, R, O>, left: Vec<L>, right: Vec<R>) -> (Vec<O>, Cause)
    where
        L: 'static,
        R: 'static,
        O: 'static,
    {
        let mut left = left.into_iter();
        let mut right = right.into_iter();
        let mut outputs = Vec::new();
        let mut m = machine;
        loop {
            match m.demand() {
                Demand::Emit => {
                    let (batch, rest) = m.take_emitted();
                    outputs.extend(batch);
                    m = rest;
                }
                Demand::Done => {
                    let (batch, rest) = m.take_emitted();
                    outputs.extend(batch);
                    match rest {
                        Wye::Done(cause) => return (outputs, cause),
                        _ => unreachable!(),
                    }
                }
                Demand::Left => {
                    m = match left.next() {
                        Some(value) => m.feed1_l(value),
                        None => m.halt_l(Cause::End),
                    }
                }
                Demand::Right => {
                    m = match right.next() {
                        Some(value) => m.feed1_r(value),
                        None => m.halt_r(Cause::End),
                    }
                }
                Demand::Both => {
                    m = match left.next() {
                        Some(value) => m.feed1_l(value),
                        None => m.halt_l(Cause::End),
                    }
                }
            }
        }
    }

    #[test]
    fn merge_emits_everything_from_both_sides() {
        let (outputs, cause) = run(merge(), vec![1, 2], vec![10, 20]);
        let mut sorted = outputs.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 10, 20]);
        assert_eq!(cause, Cause::End);

        // Flipping the sides yields the same multiset.
        let (flipped, _) = run(merge(), vec![10, 20], vec![1, 2]);
        let mut flipped_sorted = flipped;
        flipped_sorted.sort_unstable();
        assert_eq!(flipped_sorted, sorted);
    }

    #[test]
    fn merge_halt_both_stops_at_the_first_end() {
        let (outputs, cause) = run(merge_halt_both(), vec![1], vec![10, 20, 30]);
        // The left script runs dry after one value, ending the machine even
        // though the right side has more to give.
        assert!(outputs.len() < 4);
        assert_eq!(cause, Cause::End);
    }

    #[test]
    fn merge_halt_l_drains_left_after_right_ends() {
        let m = merge_halt_l::<u32>().halt_r(Cause::End);
        let (outputs, _) = m.feed_l([1, 2, 3]).take_emitted();
        assert_eq!(outputs, [1, 2, 3]);
    }

    #[test]
    fn merge_halt_l_stops_when_the_left_side_stops() {
        let m = merge_halt_l::<u32>().halt_l(Cause::End);
        assert_eq!(m.cause(), Some(&Cause::End));
    }

    #[test]
    fn either_tags_are_lossless() {
        let (outputs, cause) = run(either(), vec![1, 2], vec![10, 20]);
        let lefts: Vec<u32> = outputs.iter().filter_map(|e| e.clone().left()).collect();
        let rights: Vec<u32> = outputs.iter().filter_map(|e| e.clone().right()).collect();
        assert_eq!(lefts, [1, 2]);
        assert_eq!(rights, [10, 20]);
        assert_eq!(cause, Cause::End);
    }

    #[test]
    fn yip_with_produces_min_length() {
        let (outputs, _) = run(yip_with(|a: u32, b: u32| a + b), vec![1, 2, 3], vec![10, 20]);
        assert_eq!(outputs, [11, 22]);

        let (outputs, _) = run(yip(), vec![1], vec![10, 20, 30]);
        assert_eq!(outputs, [(1, 10)]);
    }

    #[test]
    fn yip_with_l_bounds_the_buffer() {
        // All left values are offered before any right value, so the buffer
        // is exercised at its bound: reads switch to right-only once the
        // buffer exceeds n.
        let n = 2;
        let (outputs, _) = run(
            yip_with_l(n, |a: u32, b: u32| (a, b)),
            vec![1, 2, 3, 4, 5, 6, 7],
            vec![10, 20, 30],
        );
        assert_eq!(outputs, [(1, 10), (2, 20), (3, 30)]);
    }

    #[test]
    fn bounded_queue_passes_right_through() {
        let (outputs, _) = run(
            bounded_queue::<u8, char>(2),
            vec![0, 0, 0, 0, 0, 0, 0],
            vec!['x', 'y', 'z'],
        );
        assert_eq!(outputs, ['x', 'y', 'z']);
    }

    #[test]
    fn unbounded_queue_stops_on_any_left_value() {
        let (outputs, cause) = run(unbounded_queue::<u8, u32>(), vec![0], vec![1, 2, 3]);
        assert!(outputs.is_empty());
        assert_eq!(cause, Cause::End);
    }

    #[test]
    fn unbounded_queue_passes_right_values_unchecked() {
        // While the left side stays silent the right side flows freely.
        let (outputs, rest) = unbounded_queue::<u8, u32>().feed_r([1, 2, 3]).take_emitted();
        assert_eq!(outputs, [1, 2, 3]);
        assert_eq!(rest.demand(), Demand::Both);
    }

    #[test]
    fn drain_r_echoes_left_and_discards_right() {
        let (outputs, cause) = run(drain_r::<u32, char>(1), vec![1, 2, 3], vec!['a', 'b']);
        assert_eq!(outputs, [1, 2, 3]);
        assert_eq!(cause, Cause::End);
    }

    #[test]
    fn drain_l_is_the_flip() {
        let (outputs, _) = run(drain_l::<char, u32>(1), vec!['a', 'b'], vec![1, 2, 3]);
        assert_eq!(outputs, [1, 2, 3]);
    }

    #[test]
    fn echo_left_repeats_the_latest_left_value() {
        // Feed the seed, then answer right arrivals by hand so the script
        // interleaves the way the scenario describes.
        let m = echo_left::<u32, char>();
        let (outputs, m) = m.feed1_l(7).take_emitted();
        assert_eq!(outputs, [7]);
        let (outputs, m) = m.feed1_r('?').take_emitted();
        assert_eq!(outputs, [7]);
        let (outputs, m) = m.feed1_l(8).take_emitted();
        assert_eq!(outputs, [8]);
        let (outputs, _) = m.feed1_r('?').take_emitted();
        assert_eq!(outputs, [8]);
    }

    #[test]
    fn interrupt_stops_on_true() {
        let m = interrupt::<u32>();
        let (outputs, m) = m.feed1_r(1).take_emitted();
        assert_eq!(outputs, [1]);
        let (outputs, m) = m.feed1_l(false).take_emitted();
        assert!(outputs.is_empty());
        let (outputs, m) = m.feed1_r(1).take_emitted();
        assert_eq!(outputs, [1]);
        let m = m.feed1_l(true);
        assert_eq!(m.cause(), Some(&Cause::End));
    }

    #[test]
    fn timed_queue_blocks_on_right_when_overdue() {
        let d = Duration::from_secs(10);
        let m = timed_queue::<char>(d, 4);
        // Two slots inside the window: both enqueue.
        let m = m.feed1_l(Duration::from_secs(1));
        let m = m.feed1_l(Duration::from_secs(2));
        assert_eq!(m.demand(), Demand::Both);
        // A timestamp far past the window forces an exclusive right read.
        let m = m.feed1_l(Duration::from_secs(30));
        assert_eq!(m.demand(), Demand::Right);
        let (outputs, m) = m.feed1_r('a').take_emitted();
        assert_eq!(outputs, ['a']);
        assert_eq!(m.demand(), Demand::Both);
    }

    #[test]
    fn timed_queue_blocks_on_right_when_full() {
        let m = timed_queue::<char>(Duration::from_secs(100), 1);
        let m = m.feed1_l(Duration::from_secs(1));
        let m = m.feed1_l(Duration::from_secs(2));
        assert_eq!(m.demand(), Demand::Right);
    }

    #[test]
    fn dynamic1_all_left_reads_only_left() {
        let (outputs, cause) = run(dynamic1(|_: &u32| Request::L), vec![1, 2, 3], vec![9, 9]);
        assert_eq!(outputs, [1, 2, 3]);
        assert_eq!(cause, Cause::End);
    }

    #[test]
    fn dynamic_routes_by_request() {
        // First left value switches reading to the right side, and the right
        // value switches back.
        let m = dynamic(
            |_: &u32| Request::R,
            |_: &char| Request::L,
        );
        assert_eq!(m.demand(), Demand::Left);
        let (outputs, m) = m.feed1_l(1).take_emitted();
        assert_eq!(outputs, [ReceiveY::ReceiveL(1)]);
        assert_eq!(m.demand(), Demand::Right);
        let (outputs, m) = m.feed1_r('x').take_emitted();
        assert_eq!(outputs, [ReceiveY::ReceiveR('x')]);
        assert_eq!(m.demand(), Demand::Left);
    }

    #[test]
    fn yip_with_catches_a_panicking_combiner() {
        let m = yip_with(|_: u32, _: u32| -> u32 { panic!("combiner exploded") });
        let m = m.feed1_l(1).feed1_r(2);
        let cause = m.cause().expect("machine should stop");
        assert!(cause.is_error());
    }
}
