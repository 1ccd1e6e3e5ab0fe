use core::fmt;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use futures_core::Stream;
use pin_project::pin_project;

use crate::cause::Cause;
use crate::machine::Wye;
use crate::utils::WakerPair;

const LEFT: usize = 0;
const RIGHT: usize = 1;

/// How far one input side has progressed.
///
/// A side is `Ready` when it may be polled, `Running` while a poll is
/// outstanding (its waker will fire when there is something to collect), and
/// `Done` once it has stopped.
#[derive(Debug, Clone)]
enum SideState {
    Ready,
    Running,
    Done(Cause),
}

impl SideState {
    fn is_done(&self) -> bool {
        matches!(self, SideState::Done(_))
    }
}

/// What polling one side produced.
enum SidePoll<T> {
    Item(T),
    Finished,
    Parked,
}

/// A stream driving two input streams through a [`Wye`] machine.
///
/// This `struct` is created by the [`wye`] method on the [`WyeExt`] trait, or
/// directly via [`WyeStream::new`]. See the trait documentation for more.
///
/// All machine state is owned by the stream and only ever touched from
/// `poll_next`, so machine transitions are totally ordered; concurrency
/// exists only in the two input streams, which are polled through their own
/// wakers so that each side is re-polled exactly when it has signalled
/// readiness.
///
/// [`wye`]: super::WyeExt::wye
/// [`WyeExt`]: super::WyeExt
#[pin_project]
pub struct WyeStream<A, B, O>
where
    A: Stream,
    B: Stream,
{
    #[pin]
    left: A,
    #[pin]
    right: B,
    machine: Option<Wye<A::Item, B::Item, O>>,
    outbuf: VecDeque<O>,
    wakers: WakerPair,
    left_state: SideState,
    right_state: SideState,
    left_bias: bool,
    terminal: Option<Cause>,
    done: bool,
}

impl<A, B, O> WyeStream<A, B, O>
where
    A: Stream,
    B: Stream,
{
    /// Bind two input streams to a machine.
    pub fn new(left: A, right: B, machine: Wye<A::Item, B::Item, O>) -> Self {
        Self {
            left,
            right,
            machine: Some(machine),
            outbuf: VecDeque::new(),
            wakers: WakerPair::new(),
            left_state: SideState::Ready,
            right_state: SideState::Ready,
            left_bias: true,
            terminal: None,
            done: false,
        }
    }
}

impl<A, B, O> WyeStream<A, B, O>
where
    A: Stream,
    B: Stream,
    A::Item: 'static,
    B::Item: 'static,
    O: 'static,
{
    /// Cancel the merge from outside.
    ///
    /// The machine is killed with `cause`, both input sides are marked
    /// stopped, and any batch that was buffered but not yet delivered is
    /// discarded: the consumer never sees partial output followed by the
    /// cause. The stream then reports `cause` (as an `Err` item unless it is
    /// [`Cause::End`]) and finishes. Calling this after the stream has
    /// already stopped is a no-op.
    pub fn terminate(self: Pin<&mut Self>, cause: Cause) {
        let this = self.project();
        if *this.done || this.terminal.is_some() {
            return;
        }
        this.outbuf.clear();
        if let Some(machine) = this.machine.take() {
            let _ = machine.disconnect(cause.clone());
        }
        if !this.left_state.is_done() {
            *this.left_state = SideState::Done(cause.clone().kill());
        }
        if !this.right_state.is_done() {
            *this.right_state = SideState::Done(cause.clone().kill());
        }
        *this.terminal = Some(cause);

        let readiness = this.wakers.readiness();
        if let Some(waker) = readiness.parent_waker() {
            waker.wake_by_ref();
        }
    }
}

fn poll_side<S: Stream>(
    stream: Pin<&mut S>,
    state: &mut SideState,
    waker: &Waker,
) -> SidePoll<S::Item> {
    let mut cx = Context::from_waker(waker);
    match stream.poll_next(&mut cx) {
        Poll::Ready(Some(item)) => SidePoll::Item(item),
        Poll::Ready(None) => {
            *state = SideState::Done(Cause::End);
            SidePoll::Finished
        }
        Poll::Pending => {
            *state = SideState::Running;
            SidePoll::Parked
        }
    }
}

fn finish_side(state: &mut SideState, cause: &Cause) {
    if !state.is_done() {
        *state = SideState::Done(cause.clone().kill());
    }
}

impl<A, B, O> Stream for WyeStream<A, B, O>
where
    A: Stream,
    B: Stream,
    A::Item: 'static,
    B::Item: 'static,
    O: 'static,
{
    type Item = Result<O, Cause>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        #[cfg(debug_assertions)]
        assert!(!*this.done, "WyeStream should not be polled after completing");

        {
            let mut readiness = this.wakers.readiness();
            readiness.set_waker(cx.waker());
            if readiness.clear_ready(LEFT) && matches!(*this.left_state, SideState::Running) {
                *this.left_state = SideState::Ready;
            }
            if readiness.clear_ready(RIGHT) && matches!(*this.right_state, SideState::Running) {
                *this.right_state = SideState::Ready;
            }
        }

        loop {
            // Buffered output goes out before the machine makes any further
            // progress; one item per poll.
            if let Some(out) = this.outbuf.pop_front() {
                return Poll::Ready(Some(Ok(out)));
            }
            if let Some(cause) = this.terminal.take() {
                if cause.is_end() {
                    *this.done = true;
                    return Poll::Ready(None);
                }
                // Report the cause once, then finish cleanly on the next
                // poll.
                *this.terminal = Some(Cause::End);
                return Poll::Ready(Some(Err(cause)));
            }

            let machine = match this.machine.take() {
                Some(machine) => machine.step(),
                None => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
            };

            match machine {
                Wye::Emit(batch, next) => {
                    this.outbuf.extend(batch);
                    *this.machine = Some(*next);
                }
                Wye::Done(cause) => {
                    finish_side(this.left_state, &cause);
                    finish_side(this.right_state, &cause);
                    *this.terminal = Some(cause);
                }
                Wye::AwaitL(recv) => {
                    if let SideState::Done(cause) = &*this.left_state {
                        let cause = cause.clone();
                        *this.machine = Some(Wye::AwaitL(recv).halt_l(cause));
                        continue;
                    }
                    if matches!(*this.left_state, SideState::Running) {
                        *this.machine = Some(Wye::AwaitL(recv));
                        return Poll::Pending;
                    }
                    match poll_side(this.left.as_mut(), this.left_state, this.wakers.get(LEFT)) {
                        SidePoll::Item(item) => {
                            *this.left_bias = false;
                            *this.machine = Some(Wye::AwaitL(recv).feed1_l(item));
                        }
                        SidePoll::Finished => {
                            *this.left_bias = false;
                            *this.machine = Some(Wye::AwaitL(recv).halt_l(Cause::End));
                        }
                        SidePoll::Parked => {
                            *this.machine = Some(Wye::AwaitL(recv));
                            return Poll::Pending;
                        }
                    }
                }
                Wye::AwaitR(recv) => {
                    if let SideState::Done(cause) = &*this.right_state {
                        let cause = cause.clone();
                        *this.machine = Some(Wye::AwaitR(recv).halt_r(cause));
                        continue;
                    }
                    if matches!(*this.right_state, SideState::Running) {
                        *this.machine = Some(Wye::AwaitR(recv));
                        return Poll::Pending;
                    }
                    match poll_side(this.right.as_mut(), this.right_state, this.wakers.get(RIGHT)) {
                        SidePoll::Item(item) => {
                            *this.left_bias = true;
                            *this.machine = Some(Wye::AwaitR(recv).feed1_r(item));
                        }
                        SidePoll::Finished => {
                            *this.left_bias = true;
                            *this.machine = Some(Wye::AwaitR(recv).halt_r(Cause::End));
                        }
                        SidePoll::Parked => {
                            *this.machine = Some(Wye::AwaitR(recv));
                            return Poll::Pending;
                        }
                    }
                }
                Wye::AwaitBoth(recv) => {
                    if let SideState::Done(cause) = &*this.left_state {
                        let cause = cause.clone();
                        *this.machine = Some(Wye::AwaitBoth(recv).halt_l(cause));
                        continue;
                    }
                    if let SideState::Done(cause) = &*this.right_state {
                        let cause = cause.clone();
                        *this.machine = Some(Wye::AwaitBoth(recv).halt_r(cause));
                        continue;
                    }

                    // Poll the preferred side first; the side that delivers
                    // loses its preference.
                    let mut pending = Some(Wye::AwaitBoth(recv));
                    let order = if *this.left_bias {
                        [true, false]
                    } else {
                        [false, true]
                    };
                    for poll_left in order {
                        if poll_left {
                            if !matches!(*this.left_state, SideState::Ready) {
                                continue;
                            }
                            match poll_side(
                                this.left.as_mut(),
                                this.left_state,
                                this.wakers.get(LEFT),
                            ) {
                                SidePoll::Item(item) => {
                                    *this.left_bias = false;
                                    let machine = pending.take().unwrap();
                                    *this.machine = Some(machine.feed1_l(item));
                                    break;
                                }
                                SidePoll::Finished => {
                                    *this.left_bias = false;
                                    let machine = pending.take().unwrap();
                                    *this.machine = Some(machine.halt_l(Cause::End));
                                    break;
                                }
                                SidePoll::Parked => {}
                            }
                        } else {
                            if !matches!(*this.right_state, SideState::Ready) {
                                continue;
                            }
                            match poll_side(
                                this.right.as_mut(),
                                this.right_state,
                                this.wakers.get(RIGHT),
                            ) {
                                SidePoll::Item(item) => {
                                    *this.left_bias = true;
                                    let machine = pending.take().unwrap();
                                    *this.machine = Some(machine.feed1_r(item));
                                    break;
                                }
                                SidePoll::Finished => {
                                    *this.left_bias = true;
                                    let machine = pending.take().unwrap();
                                    *this.machine = Some(machine.halt_r(Cause::End));
                                    break;
                                }
                                SidePoll::Parked => {}
                            }
                        }
                    }
                    if let Some(machine) = pending.take() {
                        *this.machine = Some(machine);
                        return Poll::Pending;
                    }
                }
            }
        }
    }
}

impl<A, B, O> fmt::Debug for WyeStream<A, B, O>
where
    A: Stream + fmt::Debug,
    B: Stream + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WyeStream")
            .field("left", &self.left)
            .field("right", &self.right)
            .field("machine", &self.machine)
            .field("buffered", &self.outbuf.len())
            .finish()
    }
}
