//! The two-input machine value and its primitive operations.
//!
//! A [`Wye`] is an immutable description of a merging process: a tree of
//! suspended continuations which, at each step, either emits a batch of
//! outputs, awaits one (or both) of its input sides, or is done. Machines are
//! pure values; driving them against live streams is the job of
//! [`WyeStream`][crate::stream::WyeStream], and a menu of ready-made machines
//! lives in the [`wye`][crate::wye] module.
//!
//! Receivers are plain `FnOnce` closures. Every place this crate invokes one
//! runs it behind a panic barrier, so a panicking receiver turns the machine
//! into `Done(Error(..))` instead of unwinding through the driver.

use std::panic::{self, AssertUnwindSafe};

use crate::cause::Cause;

mod attach;
mod feed;
mod flip;
mod halt;

/// A receiver for a left-side value, or the cause the left side stopped with.
pub type LeftRecv<L, R, O> = Box<dyn FnOnce(Result<L, Cause>) -> Wye<L, R, O> + Send>;

/// A receiver for a right-side value, or the cause the right side stopped with.
pub type RightRecv<L, R, O> = Box<dyn FnOnce(Result<R, Cause>) -> Wye<L, R, O> + Send>;

/// A receiver for whichever side responds first.
pub type BothRecv<L, R, O> = Box<dyn FnOnce(ReceiveY<L, R>) -> Wye<L, R, O> + Send>;

/// A two-input merging machine with left input `L`, right input `R` and
/// output `O`.
///
/// Every machine is in one of three shapes: emitting, awaiting, or done. The
/// awaiting shape records which side it wants; a machine never emits from
/// inside a receiver without first returning a fresh `Emit` node to its
/// caller.
///
/// # Examples
///
/// Machines compose bottom-up from the primitive constructors:
///
/// ```rust
/// use futures_wye::Wye;
///
/// // Echo a single left value, then stop.
/// let machine: Wye<u32, u32, u32> = Wye::receive_l(|l| Wye::emit_one(l, Wye::halt()));
/// let (outputs, rest) = machine.feed1_l(7).take_emitted();
/// assert_eq!(outputs, [7]);
/// assert_eq!(rest.demand(), futures_wye::Demand::Done);
/// ```
pub enum Wye<L, R, O> {
    /// A finite batch of outputs followed by the machine's continuation.
    Emit(Vec<O>, Box<Wye<L, R, O>>),
    /// A request for the next left value.
    AwaitL(LeftRecv<L, R, O>),
    /// A request for the next right value.
    AwaitR(RightRecv<L, R, O>),
    /// A request for a value from whichever side responds first.
    AwaitBoth(BothRecv<L, R, O>),
    /// A terminal machine, carrying the cause it stopped with.
    Done(Cause),
}

/// The event delivered to an [`Wye::AwaitBoth`] receiver.
///
/// The coarse "either side stopped" view is the [`halted`][ReceiveY::halted]
/// projection rather than a dedicated variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiveY<A, B> {
    /// A value arrived on the left side.
    ReceiveL(A),
    /// A value arrived on the right side.
    ReceiveR(B),
    /// The left side stopped.
    HaltL(Cause),
    /// The right side stopped.
    HaltR(Cause),
}

impl<A, B> ReceiveY<A, B> {
    /// The cause, when either side stopped.
    pub fn halted(&self) -> Option<&Cause> {
        match self {
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Some(cause),
            _ => None,
        }
    }

    /// Returns `true` if this event concerns the left side.
    #[must_use]
    pub fn is_l(&self) -> bool {
        matches!(self, ReceiveY::ReceiveL(_) | ReceiveY::HaltL(_))
    }

    /// Returns `true` if this event concerns the right side.
    #[must_use]
    pub fn is_r(&self) -> bool {
        matches!(self, ReceiveY::ReceiveR(_) | ReceiveY::HaltR(_))
    }

    /// Exchange the two sides.
    pub fn swap(self) -> ReceiveY<B, A> {
        match self {
            ReceiveY::ReceiveL(a) => ReceiveY::ReceiveR(a),
            ReceiveY::ReceiveR(b) => ReceiveY::ReceiveL(b),
            ReceiveY::HaltL(cause) => ReceiveY::HaltR(cause),
            ReceiveY::HaltR(cause) => ReceiveY::HaltL(cause),
        }
    }
}

/// Which side a machine should query next.
///
/// Consulted by the [`dynamic`][crate::wye::dynamic] family of machines after
/// every delivered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Query the left side.
    L,
    /// Query the right side.
    R,
    /// Query both sides and take whichever responds first.
    Both,
}

/// What a machine wants next, as observed without consuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demand {
    /// The machine has outputs ready.
    Emit,
    /// The machine wants a left value.
    Left,
    /// The machine wants a right value.
    Right,
    /// The machine wants a value from either side.
    Both,
    /// The machine has stopped.
    Done,
}

impl<L, R, O> Wye<L, R, O>
where
    L: 'static,
    R: 'static,
    O: 'static,
{
    /// A machine that emits `batch` and then continues as `next`.
    ///
    /// Empty batches vanish, and adjacent emits are collapsed into a single
    /// node.
    pub fn emit(mut batch: Vec<O>, next: Wye<L, R, O>) -> Self {
        if batch.is_empty() {
            return next;
        }
        match next {
            Wye::Emit(rest, tail) => {
                batch.extend(rest);
                Wye::Emit(batch, tail)
            }
            other => Wye::Emit(batch, Box::new(other)),
        }
    }

    /// A machine that emits a single value and then continues as `next`.
    pub fn emit_one(value: O, next: Wye<L, R, O>) -> Self {
        Wye::emit(vec![value], next)
    }

    /// A machine that emits `batch` and then ends gracefully.
    pub fn emit_seq(batch: Vec<O>) -> Self {
        Wye::emit(batch, Wye::halt())
    }

    /// A machine that has ended gracefully.
    pub fn halt() -> Self {
        Wye::Done(Cause::End)
    }

    /// A machine that has stopped with `cause`.
    pub fn fail(cause: Cause) -> Self {
        Wye::Done(cause)
    }

    /// A single request for the next left value.
    ///
    /// The receiver is handed `Ok(value)` when the side delivers, and
    /// `Err(cause)` when the side has stopped; the `Err` arm doubles as the
    /// fallback continuation run when the request cannot be satisfied.
    pub fn await_l<F>(recv: F) -> Self
    where
        F: FnOnce(Result<L, Cause>) -> Wye<L, R, O> + Send + 'static,
    {
        Wye::AwaitL(Box::new(recv))
    }

    /// A single request for the next right value. See [`Wye::await_l`].
    pub fn await_r<F>(recv: F) -> Self
    where
        F: FnOnce(Result<R, Cause>) -> Wye<L, R, O> + Send + 'static,
    {
        Wye::AwaitR(Box::new(recv))
    }

    /// A single request for a value from whichever side responds first.
    pub fn await_both<F>(recv: F) -> Self
    where
        F: FnOnce(ReceiveY<L, R>) -> Wye<L, R, O> + Send + 'static,
    {
        Wye::AwaitBoth(Box::new(recv))
    }

    /// Like [`Wye::await_l`], but a stopped side ends the machine with the
    /// side's cause.
    pub fn receive_l<F>(f: F) -> Self
    where
        F: FnOnce(L) -> Wye<L, R, O> + Send + 'static,
    {
        Wye::await_l(|res| match res {
            Ok(value) => f(value),
            Err(cause) => Wye::Done(cause),
        })
    }

    /// Like [`Wye::await_r`], but a stopped side ends the machine with the
    /// side's cause.
    pub fn receive_r<F>(f: F) -> Self
    where
        F: FnOnce(R) -> Wye<L, R, O> + Send + 'static,
    {
        Wye::await_r(|res| match res {
            Ok(value) => f(value),
            Err(cause) => Wye::Done(cause),
        })
    }

    /// Normalize the head of the machine: adjacent emit nodes are merged and
    /// empty batches dropped, so the result is a single `Emit`, an await, or
    /// `Done`.
    pub fn step(self) -> Self {
        let mut emitted = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Wye::Emit(batch, next) => {
                    emitted.extend(batch);
                    cur = *next;
                }
                other => {
                    cur = other;
                    break;
                }
            }
        }
        Wye::emit(emitted, cur)
    }

    /// What this machine wants next.
    pub fn demand(&self) -> Demand {
        match self {
            Wye::Emit(batch, next) if batch.is_empty() => next.demand(),
            Wye::Emit(..) => Demand::Emit,
            Wye::AwaitL(_) => Demand::Left,
            Wye::AwaitR(_) => Demand::Right,
            Wye::AwaitBoth(_) => Demand::Both,
            Wye::Done(_) => Demand::Done,
        }
    }

    /// Split off the currently emitted outputs, returning them together with
    /// the machine that remains.
    pub fn take_emitted(self) -> (Vec<O>, Self) {
        match self.step() {
            Wye::Emit(batch, next) => (batch, *next),
            other => (Vec::new(), other),
        }
    }

    /// The terminal cause, if the machine has stopped.
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Wye::Done(cause) => Some(cause),
            _ => None,
        }
    }
}

impl<L, R, O> core::fmt::Debug for Wye<L, R, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Wye::Emit(batch, _) => f.debug_tuple("Emit").field(&batch.len()).finish(),
            Wye::AwaitL(_) => f.write_str("AwaitL"),
            Wye::AwaitR(_) => f.write_str("AwaitR"),
            Wye::AwaitBoth(_) => f.write_str("AwaitBoth"),
            Wye::Done(cause) => f.debug_tuple("Done").field(cause).finish(),
        }
    }
}

/// Run a continuation behind the panic barrier.
///
/// Receivers are user code; a panic inside one becomes a terminal error
/// machine rather than an unwind through whoever is stepping it.
pub(crate) fn resume<L, R, O, F>(f: F) -> Wye<L, R, O>
where
    F: FnOnce() -> Wye<L, R, O>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(machine) => machine,
        Err(payload) => Wye::Done(Cause::from_panic(payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_chain() -> Wye<u8, u8, u8> {
        Wye::Emit(
            vec![1],
            Box::new(Wye::Emit(
                Vec::new(),
                Box::new(Wye::Emit(vec![2, 3], Box::new(Wye::halt()))),
            )),
        )
    }

    #[test]
    fn step_collapses_adjacent_emits() {
        let (outputs, rest) = emit_chain().take_emitted();
        assert_eq!(outputs, [1, 2, 3]);
        assert_eq!(rest.demand(), Demand::Done);
    }

    #[test]
    fn emit_constructor_drops_empty_batches() {
        let machine: Wye<u8, u8, u8> = Wye::emit(Vec::new(), Wye::halt());
        assert!(matches!(machine, Wye::Done(Cause::End)));
    }

    #[test]
    fn demand_reports_the_await_side() {
        assert_eq!(Wye::<u8, u8, u8>::receive_l(|_| Wye::halt()).demand(), Demand::Left);
        assert_eq!(Wye::<u8, u8, u8>::receive_r(|_| Wye::halt()).demand(), Demand::Right);
        let both: Wye<u8, u8, u8> = Wye::await_both(|_| Wye::halt());
        assert_eq!(both.demand(), Demand::Both);
    }

    #[test]
    fn demand_sees_through_empty_emits() {
        let machine: Wye<u8, u8, u8> =
            Wye::Emit(Vec::new(), Box::new(Wye::receive_l(|_| Wye::halt())));
        assert_eq!(machine.demand(), Demand::Left);
    }

    #[test]
    fn await_fallback_receives_the_cause() {
        let machine: Wye<u8, u8, u8> = Wye::await_l(|res| match res {
            Ok(_) => Wye::halt(),
            Err(cause) => Wye::emit_one(99, Wye::fail(cause)),
        });
        let (outputs, rest) = machine.halt_l(Cause::End).take_emitted();
        assert_eq!(outputs, [99]);
        assert_eq!(rest.cause(), Some(&Cause::End));
    }

    #[test]
    fn panicking_receiver_becomes_an_error() {
        let machine: Wye<u8, u8, u8> = Wye::receive_l(|_| panic!("receiver blew up"));
        let result = machine.feed1_l(1);
        let cause = result.cause().expect("machine should be done");
        assert!(cause.is_error());
        assert!(cause.to_string().contains("receiver blew up"));
    }

    #[test]
    fn receive_y_projections() {
        let halted: ReceiveY<u8, u8> = ReceiveY::HaltR(Cause::End);
        assert_eq!(halted.halted(), Some(&Cause::End));
        assert!(halted.is_r());
        assert_eq!(halted.swap(), ReceiveY::HaltL(Cause::End));

        let value: ReceiveY<u8, u16> = ReceiveY::ReceiveL(3);
        assert_eq!(value.halted(), None);
        assert_eq!(value.swap(), ReceiveY::ReceiveR(3));
    }
}
