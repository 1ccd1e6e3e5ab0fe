//! Single-input transformer machines.
//!
//! A [`Pipe`] is the one-input counterpart of [`Wye`][crate::Wye]: the same
//! emit / await / done step shape, minus the notion of sides. Pipes exist to
//! be attached in front of one side of a wye (see
//! [`Wye::attach_l`][crate::Wye::attach_l]); the handful of constructors here
//! cover the shapes that composition and its tests need.

use std::panic::{self, AssertUnwindSafe};

use crate::cause::Cause;

/// A receiver for the next input value, or the cause the input stopped with.
pub type PipeRecv<I, O> = Box<dyn FnOnce(Result<I, Cause>) -> Pipe<I, O> + Send>;

/// A single-input machine transforming `I` into `O`.
pub enum Pipe<I, O> {
    /// A finite batch of outputs followed by the continuation.
    Emit(Vec<O>, Box<Pipe<I, O>>),
    /// A request for the next input value.
    Await(PipeRecv<I, O>),
    /// A terminal machine, carrying the cause it stopped with.
    Done(Cause),
}

impl<I, O> Pipe<I, O>
where
    I: 'static,
    O: 'static,
{
    /// A pipe that emits `batch` and then continues as `next`.
    ///
    /// Empty batches vanish, and adjacent emits are collapsed.
    pub fn emit(mut batch: Vec<O>, next: Pipe<I, O>) -> Self {
        if batch.is_empty() {
            return next;
        }
        match next {
            Pipe::Emit(rest, tail) => {
                batch.extend(rest);
                Pipe::Emit(batch, tail)
            }
            other => Pipe::Emit(batch, Box::new(other)),
        }
    }

    /// A pipe that emits a single value and then continues as `next`.
    pub fn emit_one(value: O, next: Pipe<I, O>) -> Self {
        Pipe::emit(vec![value], next)
    }

    /// A pipe that has ended gracefully.
    pub fn halt() -> Self {
        Pipe::Done(Cause::End)
    }

    /// A pipe that has stopped with `cause`.
    pub fn fail(cause: Cause) -> Self {
        Pipe::Done(cause)
    }

    /// A single request for the next input value.
    pub fn await1<F>(recv: F) -> Self
    where
        F: FnOnce(Result<I, Cause>) -> Pipe<I, O> + Send + 'static,
    {
        Pipe::Await(Box::new(recv))
    }

    /// Like [`Pipe::await1`], but a stopped input ends the pipe with the
    /// input's cause.
    pub fn receive1<F>(f: F) -> Self
    where
        F: FnOnce(I) -> Pipe<I, O> + Send + 'static,
    {
        Pipe::await1(|res| match res {
            Ok(value) => f(value),
            Err(cause) => Pipe::Done(cause),
        })
    }

    /// Feed a sequence of input values, collecting emitted output in front of
    /// the resulting pipe. Input left over once the pipe stops is dropped.
    pub fn feed<It>(self, inputs: It) -> Self
    where
        It: IntoIterator<Item = I>,
    {
        let mut inputs = inputs.into_iter();
        let mut emitted = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Pipe::Emit(batch, next) => {
                    emitted.extend(batch);
                    cur = *next;
                }
                Pipe::Await(recv) => match inputs.next() {
                    Some(value) => cur = resume(move || recv(Ok(value))),
                    None => {
                        cur = Pipe::Await(recv);
                        break;
                    }
                },
                done @ Pipe::Done(_) => {
                    cur = done;
                    break;
                }
            }
        }
        Pipe::emit(emitted, cur)
    }

    /// Feed a single input value.
    pub fn feed1(self, value: I) -> Self {
        self.feed(core::iter::once(value))
    }

    /// Tell the pipe its input stopped with `cause`.
    pub fn halt_input(self, cause: Cause) -> Self {
        let mut emitted = Vec::new();
        let mut cur = self;
        let rest = loop {
            match cur {
                Pipe::Emit(batch, next) => {
                    emitted.extend(batch);
                    cur = *next;
                }
                Pipe::Await(recv) => {
                    let cause = cause.clone();
                    cur = resume(move || recv(Err(cause)));
                }
                done @ Pipe::Done(_) => break done,
            }
        };
        Pipe::emit(emitted, rest)
    }

    /// Split off the currently emitted outputs, returning them together with
    /// the pipe that remains.
    pub fn take_emitted(self) -> (Vec<O>, Self) {
        let mut emitted = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Pipe::Emit(batch, next) => {
                    emitted.extend(batch);
                    cur = *next;
                }
                other => return (emitted, other),
            }
        }
    }

    /// The terminal cause, if the pipe has stopped.
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Pipe::Done(cause) => Some(cause),
            _ => None,
        }
    }
}

impl<I, O> core::fmt::Debug for Pipe<I, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Pipe::Emit(batch, _) => f.debug_tuple("Emit").field(&batch.len()).finish(),
            Pipe::Await(_) => f.write_str("Await"),
            Pipe::Done(cause) => f.debug_tuple("Done").field(cause).finish(),
        }
    }
}

/// The identity pipe: every input is echoed unchanged.
pub fn id<I>() -> Pipe<I, I>
where
    I: Send + 'static,
{
    Pipe::receive1(|value| Pipe::emit_one(value, id()))
}

/// A pipe applying `f` to every input.
pub fn map<I, O, F>(f: F) -> Pipe<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> O + Clone + Send + 'static,
{
    Pipe::receive1(move |value| {
        let out = f(value);
        Pipe::emit_one(out, map(f))
    })
}

/// A pipe echoing the first `n` inputs, then ending gracefully.
pub fn take<I>(n: usize) -> Pipe<I, I>
where
    I: Send + 'static,
{
    if n == 0 {
        return Pipe::halt();
    }
    Pipe::receive1(move |value| Pipe::emit_one(value, take(n - 1)))
}

/// A pipe echoing only the inputs for which `pred` holds.
pub fn filter<I, F>(pred: F) -> Pipe<I, I>
where
    I: Send + 'static,
    F: Fn(&I) -> bool + Clone + Send + 'static,
{
    Pipe::receive1(move |value| {
        if pred(&value) {
            Pipe::emit_one(value, filter(pred))
        } else {
            filter(pred)
        }
    })
}

pub(crate) fn resume<I, O, F>(f: F) -> Pipe<I, O>
where
    F: FnOnce() -> Pipe<I, O>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(pipe) => pipe,
        Err(payload) => Pipe::Done(Cause::from_panic(payload)),
    }
}
