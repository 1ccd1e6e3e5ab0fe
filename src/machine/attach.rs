use crate::cause::Cause;
use crate::machine::{ReceiveY, Wye};
use crate::pipe::{self, Pipe};

impl<L, R, O> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    /// Pre-compose a single-input transformer onto the left side.
    ///
    /// The resulting machine consumes `I0` on the left, runs each value
    /// through `pipe`, and feeds the pipe's output to `self`. Output and
    /// right-side traffic pass through untouched. When the pipe stops, the
    /// left side of `self` is told to stop with the pipe's cause; when both
    /// sides are awaited, whichever event actually arrives decides whether
    /// the pipe or `self` is driven. A pipe caught mid-emit is drained in
    /// bulk.
    pub fn attach_l<I0>(self, pipe: Pipe<I0, L>) -> Wye<I0, R, O>
    where
        I0: Send + 'static,
    {
        let mut emitted = Vec::new();
        let mut w = self;
        let mut p = pipe;
        let rest = loop {
            match w {
                Wye::Emit(batch, next) => {
                    emitted.extend(batch);
                    w = *next;
                }
                Wye::Done(cause) => break Wye::Done(cause),
                Wye::AwaitR(recv) => {
                    break Wye::await_r(move |res| {
                        super::resume(move || recv(res)).attach_l(p)
                    });
                }
                Wye::AwaitL(recv) => match p {
                    Pipe::Emit(values, tail) => {
                        w = Wye::AwaitL(recv).feed_l(values);
                        p = *tail;
                    }
                    Pipe::Await(prcv) => {
                        let inner = Wye::AwaitL(recv);
                        break Wye::await_l(move |res: Result<I0, Cause>| {
                            inner.attach_l(pipe::resume(move || prcv(res)))
                        });
                    }
                    Pipe::Done(cause) => {
                        w = Wye::AwaitL(recv).halt_l(cause.clone());
                        p = Pipe::Done(cause);
                    }
                },
                Wye::AwaitBoth(recv) => match p {
                    Pipe::Emit(values, tail) => {
                        w = Wye::AwaitBoth(recv).feed_l(values);
                        p = *tail;
                    }
                    Pipe::Await(prcv) => {
                        let inner = Wye::AwaitBoth(recv);
                        break Wye::await_both(move |ev: ReceiveY<I0, R>| match ev {
                            ReceiveY::ReceiveL(value) => {
                                inner.attach_l(pipe::resume(move || prcv(Ok(value))))
                            }
                            ReceiveY::ReceiveR(value) => {
                                inner.feed1_r(value).attach_l(Pipe::Await(prcv))
                            }
                            ReceiveY::HaltL(cause) => {
                                inner.attach_l(pipe::resume(move || prcv(Err(cause))))
                            }
                            ReceiveY::HaltR(cause) => {
                                inner.halt_r(cause).attach_l(Pipe::Await(prcv))
                            }
                        });
                    }
                    Pipe::Done(cause) => {
                        w = Wye::AwaitBoth(recv).halt_l(cause.clone());
                        p = Pipe::Done(cause);
                    }
                },
            }
        };
        Wye::emit(emitted, rest)
    }

    /// Pre-compose a single-input transformer onto the right side.
    ///
    /// Defined as flip, [`attach_l`][Wye::attach_l], flip.
    pub fn attach_r<I0>(self, pipe: Pipe<I0, R>) -> Wye<L, I0, O>
    where
        I0: Send + 'static,
    {
        self.flip().attach_l(pipe).flip()
    }
}
