use crate::cause::Cause;
use crate::machine::{resume, ReceiveY, Wye};

impl<L, R, O> Wye<L, R, O>
where
    L: 'static,
    R: 'static,
    O: 'static,
{
    /// Tell the machine that its left side stopped with `cause`, delivered
    /// exactly as supplied.
    ///
    /// Every current and future left-capable await is resolved through its
    /// failure arm (`Err(cause)` for `AwaitL`, `HaltL(cause)` for
    /// `AwaitBoth`); right awaits stay live, with their continuations
    /// rewritten so the halt persists. Outputs emitted along the way are
    /// preserved in order.
    pub fn halt_l(self, cause: Cause) -> Self {
        let mut emitted = Vec::new();
        let mut cur = self;
        let rest = loop {
            match cur {
                Wye::Emit(batch, next) => {
                    emitted.extend(batch);
                    cur = *next;
                }
                Wye::AwaitL(recv) => {
                    let cause = cause.clone();
                    cur = resume(move || recv(Err(cause)));
                }
                Wye::AwaitBoth(recv) => {
                    let cause = cause.clone();
                    cur = resume(move || recv(ReceiveY::HaltL(cause)));
                }
                Wye::AwaitR(recv) => {
                    let cause = cause.clone();
                    break Wye::await_r(move |res| resume(move || recv(res)).halt_l(cause));
                }
                done @ Wye::Done(_) => break done,
            }
        };
        Wye::emit(emitted, rest)
    }

    /// Tell the machine that its right side stopped with `cause`.
    ///
    /// The mirror image of [`Wye::halt_l`].
    pub fn halt_r(self, cause: Cause) -> Self {
        let mut emitted = Vec::new();
        let mut cur = self;
        let rest = loop {
            match cur {
                Wye::Emit(batch, next) => {
                    emitted.extend(batch);
                    cur = *next;
                }
                Wye::AwaitR(recv) => {
                    let cause = cause.clone();
                    cur = resume(move || recv(Err(cause)));
                }
                Wye::AwaitBoth(recv) => {
                    let cause = cause.clone();
                    cur = resume(move || recv(ReceiveY::HaltR(cause)));
                }
                Wye::AwaitL(recv) => {
                    let cause = cause.clone();
                    break Wye::await_l(move |res| resume(move || recv(res)).halt_r(cause));
                }
                done @ Wye::Done(_) => break done,
            }
        };
        Wye::emit(emitted, rest)
    }

    /// Kill the left side: [`Wye::halt_l`] with the cause converted to a
    /// [`Cause::Kill`].
    ///
    /// After this the machine will never again request the left side; any
    /// later `AwaitL` is short-circuited through its failure arm with the
    /// kill cause.
    pub fn kill_l(self, cause: Cause) -> Self {
        self.halt_l(cause.kill())
    }

    /// Kill the right side. The mirror image of [`Wye::kill_l`].
    pub fn kill_r(self, cause: Cause) -> Self {
        self.halt_r(cause.kill())
    }

    /// Kill both sides, driving the machine to its terminal state while
    /// preserving emitted output.
    pub fn disconnect(self, cause: Cause) -> Self {
        let cause = cause.kill();
        self.halt_l(cause.clone()).halt_r(cause)
    }
}
