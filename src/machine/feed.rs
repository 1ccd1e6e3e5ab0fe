use crate::machine::{resume, ReceiveY, Wye};

#[cfg(test)]
use crate::cause::Cause;

impl<L, R, O> Wye<L, R, O>
where
    L: 'static,
    R: 'static,
    O: 'static,
{
    /// Deliver a sequence of left-side values into the machine.
    ///
    /// Values are handed to successive left-capable awaits (`AwaitL` and
    /// `AwaitBoth`), collecting any outputs emitted along the way. Feeding
    /// stops when the input runs out, when the machine stops, or when it
    /// awaits only the right side; whatever input remains at that point was
    /// never requested and is dropped. The collected outputs are re-emitted
    /// in front of the resulting machine.
    pub fn feed_l<I>(self, inputs: I) -> Self
    where
        I: IntoIterator<Item = L>,
    {
        let mut inputs = inputs.into_iter();
        let mut emitted = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Wye::Emit(batch, next) => {
                    emitted.extend(batch);
                    cur = *next;
                }
                Wye::AwaitL(recv) => match inputs.next() {
                    Some(value) => cur = resume(move || recv(Ok(value))),
                    None => {
                        cur = Wye::AwaitL(recv);
                        break;
                    }
                },
                Wye::AwaitBoth(recv) => match inputs.next() {
                    Some(value) => cur = resume(move || recv(ReceiveY::ReceiveL(value))),
                    None => {
                        cur = Wye::AwaitBoth(recv);
                        break;
                    }
                },
                other => {
                    cur = other;
                    break;
                }
            }
        }
        Wye::emit(emitted, cur)
    }

    /// Deliver a sequence of right-side values into the machine.
    ///
    /// The mirror image of [`Wye::feed_l`].
    pub fn feed_r<I>(self, inputs: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        let mut inputs = inputs.into_iter();
        let mut emitted = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Wye::Emit(batch, next) => {
                    emitted.extend(batch);
                    cur = *next;
                }
                Wye::AwaitR(recv) => match inputs.next() {
                    Some(value) => cur = resume(move || recv(Ok(value))),
                    None => {
                        cur = Wye::AwaitR(recv);
                        break;
                    }
                },
                Wye::AwaitBoth(recv) => match inputs.next() {
                    Some(value) => cur = resume(move || recv(ReceiveY::ReceiveR(value))),
                    None => {
                        cur = Wye::AwaitBoth(recv);
                        break;
                    }
                },
                other => {
                    cur = other;
                    break;
                }
            }
        }
        Wye::emit(emitted, cur)
    }

    /// Deliver a single left-side value.
    pub fn feed1_l(self, value: L) -> Self {
        self.feed_l(core::iter::once(value))
    }

    /// Deliver a single right-side value.
    pub fn feed1_r(self, value: R) -> Self {
        self.feed_r(core::iter::once(value))
    }

    /// Deliver an [`AwaitBoth`][Wye::AwaitBoth] event directly.
    ///
    /// Value events route through the matching `feed1` path so single-side
    /// awaits accept them as well; halt events route through the matching
    /// halt rewrite.
    pub fn feed_event(self, event: ReceiveY<L, R>) -> Self {
        match event {
            ReceiveY::ReceiveL(value) => self.feed1_l(value),
            ReceiveY::ReceiveR(value) => self.feed1_r(value),
            ReceiveY::HaltL(cause) => self.halt_l(cause),
            ReceiveY::HaltR(cause) => self.halt_r(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Demand;

    /// Emits the running sum of every left value it sees.
    fn summing() -> Wye<u32, u32, u32> {
        fn go(acc: u32) -> Wye<u32, u32, u32> {
            Wye::receive_l(move |l| Wye::emit_one(acc + l, go(acc + l)))
        }
        go(0)
    }

    #[test]
    fn feeding_nothing_is_identity() {
        let machine = summing().feed_l(Vec::new());
        assert_eq!(machine.demand(), Demand::Left);

        let machine = summing().feed_r(Vec::new());
        assert_eq!(machine.demand(), Demand::Left);
    }

    #[test]
    fn feeding_collects_interleaved_emits() {
        let (outputs, rest) = summing().feed_l([1, 2, 3]).take_emitted();
        assert_eq!(outputs, [1, 3, 6]);
        assert_eq!(rest.demand(), Demand::Left);
    }

    #[test]
    fn feeding_in_pieces_equals_feeding_at_once() {
        let (split, _) = summing().feed_l([1, 2]).feed_l([3, 4]).take_emitted();
        let (whole, _) = summing().feed_l([1, 2, 3, 4]).take_emitted();
        assert_eq!(split, whole);
    }

    #[test]
    fn input_past_an_opposite_await_is_dropped() {
        // Takes one left value, then only ever wants the right side.
        let machine: Wye<u32, u32, u32> =
            Wye::receive_l(|l| Wye::emit_one(l, Wye::receive_r(|r| Wye::emit_one(r, Wye::halt()))));

        let fed = machine.feed_l([1, 2, 3]);
        let (outputs, rest) = fed.take_emitted();
        assert_eq!(outputs, [1]);
        assert_eq!(rest.demand(), Demand::Right);

        // The dropped values are gone: the machine still answers to a fresh
        // right value as if 2 and 3 had never been offered.
        let (outputs, rest) = rest.feed1_r(9).take_emitted();
        assert_eq!(outputs, [9]);
        assert_eq!(rest.demand(), Demand::Done);
    }

    #[test]
    fn feeding_stops_when_the_machine_stops() {
        let machine: Wye<u32, u32, u32> = Wye::receive_l(|l| Wye::emit_one(l, Wye::halt()));
        let (outputs, rest) = machine.feed_l([5, 6, 7]).take_emitted();
        assert_eq!(outputs, [5]);
        assert_eq!(rest.cause(), Some(&Cause::End));
    }

    #[test]
    fn await_both_accepts_either_feed_direction() {
        let machine: Wye<u32, u32, u32> = Wye::await_both(|ev| match ev {
            ReceiveY::ReceiveL(l) => Wye::emit_one(l * 2, Wye::halt()),
            ReceiveY::ReceiveR(r) => Wye::emit_one(r * 3, Wye::halt()),
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
        });
        let (outputs, _) = machine.feed1_r(10).take_emitted();
        assert_eq!(outputs, [30]);

        let machine: Wye<u32, u32, u32> = Wye::await_both(|ev| match ev {
            ReceiveY::ReceiveL(l) => Wye::emit_one(l * 2, Wye::halt()),
            ReceiveY::ReceiveR(r) => Wye::emit_one(r * 3, Wye::halt()),
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
        });
        let (outputs, _) = machine.feed1_l(10).take_emitted();
        assert_eq!(outputs, [20]);
    }
}
