use crate::machine::{resume, ReceiveY, Wye};

impl<L, R, O> Wye<L, R, O>
where
    L: 'static,
    R: 'static,
    O: 'static,
{
    /// Swap the two sides of the machine.
    ///
    /// Left awaits become right awaits and vice versa, and events delivered
    /// to a both-sides receiver are relabelled on the way in. Outputs pass
    /// through untouched. `flip` is an involution: flipping twice yields a
    /// machine indistinguishable from the original.
    pub fn flip(self) -> Wye<R, L, O> {
        let mut emitted = Vec::new();
        let mut cur = self;
        let rest = loop {
            match cur {
                Wye::Emit(batch, next) => {
                    emitted.extend(batch);
                    cur = *next;
                }
                Wye::AwaitL(recv) => {
                    break Wye::await_r(move |res| resume(move || recv(res)).flip())
                }
                Wye::AwaitR(recv) => {
                    break Wye::await_l(move |res| resume(move || recv(res)).flip())
                }
                Wye::AwaitBoth(recv) => {
                    break Wye::await_both(move |ev: ReceiveY<R, L>| {
                        resume(move || recv(ev.swap())).flip()
                    })
                }
                Wye::Done(cause) => break Wye::Done(cause),
            }
        };
        Wye::emit(emitted, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cause::Cause;
    use crate::machine::Demand;

    /// Pairs one left value with one right value, forever.
    fn pair_up() -> Wye<u32, u32, (u32, u32)> {
        Wye::receive_l(|l| Wye::receive_r(move |r| Wye::emit_one((l, r), pair_up())))
    }

    #[test]
    fn flip_swaps_the_await_side() {
        assert_eq!(pair_up().demand(), Demand::Left);
        assert_eq!(pair_up().flip().demand(), Demand::Right);
    }

    #[test]
    fn flip_relabels_both_side_events() {
        let machine: Wye<u32, &str, String> = Wye::await_both(|ev| match ev {
            ReceiveY::ReceiveL(n) => Wye::emit_one(format!("num {n}"), Wye::halt()),
            ReceiveY::ReceiveR(s) => Wye::emit_one(format!("str {s}"), Wye::halt()),
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::fail(cause),
        });

        // After the flip the number lives on the right side.
        let (outputs, _) = machine.flip().feed1_r(3).take_emitted();
        assert_eq!(outputs, ["num 3"]);
    }

    #[test]
    fn flip_is_an_involution() {
        let original = pair_up().feed1_l(1).feed1_r(10);
        let round_trip = pair_up().flip().flip().feed1_l(1).feed1_r(10);

        let (a, rest_a) = original.take_emitted();
        let (b, rest_b) = round_trip.take_emitted();
        assert_eq!(a, b);
        assert_eq!(rest_a.demand(), rest_b.demand());
    }

    #[test]
    fn flip_routes_halts_to_the_swapped_side() {
        let flipped = pair_up().flip();
        // The original waits on L, so the flipped machine waits on R; halting
        // its right side must end it the way halting L ended the original.
        let halted = flipped.halt_r(Cause::End);
        assert_eq!(halted.cause(), Some(&Cause::End));
    }
}
