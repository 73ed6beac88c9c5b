use inline_thunk::Thunk;
use proptest::prelude::*;
use std::{cell::Cell, rc::Rc};

const SLOTS: usize = 4;

// counts live instances of itself
struct Live(Rc<Cell<usize>>);

impl Live {
    fn new(count: &Rc<Cell<usize>>) -> Self {
        count.set(count.get() + 1);
        Live(Rc::clone(count))
    }

    fn touch(&self) {}
}

impl Clone for Live {
    fn clone(&self) -> Self {
        Live::new(&self.0)
    }
}

impl Drop for Live {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[derive(Debug, Clone)]
enum Operation {
    Set(usize, u8),
    Clone(usize, usize),
    CloneFrom(usize, usize),
    Reset(usize),
    Call(usize),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0..SLOTS, any::<u8>()).prop_map(|(i, v)| Operation::Set(i, v)),
        (0..SLOTS, 0..SLOTS).prop_map(|(i, j)| Operation::Clone(i, j)),
        (0..SLOTS, 0..SLOTS).prop_map(|(i, j)| Operation::CloneFrom(i, j)),
        (0..SLOTS).prop_map(Operation::Reset),
        (0..SLOTS).prop_map(Operation::Call),
    ]
}

proptest! {
    #[test]
    fn test_thunks_match_model(ops in proptest::collection::vec(operation(), 1..64)) {
        let live = Rc::new(Cell::new(0usize));
        let total = Rc::new(Cell::new(0u64));
        let mut model: [Option<u8>; SLOTS] = [None; SLOTS];
        let mut expected_total = 0u64;

        {
            let mut thunks: [Thunk<32>; SLOTS] = Default::default();

            for op in ops {
                match op {
                    Operation::Set(i, v) => {
                        let guard = Live::new(&live);
                        let total = Rc::clone(&total);
                        thunks[i].set(move || {
                            guard.touch();
                            total.set(total.get() + v as u64);
                        });
                        model[i] = Some(v);
                    }
                    Operation::Clone(dst, src) => {
                        thunks[dst] = thunks[src].clone();
                        model[dst] = model[src];
                    }
                    Operation::CloneFrom(dst, src) => {
                        // `clone_from` onto itself is not expressible, which
                        // leaves the slot unchanged like a guarded self-assign
                        if dst != src {
                            let (target, source) = if dst < src {
                                let (left, right) = thunks.split_at_mut(src);
                                (&mut left[dst], &right[0])
                            } else {
                                let (left, right) = thunks.split_at_mut(dst);
                                (&mut right[0], &left[src])
                            };
                            target.clone_from(source);
                            model[dst] = model[src];
                        }
                    }
                    Operation::Reset(i) => {
                        // replacing with a fresh thunk drops the old one
                        thunks[i] = Thunk::new();
                        model[i] = None;
                    }
                    Operation::Call(i) => {
                        thunks[i].call();
                        expected_total += model[i].map_or(0, u64::from);
                    }
                }

                prop_assert_eq!(total.get(), expected_total);
                prop_assert_eq!(live.get(), model.iter().filter(|v| v.is_some()).count());
                for (thunk, expected) in thunks.iter().zip(&model) {
                    prop_assert_eq!(thunk.is_empty(), expected.is_none());
                }
            }
        }

        prop_assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_clones_are_independent(calls in proptest::collection::vec(0u32..8, 1..16)) {
        let total = Rc::new(Cell::new(0u32));
        let last = Rc::new(Cell::new(0u32));
        let mut original: Thunk<32> = Thunk::from_callable({
            let total = Rc::clone(&total);
            let last = Rc::clone(&last);
            let mut own = 0u32;
            move || {
                own += 1;
                last.set(own);
                total.set(total.get() + 1);
            }
        });
        let mut copies: Vec<Thunk<32>> = calls.iter().map(|_| original.clone()).collect();

        for (copy, &n) in copies.iter_mut().zip(&calls) {
            for _ in 0..n {
                copy.call();
            }
            if n > 0 {
                prop_assert_eq!(last.get(), n);
            }
        }
        prop_assert_eq!(total.get(), calls.iter().sum::<u32>());

        // the original was never called, so its count starts from zero
        original.call();
        prop_assert_eq!(last.get(), 1);
    }

    #[test]
    fn test_empty_thunks_do_nothing(copies in 0usize..32) {
        let empty: Thunk<16> = Thunk::new();
        let mut all: Vec<Thunk<16>> = (0..copies).map(|_| empty.clone()).collect();
        for thunk in &mut all {
            thunk.call();
            prop_assert!(thunk.is_empty());
        }
    }
}
