//! Registration order never changes what a guarded invocation does

use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use throwguard::{wrap, Declaration, GenericError, Step};

const KINDS: [&str; 4] = ["Alpha", "Beta", "Gamma", "Delta"];

fn four_kinds() -> Declaration {
    KINDS
        .iter()
        .fold(Declaration::builder(), |builder, name| builder.literal(*name, *name))
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_any_registration_order(
        order in Just(vec![0usize, 1, 2, 3]).prop_shuffle(),
        failing in prop::option::of(0usize..4),
    ) {
        let calls = AtomicUsize::new(0);
        let guarded = wrap(
            |_: ()| -> Result<u32, GenericError> {
                calls.fetch_add(1, Ordering::SeqCst);
                match failing {
                    Some(index) => Err(GenericError::named(KINDS[index], "operation failed")),
                    None => Ok(42),
                }
            },
            four_kinds(),
        );
        let fired = Mutex::new(Vec::new());

        let mut step = None;
        let mut enforcer = Some(guarded.call(()));
        for (position, &index) in order.iter().enumerate() {
            prop_assert_eq!(calls.load(Ordering::SeqCst), 0);

            let current = enforcer.take().unwrap();
            let fired = &fired;
            let next = current
                .catch(KINDS[index], move |_| fired.lock().unwrap().push(index))
                .unwrap();

            match next {
                Step::Pending(pending) => {
                    prop_assert!(position + 1 < KINDS.len());
                    enforcer = Some(pending);
                }
                done @ Step::Done(_) => {
                    prop_assert_eq!(position + 1, KINDS.len());
                    step = Some(done);
                }
            }
        }

        let result = step.unwrap().done().unwrap();
        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);

        let fired = fired.lock().unwrap().clone();
        match failing {
            Some(index) => {
                prop_assert_eq!(result, None);
                prop_assert_eq!(fired, vec![index]);
            }
            None => {
                prop_assert_eq!(result, Some(42));
                prop_assert!(fired.is_empty());
            }
        }
    }

    #[test]
    fn prop_duplicate_registration_always_rejected(
        first in 0usize..4,
        repeat in 0usize..3,
    ) {
        let calls = AtomicUsize::new(0);
        let guarded = wrap(
            |_: ()| -> Result<(), GenericError> {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
            four_kinds(),
        );

        let mut enforcer = match guarded.call(()).catch(KINDS[first], |_| {}).unwrap() {
            Step::Pending(pending) => pending,
            Step::Done(_) => unreachable!("four kinds need four handlers"),
        };
        for other in (0..KINDS.len()).filter(|&index| index != first).take(repeat) {
            enforcer = match enforcer.catch(KINDS[other], |_| {}).unwrap() {
                Step::Pending(pending) => pending,
                Step::Done(_) => unreachable!("at most three handlers registered"),
            };
        }

        let method = format!("catch{}", KINDS[first]);
        let rejected = enforcer.catch(&method, |_| {}).is_err();
        prop_assert!(rejected);
        prop_assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
