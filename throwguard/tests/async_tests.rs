//! Guarded invocations of operations that return futures

use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use throwguard::{wrap_async, Declaration, Fault, GuardError, MatcherSpec, Origin};

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("string was empty")]
struct StringEmptyError;

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("bad string")]
struct BadStringError;

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("odd number {0}")]
struct OddError(u32);

async fn string_length(text: &str) -> Result<usize, Fault> {
    tokio::task::yield_now().await;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StringEmptyError.into());
    }
    Ok(trimmed.len())
}

/// Panics before producing a future for blank input, rejects `asdf` later
fn checked_length(text: &str) -> impl Future<Output = Result<usize, Fault>> + '_ {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        panic::panic_any(StringEmptyError);
    }

    async move {
        tokio::task::yield_now().await;
        if trimmed == "asdf" {
            return Err(BadStringError.into());
        }
        Ok(trimmed.len())
    }
}

async fn explode<T, P: Any + Send>(payload: P) -> Result<T, Fault> {
    tokio::task::yield_now().await;
    panic::panic_any(payload)
}

fn string_errors() -> Declaration {
    Declaration::builder()
        .type_tag::<StringEmptyError>("StringEmptyError")
        .type_tag::<BadStringError>("BadStringError")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_async_success() {
    let guarded = wrap_async(
        string_length,
        Declaration::single("StringEmptyError", MatcherSpec::type_tag::<StringEmptyError>())
            .unwrap(),
    );
    let caught = AtomicBool::new(false);

    let length = guarded
        .call("asdf")
        .catch("catchStringEmptyError", |_| caught.store(true, Ordering::SeqCst))
        .unwrap()
        .done()
        .await
        .unwrap();

    assert_eq!(length, Some(4));
    assert!(!caught.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_async_rejection_reaches_handler() {
    let guarded = wrap_async(
        string_length,
        Declaration::single("StringEmptyError", MatcherSpec::type_tag::<StringEmptyError>())
            .unwrap(),
    );
    let mut origin = None;

    let length = guarded
        .call("  ")
        .catch("StringEmptyError", |fault| origin = Some(fault.origin()))
        .unwrap()
        .done()
        .await
        .unwrap();

    assert_eq!(length, None);
    assert_eq!(origin, Some(Origin::Returned));
}

#[tokio::test]
async fn test_rejection_after_sync_checks() {
    let guarded = wrap_async(checked_length, string_errors());
    let empty_hit = AtomicBool::new(false);
    let bad_hit = AtomicBool::new(false);

    let length = guarded
        .call("asdf")
        .catch("catchStringEmptyError", |_| empty_hit.store(true, Ordering::SeqCst))
        .unwrap()
        .catch("catchBadStringError", |_| bad_hit.store(true, Ordering::SeqCst))
        .unwrap()
        .done()
        .await
        .unwrap();

    assert_eq!(length, None);
    assert!(!empty_hit.load(Ordering::SeqCst));
    assert!(bad_hit.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_panic_before_future_is_handled() {
    let guarded = wrap_async(checked_length, string_errors());
    let mut seen = None;

    let length = guarded
        .call(" ")
        .catch("BadStringError", |_| panic!("wrong handler"))
        .unwrap()
        .catch("StringEmptyError", |fault| seen = Some(fault))
        .unwrap()
        .done()
        .await
        .unwrap();

    assert_eq!(length, None);
    let fault = seen.unwrap();
    assert_eq!(fault.origin(), Origin::Raised);
    assert!(fault.is::<StringEmptyError>());
}

#[tokio::test]
async fn test_panic_while_polling_is_handled() {
    let guarded = wrap_async(
        |_: ()| explode::<usize, _>(BadStringError),
        string_errors(),
    );
    let handled = AtomicUsize::new(0);

    let result = guarded
        .call(())
        .catch("StringEmptyError", |_| {
            handled.fetch_add(10, Ordering::SeqCst);
        })
        .unwrap()
        .catch("BadStringError", |_| {
            handled.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap()
        .done()
        .await
        .unwrap();

    assert_eq!(result, None);
    assert_eq!(handled.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unmatched_rejection_propagates() {
    let guarded = wrap_async(
        |_: ()| async { Err::<usize, _>(BadStringError) },
        Declaration::single("StringEmptyError", MatcherSpec::type_tag::<StringEmptyError>())
            .unwrap(),
    );

    let error = guarded
        .call(())
        .catch("StringEmptyError", |_| {})
        .unwrap()
        .done()
        .await
        .unwrap_err();

    match error {
        GuardError::Unmatched(fault) => assert!(fault.is::<BadStringError>()),
        other => panic!("expected unmatched fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unmatched_panic_in_future_is_resumed() {
    let guarded = wrap_async(
        |_: ()| explode::<(), _>(OddError(3)),
        string_errors(),
    );

    let pending = guarded
        .call(())
        .catch("StringEmptyError", |_| {})
        .unwrap()
        .catch("BadStringError", |_| {})
        .unwrap()
        .done();
    let payload = AssertUnwindSafe(pending).catch_unwind().await.unwrap_err();

    assert_eq!(payload.downcast_ref::<OddError>(), Some(&OddError(3)));
}

#[tokio::test]
async fn test_incomplete_registration_resolves_to_error() {
    let guarded = wrap_async(checked_length, string_errors());

    let result = guarded
        .call("asdf")
        .catch("StringEmptyError", |_| {})
        .unwrap()
        .done()
        .await;

    assert!(matches!(result, Err(GuardError::Incomplete { remaining: 1 })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_invocations_on_spawned_tasks() {
    async fn even_only(n: u32) -> Result<u32, OddError> {
        tokio::task::yield_now().await;
        if n % 2 == 1 {
            return Err(OddError(n));
        }
        Ok(n)
    }

    let guarded = wrap_async(
        even_only,
        Declaration::single("OddError", MatcherSpec::type_tag::<OddError>()).unwrap(),
    );
    let odd_hits = Arc::new(AtomicUsize::new(0));

    let mut tasks = Vec::new();
    for n in 0..16_u32 {
        let guarded = guarded.clone();
        let odd_hits = Arc::clone(&odd_hits);
        tasks.push(tokio::spawn(async move {
            let step = guarded
                .call(n)
                .catch("catchOddError", move |_| {
                    odd_hits.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
            step.done().await
        }));
    }

    let mut values = Vec::new();
    for task in tasks {
        if let Some(value) = task.await.unwrap().unwrap() {
            values.push(value);
        }
    }

    values.sort_unstable();
    assert_eq!(values, vec![0, 2, 4, 6, 8, 10, 12, 14]);
    assert_eq!(odd_hits.load(Ordering::SeqCst), 8);
}
