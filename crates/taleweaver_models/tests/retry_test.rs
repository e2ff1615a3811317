use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use taleweaver_error::{ProviderError, ProviderErrorKind, ProviderResult};
use taleweaver_models::RetryPolicy;
use tokio::time::Instant;

fn http_error(status_code: u16) -> ProviderError {
    ProviderError::new(ProviderErrorKind::HttpStatus {
        status_code,
        message: "test".to_string(),
    })
}

#[tokio::test(start_paused = true)]
async fn rate_limit_twice_then_success_takes_three_attempts() {
    let policy = RetryPolicy::default();
    let attempts = AtomicUsize::new(0);
    let start = Instant::now();

    let result: ProviderResult<&str> = policy
        .run("test", || {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n <= 2 {
                    Err(http_error(429))
                } else {
                    Ok("https://img/ok.png")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "https://img/ok.png");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(start.elapsed() >= Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn server_errors_exhaust_after_four_attempts() {
    let policy = RetryPolicy::default();
    let attempts = AtomicUsize::new(0);
    let start = Instant::now();

    let result: ProviderResult<()> = policy
        .run("test", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(http_error(503)) }
        })
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(attempts.load(Ordering::SeqCst), policy.max_attempts());
    assert!(start.elapsed() >= Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn client_errors_are_not_retried() {
    let policy = RetryPolicy::default();
    let attempts = AtomicUsize::new(0);

    for status in [400u16, 401, 404] {
        attempts.store(0, Ordering::SeqCst);
        let result: ProviderResult<()> = policy
            .run("test", || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async move { Err(http_error(status)) }
            })
            .await;

        assert_eq!(result.unwrap_err().status_code(), Some(status));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn non_http_errors_are_permanent() {
    let policy = RetryPolicy::default();
    let attempts = AtomicUsize::new(0);

    let result: ProviderResult<()> = policy
        .run("test", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(ProviderError::new(ProviderErrorKind::Transport("reset".into()))) }
        })
        .await;

    assert!(matches!(result.unwrap_err().kind, ProviderErrorKind::Transport(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn none_policy_makes_one_attempt() {
    let attempts = AtomicUsize::new(0);
    let result: ProviderResult<()> = RetryPolicy::none()
        .run("test", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(http_error(429)) }
        })
        .await;

    assert!(result.is_err());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
