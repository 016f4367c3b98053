//! Async dispatch, waiting and retry

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use screenplay::prelude::*;
use screenplay::waiting::wait_for_answer_async;
use screenplay::{MemoryLogger, StaleHandle};

/// Order status that settles to "shipped" after a few reads.
struct OrderStatus {
    reads: Arc<AtomicU32>,
    settles_after: u32,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the order status")
    }
}

#[async_trait]
impl AsyncQuestion for OrderStatus {
    type Answer = String;

    async fn request_as(&self, _actor: &Actor) -> screenplay::Result<String> {
        tokio::time::sleep(Duration::from_millis(1)).await;
        let read = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
        if read < self.settles_after {
            Ok("pending".to_string())
        } else {
            Ok("shipped".to_string())
        }
    }
}

struct PlaceOrder {
    placed: Arc<AtomicU32>,
}

impl fmt::Display for PlaceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("place the order")
    }
}

#[async_trait]
impl AsyncTask for PlaceOrder {
    async fn perform_as(&self, _actor: &Actor) -> screenplay::Result<()> {
        self.placed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn async_task_then_wait_logs_in_order() -> Result<()> {
    let logger = Arc::new(MemoryLogger::new(Severity::Info));
    let actor = Actor::with_logger("Ollie", logger.clone());
    let placed = Arc::new(AtomicU32::new(0));
    let reads = Arc::new(AtomicU32::new(0));

    actor
        .attempts_to_async(&PlaceOrder {
            placed: placed.clone(),
        })
        .await?;
    let status = OrderStatus {
        reads: reads.clone(),
        settles_after: 3,
    };
    let answer = actor
        .asks_for_async(&Wait::until(status, is_equal_to("shipped")).for_up_to(5))
        .await?;

    assert_eq!(answer, "shipped");
    assert_eq!(placed.load(Ordering::SeqCst), 1);
    assert_eq!(reads.load(Ordering::SeqCst), 3);
    let messages = logger.messages();
    assert_eq!(messages[0], "Ollie attempts to place the order");
    assert_eq!(messages[1], "Ollie successfully completed place the order");
    assert!(messages.last().is_some_and(|line| line.ends_with("is \"shipped\"")));
    Ok(())
}

#[tokio::test]
async fn async_wait_times_out_with_last_answer() {
    let actor = Actor::new("Ollie").who_can(SetTimeouts::new(0, 1)).unwrap();
    let status = OrderStatus {
        reads: Arc::new(AtomicU32::new(0)),
        settles_after: u32::MAX,
    };
    let wait = Wait::until(status, is_equal_to("shipped"))
        .for_up_to(0)
        .polling_every(Duration::from_millis(50));

    let err = wait_for_answer_async(&actor, &wait).await.unwrap_err();

    assert!(err.is_waiting_failure());
    assert!(err.to_string().contains("for up to 1s"));
    assert!(err.to_string().contains("\"pending\""));
}

#[tokio::test]
async fn async_waits_share_the_runtime() -> Result<()> {
    let first = Actor::new("Ann");
    let second = Actor::new("Ben");
    let wait_for = |settles_after| {
        Wait::until(
            OrderStatus {
                reads: Arc::new(AtomicU32::new(0)),
                settles_after,
            },
            is_equal_to("shipped"),
        )
        .for_up_to(5)
    };
    let (a, b) = (wait_for(4), wait_for(2));

    let (left, right) = tokio::join!(first.asks_for_async(&a), second.asks_for_async(&b));

    assert_eq!(left?, "shipped");
    assert_eq!(right?, "shipped");
    Ok(())
}

#[tokio::test]
async fn async_retry_recovers_from_stale_handles() -> Result<()> {
    let actor = Actor::new("Ollie");
    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();

    let (total, retries) = Retry::on::<StaleHandle>()
        .max_attempts(5)
        .run_counted_async(&actor, "read the basket total", move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ScreenplayError::interaction(StaleHandle::new("basket")))
                } else {
                    Ok(120u32)
                }
            }
        })
        .await?;

    assert_eq!(total, 120);
    assert_eq!(retries, 2);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    Ok(())
}
