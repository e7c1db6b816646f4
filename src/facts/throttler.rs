use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Limits how many requests may be in flight at once.
///
/// Wrap in an `Arc` via [`Throttler::new`], then call [`Throttler::acquire`] before
/// each request. At most `max_concurrent` permits are held simultaneously. A permit
/// is returned to the pool when it is dropped, so every exit path of the guarded
/// section releases it exactly once.
#[derive(Debug)]
pub struct Throttler {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl Throttler {
    /// Create a new throttler that allows at most `max_concurrent` requests at a time.
    ///
    /// A capacity of zero would block every caller forever, so it is raised to one.
    pub fn new(max_concurrent: usize) -> Arc<Self> {
        let capacity = max_concurrent.max(1);
        Arc::new(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Wait for a free slot.
    ///
    /// The returned permit must be held for the duration of the request. When it
    /// is dropped, the slot becomes available for another caller.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .expect("semaphore is never closed")
    }

    /// Maximum number of permits this throttler hands out.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of permits currently held.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.capacity - self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use core::time::Duration;

    #[tokio::test]
    async fn limits_concurrency() {
        let throttler = Throttler::new(2);
        let active = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let throttler = Arc::clone(&throttler);
                let active = Arc::clone(&active);
                let max_seen = Arc::clone(&max_seen);
                tokio::spawn(async move {
                    let _permit = throttler.acquire().await;
                    let current = active.fetch_add(1, Ordering::SeqCst) + 1;
                    _ = max_seen.fetch_max(current, Ordering::SeqCst);
                    assert!(throttler.in_flight() <= 2);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    _ = active.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for result in futures_util::future::join_all(tasks).await {
            result.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 2);
        assert_eq!(throttler.in_flight(), 0);
    }

    #[tokio::test]
    async fn permit_released_on_error_path() {
        async fn guarded(throttler: &Throttler) -> Result<(), &'static str> {
            let _permit = throttler.acquire().await;
            Err("request failed")
        }

        let throttler = Throttler::new(1);
        assert!(guarded(&throttler).await.is_err());
        assert_eq!(throttler.in_flight(), 0);

        // The single slot must still be available after the failure
        let permit = tokio::time::timeout(Duration::from_secs(1), throttler.acquire()).await;
        assert!(permit.is_ok());
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let throttler = Throttler::new(0);
        assert_eq!(throttler.capacity(), 1);
        assert_eq!(throttler.in_flight(), 0);
    }
}
