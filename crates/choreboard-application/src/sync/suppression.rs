//! The silence window.
//!
//! After a local mutation the board goes quiet for a while: background pulls
//! are skipped so a pending fire-and-forget write can land remotely before
//! the next read treats the remote as ground truth. The window must outlast
//! the poll interval, so every local edit swallows at least one pull.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Single-slot deadline window.
///
/// Each mutation replaces the previous expiry instead of stacking timers:
/// mutations at t=0 and t=10 with a 30-unit window keep pulls suppressed
/// until t=40, not t=30. While the deadline lies in the future the
/// reconciler must not touch the store.
#[derive(Debug)]
pub struct SuppressionWindow {
    window: Duration,
    deadline: Mutex<Option<Instant>>,
}

impl SuppressionWindow {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: Mutex::new(None),
        }
    }

    /// Arms the window, cancelling and replacing any previous deadline.
    pub fn extend(&self) {
        let mut deadline = self.deadline.lock().expect("suppression lock poisoned");
        *deadline = Some(Instant::now() + self.window);
    }

    /// True while the most recent deadline is still in the future.
    pub fn is_active(&self) -> bool {
        let deadline = self.deadline.lock().expect("suppression lock poisoned");
        deadline.map(|d| Instant::now() < d).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_window_is_inactive_until_armed() {
        let window = SuppressionWindow::new(Duration::from_secs(30));
        assert!(!window.is_active());

        window.extend();
        assert!(window.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_expires_after_its_duration() {
        let window = SuppressionWindow::new(Duration::from_secs(30));
        window.extend();

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(window.is_active());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!window.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_extension_rearms_the_deadline() {
        let window = SuppressionWindow::new(Duration::from_secs(30));

        // mutation at t=0
        window.extend();
        // mutation at t=10 replaces the deadline
        tokio::time::advance(Duration::from_secs(10)).await;
        window.extend();

        // t=35: past the first deadline, inside the second
        tokio::time::advance(Duration::from_secs(25)).await;
        assert!(window.is_active());

        // t=41: past t=40, the window is gone
        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(!window.is_active());
    }
}
