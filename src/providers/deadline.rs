use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Race a call against a timer; whichever settles first decides the outcome.
/// The losing call is detached, not aborted: a late completion is simply
/// never observed.
pub async fn race_with_deadline<F, T>(call: F, deadline: Duration) -> Option<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let mut call = tokio::spawn(call);
    tokio::select! {
        finished = &mut call => finished.ok(),
        _ = sleep(deadline) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::race_with_deadline;
    use std::time::Duration;

    #[tokio::test]
    async fn fast_call_wins() {
        let result = race_with_deadline(async { 7 }, Duration::from_secs(1)).await;
        assert_eq!(result, Some(7));
    }

    #[tokio::test]
    async fn timer_wins_over_a_stalled_call() {
        let result: Option<u8> =
            race_with_deadline(std::future::pending(), Duration::from_millis(10)).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn late_completion_still_runs_detached() {
        let (sender, receiver) = tokio::sync::oneshot::channel();
        let result = race_with_deadline(
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let _ = sender.send("late");
                "late"
            },
            Duration::from_millis(5),
        )
        .await;
        assert_eq!(result, None);
        // The abandoned call keeps running and completes on its own.
        assert_eq!(receiver.await, Ok("late"));
    }
}
