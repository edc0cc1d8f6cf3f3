//! Debounced query evaluation.
//!
//! Query updates arrive at keystroke rate. A burst of updates collapses into
//! one evaluation of its final value once the input has been quiet for the
//! window, and a value equal to the last evaluated one is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Quiescence window of the interactive search box.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

type Evaluate = Arc<dyn Fn(String) + Send + Sync>;

enum Input {
    /// A keystroke-level update, subject to the window.
    Update(String),
    /// The caller already evaluated this value synchronously.
    Evaluated(String),
}

/// Handle to a debouncing worker task.
///
/// The worker lives until `cancel` fires or the handle is dropped. No
/// evaluation is delivered after cancellation.
pub struct SearchDebouncer {
    tx: mpsc::UnboundedSender<Input>,
    cancel: CancellationToken,
    evaluate: Evaluate,
}

impl SearchDebouncer {
    /// Spawns the worker on the current tokio runtime.
    pub fn spawn(
        window: Duration,
        cancel: CancellationToken,
        evaluate: impl Fn(String) + Send + Sync + 'static,
    ) -> Self {
        let evaluate: Evaluate = Arc::new(evaluate);
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(run(rx, window, cancel.clone(), evaluate.clone()));

        Self {
            tx,
            cancel,
            evaluate,
        }
    }

    /// Feeds one query update into the window.
    pub fn push(&self, query: impl Into<String>) {
        if self.cancel.is_cancelled() {
            return;
        }
        if self.tx.send(Input::Update(query.into())).is_err() {
            tracing::debug!("[SearchDebouncer] Worker gone, dropping update");
        }
    }

    /// Evaluates `query` right away, skipping the window.
    ///
    /// Any pending burst is discarded and `query` becomes the last evaluated
    /// value.
    pub fn trigger_now(&self, query: impl Into<String>) {
        if self.cancel.is_cancelled() {
            return;
        }
        let query = query.into();
        let _ = self.tx.send(Input::Evaluated(query.clone()));
        (self.evaluate)(query);
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled() || self.tx.is_closed()
    }
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<Input>,
    window: Duration,
    cancel: CancellationToken,
    evaluate: Evaluate,
) {
    let mut pending: Option<String> = None;
    let mut last_evaluated: Option<String> = None;

    loop {
        let input = if pending.is_some() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                input = rx.recv() => input,
                _ = tokio::time::sleep(window) => {
                    if let Some(query) = pending.take() {
                        if last_evaluated.as_deref() == Some(query.as_str()) {
                            tracing::trace!("[SearchDebouncer] Unchanged query, skipping");
                        } else if !cancel.is_cancelled() {
                            evaluate(query.clone());
                            last_evaluated = Some(query);
                        }
                    }
                    continue;
                }
            }
        } else {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                input = rx.recv() => input,
            }
        };

        match input {
            Some(Input::Update(query)) => pending = Some(query),
            Some(Input::Evaluated(query)) => {
                pending = None;
                last_evaluated = Some(query);
            }
            None => break,
        }
    }

    tracing::debug!("[SearchDebouncer] Worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |q: String| sink.lock().unwrap().push(q))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_final_value() {
        let (seen, sink) = recorder();
        let debouncer = SearchDebouncer::spawn(SEARCH_DEBOUNCE, CancellationToken::new(), sink);

        debouncer.push("p");
        tokio::time::advance(ms(100)).await;
        debouncer.push("pe");
        tokio::time::advance(ms(100)).await;
        debouncer.push("per");
        tokio::time::sleep(ms(350)).await;

        assert_eq!(*seen.lock().unwrap(), vec!["per".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_fires_inside_window() {
        let (seen, sink) = recorder();
        let debouncer = SearchDebouncer::spawn(SEARCH_DEBOUNCE, CancellationToken::new(), sink);

        debouncer.push("si");
        tokio::time::sleep(ms(200)).await;

        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_is_suppressed() {
        let (seen, sink) = recorder();
        let debouncer = SearchDebouncer::spawn(SEARCH_DEBOUNCE, CancellationToken::new(), sink);

        debouncer.push("per");
        tokio::time::sleep(ms(350)).await;
        debouncer.push("pe");
        debouncer.push("per");
        tokio::time::sleep(ms(350)).await;
        debouncer.push("siam");
        tokio::time::sleep(ms(350)).await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["per".to_string(), "siam".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_now_bypasses_window_and_drops_pending() {
        let (seen, sink) = recorder();
        let debouncer = SearchDebouncer::spawn(SEARCH_DEBOUNCE, CancellationToken::new(), sink);

        debouncer.push("pe");
        debouncer.trigger_now("per");
        assert_eq!(*seen.lock().unwrap(), vec!["per".to_string()]);

        tokio::time::sleep(ms(350)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["per".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_pending_evaluation() {
        let (seen, sink) = recorder();
        let cancel = CancellationToken::new();
        let debouncer = SearchDebouncer::spawn(SEARCH_DEBOUNCE, cancel.clone(), sink);

        debouncer.push("bengal");
        tokio::time::advance(ms(100)).await;
        cancel.cancel();
        tokio::time::sleep(ms(350)).await;

        debouncer.trigger_now("sphynx");
        assert!(seen.lock().unwrap().is_empty());
        assert!(debouncer.is_stopped());
    }
}
