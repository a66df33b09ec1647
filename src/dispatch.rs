//! Callback delivery on a single serial context.
//!
//! Every operation in this crate is an `async fn` resolving to a
//! [`Result`]. Callers that prefer completion callbacks hand the future to a
//! [`CallbackQueue`]: the future runs on the runtime, and its callback is
//! queued onto one dedicated task, so callbacks never run concurrently with
//! each other no matter where the I/O happened.

use std::future::Future;

use log::warn;
use tokio::sync::mpsc::{self, UnboundedSender, error::SendError};

use crate::error::Result;

type Completion = Box<dyn FnOnce() + Send>;

#[derive(Clone)]
pub struct CallbackQueue {
    sender: UnboundedSender<Completion>,
}

impl CallbackQueue {
    /// Starts the delivery task. Must be called from within a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Completion>();

        tokio::spawn(async move {
            while let Some(completion) = receiver.recv().await {
                completion();
            }
        });

        Self { sender }
    }

    /// Runs `future` and queues `callback` with its result.
    ///
    /// The callback is invoked exactly once, with either the value or the
    /// error.
    pub fn deliver<T, Fut, F>(&self, future: Fut, callback: F)
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        F: FnOnce(Result<T>) + Send + 'static,
    {
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let result = future.await;
            if let Err(SendError(completion)) = sender.send(Box::new(move || callback(result))) {
                warn!("callback queue is closed, running completion inline");
                completion();
            }
        });
    }
}

impl Default for CallbackQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use tokio::sync::oneshot;

    use super::*;
    use crate::error::{Error, ErrorKind};

    #[tokio::test]
    async fn delivers_value_once() {
        let queue = CallbackQueue::new();
        let (tx, rx) = oneshot::channel();

        queue.deliver(async { Ok(42) }, move |result| {
            let _ = tx.send(result);
        });

        assert_eq!(rx.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn delivers_error_once() {
        let queue = CallbackQueue::new();
        let (tx, rx) = oneshot::channel();

        queue.deliver(
            async { Err::<(), _>(Error::transport("connection refused")) },
            move |result| {
                let _ = tx.send(result);
            },
        );

        let err = rx.await.unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn callbacks_run_one_at_a_time() {
        let queue = CallbackQueue::new();
        let running = Arc::new(AtomicUsize::new(0));
        let overlap = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel();

        for i in 0..16 {
            let running = running.clone();
            let overlap = overlap.clone();
            let tx = tx.clone();
            queue.deliver(async move { Ok(i) }, move |_| {
                if running.fetch_add(1, Ordering::SeqCst) > 0 {
                    overlap.fetch_add(1, Ordering::SeqCst);
                }
                std::thread::sleep(std::time::Duration::from_millis(1));
                running.fetch_sub(1, Ordering::SeqCst);
                let _ = tx.send(());
            });
        }

        for _ in 0..16 {
            rx.recv().await.unwrap();
        }
        assert_eq!(overlap.load(Ordering::SeqCst), 0);
    }
}
