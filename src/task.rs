use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// Handle to a blocking call running on a worker thread, polled from the UI
/// loop. The closure result is delivered exactly once; completion requests a
/// repaint so the frame that consumes it is not delayed until the next input
/// event.
pub struct Task<T> {
    rx: Receiver<anyhow::Result<T>>,
}

impl<T: Send + 'static> Task<T> {
    pub fn spawn(
        ctx: &eframe::egui::Context,
        job: impl FnOnce() -> anyhow::Result<T> + Send + 'static,
    ) -> Self {
        let (tx, rx) = channel();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = job();
            let _ = tx.send(result);
            ctx.request_repaint();
        });
        Self { rx }
    }

    /// Take the result if the worker has finished. Returns `None` while the
    /// call is still in flight; a disconnected worker is reported as an error
    /// rather than silently pending forever.
    pub fn poll(&mut self) -> Option<anyhow::Result<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(anyhow::anyhow!("worker thread exited unexpectedly")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for<T: Send + 'static>(task: &mut Task<T>) -> anyhow::Result<T> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(result) = task.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "task did not finish in time");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn delivers_success_once() {
        let ctx = eframe::egui::Context::default();
        let mut task = Task::spawn(&ctx, || Ok(41 + 1));
        assert_eq!(wait_for(&mut task).unwrap(), 42);
    }

    #[test]
    fn delivers_error() {
        let ctx = eframe::egui::Context::default();
        let mut task: Task<()> = Task::spawn(&ctx, || anyhow::bail!("remote said no"));
        let err = wait_for(&mut task).unwrap_err();
        assert!(err.to_string().contains("remote said no"));
    }

    #[test]
    fn pending_until_job_completes() {
        let ctx = eframe::egui::Context::default();
        let mut task = Task::spawn(&ctx, || {
            std::thread::sleep(Duration::from_millis(100));
            Ok(())
        });
        assert!(task.poll().is_none());
        wait_for(&mut task).unwrap();
    }
}
