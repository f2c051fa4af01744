//! Background worker threads
//!
//! Off-frame work (asset decoding, level generation) runs on a named OS
//! thread and reports back through a channel polled from the frame loop.
//! Spawning is the only fallible step; failure is returned to the caller
//! rather than logged, since a missing thread is not locally recoverable.

use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};

/// A background job with a message stream back to the frame loop
pub struct Worker<T> {
    receiver: Receiver<T>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Worker<T> {
    /// Spawn a named worker thread.
    ///
    /// The job receives the sending half of the channel and may send any
    /// number of messages before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to create the thread.
    pub fn spawn<F>(name: impl Into<String>, job: F) -> io::Result<Self>
    where
        F: FnOnce(Sender<T>) + Send + 'static,
    {
        let (sender, receiver) = unbounded();
        let handle = thread::Builder::new()
            .name(name.into())
            .spawn(move || job(sender))?;
        Ok(Self {
            receiver,
            handle: Some(handle),
        })
    }

    /// Take the next pending message, if any, without blocking
    pub fn try_recv(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Whether the worker thread has returned
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Wait for the worker thread to finish
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("worker thread panicked");
            }
        }
    }
}

impl<T> std::fmt::Debug for Worker<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("pending", &self.receiver.len())
            .field("finished", &self.handle.as_ref().is_none_or(|h| h.is_finished()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_streams_messages_back() {
        let worker = Worker::spawn("counter", |sender| {
            for i in 0..3 {
                sender.send(i).unwrap();
            }
        })
        .unwrap();

        let mut received = Vec::new();
        while received.len() < 3 {
            if let Some(value) = worker.try_recv() {
                received.push(value);
            }
        }
        worker.join();
        assert_eq!(received, vec![0, 1, 2]);
    }

    #[test]
    fn finished_worker_reports_done() {
        let worker: Worker<()> = Worker::spawn("noop", |_| {}).unwrap();
        worker.join();
    }
}
