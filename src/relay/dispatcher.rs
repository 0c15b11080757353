//! Forwarding worker pool.
//!
//! A fixed set of threads pulls payloads off a bounded queue and runs
//! [`process`](super::process) on each. Submitting never blocks the caller; a
//! full queue rejects the payload instead. [`Dispatcher::shutdown`] closes the
//! queue and waits for the workers to drain whatever was already accepted.

use super::forwarder::Forwarder;
use super::{process, RelayError};
use crate::domain::NormalizeOptions;
use std::io;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("dispatcher needs at least one worker")]
    NoWorkers,

    #[error("failed to spawn forward worker: {0}")]
    Spawn(#[from] io::Error),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("forward queue is full")]
    QueueFull,

    #[error("dispatcher is shut down")]
    ShutDown,
}

pub struct Dispatcher {
    sender: Mutex<Option<SyncSender<Vec<u8>>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Dispatcher {
    /// Spawns `worker_count` threads sharing one queue of `capacity` payloads.
    ///
    /// Fails unless every worker starts; workers already spawned exit once the
    /// queue is dropped.
    pub fn start(
        worker_count: usize,
        capacity: usize,
        options: NormalizeOptions,
        forwarder: Arc<dyn Forwarder>,
    ) -> Result<Self, StartError> {
        if worker_count == 0 {
            return Err(StartError::NoWorkers);
        }

        let (sender, receiver) = mpsc::sync_channel::<Vec<u8>>(capacity);
        let receiver = Arc::new(Mutex::new(receiver));
        let options = Arc::new(options);

        let workers = (0..worker_count)
            .map(|worker_id| {
                let receiver = receiver.clone();
                let options = options.clone();
                let forwarder = forwarder.clone();
                std::thread::Builder::new()
                    .name(format!("forward-{worker_id}"))
                    .spawn(move || worker_loop(worker_id, receiver, options, forwarder))
            })
            .collect::<io::Result<Vec<_>>>()?;

        tracing::info!(workers = workers.len(), capacity, "Forward dispatcher started");

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(workers),
        })
    }

    /// Queue a payload for forwarding without waiting for the outcome.
    pub fn submit(&self, payload: Vec<u8>) -> Result<(), SubmitError> {
        let guard = self
            .sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let sender = guard.as_ref().ok_or(SubmitError::ShutDown)?;

        match sender.try_send(payload) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SubmitError::QueueFull),
            Err(TrySendError::Disconnected(_)) => Err(SubmitError::ShutDown),
        }
    }

    /// Stop accepting payloads and block until every queued one is processed.
    /// Calling it again is a no-op.
    pub fn shutdown(&self) {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        if sender.is_none() {
            return;
        }
        drop(sender);

        let workers = std::mem::take(
            &mut *self
                .workers
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );

        tracing::info!(workers = workers.len(), "Draining forward queue");
        for handle in workers {
            if handle.join().is_err() {
                tracing::error!("Forward worker panicked");
            }
        }
        tracing::info!("Forward dispatcher stopped");
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(
    worker_id: usize,
    receiver: Arc<Mutex<Receiver<Vec<u8>>>>,
    options: Arc<NormalizeOptions>,
    forwarder: Arc<dyn Forwarder>,
) {
    tracing::debug!(worker_id, "Forward worker started");

    loop {
        // Lock only while waiting; the job itself runs unlocked.
        let next = receiver
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .recv();

        let payload = match next {
            Ok(payload) => payload,
            // Sender dropped and queue empty.
            Err(_) => break,
        };

        match process(&payload, &options, forwarder.as_ref()) {
            Ok(status) => tracing::info!(worker_id, status, "Response status"),
            Err(RelayError::Transform(e)) => {
                tracing::warn!(worker_id, error = %e, "Dropping listing")
            }
            Err(RelayError::Forward(e)) => tracing::error!(worker_id, error = %e, "Forward failed"),
        }
    }

    tracing::debug!(worker_id, "Forward worker stopped");
}
