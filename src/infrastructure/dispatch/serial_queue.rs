//! Serial executor backed by a dedicated worker thread

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle, ThreadId};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use crate::application::ports::{Job, SerialExecutor};

enum Command {
    Run(Job),
    /// Acknowledged once every job posted before it has run
    Flush(Sender<()>),
}

/// FIFO job queue drained by one named thread.
///
/// Jobs run one at a time in submission order. A panicking job is logged
/// and does not take the worker down with it.
pub struct DispatchQueue {
    label: String,
    tx: Mutex<Option<Sender<Command>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
}

impl DispatchQueue {
    pub fn new(label: impl Into<String>) -> io::Result<Self> {
        let label = label.into();
        let (tx, rx) = crossbeam_channel::unbounded::<Command>();
        let worker = thread::Builder::new()
            .name(label.clone())
            .spawn(move || drain(rx))?;
        let worker_id = worker.thread().id();
        tracing::debug!(queue = %label, "dispatch queue started");

        Ok(Self {
            label,
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
            worker_id,
        })
    }

    fn send(&self, command: Command) -> bool {
        match self.tx.lock().as_ref() {
            Some(tx) => tx.send(command).is_ok(),
            None => false,
        }
    }
}

fn drain(rx: Receiver<Command>) {
    for command in rx {
        match command {
            Command::Run(job) => {
                if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    tracing::error!("job panicked on dispatch queue");
                }
            }
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

impl SerialExecutor for DispatchQueue {
    fn dispatch(&self, job: Job) {
        if !self.send(Command::Run(job)) {
            tracing::warn!(queue = %self.label, "job dropped, queue is shut down");
        }
    }

    fn flush(&self) {
        if self.is_current() {
            // waiting on ourselves would never return
            return;
        }
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if self.send(Command::Flush(ack_tx)) {
            let _ = ack_rx.recv();
        }
    }

    fn is_current(&self) -> bool {
        thread::current().id() == self.worker_id
    }
}

impl Drop for DispatchQueue {
    fn drop(&mut self) {
        // closing the channel lets the worker finish what is queued and exit
        self.tx.lock().take();
        let Some(worker) = self.worker.lock().take() else {
            return;
        };
        if self.is_current() {
            // the last job released the queue; the thread exits on its own
            return;
        }
        if worker.join().is_err() {
            tracing::error!(queue = %self.label, "dispatch worker panicked");
        }
    }
}
