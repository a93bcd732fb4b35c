use crate::engine::command::Command;
use crate::{Result, TallyError};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

/// Bounded command queue with join semantics
///
/// The queue tracks an `outstanding` count alongside the pending commands:
/// it is incremented under the same lock that enqueues a command and only
/// decremented by [`TaskQueue::mark_done`] after that command's processing
/// finished. Completion (`outstanding == 0`) therefore can never be observed
/// while a command is queued, in flight, or mid-enqueue — including
/// follow-up commands a handler enqueues before its own `mark_done`.
///
/// Capacity is a hard limit. A full queue rejects the submission instead of
/// blocking or dropping; the caller treats that as a configuration error.
#[derive(Debug)]
pub struct TaskQueue {
    inner: Mutex<Inner>,
    capacity: usize,
    // Woken once per submitted command.
    available: Notify,
    // Woken when outstanding reaches zero.
    idle: Notify,
}

#[derive(Debug)]
struct Inner {
    pending: VecDeque<Command>,
    outstanding: usize,
}

impl TaskQueue {
    /// Creates a queue with an explicit capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                pending: VecDeque::with_capacity(capacity),
                outstanding: 0,
            }),
            capacity,
            available: Notify::new(),
            idle: Notify::new(),
        }
    }

    /// Creates a queue sized for a worker pool
    ///
    /// Handlers routinely enqueue a full page of follow-ups per command, so
    /// the capacity scales with the pool and never drops below the floor.
    pub fn for_pool(workers: u32, floor: u32) -> Self {
        let capacity = (workers as usize * 2 + 10).max(floor as usize);
        Self::with_capacity(capacity)
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Enqueues a command, or rejects it when the queue is at capacity
    ///
    /// A rejection means the queue is undersized for the pacing in use; it
    /// is reported to the caller, never silently retried.
    pub fn submit(&self, cmd: Command) -> Result<()> {
        {
            let mut inner = self.inner.lock().expect("task queue lock poisoned");
            if inner.pending.len() >= self.capacity {
                return Err(TallyError::QueueFull {
                    capacity: self.capacity,
                });
            }
            inner.pending.push_back(cmd);
            inner.outstanding += 1;
        }
        self.available.notify_one();
        Ok(())
    }

    /// Dequeues the next command, waiting until one is available
    ///
    /// Every `take` must be paired with exactly one [`TaskQueue::mark_done`]
    /// once processing finishes, success or error.
    pub async fn take(&self) -> Command {
        loop {
            // Register interest before checking, so a submit racing with the
            // check leaves a wakeup permit instead of being missed.
            let notified = self.available.notified();

            if let Some(cmd) = self
                .inner
                .lock()
                .expect("task queue lock poisoned")
                .pending
                .pop_front()
            {
                return cmd;
            }

            notified.await;
        }
    }

    /// Records that a taken command finished processing
    pub fn mark_done(&self) {
        let outstanding = {
            let mut inner = self.inner.lock().expect("task queue lock poisoned");
            assert!(
                inner.outstanding > 0,
                "mark_done called without a matching take"
            );
            inner.outstanding -= 1;
            inner.outstanding
        };

        if outstanding == 0 {
            self.idle.notify_waiters();
        }
    }

    /// Waits until every submitted command, including follow-ups spawned by
    /// other commands, has been fully processed
    pub async fn await_completion(&self) {
        loop {
            let notified = self.idle.notified();

            if self
                .inner
                .lock()
                .expect("task queue lock poisoned")
                .outstanding
                == 0
            {
                return;
            }

            notified.await;
        }
    }

    /// Commands submitted but not yet fully processed
    pub fn outstanding(&self) -> usize {
        self.inner
            .lock()
            .expect("task queue lock poisoned")
            .outstanding
    }

    /// Commands waiting to be taken
    pub fn pending(&self) -> usize {
        self.inner
            .lock()
            .expect("task queue lock poisoned")
            .pending
            .len()
    }
}
