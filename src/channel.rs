//! Bounded, sealable result channel.
//!
//! Producers push results until the channel is sealed; the consumer receives
//! until the channel is both sealed and empty. Sealing is explicit so an empty
//! channel that may still receive items is distinguishable from an exhausted
//! one.

use crate::error::{OlsError, Result};
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

#[derive(Debug)]
struct State<T> {
    queue: VecDeque<T>,
    sealed: bool,
}

/// Thread-safe bounded FIFO queue with an explicit sealed flag.
#[derive(Debug)]
pub struct ResultChannel<T> {
    state: Mutex<State<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> ResultChannel<T> {
    /// Create a channel that buffers up to `capacity` items (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(State {
                queue: VecDeque::with_capacity(capacity),
                sealed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    // A panicking producer cannot leave the queue half-updated, so a poisoned
    // lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Push an item, blocking while the channel is full.
    ///
    /// Fails with [`OlsError::ChannelSealed`] once the channel has been sealed.
    pub fn push(&self, item: T) -> Result<()> {
        let mut state = self.lock();
        while !state.sealed && state.queue.len() >= self.capacity {
            state = self.not_full.wait(state).unwrap_or_else(|e| e.into_inner());
        }
        if state.sealed {
            return Err(OlsError::ChannelSealed);
        }
        state.queue.push_back(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Seal the channel. No further pushes are accepted. Idempotent.
    pub fn seal(&self) {
        let mut state = self.lock();
        state.sealed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Receive the next item, blocking until one is available.
    ///
    /// Returns `None` once the channel is sealed and drained.
    pub fn recv(&self) -> Option<T> {
        let mut state = self.lock();
        loop {
            if let Some(item) = state.queue.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }
            if state.sealed {
                return None;
            }
            state = self.not_empty.wait(state).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Receive without blocking. `None` means nothing is buffered right now.
    pub fn try_recv(&self) -> Option<T> {
        let mut state = self.lock();
        let item = state.queue.pop_front();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    pub fn is_sealed(&self) -> bool {
        self.lock().sealed
    }

    /// Sealed with nothing left to receive.
    pub fn is_exhausted(&self) -> bool {
        let state = self.lock();
        state.sealed && state.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Blocking iterator that ends when the channel is sealed and drained.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { channel: self }
    }
}

/// Draining iterator over a [`ResultChannel`].
pub struct Iter<'a, T> {
    channel: &'a ResultChannel<T>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.channel.recv()
    }
}

impl<'a, T> IntoIterator for &'a ResultChannel<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
