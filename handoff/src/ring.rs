//! Ring-buffered channel with a fixed capacity.
//!
//! [`Ring`] decouples producer and consumer with a circular buffer of
//! `capacity` slots. Writes park only when the buffer is full, reads
//! only when it is empty, and [`close`](Ring::close) lets readers drain
//! whatever is buffered before they observe closure.
//!
//! Readiness is capacity-based:
//!
//! ```text
//! readable: closed OR len > 0
//! writable: closed OR len < capacity
//! ```
//!
//! A closed channel is trivially "ready" on both sides, so parked
//! threads wake and fail fast instead of sleeping forever.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use handoff::{ReadStatus, Ring};
//!
//! let ring = Arc::new(Ring::with_capacity(4).unwrap());
//! let consumer = Arc::clone(&ring);
//!
//! let handle = thread::spawn(move || {
//!     let mut sum = 0;
//!     while let ReadStatus::Success(v) = consumer.read() {
//!         sum += v;
//!     }
//!     sum
//! });
//!
//! for i in 1..=10 {
//!     ring.write(i).unwrap();
//! }
//! ring.close();
//!
//! assert_eq!(handle.join().unwrap(), 55);
//! ```

use core::fmt;
use std::iter;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::status::{CapacityError, ReadStatus, WriteError, WriteStatus};

/// Guarded channel state: circular storage plus cursors and the open
/// flag. `len` counts the buffered values; `head` and `tail` advance
/// modulo capacity.
struct Inner<T> {
    slots: Box<[Option<T>]>,
    /// Next position to read from.
    head: usize,
    /// Next position to write to.
    tail: usize,
    len: usize,
    open: bool,
}

impl<T> Inner<T> {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Ready for a reader: something buffered, or closed.
    fn can_read(&self) -> bool {
        !self.open || self.len > 0
    }

    /// Ready for a writer: space left, or closed.
    fn can_write(&self) -> bool {
        !self.open || self.len < self.capacity()
    }

    /// Takes the oldest buffered value. `None` only when nothing is
    /// buffered, which after a readiness wait means the channel closed.
    fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        value
    }

    /// Stores `value` at the write cursor. The caller must have
    /// established `len < capacity`.
    fn push(&mut self, value: T) {
        self.slots[self.tail] = Some(value);
        self.tail = (self.tail + 1) % self.capacity();
        self.len += 1;
    }
}

/// A ring-buffered channel.
///
/// Up to `capacity` values can be pending at once, delivered strictly in
/// write order. All operations take `&self`; share the channel across
/// threads with [`Arc`](std::sync::Arc).
///
/// # Example
///
/// ```
/// use handoff::{ReadStatus, Ring};
///
/// let ring = Ring::with_capacity(2).unwrap();
/// ring.write('a').unwrap();
/// ring.write('b').unwrap();
///
/// assert_eq!(ring.read(), ReadStatus::Success('a'));
/// assert_eq!(ring.read(), ReadStatus::Success('b'));
/// ```
pub struct Ring<T> {
    inner: Mutex<Inner<T>>,
    /// Readers park here until a value is buffered or the channel closes.
    readable: Condvar,
    /// Writers park here until space frees up or the channel closes.
    writable: Condvar,
}

impl<T> Ring<T> {
    /// Creates an open, empty channel holding up to `capacity` values.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `capacity` is zero; a channel that
    /// can hold nothing cannot transfer anything.
    ///
    /// # Example
    ///
    /// ```
    /// use handoff::Ring;
    ///
    /// let ring = Ring::<u32>::with_capacity(8).unwrap();
    /// assert_eq!(ring.capacity(), 8);
    ///
    /// assert!(Ring::<u32>::with_capacity(0).is_err());
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError);
        }

        Ok(Self {
            inner: Mutex::new(Inner {
                slots: iter::repeat_with(|| None).take(capacity).collect(),
                head: 0,
                tail: 0,
                len: 0,
                open: true,
            }),
            readable: Condvar::new(),
            writable: Condvar::new(),
        })
    }

    /// Receives the oldest buffered value, parking until one arrives or
    /// the channel closes.
    ///
    /// Buffered values written before [`close`](Ring::close) are still
    /// delivered; [`ReadStatus::Closed`] is only reported once the
    /// buffer is drained.
    pub fn read(&self) -> ReadStatus<T> {
        let mut inner = self.inner.lock();
        self.readable.wait_while(&mut inner, |b| !b.can_read());
        self.consume(inner)
    }

    /// Like [`read`](Ring::read), but gives up after `timeout`.
    ///
    /// On expiry the call returns [`ReadStatus::Timeout`] without
    /// consuming anything or changing channel state, so retrying is
    /// always safe. A buffered value is delivered even with a zero
    /// timeout.
    pub fn read_for(&self, timeout: Duration) -> ReadStatus<T> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.read_until(deadline),
            None => self.read(),
        }
    }

    /// Like [`read`](Ring::read), but gives up at `deadline`.
    pub fn read_until(&self, deadline: Instant) -> ReadStatus<T> {
        let mut inner = self.inner.lock();
        let timed_out = self
            .readable
            .wait_while_until(&mut inner, |b| !b.can_read(), deadline)
            .timed_out();
        if timed_out && !inner.can_read() {
            return ReadStatus::Timeout;
        }
        self.consume(inner)
    }

    /// Sends a value, parking while the buffer is full.
    ///
    /// Fails with [`WriteError`] carrying the value back if the channel
    /// is closed, regardless of how much space is free.
    ///
    /// # Example
    ///
    /// ```
    /// use handoff::Ring;
    ///
    /// let ring = Ring::with_capacity(4).unwrap();
    /// ring.close();
    ///
    /// assert!(ring.write(1).is_err());
    /// ```
    pub fn write(&self, value: T) -> Result<WriteStatus<T>, WriteError<T>> {
        let mut inner = self.inner.lock();
        self.writable.wait_while(&mut inner, |b| !b.can_write());
        self.store(inner, value)?;
        Ok(WriteStatus::Success)
    }

    /// Like [`write`](Ring::write), but gives up after `timeout`.
    ///
    /// On expiry the call returns [`WriteStatus::Timeout`] carrying the
    /// value back, leaving the buffer untouched so the write can be
    /// retried. A closed channel fails with [`WriteError`] even when the
    /// timeout has already expired.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use handoff::{Ring, WriteStatus};
    ///
    /// let ring = Ring::with_capacity(1).unwrap();
    /// ring.write(1).unwrap();
    ///
    /// // Full: the value comes back for a later retry.
    /// let status = ring.write_for(2, Duration::from_millis(10)).unwrap();
    /// assert_eq!(status, WriteStatus::Timeout(2));
    /// ```
    pub fn write_for(&self, value: T, timeout: Duration) -> Result<WriteStatus<T>, WriteError<T>> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.write_until(value, deadline),
            None => self.write(value),
        }
    }

    /// Like [`write`](Ring::write), but gives up at `deadline`.
    pub fn write_until(
        &self,
        value: T,
        deadline: Instant,
    ) -> Result<WriteStatus<T>, WriteError<T>> {
        let mut inner = self.inner.lock();
        let timed_out = self
            .writable
            .wait_while_until(&mut inner, |b| !b.can_write(), deadline)
            .timed_out();
        if timed_out && !inner.can_write() {
            return Ok(WriteStatus::Timeout(value));
        }
        self.store(inner, value)?;
        Ok(WriteStatus::Success)
    }

    /// Closes the channel and wakes every parked reader and writer.
    ///
    /// Buffered values are not discarded: readers keep draining them and
    /// observe [`ReadStatus::Closed`] only once the buffer is empty.
    /// Writes fail with [`WriteError`] from the moment close is called.
    /// Closing an already closed channel has no further effect.
    ///
    /// # Example
    ///
    /// ```
    /// use handoff::{ReadStatus, Ring};
    ///
    /// let ring = Ring::with_capacity(4).unwrap();
    /// ring.write(1).unwrap();
    /// ring.write(2).unwrap();
    /// ring.close();
    ///
    /// assert_eq!(ring.read(), ReadStatus::Success(1));
    /// assert_eq!(ring.read(), ReadStatus::Success(2));
    /// assert_eq!(ring.read(), ReadStatus::Closed);
    /// ```
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.open = false;
        drop(inner);
        self.writable.notify_all();
        self.readable.notify_all();
    }

    /// Returns the fixed capacity the channel was created with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns the number of values currently buffered.
    ///
    /// A snapshot: it may be stale by the time the caller acts on it.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.lock().len
    }

    /// Returns `true` if no values are currently buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` once [`close`](Ring::close) has been called.
    ///
    /// Buffered values may still be readable when this reports `true`.
    #[inline]
    pub fn is_closed(&self) -> bool {
        !self.inner.lock().open
    }

    /// Takes the oldest value after a readiness wait. An empty buffer
    /// here means the channel is closed and drained.
    fn consume(&self, mut inner: MutexGuard<'_, Inner<T>>) -> ReadStatus<T> {
        match inner.pop() {
            Some(value) => {
                drop(inner);
                self.writable.notify_one();
                ReadStatus::Success(value)
            }
            None => {
                // Drained and closed. Wake the other readers so closure
                // reaches every parked thread.
                drop(inner);
                self.readable.notify_all();
                ReadStatus::Closed
            }
        }
    }

    /// Stores a value after a readiness wait, or refuses it if the
    /// channel is closed.
    fn store(&self, mut inner: MutexGuard<'_, Inner<T>>, value: T) -> Result<(), WriteError<T>> {
        if !inner.open {
            return Err(WriteError(value));
        }
        inner.push(value);
        drop(inner);
        self.readable.notify_one();
        Ok(())
    }
}

impl<T> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Ring");
        match self.inner.try_lock() {
            Some(inner) => s
                .field("capacity", &inner.capacity())
                .field("len", &inner.len)
                .field("open", &inner.open)
                .finish_non_exhaustive(),
            None => s.field("state", &"<locked>").finish_non_exhaustive(),
        }
    }
}
