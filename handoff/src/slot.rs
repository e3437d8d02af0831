//! Single-slot channel with strict write/read alternation.
//!
//! [`Slot`] holds at most one value at a time. Each write parks the
//! caller until the previous value has been consumed, and each read parks
//! until a value arrives, so producer and consumer proceed in lockstep:
//! write, read, write, read. There is no buffering beyond the single slot
//! and no way to overwrite a pending value.
//!
//! # States
//!
//! The channel moves through four states:
//!
//! ```text
//!              write                 read
//!   Writable ─────────► Readable ─────────► Writable    (steady state)
//!
//!   Writable ──close──► Closed
//!   Readable ──close──► Closing ──read──► Closed
//! ```
//!
//! `Closing` exists so that a value written before [`close`](Slot::close)
//! is still delivered: the next read takes it and lands in `Closed`.
//! Writes are refused from the moment close is called.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use handoff::{ReadStatus, Slot};
//!
//! let slot = Arc::new(Slot::new());
//! let reader = Arc::clone(&slot);
//!
//! let handle = thread::spawn(move || {
//!     let mut seen = Vec::new();
//!     while let ReadStatus::Success(v) = reader.read() {
//!         seen.push(v);
//!     }
//!     seen
//! });
//!
//! for i in 0..3 {
//!     slot.write(i).unwrap();
//! }
//! slot.close();
//!
//! assert_eq!(handle.join().unwrap(), vec![0, 1, 2]);
//! ```
//!
//! # When to Use This
//!
//! Use [`Slot`] when:
//! - exactly one value may be in flight at a time
//! - the producer must not run ahead of the consumer
//! - you want rendezvous-like hand-off with room to park one value
//!
//! Consider [`Ring`](crate::Ring) when the producer should be able to get
//! several values ahead of the consumer.

use core::fmt;
use core::mem;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::status::{ReadStatus, WriteError, WriteStatus};

/// Internal state machine. The pending value lives inside the variants,
/// so a value can exist only while the state says one is pending.
enum State<T> {
    /// Empty, accepting a write.
    Writable,
    /// Holding a value, accepting a read.
    Readable(T),
    /// Closed with one undelivered value left.
    Closing(T),
    /// Closed and drained. Terminal.
    Closed,
}

impl<T> State<T> {
    /// A reader can make progress in every state except `Writable`.
    fn can_read(&self) -> bool {
        !matches!(self, State::Writable)
    }

    /// A writer can make progress in every state except `Readable`.
    /// Progress on a closed channel means failing fast.
    fn can_write(&self) -> bool {
        !matches!(self, State::Readable(_))
    }

    /// Advances to the closed form of the current state, keeping a
    /// pending value around for one final read. Idempotent.
    fn close(&mut self) {
        *self = match mem::replace(self, State::Closed) {
            State::Readable(value) | State::Closing(value) => State::Closing(value),
            State::Writable | State::Closed => State::Closed,
        };
    }

    fn name(&self) -> &'static str {
        match self {
            State::Writable => "writable",
            State::Readable(_) => "readable",
            State::Closing(_) => "closing",
            State::Closed => "closed",
        }
    }
}

/// A single-slot channel.
///
/// Holds at most one pending value. Writes park until the slot is empty,
/// reads park until it is full. All operations take `&self`; share the
/// channel across threads with [`Arc`](std::sync::Arc).
///
/// # Example
///
/// ```
/// use handoff::{ReadStatus, Slot};
///
/// let slot = Slot::new();
/// slot.write("ready").unwrap();
///
/// assert_eq!(slot.read(), ReadStatus::Success("ready"));
/// ```
pub struct Slot<T> {
    state: Mutex<State<T>>,
    /// Readers park here until the slot holds a value or closes.
    readable: Condvar,
    /// Writers park here until the slot empties or closes.
    writable: Condvar,
}

impl<T> Slot<T> {
    /// Creates an open, empty slot.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Writable),
            readable: Condvar::new(),
            writable: Condvar::new(),
        }
    }

    /// Receives the next value, parking until one arrives or the channel
    /// closes.
    ///
    /// Returns [`ReadStatus::Success`] with the value, or
    /// [`ReadStatus::Closed`] once the channel is closed and drained. An
    /// untimed read never returns [`ReadStatus::Timeout`].
    ///
    /// A value written before [`close`](Slot::close) is still delivered;
    /// closure is only observed after it.
    ///
    /// # Example
    ///
    /// ```
    /// use handoff::{ReadStatus, Slot};
    ///
    /// let slot: Slot<i32> = Slot::new();
    /// slot.close();
    ///
    /// assert_eq!(slot.read(), ReadStatus::Closed);
    /// ```
    pub fn read(&self) -> ReadStatus<T> {
        let mut state = self.state.lock();
        self.readable.wait_while(&mut state, |s| !s.can_read());
        self.consume(state)
    }

    /// Like [`read`](Slot::read), but gives up after `timeout`.
    ///
    /// On expiry the call returns [`ReadStatus::Timeout`] without
    /// consuming anything or changing channel state, so retrying is
    /// always safe. The outcome is decided by the slot, not the clock: a
    /// value that is already present is delivered even with a zero
    /// timeout.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use handoff::{ReadStatus, Slot};
    ///
    /// let slot: Slot<i32> = Slot::new();
    ///
    /// assert_eq!(slot.read_for(Duration::from_millis(10)), ReadStatus::Timeout);
    /// ```
    pub fn read_for(&self, timeout: Duration) -> ReadStatus<T> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.read_until(deadline),
            // Deadline past representable time: wait unbounded.
            None => self.read(),
        }
    }

    /// Like [`read`](Slot::read), but gives up at `deadline`.
    ///
    /// See [`read_for`](Slot::read_for) for the timeout contract.
    pub fn read_until(&self, deadline: Instant) -> ReadStatus<T> {
        let mut state = self.state.lock();
        let timed_out = self
            .readable
            .wait_while_until(&mut state, |s| !s.can_read(), deadline)
            .timed_out();
        if timed_out && !state.can_read() {
            return ReadStatus::Timeout;
        }
        self.consume(state)
    }

    /// Sends a value, parking until the slot is empty.
    ///
    /// Returns `Ok(`[`WriteStatus::Success`]`)` once the value is stored.
    /// Fails with [`WriteError`] carrying the value back if the channel
    /// is closed. An untimed write never returns
    /// [`WriteStatus::Timeout`].
    ///
    /// # Example
    ///
    /// ```
    /// use handoff::Slot;
    ///
    /// let slot = Slot::new();
    /// assert!(slot.write(1).is_ok());
    /// // A second write would park here until the value is read.
    ///
    /// slot.read();
    /// slot.close();
    /// assert!(slot.write(2).is_err());
    /// ```
    pub fn write(&self, value: T) -> Result<WriteStatus<T>, WriteError<T>> {
        let mut state = self.state.lock();
        self.writable.wait_while(&mut state, |s| !s.can_write());
        self.store(state, value)?;
        Ok(WriteStatus::Success)
    }

    /// Like [`write`](Slot::write), but gives up after `timeout`.
    ///
    /// On expiry the call returns [`WriteStatus::Timeout`] carrying the
    /// value back, leaving channel state untouched so the write can be
    /// retried. A closed channel fails with [`WriteError`] even when the
    /// timeout has already expired.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use handoff::{Slot, WriteStatus};
    ///
    /// let slot = Slot::new();
    /// slot.write(1).unwrap();
    ///
    /// // The first value is still unread, so this write times out.
    /// let status = slot.write_for(2, Duration::from_millis(10)).unwrap();
    /// assert_eq!(status, WriteStatus::Timeout(2));
    /// ```
    pub fn write_for(&self, value: T, timeout: Duration) -> Result<WriteStatus<T>, WriteError<T>> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.write_until(value, deadline),
            None => self.write(value),
        }
    }

    /// Like [`write`](Slot::write), but gives up at `deadline`.
    ///
    /// See [`write_for`](Slot::write_for) for the timeout contract.
    pub fn write_until(
        &self,
        value: T,
        deadline: Instant,
    ) -> Result<WriteStatus<T>, WriteError<T>> {
        let mut state = self.state.lock();
        let timed_out = self
            .writable
            .wait_while_until(&mut state, |s| !s.can_write(), deadline)
            .timed_out();
        if timed_out && !state.can_write() {
            return Ok(WriteStatus::Timeout(value));
        }
        self.store(state, value)?;
        Ok(WriteStatus::Success)
    }

    /// Closes the channel and wakes every parked reader and writer.
    ///
    /// A pending value survives closure and is delivered to exactly one
    /// final read; after that (or immediately, if the slot was empty)
    /// reads return [`ReadStatus::Closed`]. Writes fail with
    /// [`WriteError`] from the moment close is called. Closing an
    /// already closed channel has no further effect.
    ///
    /// Writers racing a close are not serialized beyond the channel
    /// lock: whether such a write lands before or after closure is up to
    /// the scheduler. Callers needing a strict cut-off must order their
    /// own shutdown.
    ///
    /// # Example
    ///
    /// ```
    /// use handoff::{ReadStatus, Slot};
    ///
    /// let slot = Slot::new();
    /// slot.write(7).unwrap();
    /// slot.close();
    ///
    /// // The pending value survives closure for one final read.
    /// assert_eq!(slot.read(), ReadStatus::Success(7));
    /// assert_eq!(slot.read(), ReadStatus::Closed);
    /// ```
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.close();
        drop(state);
        self.writable.notify_all();
        self.readable.notify_all();
    }

    /// Returns `true` once [`close`](Slot::close) has been called.
    ///
    /// This is a snapshot: it may be stale by the time the caller acts
    /// on it, and `false` does not guarantee that a subsequent write
    /// will succeed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(&*self.state.lock(), State::Closing(_) | State::Closed)
    }

    /// Takes the value out of a ready slot.
    ///
    /// The caller must have established `can_read`. The replacement
    /// leaves the slot closed, which the `Readable` arm then overwrites.
    fn consume(&self, mut state: MutexGuard<'_, State<T>>) -> ReadStatus<T> {
        match mem::replace(&mut *state, State::Closed) {
            State::Readable(value) => {
                *state = State::Writable;
                drop(state);
                self.writable.notify_one();
                ReadStatus::Success(value)
            }
            State::Closing(value) => {
                // Final value taken, channel now fully closed. Wake the
                // other readers so closure reaches every parked thread.
                drop(state);
                self.readable.notify_all();
                ReadStatus::Success(value)
            }
            State::Closed => {
                drop(state);
                ReadStatus::Closed
            }
            State::Writable => unreachable!("reader woke while the slot was still empty"),
        }
    }

    /// Stores a value into an empty slot, or refuses it if the channel
    /// is closed. The caller must have established `can_write`.
    fn store(&self, mut state: MutexGuard<'_, State<T>>, value: T) -> Result<(), WriteError<T>> {
        match &*state {
            State::Writable => {
                *state = State::Readable(value);
                drop(state);
                self.readable.notify_one();
                Ok(())
            }
            _ => Err(WriteError(value)),
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Slot");
        match self.state.try_lock() {
            Some(state) => s.field("state", &state.name()).finish_non_exhaustive(),
            None => s.field("state", &"<locked>").finish_non_exhaustive(),
        }
    }
}
