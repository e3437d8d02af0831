//! Shared outcome and error types for both channel primitives.
//!
//! Timed-out waits and closure observed by a reader are ordinary
//! statuses. Only two situations are errors: writing into a channel that
//! has been closed, and constructing a ring with zero capacity.

use core::fmt;

/// Outcome of a read operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus<T> {
    /// A value was received.
    Success(T),

    /// The wait expired before a value arrived.
    ///
    /// Nothing was consumed and no state changed; the call can simply be
    /// retried. Untimed reads never return this.
    Timeout,

    /// The channel is closed and no values remain.
    Closed,
}

impl<T> ReadStatus<T> {
    /// Returns the received value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            ReadStatus::Success(value) => Some(value),
            ReadStatus::Timeout | ReadStatus::Closed => None,
        }
    }

    /// Returns `true` if a value was received.
    pub fn is_success(&self) -> bool {
        matches!(self, ReadStatus::Success(_))
    }

    /// Returns `true` if the wait expired.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ReadStatus::Timeout)
    }

    /// Returns `true` if the channel was closed and drained.
    pub fn is_closed(&self) -> bool {
        matches!(self, ReadStatus::Closed)
    }
}

/// Outcome of a write operation.
///
/// Closure is never a write outcome: writing into a closed channel fails
/// with [`WriteError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus<T> {
    /// The value was accepted by the channel.
    Success,

    /// The wait expired before the channel became writable.
    ///
    /// The value is handed back so the write can be retried. Untimed
    /// writes never return this.
    Timeout(T),
}

impl<T> WriteStatus<T> {
    /// Returns the value handed back by a timed-out write, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            WriteStatus::Success => None,
            WriteStatus::Timeout(value) => Some(value),
        }
    }

    /// Returns `true` if the value was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, WriteStatus::Success)
    }

    /// Returns `true` if the wait expired.
    pub fn is_timeout(&self) -> bool {
        matches!(self, WriteStatus::Timeout(_))
    }
}

/// Error returned when writing to a closed channel.
///
/// Contains the value that could not be written, allowing recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteError<T>(pub T);

impl<T> WriteError<T> {
    /// Returns the value that could not be written.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for WriteError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "write on closed channel")
    }
}

impl<T: fmt::Debug> std::error::Error for WriteError<T> {}

/// Error returned when constructing a ring channel with zero capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError;

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel capacity must be at least 1")
    }
}

impl std::error::Error for CapacityError {}
