//! Blocking hand-off channels built on a mutex and a pair of condition
//! variables.
//!
//! Two primitives share one outcome vocabulary:
//!
//! - [`Slot`]: a single-slot channel. At most one value is in flight and
//!   writers alternate with readers in strict lockstep.
//! - [`Ring`]: a ring-buffered channel. A fixed-capacity circular buffer
//!   lets the producer run ahead until the buffer fills.
//!
//! Every operation takes the channel lock and waits on a condition
//! variable until its readiness predicate holds, then performs an O(1)
//! transfer and wakes the opposite side. Spurious wakeups are absorbed
//! by re-checking the predicate. There is no unsafe code and nothing
//! allocates after construction.
//!
//! Reads resolve to a [`ReadStatus`]: a value, a timeout, or closure.
//! Writes resolve to a [`WriteStatus`] unless the channel is closed, in
//! which case they fail with [`WriteError`] and hand the value back.
//! Timeouts never change channel state, so a timed-out call can always
//! simply be retried.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use handoff::{ReadStatus, Ring};
//!
//! let ring = Arc::new(Ring::with_capacity(10).unwrap());
//! let consumer = Arc::clone(&ring);
//!
//! let handle = thread::spawn(move || {
//!     let mut total = 0u64;
//!     while let ReadStatus::Success(v) = consumer.read() {
//!         total += v;
//!     }
//!     total
//! });
//!
//! for v in 1..=100u64 {
//!     ring.write(v).unwrap();
//! }
//! ring.close();
//!
//! assert_eq!(handle.join().unwrap(), 5050);
//! ```
//!
//! # Closing
//!
//! [`Slot::close`] and [`Ring::close`] are permanent and idempotent, and
//! they wake every parked thread. Values already inside a channel stay
//! readable: a slot delivers its final value to exactly one more read,
//! and a ring lets readers drain the buffer. Only then do reads report
//! [`ReadStatus::Closed`]. Writes fail with [`WriteError`] from the
//! moment close is called. End-of-stream on the read side is a status,
//! never an error; a write into a closed channel is an error, never a
//! status.
//!
//! # When to Use This
//!
//! Use these channels when:
//! - producers and consumers are OS threads that may block
//! - you want strict alternation ([`Slot`]) or a bounded buffer ([`Ring`])
//! - shutdown must reliably wake every waiter
//!
//! Consider alternatives when:
//! - you need `select!` over several channels → use `crossbeam-channel`
//! - you need async/await → use `tokio::sync::mpsc`
//! - you need lock-free latency → use an SPSC ring buffer such as `rtrb`

#![warn(missing_docs)]

pub mod ring;
pub mod slot;
pub mod status;

pub use ring::Ring;
pub use slot::Slot;
pub use status::{CapacityError, ReadStatus, WriteError, WriteStatus};
