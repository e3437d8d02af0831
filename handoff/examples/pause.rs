//! Blocks until Ctrl-C arrives, delivered through a single-slot channel.
//!
//! The handler thread writes the event into a shared slot and the main
//! thread parks on `read` until it lands. A burst of signals while one
//! is still unread is collapsed: the zero-timeout write just drops the
//! extra event.
//!
//! Run with:
//!   cargo run --example pause
//! then press Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use handoff::Slot;

fn main() {
    let signals = Arc::new(Slot::new());
    let handler = Arc::clone(&signals);

    ctrlc::set_handler(move || {
        let _ = handler.write_for((), Duration::ZERO);
    })
    .expect("failed to install Ctrl-C handler");

    println!("paused; press Ctrl-C to continue (pid {})", std::process::id());

    if signals.read().is_success() {
        println!("interrupt received, resuming");
    }
}
