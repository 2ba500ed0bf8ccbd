//! # Events Module
//!
//! Event-driven signaling between the pipeline worker and its caller.
//!
//! ## Design
//! The pipeline emits typed events through a channel (log lines,
//! progress percentages, status messages, per-file outcomes) and polls
//! a pair of cooperative flags for pause/cancel requests. Any UI
//! (CLI, GUI) subscribes to the receiver and owns the flags.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//! let controls = RunControls::new();
//!
//! // In a separate thread, listen for events
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Progress(p) => println!("{:.0}%", p.percent),
//!             Event::Status { message } => println!("{message}"),
//!             _ => {}
//!         }
//!     }
//! });
//!
//! // Run the pipeline with the sender and controls
//! organizer.run(&sender, &controls);
//! ```

mod channel;
mod controls;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use controls::RunControls;
pub use types::*;
