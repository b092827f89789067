//! # Events Module
//!
//! Event-driven progress reporting.
//!
//! ## Design
//! The core library emits typed events through a channel, allowing any
//! consumer (CLI, GUI, test harness) to subscribe and display progress.
//! Events are purely observational and never affect control flow.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! // In a separate thread, listen for events
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Fingerprint(FingerprintEvent::Progress(p)) => {
//!                 println!("{}/{}", p.completed, p.total)
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! // Run the pipeline with the sender
//! pipeline.run_with_events(&sender, &cancel)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
