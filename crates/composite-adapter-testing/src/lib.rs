//! Test doubles for composite-adapter.
//!
//! - [`VecProvider`] - observable `Vec`-backed provider with mutation helpers
//!   that emit the matching structural events
//! - [`RecordingObserver`] - collects the events a provider or composite emits

mod recording;
mod vec_provider;

pub use recording::*;
pub use vec_provider::*;
