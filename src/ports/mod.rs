//! Ports (trait boundaries) for external collaborators.
//!
//! The training loop only knows these traits; progress bars, metric
//! collection and file exports are adapters implementing them.

pub mod observer;

pub use observer::Observer;
