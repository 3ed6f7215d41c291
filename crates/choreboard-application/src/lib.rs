//! Application layer for choreboard.
//!
//! This crate provides the use case implementations that coordinate the
//! domain store with the durable cache, the remote gateway, and the
//! background sync loop.

pub mod board_usecase;
pub mod sync;

pub use board_usecase::{BoardUseCase, RenderCallback};
pub use sync::reconciler::{Reconciler, SyncOutcome};
pub use sync::suppression::SuppressionWindow;
