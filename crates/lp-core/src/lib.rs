/// Shared types and configuration for letterpix.
///
/// This crate contains the buffer types, the animated-sequence model,
/// the error taxonomy, and the configuration logic used across the
/// letterpix workspace.

pub mod alphabet;
pub mod config;
pub mod error;
pub mod frame;

pub use config::MosaicConfig;
pub use error::CoreError;
pub use frame::{AnimatedSequence, FrameBuffer, GrayBuffer, LoopBehavior, SequenceFrame};
