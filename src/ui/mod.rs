//! The widget surface hosts talk to.

pub mod app;

pub use app::{InputEvent, Key, Omnibar, OmnibarBuilder, SettleOutcome};
