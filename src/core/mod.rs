//! Core engine module - platform-agnostic widget logic.
//!
//! Nothing here touches a terminal, a window or the network:
//! - Aggregation of extension results
//! - The navigation state machine
//! - The scrolling window over results

pub mod search;
pub mod state;
pub mod viewport;

pub use search::{merge, Aggregator};
pub use state::{NavEvent, NavigationState, Phase};
pub use viewport::{Row, Viewport};
