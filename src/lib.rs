//! Omnibar - an extensible search bar engine.
//!
//! The host forwards input events; the widget debounces them, fans each
//! query out to its extensions, merges their results in declaration
//! order and keeps track of the selection. Enter runs an action on the
//! selected item.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`config`] - Settings loading and validation
//! - [`debounce`] - Trailing-edge debounce on tokio timers
//! - [`extension`] - The extension protocol
//! - [`core`] - Aggregation, navigation state and viewport
//! - [`executor`] - Actions on the selected item
//! - [`services`] - Built-in extensions (calculator, lists, quicklinks)
//! - [`ui`] - The [`Omnibar`] widget and its builder
//!
//! # Example
//!
//! ```ignore
//! use omnibar::{InputEvent, Omnibar};
//! use omnibar::services::{CalculatorExtension, QuicklinkExtension};
//!
//! let mut bar = Omnibar::builder()
//!     .extension(CalculatorExtension)
//!     .extension(QuicklinkExtension::web_search())
//!     .max_results(10)
//!     .build()?;
//!
//! bar.handle(InputEvent::Changed("2^10".into()));
//! bar.next_settled().await;
//! for row in bar.rows() {
//!     println!("{}{}", if row.selected { "> " } else { "  " }, row.item);
//! }
//! ```

// Public modules
pub mod config;
pub mod core;
pub mod debounce;
pub mod error;
pub mod executor;
pub mod extension;
pub mod services;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::Settings;
pub use core::state::{NavigationState, Phase};
pub use error::{ConfigError, ErrorHook, OmnibarError, OmnibarResult};
pub use executor::{Action, DispatchOutcome, Linkable, OpenUrl};
pub use extension::{extension_fn, Extension, ResultCollection};
pub use ui::{InputEvent, Key, Omnibar, SettleOutcome};
