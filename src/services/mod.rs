//! Built-in extensions and the item type they produce.

pub mod calculator;
pub mod list;
pub mod quicklinks;

use std::fmt;

use crate::executor::Linkable;

pub use calculator::CalculatorExtension;
pub use list::ListExtension;
pub use quicklinks::QuicklinkExtension;

/// A general-purpose result row: a title, an optional subtitle, and an
/// optional URL the default action opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub subtitle: Option<String>,
    pub url: Option<String>,
}

impl Entry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            url: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl Linkable for Entry {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(subtitle) = &self.subtitle {
            write!(f, " - {}", subtitle)?;
        }
        Ok(())
    }
}
