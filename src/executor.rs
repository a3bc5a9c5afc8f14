//! Action dispatch - what happens when the selected result is activated

use std::process::Command;
use std::sync::Arc;

use crate::error::{ActionError, ErrorHook, OmnibarError};

/// Something to do with an activated item.
pub trait Action<T>: Send + Sync {
    fn perform(&self, item: &T) -> Result<(), ActionError>;
}

impl<T, F> Action<T> for F
where
    F: Fn(&T) -> Result<(), ActionError> + Send + Sync,
{
    fn perform(&self, item: &T) -> Result<(), ActionError> {
        self(item)
    }
}

/// Items that carry a URL the default action can open.
pub trait Linkable {
    fn url(&self) -> Option<&str>;
}

/// Opens a URL outside the process.
pub type Launcher = Arc<dyn Fn(&str) -> std::io::Result<()> + Send + Sync>;

/// The default action: open the item's URL in the system browser.
pub struct OpenUrl {
    launcher: Launcher,
}

impl Default for OpenUrl {
    fn default() -> Self {
        Self {
            launcher: Arc::new(open_in_browser),
        }
    }
}

impl OpenUrl {
    /// Use a custom launcher instead of the platform opener.
    pub fn with_launcher(launcher: Launcher) -> Self {
        Self { launcher }
    }
}

impl<T: Linkable> Action<T> for OpenUrl {
    fn perform(&self, item: &T) -> Result<(), ActionError> {
        let url = item.url().map(str::trim).ok_or(ActionError::MissingUrl)?;
        validate_url(url)?;
        (self.launcher)(url)?;
        tracing::info!(url, "opened url");
        Ok(())
    }
}

/// Accept `scheme:rest` where the scheme is RFC 3986 shaped.
fn validate_url(url: &str) -> Result<(), ActionError> {
    let invalid = || ActionError::InvalidUrl(url.to_string());
    let (scheme, rest) = url.split_once(':').ok_or_else(invalid)?;

    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let scheme_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !starts_alpha || !scheme_ok || rest.is_empty() || url.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn open_in_browser(url: &str) -> std::io::Result<()> {
    Command::new("xdg-open").arg(url).spawn().map(|_| ())
}

#[cfg(target_os = "macos")]
fn open_in_browser(url: &str) -> std::io::Result<()> {
    Command::new("open").arg(url).spawn().map(|_| ())
}

#[cfg(target_os = "windows")]
fn open_in_browser(url: &str) -> std::io::Result<()> {
    Command::new("cmd")
        .args(["/C", "start", "", url])
        .spawn()
        .map(|_| ())
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn open_in_browser(url: &str) -> std::io::Result<()> {
    Command::new("xdg-open").arg(url).spawn().map(|_| ())
}

/// Result of activating the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Nothing was selected
    NoSelection,
    Performed,
    /// The action failed; the error went to the hook
    Failed,
}

/// Runs the configured action on the selected item.
///
/// The action is chosen once at construction; failures are reported
/// and swallowed.
pub struct ActionDispatcher<T> {
    action: Arc<dyn Action<T>>,
    on_error: ErrorHook,
}

impl<T> ActionDispatcher<T> {
    pub fn new(action: Arc<dyn Action<T>>, on_error: ErrorHook) -> Self {
        Self { action, on_error }
    }

    pub fn dispatch(&self, item: Option<&T>) -> DispatchOutcome {
        let Some(item) = item else {
            tracing::debug!("enter with no selection");
            return DispatchOutcome::NoSelection;
        };

        match self.action.perform(item) {
            Ok(()) => DispatchOutcome::Performed,
            Err(e) => {
                tracing::warn!(error = %e, "action failed");
                (self.on_error)(&OmnibarError::Action(e));
                DispatchOutcome::Failed
            }
        }
    }
}
