//! Extension protocol.
//!
//! An extension maps a query to a [`ResultCollection`]: either results it
//! already has, or a future that resolves to them. The aggregator
//! normalizes both shapes with [`ResultCollection::resolve`].

use std::future::Future;
use std::pin::Pin;

use crate::error::ExtensionResult;

/// Boxed future produced by deferred extensions.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// What an extension hands back for a query.
pub enum ResultCollection<T> {
    /// Results known synchronously
    Ready(Vec<T>),
    /// Results that arrive later (I/O, timers, blocking work)
    Deferred(BoxFuture<ExtensionResult<Vec<T>>>),
}

impl<T: Send + 'static> ResultCollection<T> {
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = ExtensionResult<Vec<T>>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    pub fn empty() -> Self {
        Self::Ready(Vec::new())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Await the collection regardless of its shape.
    pub async fn resolve(self) -> ExtensionResult<Vec<T>> {
        match self {
            Self::Ready(items) => Ok(items),
            Self::Deferred(future) => future.await,
        }
    }
}

impl<T> From<Vec<T>> for ResultCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Ready(items)
    }
}

/// A search provider contributing results for a query.
///
/// Extensions own their ordering; the aggregator never re-ranks.
/// Calls are independent: an extension must not rely on state shared
/// with other extensions.
pub trait Extension<T>: Send + Sync {
    /// Name used in logs and failure reports
    fn name(&self) -> &str {
        "extension"
    }

    fn search(&self, query: &str) -> ResultCollection<T>;
}

/// Extension backed by a closure.
pub struct FnExtension<F> {
    name: String,
    search: F,
}

impl<T, F> Extension<T> for FnExtension<F>
where
    F: Fn(&str) -> ResultCollection<T> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, query: &str) -> ResultCollection<T> {
        (self.search)(query)
    }
}

/// Wrap a closure as a named extension.
pub fn extension_fn<T, F>(name: impl Into<String>, search: F) -> FnExtension<F>
where
    F: Fn(&str) -> ResultCollection<T> + Send + Sync,
{
    FnExtension {
        name: name.into(),
        search,
    }
}
