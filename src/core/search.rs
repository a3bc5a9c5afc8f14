//! Search aggregation: one query fanned out to every extension, merged
//! back in declaration order.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::{ErrorHook, ExtensionError, ExtensionResult, OmnibarError};
use crate::extension::{Extension, ResultCollection};

enum Pending<T> {
    Ready(Vec<T>),
    Spawned(JoinHandle<ExtensionResult<Vec<T>>>),
    /// `search` itself panicked before handing anything back
    Failed(ExtensionError),
}

/// Fans a query out to the configured extensions.
pub struct Aggregator<T> {
    extensions: Vec<Arc<dyn Extension<T>>>,
    max_results: Option<usize>,
    on_error: ErrorHook,
}

impl<T: Send + 'static> Aggregator<T> {
    pub fn new(
        extensions: Vec<Arc<dyn Extension<T>>>,
        max_results: Option<usize>,
        on_error: ErrorHook,
    ) -> Self {
        Self {
            extensions,
            max_results,
            on_error,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// Run one aggregation for `query`.
    ///
    /// Every extension is started before any is awaited. Deferred results
    /// run as their own tasks, so a failing or panicking extension only
    /// loses its own contribution.
    pub async fn search(&self, query: &str) -> Vec<T> {
        if self.extensions.is_empty() {
            return Vec::new();
        }

        let pending: Vec<Pending<T>> = self
            .extensions
            .iter()
            .map(|extension| {
                match panic::catch_unwind(AssertUnwindSafe(|| extension.search(query))) {
                    Ok(ResultCollection::Ready(items)) => Pending::Ready(items),
                    Ok(ResultCollection::Deferred(future)) => {
                        Pending::Spawned(tokio::spawn(future))
                    }
                    Err(payload) => {
                        Pending::Failed(ExtensionError::Panicked(panic_message(payload.as_ref())))
                    }
                }
            })
            .collect();

        let mut batches = Vec::with_capacity(pending.len());
        for (extension, pending) in self.extensions.iter().zip(pending) {
            let resolved = match pending {
                Pending::Ready(items) => Ok(items),
                Pending::Failed(source) => Err(source),
                Pending::Spawned(handle) => match handle.await {
                    Ok(result) => result,
                    Err(join_error) if join_error.is_panic() => {
                        let payload = join_error.into_panic();
                        Err(ExtensionError::Panicked(panic_message(payload.as_ref())))
                    }
                    Err(_) => Err(ExtensionError::Cancelled),
                },
            };

            match resolved {
                Ok(items) => batches.push(items),
                Err(source) => {
                    tracing::warn!(
                        extension = extension.name(),
                        query,
                        error = %source,
                        "extension failed, contributing no results"
                    );
                    (self.on_error)(&OmnibarError::Extension {
                        extension: extension.name().to_string(),
                        query: query.to_string(),
                        source,
                    });
                    batches.push(Vec::new());
                }
            }
        }

        let merged = merge(batches, self.max_results);
        tracing::debug!(query, results = merged.len(), "aggregation settled");
        merged
    }
}

/// Concatenate batches in order and keep at most `max_results` items.
///
/// Truncation keeps the prefix, so earlier extensions win.
pub fn merge<T>(batches: Vec<Vec<T>>, max_results: Option<usize>) -> Vec<T> {
    let limit = max_results.unwrap_or(usize::MAX);
    let mut merged = Vec::new();
    for batch in batches {
        let room = limit - merged.len();
        if room == 0 {
            break;
        }
        merged.extend(batch.into_iter().take(room));
    }
    merged
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
