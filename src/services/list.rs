//! Fuzzy search over a fixed list of entries.

use std::sync::Arc;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::error::ExtensionError;
use crate::extension::{Extension, ResultCollection};

use super::Entry;

/// Matches titles and subtitles against the query, best score first.
///
/// Matching runs on the blocking pool, so results are deferred.
pub struct ListExtension {
    name: String,
    entries: Arc<Vec<Entry>>,
    limit: usize,
}

impl ListExtension {
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            entries: Arc::new(entries),
            limit: usize::MAX,
        }
    }

    /// Keep at most `limit` matches from this list.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl Extension<Entry> for ListExtension {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, query: &str) -> ResultCollection<Entry> {
        let entries = Arc::clone(&self.entries);
        let query = query.to_string();
        let limit = self.limit;

        ResultCollection::deferred(async move {
            tokio::task::spawn_blocking(move || rank(&entries, &query, limit))
                .await
                .map_err(|e| ExtensionError::Failed(format!("list matching failed: {}", e)))
        })
    }
}

/// Fuzzy-rank `entries` against `query`, case-insensitively.
///
/// Title matches beat subtitle matches of the same quality; equal scores
/// keep list order.
pub fn rank(entries: &[Entry], query: &str, limit: usize) -> Vec<Entry> {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize)> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let title = matcher.fuzzy_match(&entry.title.to_lowercase(), &query_lower);
            let subtitle = entry
                .subtitle
                .as_ref()
                .and_then(|s| matcher.fuzzy_match(&s.to_lowercase(), &query_lower))
                .map(|score| score / 2);
            title.max(subtitle).map(|score| (score, index))
        })
        .collect();

    // Stable tie-break on list position.
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, index)| entries[index].clone())
        .collect()
}
