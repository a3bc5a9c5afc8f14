//! Quicklinks: turn any query into "search X for <query>" links.

use crate::config::QuicklinkConfig;
use crate::extension::{Extension, ResultCollection};

use super::Entry;

pub struct QuicklinkExtension {
    links: Vec<QuicklinkConfig>,
}

impl QuicklinkExtension {
    pub fn new(links: Vec<QuicklinkConfig>) -> Self {
        Self { links }
    }

    /// A single web search link, used when the config defines none.
    pub fn web_search() -> Self {
        Self::new(vec![QuicklinkConfig {
            name: "Search the web".to_string(),
            url: "https://duckduckgo.com/?q={query}".to_string(),
        }])
    }
}

impl Extension<Entry> for QuicklinkExtension {
    fn name(&self) -> &str {
        "quicklinks"
    }

    fn search(&self, query: &str) -> ResultCollection<Entry> {
        let query = query.trim();
        if query.is_empty() {
            return ResultCollection::empty();
        }

        let entries = self
            .links
            .iter()
            .map(|link| {
                let url = link.resolve_url(query);
                Entry::new(format!("{}: {}", link.name, query))
                    .with_subtitle(url.clone())
                    .with_url(url)
            })
            .collect();
        ResultCollection::Ready(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_links_in_config_order() {
        let extension = QuicklinkExtension::new(vec![
            QuicklinkConfig {
                name: "crates.io".to_string(),
                url: "https://crates.io/search?q={query}".to_string(),
            },
            QuicklinkConfig {
                name: "docs.rs".to_string(),
                url: "https://docs.rs/releases/search?query={query}".to_string(),
            },
        ]);

        let entries = extension.search("tokio mpsc").resolve().await.unwrap();
        let urls: Vec<_> = entries.iter().filter_map(|e| e.url.as_deref()).collect();
        assert_eq!(
            urls,
            vec![
                "https://crates.io/search?q=tokio%20mpsc",
                "https://docs.rs/releases/search?query=tokio%20mpsc",
            ]
        );
        assert_eq!(entries[0].title, "crates.io: tokio mpsc");
    }

    #[tokio::test]
    async fn test_blank_query_yields_nothing() {
        let entries = QuicklinkExtension::web_search()
            .search("   ")
            .resolve()
            .await
            .unwrap();
        assert!(entries.is_empty());
    }
}
