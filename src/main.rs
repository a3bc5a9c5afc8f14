//! Omnibar terminal demo.
//!
//! Every stdin line replaces the query. Lines starting with `:` are keys:
//! `:up`, `:down`, `:enter`, `:blur`, `:focus` and `:clear`.

use omnibar::services::{CalculatorExtension, Entry, ListExtension, QuicklinkExtension};
use omnibar::{DispatchOutcome, InputEvent, Key, Omnibar, Settings};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn bookmarks() -> Vec<Entry> {
    vec![
        Entry::new("The Rust Book")
            .with_subtitle("doc.rust-lang.org")
            .with_url("https://doc.rust-lang.org/book/"),
        Entry::new("Tokio Tutorial")
            .with_subtitle("tokio.rs")
            .with_url("https://tokio.rs/tokio/tutorial"),
        Entry::new("crates.io")
            .with_subtitle("Rust package registry")
            .with_url("https://crates.io"),
        Entry::new("docs.rs")
            .with_subtitle("Rust crate documentation")
            .with_url("https://docs.rs"),
        Entry::new("Serde")
            .with_subtitle("serialization framework")
            .with_url("https://serde.rs"),
    ]
}

fn parse_line(line: &str) -> InputEvent {
    match line.trim_end_matches(['\r', '\n']) {
        ":up" => InputEvent::Key(Key::Up),
        ":down" => InputEvent::Key(Key::Down),
        ":enter" => InputEvent::Key(Key::Enter),
        ":blur" => InputEvent::Blur,
        ":focus" => InputEvent::Focus,
        ":clear" => InputEvent::Changed(String::new()),
        text => InputEvent::Changed(text.to_string()),
    }
}

fn render(bar: &Omnibar<Entry>, outcome: Option<DispatchOutcome>) {
    match outcome {
        Some(DispatchOutcome::NoSelection) => println!("(nothing selected)"),
        Some(DispatchOutcome::Failed) => println!("(action failed)"),
        Some(DispatchOutcome::Performed) | None => {}
    }

    let rows = bar.rows();
    if rows.is_empty() {
        return;
    }
    println!("---");
    for row in rows {
        let marker = if row.selected { ">" } else { " " };
        println!("{} {}", marker, row.item);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so they never interleave with the result list
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "omnibar=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let quicklinks = if settings.quicklinks.is_empty() {
        QuicklinkExtension::web_search()
    } else {
        QuicklinkExtension::new(settings.quicklinks.clone())
    };

    let bar = Omnibar::builder()
        .settings(settings)
        .extension(CalculatorExtension)
        .extension(ListExtension::new("bookmarks", bookmarks()).with_limit(5))
        .extension(quicklinks)
        .on_error(|e| eprintln!("{}", e))
        .build();
    let bar = match bar {
        Ok(bar) => bar,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(parse_line(&line)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
    });

    bar.run(rx, render).await;
}
