use std::sync::Arc;

use anyhow::{bail, Context, Result};
use sitetrace::kernel::time::SystemClock;
use sitetrace::page::{PageContext, PageSnapshot, StaticPage};
use sitetrace::services::transport::WebhookTransport;
use sitetrace::{PageSignal, ScrollMetrics, Session, Tracker, TrackerConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE: &str = "usage: sitetrace <config.json> <page.json>";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(config_path), Some(page_path)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };

    let config = TrackerConfig::from_path(&config_path)
        .with_context(|| format!("loading config from {}", config_path))?;

    // RUST_LOG wins; otherwise the config's debug flag picks the level.
    let default_level = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;

    let raw_page = std::fs::read_to_string(&page_path)
        .with_context(|| format!("reading page snapshot {}", page_path))?;
    let snapshot: PageSnapshot = serde_json::from_str(&raw_page)
        .with_context(|| format!("parsing page snapshot {}", page_path))?;
    let page = Arc::new(StaticPage::from(snapshot));

    let transport = Arc::new(WebhookTransport::new(&config));
    let tracker = Tracker::new(config, page.clone(), transport, Arc::new(SystemClock));
    let (session, signals) = Session::new(tracker);
    tracing::info!(session = %session.id(), "page loaded");
    let running = tokio::spawn(session.run());

    println!("commands: click <id> <x> <y> | scroll <y> <height> <viewport> | submit <form-id> | tick | test | resize <w> <h> | exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            let _ = signals.send(PageSignal::Unload).await;
            break;
        }
        match parse_command(line, page.as_ref()) {
            Ok(Some(signal)) => {
                if signals.send(signal).await.is_err() {
                    tracing::warn!("session ended; stopping input");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }
    }
    drop(signals);

    let tracker = running.await.context("session task panicked")?;
    tracing::info!(stats = ?tracker.stats(), "done");
    Ok(())
}

/// `Ok(None)` for commands handled locally (resize).
fn parse_command(line: &str, page: &StaticPage) -> Result<Option<PageSignal>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let signal = match parts.as_slice() {
        ["click", id, x, y] => {
            let target = page
                .document()
                .element_by_id(id)
                .with_context(|| format!("no element with id {:?}", id))?;
            PageSignal::Click {
                target,
                x: x.parse().context("x")?,
                y: y.parse().context("y")?,
            }
        }
        ["scroll", y, height, viewport] => PageSignal::Scroll(ScrollMetrics {
            scroll_y: y.parse().context("scroll y")?,
            scroll_height: height.parse().context("scroll height")?,
            viewport_height: viewport.parse().context("viewport height")?,
        }),
        ["submit", id] => {
            let form = page
                .document()
                .element_by_id(id)
                .with_context(|| format!("no form with id {:?}", id))?;
            PageSignal::Submit { form }
        }
        ["tick"] => PageSignal::DwellTick,
        ["test"] => PageSignal::Test,
        ["resize", w, h] => {
            page.resize(w.parse().context("width")?, h.parse().context("height")?);
            return Ok(None);
        }
        _ => bail!("unknown command: {}", line),
    };
    Ok(Some(signal))
}
