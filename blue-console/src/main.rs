//! Blue Admin console
//!
//! Terminal front-end for the Blue Admin SSO backend: entity lists
//! with server-side pagination and filtering, inline-editable detail
//! pages, and relationship pickers, over the `blue-client` SDK.

mod app;
mod debounce;
mod entity_view;
mod fetch;
mod forms;
mod notify;
mod pages;
mod pagination;
mod picker;
mod query;
mod route;
mod table;
mod ui;

use anyhow::Context;
use blue_client::{BlueAdminClient, ClientConfig};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::App;

/// UI refresh and debounce-poll cadence
const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Logs go to the in-app pane, never to stdout (it belongs to the TUI)
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let config = ClientConfig::from_env();
    let client = BlueAdminClient::new(&config).context("failed to build API client")?;
    tracing::info!(base_url = %config.base_url, "console starting");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(client, tx);

    let mut terminal = ratatui::init();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, &app))?;

        tokio::select! {
            event = events.next() => {
                match event {
                    Some(Ok(event)) => app.handle_event(event),
                    Some(Err(err)) => tracing::error!("terminal event error: {err}"),
                    None => break,
                }
            }
            msg = rx.recv() => {
                if let Some(msg) = msg {
                    app.handle_msg(msg);
                }
            }
            _ = ticker.tick() => {
                app.on_tick(Instant::now());
            }
        }
    }

    ratatui::restore();
    Ok(())
}
