//! Gashapon Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{FixedOffset, NaiveTime, Weekday};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod infrastructure;
mod stores;
mod use_cases;

use app::{App, AppConfig};
use gashapon_domain::ResetSchedule;
use infrastructure::{
    catalog_file::FileCatalogSource, image_client::HttpImageClient, prefetch::PrefetchConfig,
};
use stores::{InMemoryCollectionStore, InMemoryQuotaStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (Taskfile runs the engine from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gashapon_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gashapon Engine");

    // Load configuration
    let catalog_path =
        std::env::var("CATALOG_PATH").unwrap_or_else(|_| "gacha_catalog.csv".into());
    let draw_quota: u32 = std::env::var("DRAW_QUOTA")
        .unwrap_or_else(|_| "10".into())
        .parse()
        .unwrap_or(10);
    let collection_page_size: usize = std::env::var("COLLECTION_PAGE_SIZE")
        .unwrap_or_else(|_| "20".into())
        .parse()
        .unwrap_or(20);
    let reset_tz_hours: i32 = std::env::var("RESET_TZ_OFFSET_HOURS")
        .unwrap_or_else(|_| "9".into())
        .parse()
        .unwrap_or(9);
    let scheduler_poll_secs: u64 = std::env::var("SCHEDULER_POLL_SECS")
        .unwrap_or_else(|_| "30".into())
        .parse()
        .unwrap_or(30);
    let prefetch_max_attempts: u32 = std::env::var("PREFETCH_MAX_ATTEMPTS")
        .unwrap_or_else(|_| "3".into())
        .parse()
        .unwrap_or(3);
    let prefetch_retry_delay_ms: u64 = std::env::var("PREFETCH_RETRY_DELAY_MS")
        .unwrap_or_else(|_| "2000".into())
        .parse()
        .unwrap_or(2000);
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);

    let reset_tz = FixedOffset::east_opt(reset_tz_hours * 3600).unwrap_or_else(|| {
        tracing::warn!(reset_tz_hours, "RESET_TZ_OFFSET_HOURS out of range, using UTC+9");
        AppConfig::default().reset_tz
    });

    // Create application
    let app = Arc::new(App::new(
        Arc::new(FileCatalogSource::new(&catalog_path)),
        Arc::new(HttpImageClient::new()),
        Arc::new(InMemoryQuotaStore::new(draw_quota)),
        Arc::new(InMemoryCollectionStore::default()),
        AppConfig {
            collection_page_size,
            reset_tz,
            prefetch: PrefetchConfig {
                max_attempts: prefetch_max_attempts,
                retry_delay: Duration::from_millis(prefetch_retry_delay_ms),
            },
        },
    ));

    // Initial catalog load. Failure is not fatal: the bot starts with no
    // catalog and draws answer "unavailable" until a reload succeeds.
    tracing::info!(path = %catalog_path, "Loading catalog");
    match app.use_cases.catalog.reload().await {
        Ok(summary) => {
            tracing::info!(
                loaded = summary.loaded,
                skipped = summary.skipped,
                "Catalog loaded"
            );
            if let Some(catalog) = app.use_cases.catalog.snapshot().await {
                let prefetcher = app.prefetcher.clone();
                tokio::spawn(async move {
                    prefetcher.prefetch(catalog.entries()).await;
                });
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Catalog load failed, starting without a catalog");
        }
    }

    // Arm the weekly reset if configured
    if let Some(schedule) = schedule_from_env() {
        app.scheduler.set_schedule(schedule).await;
    }

    // Spawn the reset poll loop
    let scheduler = app.scheduler.clone();
    tokio::spawn(scheduler.run(Duration::from_secs(scheduler_poll_secs)));

    // Build router
    let router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

/// Weekly reset from `RESET_WEEKDAY` + `RESET_TIME`, when both parse.
/// A bad value logs and leaves the scheduler unarmed rather than aborting.
fn schedule_from_env() -> Option<ResetSchedule> {
    let weekday_raw = std::env::var("RESET_WEEKDAY").ok()?;
    let time_raw = std::env::var("RESET_TIME").ok()?;

    let weekday = match weekday_raw.parse::<Weekday>() {
        Ok(day) => day,
        Err(_) => {
            tracing::warn!(weekday = %weekday_raw, "Ignoring unparseable RESET_WEEKDAY");
            return None;
        }
    };
    let time = match NaiveTime::parse_from_str(&time_raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&time_raw, "%H:%M:%S"))
    {
        Ok(time) => time,
        Err(_) => {
            tracing::warn!(time = %time_raw, "Ignoring unparseable RESET_TIME");
            return None;
        }
    };
    Some(ResetSchedule::new(weekday, time))
}
