// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod client;
mod routes;

use axum::Router;
use clap::Parser;
use hearing_sync::{
    DEFAULT_RETRY_ATTEMPTS, Engine, EngineConfig, ExistingHearingLookupPolicy, HearingService,
    RetryPolicy,
};
use hearing_sync_audit::Actor;
use hearing_sync_domain::{ChannelFallbackPolicy, DerivationOptions, StaticReferenceData};
use hearing_sync_persistence::SqliteCaseStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::client::HttpHearingService;
use crate::routes::{AppState, build_router};

/// Hearing Sync Server - derives hearing requests from cases and keeps the
/// hearing service and the case store in step.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Base URL of the hearing service
    #[arg(long, env = "HEARING_SERVICE_URL")]
    hearing_service_url: String,

    /// Bearer token for the hearing service
    #[arg(long, env = "HEARING_SERVICE_TOKEN", hide_env_values = true)]
    service_token: Option<String>,

    /// JSON file with venues, durations, languages and session categories
    #[arg(long)]
    reference_data: Option<PathBuf>,

    /// Case store write attempts before compensating
    #[arg(long, default_value_t = DEFAULT_RETRY_ATTEMPTS)]
    retry_attempts: u32,

    /// Delay between case store write attempts, in milliseconds
    #[arg(long, default_value_t = 1000)]
    retry_backoff_ms: u64,

    /// Party that wants to attend but gave no channel: "fallback" or "raise"
    #[arg(long, default_value = "fallback")]
    channel_policy: ChannelFallbackPolicy,

    /// On a transient existing-hearing lookup failure: "proceed" or "abort"
    #[arg(long, default_value = "proceed")]
    existing_lookup_policy: ExistingHearingLookupPolicy,

    /// Enables the adjournment-aware channel, location and panel rules
    #[arg(long)]
    adjournment_enabled: bool,

    /// Hearing service code for this jurisdiction
    #[arg(long, default_value = "BBA3")]
    service_code: String,

    /// Hearing service request timeout, in milliseconds
    #[arg(long, default_value_t = 30_000)]
    request_timeout_ms: u64,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            retry: RetryPolicy::new(
                self.retry_attempts,
                Duration::from_millis(self.retry_backoff_ms),
            ),
            derivation: DerivationOptions {
                channel_policy: self.channel_policy,
                adjournment_enabled: self.adjournment_enabled,
                service_code: self.service_code.clone(),
            },
            lookup_policy: self.existing_lookup_policy,
            actor: Actor::system(),
        }
    }
}

fn load_reference_data(
    path: Option<&Path>,
) -> Result<StaticReferenceData, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json: String = std::fs::read_to_string(path)?;
            let data: StaticReferenceData = StaticReferenceData::from_json(&json)?;
            info!(
                path = %path.display(),
                venues = data.venues.len(),
                durations = data.durations.len(),
                "Loaded reference data"
            );
            Ok(data)
        }
        None => {
            warn!("No reference data given; every case will fall back to defaults");
            Ok(StaticReferenceData::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Hearing Sync Server");

    let store: SqliteCaseStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteCaseStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteCaseStore::new_in_memory()?
    };

    let reference: StaticReferenceData = load_reference_data(args.reference_data.as_deref())?;
    let config: EngineConfig = args.engine_config();
    info!(
        retry_attempts = config.retry.max_attempts,
        lookup_policy = ?config.lookup_policy,
        adjournment_enabled = config.derivation.adjournment_enabled,
        "Engine configured"
    );

    let hearings: Box<dyn HearingService + Send + Sync> = Box::new(HttpHearingService::new(
        &args.hearing_service_url,
        args.service_token.clone(),
        Duration::from_millis(args.request_timeout_ms),
    ));

    let app_state: AppState = AppState {
        engine: Arc::new(Engine::new(hearings, store, reference, config)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args: Args =
            Args::parse_from(["hearing-sync-server", "--hearing-service-url", "http://hmc"]);
        let config: EngineConfig = args.engine_config();

        assert_eq!(args.port, 3000);
        assert_eq!(config.retry.max_attempts, DEFAULT_RETRY_ATTEMPTS);
        assert_eq!(config.retry.backoff, Duration::from_millis(1000));
        assert_eq!(
            config.derivation.channel_policy,
            ChannelFallbackPolicy::FallbackToFaceToFace
        );
        assert_eq!(
            config.lookup_policy,
            ExistingHearingLookupPolicy::ProceedToCreate
        );
        assert_eq!(config.derivation.service_code, "BBA3");
    }

    #[test]
    fn test_args_policies_parse() {
        let args: Args = Args::parse_from([
            "hearing-sync-server",
            "--hearing-service-url",
            "http://hmc",
            "--channel-policy",
            "raise",
            "--existing-lookup-policy",
            "abort",
            "--adjournment-enabled",
            "--retry-attempts",
            "5",
        ]);
        let config: EngineConfig = args.engine_config();

        assert_eq!(
            config.derivation.channel_policy,
            ChannelFallbackPolicy::RaiseResolutionError
        );
        assert_eq!(config.lookup_policy, ExistingHearingLookupPolicy::Abort);
        assert!(config.derivation.adjournment_enabled);
        assert_eq!(config.retry.max_attempts, 5);
    }

    #[test]
    fn test_missing_reference_data_falls_back_to_empty() {
        let data: StaticReferenceData = load_reference_data(None).unwrap();
        assert!(data.venues.is_empty());
    }
}
