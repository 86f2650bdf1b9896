// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod session;


use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use bunte_liga_api::{IdentityProvider, StaticTokenIdentityProvider};
use bunte_liga_persistence::Persistence;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::handlers::{
    handle_admin_create_result, handle_admin_delete_result, handle_admin_update_result,
    handle_audit_timeline, handle_block_slot, handle_bookings_needing_result,
    handle_bulk_create_slots, handle_cancel_booking, handle_cancel_result_report,
    handle_check_collision, handle_create_pitch, handle_create_season, handle_create_slot,
    handle_create_team, handle_list_bookings, handle_list_pitches, handle_list_results,
    handle_list_teams, handle_opponent_options, handle_override_booking, handle_pending_actions,
    handle_pending_results, handle_public_available_bookings, handle_public_current_season,
    handle_public_pitches, handle_public_results, handle_public_season, handle_public_seasons,
    handle_public_standings, handle_public_teams, handle_refresh_all_time_stats,
    handle_register_team, handle_report_result, handle_request_slot, handle_respond_to_request,
    handle_respond_to_result, handle_set_current_season, handle_slot_template,
    handle_transition_season, handle_unblock_slot, handle_update_pitch, handle_update_season,
    handle_update_slot, handle_update_team, handle_withdraw_team,
};

/// Bunte Liga Server - HTTP server for the Bunte Liga league backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// JSON file mapping bearer tokens to callers
    #[arg(short, long)]
    identity_file: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer, serialized behind a mutex.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Resolves bearer tokens to callers.
    pub identity: Arc<dyn IdentityProvider>,
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    info!(%method, %path, status = response.status().as_u16(), "Handled request");
    response
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let public = Router::new()
        .route("/public/seasons", get(handle_public_seasons))
        .route("/public/seasons/current", get(handle_public_current_season))
        .route("/public/seasons/{season_id}", get(handle_public_season))
        .route(
            "/public/seasons/{season_id}/bookings/available",
            get(handle_public_available_bookings),
        )
        .route(
            "/public/seasons/{season_id}/results",
            get(handle_public_results),
        )
        .route(
            "/public/seasons/{season_id}/standings",
            get(handle_public_standings),
        )
        .route("/public/teams", get(handle_public_teams))
        .route("/public/pitches", get(handle_public_pitches));

    let seasons = Router::new()
        .route("/seasons", post(handle_create_season))
        .route("/seasons/{season_id}", patch(handle_update_season))
        .route(
            "/seasons/{season_id}/transition",
            post(handle_transition_season),
        )
        .route("/seasons/{season_id}/current", post(handle_set_current_season))
        .route("/seasons/{season_id}/teams", post(handle_register_team))
        .route(
            "/seasons/{season_id}/teams/withdraw",
            post(handle_withdraw_team),
        )
        .route("/seasons/{season_id}/bookings", get(handle_list_bookings))
        .route(
            "/seasons/{season_id}/bookings/needing-result",
            get(handle_bookings_needing_result),
        )
        .route("/seasons/{season_id}/results", get(handle_list_results))
        .route(
            "/seasons/{season_id}/results/pending",
            get(handle_pending_results),
        )
        .route(
            "/seasons/{season_id}/pending-actions",
            get(handle_pending_actions),
        )
        .route(
            "/seasons/{season_id}/opponents",
            get(handle_opponent_options),
        );

    let catalog = Router::new()
        .route("/teams", get(handle_list_teams).post(handle_create_team))
        .route("/teams/{team_id}", patch(handle_update_team))
        .route("/pitches", get(handle_list_pitches).post(handle_create_pitch))
        .route("/pitches/{pitch_id}", patch(handle_update_pitch));

    let bookings = Router::new()
        .route("/bookings", post(handle_create_slot))
        .route("/bookings/check-collision", post(handle_check_collision))
        .route("/bookings/bulk", post(handle_bulk_create_slots))
        .route("/bookings/template", post(handle_slot_template))
        .route("/bookings/{booking_id}", patch(handle_update_slot))
        .route(
            "/bookings/{booking_id}/override",
            post(handle_override_booking),
        )
        .route("/bookings/{booking_id}/request", post(handle_request_slot))
        .route(
            "/bookings/{booking_id}/respond",
            post(handle_respond_to_request),
        )
        .route("/bookings/{booking_id}/cancel", post(handle_cancel_booking))
        .route("/bookings/{booking_id}/block", post(handle_block_slot))
        .route("/bookings/{booking_id}/unblock", post(handle_unblock_slot));

    let results = Router::new()
        .route("/results", post(handle_report_result))
        .route("/results/admin", post(handle_admin_create_result))
        .route(
            "/results/{result_id}",
            patch(handle_admin_update_result).delete(handle_admin_delete_result),
        )
        .route(
            "/results/{result_id}/respond",
            post(handle_respond_to_result),
        )
        .route(
            "/results/{result_id}/cancel",
            post(handle_cancel_result_report),
        );

    let admin = Router::new()
        .route(
            "/stats/all-time/refresh",
            post(handle_refresh_all_time_stats),
        )
        .route(
            "/audit/{entity_kind}/{entity_id}",
            get(handle_audit_timeline),
        );

    Router::new()
        .merge(public)
        .merge(seasons)
        .merge(catalog)
        .merge(bookings)
        .merge(results)
        .merge(admin)
        .layer(middleware::from_fn(log_request))
        .with_state(app_state)
}

fn load_identity(
    path: Option<&PathBuf>,
) -> Result<StaticTokenIdentityProvider, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        warn!("No identity file configured; every authenticated route will reject callers");
        return Ok(StaticTokenIdentityProvider::empty());
    };
    let provider = StaticTokenIdentityProvider::from_file(path)?;
    info!(path = %path.display(), tokens = provider.len(), "Loaded identity file");
    Ok(provider)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("Initializing Bunte Liga Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let identity = load_identity(args.identity_file.as_ref())?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        identity: Arc::new(identity),
    };

    let app: Router = build_router(app_state);

    let addr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
