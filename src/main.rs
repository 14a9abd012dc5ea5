mod assets;
mod auth;
mod config;
mod demo;
mod extract;
mod form;
mod guard;
mod jwt;
mod pages;
mod partials;

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::FromRef;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum_extra::extract::cookie::Key;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub(crate) type Accounts = Arc<auth::Directory>;

pub(crate) type Issuer = Arc<jwt::Issuer>;

#[derive(Clone)]
struct AppState {
    /// Accounts that can sign in.
    accounts: Accounts,
    /// JWT issuer
    issuer: Issuer,
    /// Key for signing cookies.
    key: Key,
}

impl AppState {
    fn new(accounts: auth::Directory, key: Key) -> Result<Self> {
        Ok(Self {
            accounts: Arc::new(accounts),
            issuer: Arc::new(jwt::Issuer::new()?),
            key,
        })
    }
}

impl FromRef<AppState> for Accounts {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for Issuer {
    fn from_ref(state: &AppState) -> Self {
        state.issuer.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/login") }))
        .route("/login", get(pages::select::select))
        .route(
            "/user-login",
            get(pages::login::citizen).post(pages::login::sign_in_citizen),
        )
        .route(
            "/admin-login",
            get(pages::login::authority).post(pages::login::sign_in_authority),
        )
        .route("/f/{portal}/toggle", post(partials::login::toggle))
        .route("/f/{portal}/demo", post(partials::login::fill_demo))
        .route("/dashboard", get(pages::portal::dashboard))
        .route("/authority", get(pages::portal::authority))
        .route("/logout", post(pages::portal::logout))
        .route("/app.css", get(assets::css))
        .route("/favicon.svg", get(assets::favicon))
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env()?;

    let mut accounts = auth::Directory::with_demo_accounts(config.iterations)?;

    if let Some(path) = &config.accounts {
        let count = accounts.load(path)?;
        tracing::info!(?path, count, "loaded accounts");
    }

    tracing::info!(accounts = accounts.len(), "account directory ready");

    let state = AppState::new(accounts, config.cookie_key())?;

    let addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("serving on {addr:?}");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
