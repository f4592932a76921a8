//! HTTP server wiring: shared state, router, and serve loop.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::Router;
use log::{error, info, warn};
use rusqlite::Connection;
use staffbook_core::{
    EmployeeService, RepoError, ServiceError, ServiceResult, SqliteEmployeeRepository,
};
use tower_http::cors::CorsLayer;

use crate::handlers;

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 5000);

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Enable permissive CORS for browser clients on another origin.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            cors: true,
        }
    }
}

impl ServerConfig {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            ..Self::default()
        }
    }

    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }
}

#[derive(Debug)]
pub enum ServerError {
    Bind { addr: SocketAddr, source: std::io::Error },
    Serve(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bind { addr, source } => write!(f, "failed to bind {addr}: {source}"),
            Self::Serve(err) => write!(f, "server error: {err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
            Self::Serve(err) => Some(err),
        }
    }
}

/// Shared application state.
pub struct AppState {
    conn: Mutex<Connection>,
    started_at: Instant,
}

impl AppState {
    /// Wraps a migrated connection from `staffbook_core::db`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Runs `f` against a service bound to the shared connection on the
    /// blocking pool, so SQLite work never stalls the async workers.
    pub async fn with_service<T, F>(self: &Arc<Self>, f: F) -> ServiceResult<T>
    where
        F: FnOnce(&EmployeeService<SqliteEmployeeRepository<'_>>) -> ServiceResult<T>
            + Send
            + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(self);
        tokio::task::spawn_blocking(move || state.run_locked(f))
            .await
            .map_err(|err| {
                ServiceError::Unexpected(RepoError::InvalidData(format!(
                    "storage task failed: {err}"
                )))
            })?
    }

    fn run_locked<T>(
        &self,
        f: impl FnOnce(&EmployeeService<SqliteEmployeeRepository<'_>>) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let conn = self.conn.lock().map_err(|_| {
            ServiceError::Unexpected(RepoError::InvalidData(
                "connection mutex poisoned".to_string(),
            ))
        })?;
        let repo = SqliteEmployeeRepository::try_new(&conn)?;
        f(&EmployeeService::new(repo))
    }
}

/// Builds the full router over `state`.
pub fn router(state: Arc<AppState>, cors: bool) -> Router {
    let api = Router::new()
        .route(
            "/employees",
            get(handlers::list_employees)
                .post(handlers::create_employee)
                .delete(handlers::delete_without_id),
        )
        .route("/employees/add", post(handlers::create_employee))
        .route(
            "/employees/:employee_id",
            put(handlers::update_employee).delete(handlers::delete_employee),
        );

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .with_state(state)
        .layer(middleware::from_fn(log_request));

    if cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = started_at.elapsed().as_millis();
    if status.is_server_error() {
        error!(
            "event=http_request module=server status=error method={method} path={path} code={} duration_ms={duration_ms}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=server status=ok method={method} path={path} code={} duration_ms={duration_ms}",
            status.as_u16()
        );
    }
    response
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    pub fn new(config: ServerConfig, conn: Connection) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(conn)),
        }
    }

    /// Serves until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// - `Bind` when the listen address is unavailable.
    /// - `Serve` when the accept loop fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        info!(
            "event=server_start module=server status=ok addr={addr} cors={}",
            self.config.cors
        );

        axum::serve(listener, router(self.state.clone(), self.config.cors))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;

        info!(
            "event=server_stop module=server status=ok uptime_s={}",
            self.state.uptime_seconds()
        );
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("event=signal_install module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("event=signal_install module=server status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("event=shutdown module=server status=start signal=ctrl_c"),
        () = terminate => info!("event=shutdown module=server status=start signal=sigterm"),
    }
}
