use crate::{
    config::config_model::DotEnvyConfig,
    infrastructure::{
        axum_http::{default_routers, routers},
        postgres::postgres_connection::PgPoolSquad,
    },
};
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, StatusCode},
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let qr_code_routes =
        routers::qr_codes::routes(Arc::clone(&db_pool), config.qr_code.output_dir.clone());
    let app = app(&config, qr_code_routes)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!(
        port = config.server.port,
        output_dir = %config.qr_code.output_dir.display(),
        "http_serve: server is running"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wraps `routes` with the health check, the fallback and the server-wide layers.
pub fn app(config: &DotEnvyConfig, routes: Router) -> Result<Router> {
    let app = Router::new()
        .fallback(default_routers::not_found)
        .merge(routes)
        .route("/health-check", get(default_routers::health_check))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.timeout),
        ))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes(
            config.server.body_limit,
        )?))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn body_limit_bytes(body_limit_mib: u64) -> Result<usize> {
    body_limit_mib
        .checked_mul(1024 * 1024)
        .and_then(|bytes| usize::try_from(bytes).ok())
        .context("SERVER_BODY_LIMIT is invalid")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "http_serve: failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "http_serve: failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("http_serve: received ctrl+C signal"),
        _ = terminate => info!("http_serve: received terminate signal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_model::{Database, QrCode, Server};
    use axum::{body::Body, http::Request, routing::post};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn config(timeout: u64, body_limit: u64) -> DotEnvyConfig {
        DotEnvyConfig {
            server: Server {
                port: 0,
                body_limit,
                timeout,
            },
            database: Database {
                url: "postgres://localhost/qrcode_registry".to_string(),
            },
            qr_code: QrCode {
                output_dir: "./qrcodes".into(),
            },
        }
    }

    async fn slow_handler() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "done"
    }

    #[test]
    fn body_limit_is_converted_to_bytes() {
        assert_eq!(body_limit_bytes(10).unwrap(), 10 * 1024 * 1024);
    }

    #[test]
    fn oversized_body_limit_is_rejected() {
        let err = body_limit_bytes(u64::MAX).unwrap_err();
        assert_eq!(err.to_string(), "SERVER_BODY_LIMIT is invalid");

        assert!(app(&config(30, u64::MAX), Router::new()).is_err());
    }

    #[tokio::test]
    async fn health_check_and_fallback_are_served() {
        let router = app(&config(30, 1), Router::new()).unwrap();

        let response = router
            .clone()
            .oneshot(Request::get("/health-check").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"NOT_FOUND");
    }

    #[tokio::test]
    async fn slow_request_times_out_with_408() {
        let routes = Router::new().route("/slow", post(slow_handler));
        let router = app(&config(0, 1), routes).unwrap();

        let response = router
            .oneshot(Request::post("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
