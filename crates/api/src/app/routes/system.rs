use tracing::debug;

/// Liveness check. Accepts any method.
pub async fn ping() -> &'static str {
    debug!("pong");
    "pong"
}
