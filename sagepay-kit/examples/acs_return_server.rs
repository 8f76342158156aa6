use axum::{Router, extract::State, http::StatusCode, routing::post};
use sagepay_kit::{
    config::{Auth, Endpoint},
    http::{axum::AcsCallback, request::Gateway},
    request::CreateSecure3D,
};

#[derive(Clone)]
struct AppState {
    gateway: Gateway,
}

/// Where the ACS sends the shopper back after 3-D Secure.
///
/// The merchant data (`MD`) is used to find the transaction. A real shop would
/// look the transaction id up from its own order store instead.
async fn three_ds_return(
    State(state): State<AppState>,
    AcsCallback(callback): AcsCallback,
) -> Result<String, (StatusCode, String)> {
    let transaction_id = callback
        .merchant_data()
        .unwrap_or("unknown-transaction")
        .to_string();

    let request = CreateSecure3D::resolve(callback, transaction_id)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;

    let outbound = state
        .gateway
        .http_request(&request)
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;

    tracing::info!(
        "Would forward {} result to {}",
        request.mode(),
        outbound.uri()
    );

    Ok(format!(
        "POST {}\n{}",
        outbound.uri(),
        String::from_utf8_lossy(outbound.body())
    ))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let gateway = Gateway::from_env().unwrap_or_else(|err| {
        tracing::warn!("{err}; falling back to placeholder sandbox credentials");
        Gateway::builder()
            .endpoint(Endpoint::test())
            .auth(
                Auth::builder()
                    .integration_key("sandbox-integration-key")
                    .integration_password("sandbox-integration-password")
                    .build(),
            )
            .build()
    });

    let app = Router::new()
        .route("/checkout/3ds-return", post(three_ds_return))
        .with_state(AppState { gateway });

    let addr = "127.0.0.1:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        "Try: curl -d 'PaRes=eJzVWNmSo0&MD=T-1' http://{}/checkout/3ds-return",
        addr
    );

    axum::serve(listener, app).await.expect("server error");
}
