#[tokio::main]
async fn main() {
    catalogd_observability::init();

    let config = catalogd_api::config::Config::from_env();

    let store = catalogd_api::app::build_store(&config)
        .await
        .expect("failed to initialize product storage");

    let app = catalogd_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
