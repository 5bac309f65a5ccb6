use catalog_mock::{ProductStore, logger};
use rust_decimal::Decimal;
use shared::ProductPayload;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let log_dir = std::env::var("MOCK_LOG_DIR").ok();
    logger::init_logger_with_file(None, log_dir.as_deref());

    let port: u16 = std::env::var("MOCK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let store = ProductStore::new();
    if std::env::var("MOCK_SEED").map(|v| v != "0").unwrap_or(true) {
        seed(&store).await;
    }

    let (_state, app) = catalog_mock::app(store);
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("catalog-mock listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn seed(store: &ProductStore) {
    let samples = [
        ("Pen", 250, "Blue ballpoint pen"),
        ("Notebook", 899, "A5 dotted notebook"),
        ("Mug", 1200, "Ceramic coffee mug"),
    ];
    for (name, cents, description) in samples {
        store
            .insert(ProductPayload {
                name: name.to_string(),
                price: Decimal::new(cents, 2),
                description: description.to_string(),
                img_url: Some(format!("https://picsum.photos/seed/{}/300/200", name)),
            })
            .await;
    }
    info!("Seeded {} products", samples.len());
}
