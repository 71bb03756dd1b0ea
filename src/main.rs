use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;
use tracing_subscriber::EnvFilter;

use newswatch::api::middleware::SessionGate;
use newswatch::api::services::frontend;
use newswatch::api::services::api_scope;
use newswatch::config::{Config, init_config};
use newswatch::repository::NewsStore;
use newswatch::repository::backends::SeaOrmStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => init_config(config),
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let store = match SeaOrmStore::connect(config).await {
        Ok(store) => Arc::new(store) as Arc<dyn NewsStore>,
        Err(e) => {
            eprintln!("storage error: {}", e);
            std::process::exit(1);
        }
    };

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting newswatch at http://{}", bind_address);
    info!("Dashboard api available at: {}", config.routes.api_prefix);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .wrap(SessionGate)
            .service(api_scope(&config.routes.api_prefix))
            .route(
                &config.routes.dashboard_prefix,
                web::get().to(frontend::dashboard_page),
            )
            .route(&config.routes.login_path, web::get().to(frontend::login_page))
            .route("/", web::get().to(frontend::root_redirect))
    })
    .bind(bind_address)?
    .run()
    .await
}
