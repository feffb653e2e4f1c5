//! Product catalog REST API backed by SQLite.

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::localization::LocalizationOptions;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::docs::swagger_ui;
#[cfg(feature = "server")]
use crate::routes::errors::{json_error, path_error, query_error, render_server_error};
#[cfg(feature = "server")]
use crate::routes::product::{
    create_product, delete_product, get_paging, get_product, get_products, update_product,
};

pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod localization;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;

/// Registers the extractor error handlers, the Swagger UI with its API
/// document and the product routes under `/api/{culture}`.
#[cfg(feature = "server")]
pub fn configure(max_page_size: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::QueryConfig::default().error_handler(query_error))
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .service(swagger_ui(max_page_size))
            .service(
                web::scope("/api/{culture}")
                    .service(get_paging)
                    .service(get_products)
                    .service(get_product)
                    .service(create_product)
                    .service(update_product)
                    .service(delete_product),
            );
    }
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let localization = LocalizationOptions::from_config(&server_config)
        .map_err(|e| std::io::Error::other(format!("Invalid locale configuration: {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving {} locales on {}:{}",
        server_config.supported_locales.join(", "),
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&server_config.allowed_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(middleware::ErrorHandlers::new().default_handler_server(render_server_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(localization.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .configure(configure(server_config.max_page_size))
    })
    .bind(bind_address)?
    .run()
    .await
}
