//! HTTP handlers and route configuration.

mod categories;
mod health;
mod params;
mod posts;


use actix_web::web;

use crate::middleware::error::{json_config, path_config, query_config};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Authenticated routes
                .service(
                    web::scope("/categories")
                        .route("", web::post().to(categories::create_category))
                        .route("", web::get().to(categories::query_categories))
                        .route("/{id}", web::get().to(categories::get_category_by_id))
                        .route("/{id}", web::patch().to(categories::update_category_by_id))
                        .route("/{id}", web::delete().to(categories::delete_category_by_id)),
                )
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create_post))
                        .route("", web::get().to(posts::query_posts))
                        .route("/{id}", web::get().to(posts::get_post_by_id))
                        .route("/{id}", web::patch().to(posts::update_post_by_id))
                        .route("/{id}", web::delete().to(posts::delete_post_by_id)),
                ),
        );
}
