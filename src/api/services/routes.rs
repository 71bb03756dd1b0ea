//! Route registration for the JSON api scope.

use actix_web::web;

use super::{auth, dashboard};

/// Dashboard api scope. Mounted once in `main` under the configured prefix;
/// integration tests mount it the same way.
pub fn api_scope(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route("/regions", web::get().to(dashboard::regions))
        .route("/category", web::get().to(dashboard::category))
        .route("/category-list", web::get().to(dashboard::category_list))
        .route("/news", web::get().to(dashboard::news))
        .route("/program", web::get().to(dashboard::program))
        .route("/statistics", web::get().to(dashboard::statistics))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout))
}
