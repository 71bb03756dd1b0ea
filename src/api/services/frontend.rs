//! Embedded dashboard pages, compiled into the binary.

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, Responder, Result as ActixResult};
use tracing::debug;

use crate::config::get_config;

const DASHBOARD_HTML: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/web/dashboard.html"));
const LOGIN_HTML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/web/login.html"));

pub async fn dashboard_page() -> ActixResult<impl Responder> {
    debug!("serving embedded dashboard page");
    Ok(HttpResponse::Ok()
        .append_header(("Content-Type", "text/html; charset=utf-8"))
        .body(DASHBOARD_HTML))
}

pub async fn login_page() -> ActixResult<impl Responder> {
    Ok(HttpResponse::Ok()
        .append_header(("Content-Type", "text/html; charset=utf-8"))
        .body(LOGIN_HTML))
}

/// `/` lands on the dashboard; the session gate bounces anonymous visitors
/// on to the login page from there.
pub async fn root_redirect() -> ActixResult<impl Responder> {
    let config = get_config();
    Ok(HttpResponse::Found()
        .insert_header((LOCATION, config.routes.dashboard_prefix.clone()))
        .finish())
}
