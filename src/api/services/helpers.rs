//! Response builders and the session cookie builder.

use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::api::constants::SESSION_COOKIE_NAME;
use crate::errors::NewswatchError;

use super::types::Envelope;

/// Success envelope, `res_total` only where the endpoint defines one.
pub fn envelope_response<T: Serialize>(res_total: Option<i64>, res_result: T) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(Envelope::success(res_total, res_result))
}

/// Storage failures collapse to a generic 500; the concrete error is logged
/// here and goes no further.
pub fn database_error_response(err: &NewswatchError) -> HttpResponse {
    error!("storage error at handler boundary: {}", err);
    HttpResponse::InternalServerError().json(json!({ "error": "database error" }))
}

pub fn bad_request_response(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message }))
}

/// Session cookie construction, config-driven.
pub struct CookieBuilder {
    secure: bool,
    session_minutes: u64,
}

impl CookieBuilder {
    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self {
            secure: config.auth.cookie_secure,
            session_minutes: config.auth.session_minutes,
        }
    }

    fn build_cookie_base(
        &self,
        value: String,
        max_age: actix_web::cookie::time::Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE_NAME.to_string(), value);
        cookie.set_path("/".to_string());
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(max_age);
        cookie
    }

    pub fn build_session_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            token,
            actix_web::cookie::time::Duration::minutes(self.session_minutes as i64),
        )
    }

    pub fn build_expired_session_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(String::new(), actix_web::cookie::time::Duration::ZERO)
    }
}
