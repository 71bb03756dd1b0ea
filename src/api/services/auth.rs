//! Login/logout endpoints of the session gate.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde_json::json;
use tracing::{error, info};

use crate::api::jwt::get_jwt_service;
use crate::config::get_config;
use crate::utils::password::verify_password;

use super::helpers::CookieBuilder;
use super::types::{LoginCredentials, MessageResponse};

/// The 401 body never says whether the username or the password was wrong.
fn unauthorized_response() -> HttpResponse {
    HttpResponse::build(StatusCode::UNAUTHORIZED).json(json!({
        "message": "Invalid username or password"
    }))
}

pub async fn login(credentials: web::Json<LoginCredentials>) -> ActixResult<impl Responder> {
    let config = get_config();

    if credentials.username != config.auth.username {
        info!("login failed: unknown username");
        return Ok(unauthorized_response());
    }

    let password_valid = match verify_password(&credentials.password, &config.auth.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            error!("password verification error: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(json!({ "message": "Server error" }))
            );
        }
    };

    if !password_valid {
        info!("login failed: wrong password for operator");
        return Ok(unauthorized_response());
    }

    let token = match get_jwt_service().generate_session_token(&credentials.username) {
        Ok(token) => token,
        Err(e) => {
            error!("failed to generate session token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(json!({ "message": "Server error" }))
            );
        }
    };

    info!("operator login successful");

    let cookie = CookieBuilder::from_config().build_session_cookie(token);
    Ok(HttpResponse::Ok().cookie(cookie).json(MessageResponse {
        message: "Login success".to_string(),
    }))
}

pub async fn logout() -> ActixResult<impl Responder> {
    info!("operator logout");

    let cookie = CookieBuilder::from_config().build_expired_session_cookie();
    Ok(HttpResponse::Ok().cookie(cookie).json(MessageResponse {
        message: "Logout success".to_string(),
    }))
}
