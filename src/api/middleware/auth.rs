use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::LOCATION,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{info, trace};

use crate::api::constants::SESSION_COOKIE_NAME;
use crate::api::jwt::get_jwt_service;
use crate::config::get_config;

/// Two-state session gate in front of the dashboard route prefix.
///
/// Anonymous requests (no cookie, bad signature, expired token) are
/// redirected to the login page; everything outside the guarded prefix
/// passes through untouched.
#[derive(Clone)]
pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let config = get_config();
        ready(Ok(SessionGateMiddleware {
            service: Rc::new(service),
            dashboard_prefix: config.routes.dashboard_prefix.clone(),
            login_path: config.routes.login_path.clone(),
        }))
    }
}

pub struct SessionGateMiddleware<S> {
    service: Rc<S>,
    dashboard_prefix: String,
    login_path: String,
}

impl<S, B> SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn redirect_to_login(req: ServiceRequest, login_path: &str) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::Found()
                .insert_header((LOCATION, login_path))
                .finish()
                .map_into_right_body(),
        )
    }

    /// Valid, non-expired session token in the cookie?
    fn has_valid_session(req: &ServiceRequest) -> bool {
        let Some(cookie) = req.cookie(SESSION_COOKIE_NAME) else {
            return false;
        };

        match get_jwt_service().validate_session_token(cookie.value()) {
            Ok(_claims) => {
                trace!("session token validation successful");
                true
            }
            Err(e) => {
                info!("session token validation failed: {}", e);
                false
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let dashboard_prefix = self.dashboard_prefix.clone();
        let login_path = self.login_path.clone();

        Box::pin(async move {
            if !req.path().starts_with(&dashboard_prefix) {
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            if Self::has_valid_session(&req) {
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            info!("anonymous request to {} - redirecting to login", req.path());
            Ok(Self::redirect_to_login(req, &login_path))
        })
    }
}
