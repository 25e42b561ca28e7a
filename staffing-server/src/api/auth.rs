use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode as jwt_decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::response::ApiError;
use crate::infrastructure::config::JwtValidationConfig;

/// Claims read from the bearer token, `sub` is the caller's user id.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// The authenticated caller, put into the request extensions by [`JwtValidation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserInfo {
    pub id: Uuid,
}

impl FromRequest for UserInfo {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserInfo>()
                .copied()
                .ok_or_else(|| ApiError::Unauthorized("missing or invalid bearer token".into())),
        )
    }
}

/// Validates `Authorization: Bearer <jwt>` with the shared HS256 secret.
///
/// Requests without a valid token pass through without a [`UserInfo`], so every
/// handler asking for one answers 401.
#[derive(Clone)]
pub struct JwtValidation {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidation {
    pub fn new(config: &JwtValidationConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = *config.leeway();
        validation.validate_exp = *config.validate_exp();
        if !config.validate_exp() {
            validation.required_spec_claims.remove("exp");
        }
        Self {
            key: DecodingKey::from_secret(config.secret().as_bytes()),
            validation,
        }
    }

    fn parse(&self, authorization: &str) -> anyhow::Result<UserInfo> {
        let Some(token) = authorization.strip_prefix("Bearer ") else {
            anyhow::bail!("Not Bearer Token.")
        };
        let data = jwt_decode::<Claims>(token.trim(), &self.key, &self.validation)?;
        Ok(UserInfo {
            id: data.claims.sub,
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtValidation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtValidationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtValidationMiddleware {
            service: Rc::new(service),
            validation: Rc::new(self.clone()),
        }))
    }
}

pub struct JwtValidationMiddleware<S> {
    service: Rc<S>,
    validation: Rc<JwtValidation>,
}

impl<S, B> Service<ServiceRequest> for JwtValidationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user_info = match req.headers().get("Authorization") {
            Some(head) => match head.to_str() {
                Ok(value) => match self.validation.parse(value) {
                    Ok(x) => Some(x),
                    Err(e) => {
                        tracing::debug!("{e}");
                        None
                    }
                },
                Err(e) => {
                    tracing::debug!("{e}");
                    None
                }
            },
            None => {
                tracing::debug!("No Token.");
                None
            }
        };
        if let Some(user_info) = user_info {
            req.extensions_mut().insert(user_info);
        }
        let service = self.service.clone();
        Box::pin(async move { service.call(req).await })
    }
}
