use crate::error::{Error, Result};
use crate::models::Claims;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Request context carrying the verified identity claims.
///
/// Inserted into request extensions by the auth middleware; handlers take
/// it as an extractor.
#[derive(Clone, Debug)]
pub struct Ctx {
    claims: Claims,
}

impl Ctx {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn username(&self) -> &str {
        &self.claims.username
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(Error::AuthFailCtxNotInRequestExt)
    }
}
