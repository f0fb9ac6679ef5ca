use std::future::{ready, Ready};

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};

use crate::error::AppError;
use crate::middleware::auth::Claims;

/// Identity of the caller on routes wrapped in `AuthMiddleware`.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(claims) = req.extensions().get::<Claims>() {
            ready(Ok(AuthenticatedUser {
                user_id: claims.user_id.clone(),
            }))
        } else {
            ready(Err(AppError::Unauthorized("User not authenticated").into()))
        }
    }
}
