// Request extractors
// Author: kelexine (https://github.com/kelexine)

use crate::error::SentinelError;
use crate::models::User;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The caller identified by the `x-user-id` / `x-user-email` headers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = SentinelError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let id = header(USER_ID_HEADER).ok_or_else(|| {
            SentinelError::Unauthorized(format!("missing {} header", USER_ID_HEADER))
        })?;

        Ok(CurrentUser(User::new(id, header(USER_EMAIL_HEADER))))
    }
}
