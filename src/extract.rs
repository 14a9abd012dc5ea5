use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::HeaderName;
use axum::http::request::Parts;
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, Key, SameSite};

use crate::Issuer;
use crate::auth::User;

/// Name of the cookie holding the session token.
pub(crate) const SESSION_COOKIE: &str = "session";

const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");

/// Extract the current session from the signed session cookie. The inner value is `None` if the
/// cookie is missing or does not carry a valid token.
#[derive(Debug)]
pub(crate) struct CurrentUser(pub Option<User>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Key: FromRef<S>,
    Issuer: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state).await;
        let issuer = Issuer::from_ref(state);

        let user = jar
            .ok()
            .and_then(|jar| jar.get(SESSION_COOKIE))
            .and_then(|cookie| issuer.user(cookie.value_trimmed()));

        Ok(CurrentUser(user))
    }
}

/// Whether the request was issued by htmx.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HxRequest(pub bool);

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let hx = parts
            .headers
            .get(HX_REQUEST)
            .is_some_and(|value| value.as_bytes() == b"true");

        Ok(HxRequest(hx))
    }
}

/// Cookie carrying a freshly issued session token.
pub(crate) fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie matching [`session_cookie`] for removal.
pub(crate) fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
