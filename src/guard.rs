//! Redirect away from pages that only make sense without a session.

use axum::http::HeaderName;
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::{Role, User};

const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

/// Where a signed in user lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Destination {
    Authority,
    Dashboard,
}

impl Destination {
    pub(crate) fn for_role(role: Role) -> Self {
        match role {
            Role::Authority => Self::Authority,
            Role::Citizen => Self::Dashboard,
        }
    }

    pub(crate) fn path(self) -> &'static str {
        match self {
            Self::Authority => "/authority",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Build a redirect that replaces the current page. htmx requests get an `HX-Redirect` header
/// instead of a 303 so the whole page is replaced rather than the swap target.
pub(crate) fn redirect(path: &'static str, hx: bool) -> Response {
    if hx {
        ([(HX_REDIRECT, path)], ()).into_response()
    } else {
        Redirect::to(path).into_response()
    }
}

/// Redirect to the destination of `user`, or `None` if there is no session and the page should
/// render. Must run on every request.
pub(crate) fn check(user: Option<&User>, hx: bool) -> Option<Response> {
    user.map(|user| redirect(Destination::for_role(user.role).path(), hx))
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};

    use super::*;

    fn user(role: Role) -> User {
        User {
            email: "someone@example.com".into(),
            role,
            department: None,
        }
    }

    #[test]
    fn test_destination_by_role() {
        assert_eq!(Destination::for_role(Role::Authority).path(), "/authority");
        assert_eq!(Destination::for_role(Role::Citizen).path(), "/dashboard");
    }

    #[test]
    fn test_no_session_renders() {
        assert!(check(None, false).is_none());
        assert!(check(None, true).is_none());
    }

    #[test]
    fn test_authority_session_redirects() {
        let response = check(Some(&user(Role::Authority)), false).expect("redirect");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/authority");
    }

    #[test]
    fn test_citizen_session_redirects() {
        let response = check(Some(&user(Role::Citizen)), false).expect("redirect");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    }

    #[test]
    fn test_htmx_redirect_uses_header() {
        let response = check(Some(&user(Role::Authority)), true).expect("redirect");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[HX_REDIRECT], "/authority");
        assert!(response.headers().get(header::LOCATION).is_none());
    }
}
