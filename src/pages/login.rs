use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::SignedCookieJar;
use maud::Markup;

use crate::auth::User;
use crate::extract::{self, CurrentUser, HxRequest};
use crate::form::{Fields, LoginForm, Outcome, Portal};
use crate::guard::{self, Destination};
use crate::partials::layout::{Width, layout};
use crate::{Accounts, Issuer, partials};

fn page(portal: Portal, form: &LoginForm) -> Markup {
    let (title, tagline) = match portal {
        Portal::Citizen => (
            "Citizen Login",
            "Empowering communities to report local issues and connect with authorities for swift resolution.",
        ),
        Portal::Authority => (
            "Authority Login",
            "Authority Portal - Manage community issues and provide swift resolutions.",
        ),
    };

    layout(
        title,
        tagline,
        Width::Narrow,
        partials::login::card(portal, form),
    )
}

fn show(portal: Portal, user: Option<&User>, hx: bool) -> Response {
    if let Some(redirect) = guard::check(user, hx) {
        return redirect;
    }

    page(portal, &LoginForm::default()).into_response()
}

pub(crate) async fn citizen(CurrentUser(user): CurrentUser, HxRequest(hx): HxRequest) -> Response {
    show(Portal::Citizen, user.as_ref(), hx)
}

pub(crate) async fn authority(
    CurrentUser(user): CurrentUser,
    HxRequest(hx): HxRequest,
) -> Response {
    show(Portal::Authority, user.as_ref(), hx)
}

pub(crate) async fn sign_in_citizen(
    jar: SignedCookieJar,
    State(accounts): State<Accounts>,
    State(issuer): State<Issuer>,
    CurrentUser(user): CurrentUser,
    HxRequest(hx): HxRequest,
    Form(fields): Form<Fields>,
) -> Response {
    sign_in(Portal::Citizen, jar, &accounts, &issuer, user, hx, fields).await
}

pub(crate) async fn sign_in_authority(
    jar: SignedCookieJar,
    State(accounts): State<Accounts>,
    State(issuer): State<Issuer>,
    CurrentUser(user): CurrentUser,
    HxRequest(hx): HxRequest,
    Form(fields): Form<Fields>,
) -> Response {
    sign_in(Portal::Authority, jar, &accounts, &issuer, user, hx, fields).await
}

async fn sign_in(
    portal: Portal,
    jar: SignedCookieJar,
    accounts: &Accounts,
    issuer: &Issuer,
    user: Option<User>,
    hx: bool,
    fields: Fields,
) -> Response {
    if let Some(redirect) = guard::check(user.as_ref(), hx) {
        return redirect;
    }

    let mut form = LoginForm::from(fields);

    let status = match form.submit(&**accounts).await {
        Outcome::Authenticated(user) => {
            tracing::info!(role = ?user.role, ?portal, "successful login");

            let token = match issuer.new_token(&user) {
                Ok(token) => token,
                Err(err) => {
                    tracing::error!(?err, "failed to issue session token");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            };

            let jar = jar.add(extract::session_cookie(token));
            let destination = Destination::for_role(user.role).path();

            return (jar, guard::redirect(destination, hx)).into_response();
        }
        Outcome::Failed(err) => {
            tracing::warn!(%err, ?portal, "failed login attempt");
            StatusCode::UNAUTHORIZED
        }
        Outcome::Rejected(rejected) => {
            tracing::debug!(?rejected, ?portal, "submission not attempted");
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };

    if hx {
        // htmx only swaps successful responses
        partials::login::card(portal, &form).into_response()
    } else {
        (status, page(portal, &form)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citizen_page() {
        let html = page(Portal::Citizen, &LoginForm::default()).into_string();
        assert!(html.contains("<title>Citizen Login · LOCALEYES</title>"), "{html}");
        assert!(html.contains(r#"id="login-card""#), "{html}");
        assert!(html.contains("Empowering communities"), "{html}");
    }

    #[test]
    fn test_authority_page() {
        let html = page(Portal::Authority, &LoginForm::default()).into_string();
        assert!(html.contains("<title>Authority Login · LOCALEYES</title>"), "{html}");
        assert!(html.contains("Authority Portal - Manage community issues"), "{html}");
    }

    #[test]
    fn test_show_without_session_renders_form() {
        let response = show(Portal::Citizen, None, false);
        assert_eq!(response.status(), StatusCode::OK);
    }
}
