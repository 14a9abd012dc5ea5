use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use maud::{Markup, html};

use crate::assets;
use crate::auth::{Role, User};
use crate::extract::{self, CurrentUser};
use crate::guard::Destination;
use crate::partials::layout::{Width, layout};

fn page(user: &User) -> Markup {
    let (title, icon) = match user.role {
        Role::Citizen => ("Citizen Dashboard", assets::icons::users()),
        Role::Authority => ("Authority Dashboard", assets::icons::shield()),
    };

    let content = html! {
        div class="card" {
            div class="card-header" {
                h2 class="card-title" { (icon) (title) }
                p class="card-description" { "Signed in as " (user.email) }
            }

            div class="card-body" {
                @if let Some(department) = &user.department {
                    div class="demo-card" {
                        div class="demo-card-title" {
                            (assets::icons::shield())
                            span { (department) " Department" }
                        }
                    }
                }

                form method="post" action="/logout" {
                    button type="submit" class="btn btn-outline" { "Sign out" }
                }
            }
        }
    };

    layout(
        title,
        "Empowering communities to report local issues and connect with authorities for swift resolution.",
        Width::Narrow,
        content,
    )
}

/// Render the landing page at `here`, bouncing users that belong elsewhere.
fn land(here: Destination, user: Option<User>) -> Response {
    let Some(user) = user else {
        return Redirect::to("/login").into_response();
    };

    let own = Destination::for_role(user.role);

    if own != here {
        return Redirect::to(own.path()).into_response();
    }

    page(&user).into_response()
}

pub(crate) async fn dashboard(CurrentUser(user): CurrentUser) -> Response {
    land(Destination::Dashboard, user)
}

pub(crate) async fn authority(CurrentUser(user): CurrentUser) -> Response {
    land(Destination::Authority, user)
}

pub(crate) async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    tracing::info!("logout");
    (jar.remove(extract::expired_session_cookie()), Redirect::to("/login"))
}
