use axum::extract::{Form, Path};
use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::assets;
use crate::demo;
use crate::extract::{CurrentUser, HxRequest};
use crate::form::{Fields, LoginForm, Portal};
use crate::guard;

/// Fixed wording of a login card.
struct Text {
    title: &'static str,
    description: &'static str,
    placeholder: &'static str,
    submit: &'static str,
    submit_class: &'static str,
    demo_heading: &'static str,
    switch: (&'static str, &'static str),
}

fn text(portal: Portal) -> Text {
    match portal {
        Portal::Citizen => Text {
            title: "Citizen Login",
            description: "Sign in to report community issues and track their progress",
            placeholder: "Email address",
            submit: "Sign In as Citizen",
            submit_class: "btn btn-primary",
            demo_heading: "Demo Account",
            switch: (
                Portal::Authority.path(),
                "Are you an authority/admin? Sign in here",
            ),
        },
        Portal::Authority => Text {
            title: "Authority Login",
            description: "Sign in to manage and resolve community issues",
            placeholder: "Authority email address",
            submit: "Sign In as Authority",
            submit_class: "btn btn-secondary",
            demo_heading: "Demo Accounts",
            switch: (Portal::Citizen.path(), "Are you a citizen? Sign in here"),
        },
    }
}

/// Swap target of every control that re-renders the card.
const CARD: &str = "#login-card";

fn citizen_demo() -> Markup {
    html! {
        button type="button" class="btn btn-outline"
            hx-post={ "/f/" (Portal::Citizen.slug()) "/demo" }
            hx-include="#login-form"
            hx-target=(CARD)
            hx-swap="outerHTML" {
            (assets::icons::users())
            div {
                div { "Use Demo Citizen Account" }
                span class="badge" { (demo::CITIZEN.identifier) }
            }
        }
    }
}

fn department_demo(form: &LoginForm) -> Markup {
    html! {
        select class="select" name="pick" aria-label="Demo department"
            hx-post={ "/f/" (Portal::Authority.slug()) "/demo" }
            hx-trigger="change"
            hx-include="#login-form"
            hx-target=(CARD)
            hx-swap="outerHTML" {
            option value="" disabled selected[form.department.is_none()] {
                "Select Department Demo Account"
            }
            @for (label, _) in &demo::DEPARTMENTS {
                option value=(label) selected[form.department.as_deref() == Some(*label)] {
                    (label) " Department"
                }
            }
        }

        @if let Some(department) = &form.department {
            div class="demo-card" {
                div class="demo-card-title" {
                    (assets::icons::shield())
                    span { (department) " Demo" }
                }
                div class="muted" {
                    "Email: "
                    @if form.identifier.is_empty() {
                        "Select department above"
                    } @else {
                        (form.identifier)
                    }
                }
            }
        }
    }
}

/// Render the login card of `portal` in the state of `form`.
pub(crate) fn card(portal: Portal, form: &LoginForm) -> Markup {
    let text = text(portal);
    let icon = match portal {
        Portal::Citizen => assets::icons::users(),
        Portal::Authority => assets::icons::shield(),
    };

    html! {
        div #login-card class="card" {
            div class="card-header" {
                h2 class="card-title" { (icon) (text.title) }
                p class="card-description" { (text.description) }
            }

            div class="card-body" {
                form #login-form class="form" method="post" action=(portal.path())
                    hx-post=(portal.path())
                    hx-target=(CARD)
                    hx-swap="outerHTML"
                    hx-disabled-elt="find button[type='submit']" {
                    input type="hidden" name="show_password"
                        value=(if form.secret_visible { "true" } else { "false" });

                    @if form.error.is_some() {
                        input type="hidden" name="failed" value="true";
                    }

                    @if let Some(department) = &form.department {
                        input type="hidden" name="department" value=(department);
                    }

                    input class="input" type="email" name="email" placeholder=(text.placeholder)
                        value=(form.identifier) required;

                    div class="input-wrap" {
                        input class="input" name="password" placeholder="Password"
                            type=(if form.secret_visible { "text" } else { "password" })
                            value=(form.secret) required;

                        button type="button" class="reveal"
                            aria-label=(if form.secret_visible { "Hide password" } else { "Show password" })
                            hx-post={ "/f/" (portal.slug()) "/toggle" }
                            hx-include="#login-form"
                            hx-target=(CARD)
                            hx-swap="outerHTML" {
                            @if form.secret_visible {
                                (assets::icons::eye_off())
                            } @else {
                                (assets::icons::eye())
                            }
                        }
                    }

                    @if let Some(error) = &form.error {
                        div class="error" role="alert" { (error) }
                    }

                    button type="submit" class=(text.submit_class) disabled[form.submitting] {
                        @if form.submitting {
                            "Signing In..."
                        } @else {
                            span class="when-idle" { (text.submit) }
                            span class="when-busy" { "Signing In..." }
                        }
                    }
                }

                div class="divider" { span { (text.demo_heading) } }

                @match portal {
                    Portal::Citizen => { (citizen_demo()) }
                    Portal::Authority => { (department_demo(form)) }
                }

                div class="links" {
                    a class="link" href=(text.switch.0) { (text.switch.1) }
                }

                div class="links" {
                    a class="link" href="/" { (assets::icons::arrow_left()) "Back to Home" }
                }
            }
        }
    }
}

/// Flip the visibility of the password field.
pub(crate) async fn toggle(
    CurrentUser(user): CurrentUser,
    HxRequest(hx): HxRequest,
    Path(portal): Path<Portal>,
    Form(fields): Form<Fields>,
) -> Response {
    if let Some(redirect) = guard::check(user.as_ref(), hx) {
        return redirect;
    }

    let mut form = LoginForm::from(fields);
    form.toggle_secret();

    card(portal, &form).into_response()
}

/// Fill the form with a demo account. The authority portal picks the account by department.
pub(crate) async fn fill_demo(
    CurrentUser(user): CurrentUser,
    HxRequest(hx): HxRequest,
    Path(portal): Path<Portal>,
    Form(mut fields): Form<Fields>,
) -> Response {
    if let Some(redirect) = guard::check(user.as_ref(), hx) {
        return redirect;
    }

    let pick = fields.pick.take();
    let mut form = LoginForm::from(fields);

    match portal {
        Portal::Citizen => form.fill_citizen_demo(),
        Portal::Authority => {
            if let Some(label) = pick
                && !form.fill_department_demo(&label)
            {
                tracing::debug!(%label, "unknown demo department");
            }
        }
    }

    card(portal, &form).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::INVALID_CREDENTIALS;

    #[test]
    fn test_citizen_card() {
        let html = card(Portal::Citizen, &LoginForm::default()).into_string();

        assert!(html.contains("Citizen Login"), "{html}");
        assert!(html.contains(r#"action="/user-login""#), "{html}");
        assert!(html.contains(r#"hx-post="/user-login""#), "{html}");
        assert!(
            html.contains(r#"hx-disabled-elt="find button[type='submit']""#),
            "{html}"
        );
        assert!(html.contains("Sign In as Citizen"), "{html}");
        assert!(html.contains(r#"hx-post="/f/citizen/demo""#), "{html}");
        assert!(html.contains(r#"href="/admin-login""#), "{html}");
        assert!(!html.contains(r#"name="pick""#), "{html}");
    }

    #[test]
    fn test_authority_card_lists_departments() {
        let html = card(Portal::Authority, &LoginForm::default()).into_string();

        assert!(html.contains("Authority Login"), "{html}");
        assert!(html.contains(r#"action="/admin-login""#), "{html}");
        assert!(html.contains(r#"name="pick""#), "{html}");
        for label in ["PWD", "Water", "KSEB", "Waste Management"] {
            assert!(html.contains(&format!(r#"<option value="{label}""#)), "{html}");
        }
        assert!(html.contains(r#"href="/user-login""#), "{html}");
        assert!(!html.contains("demo-card"), "{html}");
    }

    #[test]
    fn test_fields_are_required() {
        let html = card(Portal::Citizen, &LoginForm::default()).into_string();
        assert_eq!(html.matches("required").count(), 2, "{html}");
    }

    #[test]
    fn test_secret_masked_by_default() {
        let form = LoginForm {
            secret: "hunter2".into(),
            ..LoginForm::default()
        };
        let html = card(Portal::Citizen, &form).into_string();

        assert!(html.contains(r#"type="password""#), "{html}");
        assert!(html.contains(r#"name="show_password" value="false""#), "{html}");
        assert!(html.contains("Show password"), "{html}");
    }

    #[test]
    fn test_secret_visible() {
        let form = LoginForm {
            secret: "hunter2".into(),
            secret_visible: true,
            ..LoginForm::default()
        };
        let html = card(Portal::Citizen, &form).into_string();

        assert!(!html.contains(r#"type="password""#), "{html}");
        assert!(html.contains(r#"value="hunter2""#), "{html}");
        assert!(html.contains(r#"name="show_password" value="true""#), "{html}");
        assert!(html.contains("Hide password"), "{html}");
    }

    #[test]
    fn test_error_shown() {
        let form = LoginForm {
            error: Some(INVALID_CREDENTIALS.into()),
            ..LoginForm::default()
        };
        let html = card(Portal::Authority, &form).into_string();

        assert!(html.contains(r#"role="alert""#), "{html}");
        assert!(html.contains(INVALID_CREDENTIALS), "{html}");
        assert!(html.contains(r#"name="failed" value="true""#), "{html}");
    }

    #[test]
    fn test_no_error_by_default() {
        let html = card(Portal::Authority, &LoginForm::default()).into_string();
        assert!(!html.contains(r#"role="alert""#), "{html}");
        assert!(!html.contains(r#"name="failed""#), "{html}");
    }

    #[test]
    fn test_submitting_disables_submit() {
        let form = LoginForm {
            submitting: true,
            ..LoginForm::default()
        };
        let html = card(Portal::Citizen, &form).into_string();

        assert!(html.contains("disabled"), "{html}");
        assert!(!html.contains("Sign In as Citizen"), "{html}");
        assert!(html.contains("Signing In..."), "{html}");
    }

    #[test]
    fn test_idle_submit_enabled() {
        let html = card(Portal::Citizen, &LoginForm::default()).into_string();
        let submit = html.find(r#"type="submit""#).expect("submit button");
        let end = html[submit..].find('>').expect("tag end");
        assert!(!html[submit..submit + end].contains("disabled"), "{html}");
    }

    #[test]
    fn test_selected_department_card() {
        let mut form = LoginForm::default();
        form.fill_department_demo("Water");
        let html = card(Portal::Authority, &form).into_string();

        assert!(html.contains("Water Demo"), "{html}");
        assert!(html.contains("Email: water@kerala.localeyes.com"), "{html}");
        assert!(html.contains(r#"<option value="Water" selected>"#), "{html}");
        assert!(html.contains(r#"name="department" value="Water""#), "{html}");
    }
}
