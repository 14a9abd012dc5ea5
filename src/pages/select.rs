use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::assets;
use crate::demo;
use crate::extract::{CurrentUser, HxRequest};
use crate::form::Portal;
use crate::guard;
use crate::partials::layout::{Width, layout};

/// One entry point card on the selector page.
struct Entry {
    portal: Portal,
    class: &'static str,
    title: &'static str,
    description: &'static str,
    bullets: [&'static str; 4],
    button: &'static str,
    button_class: &'static str,
}

static ENTRIES: [Entry; 2] = [
    Entry {
        portal: Portal::Citizen,
        class: "card citizen",
        title: "Citizen Portal",
        description: "Report community issues, track progress, and upvote important concerns",
        bullets: [
            "Report local issues and problems",
            "Track issue resolution progress",
            "Upvote and prioritize community concerns",
            "Receive updates on reported issues",
        ],
        button: "Login as Citizen",
        button_class: "btn btn-primary",
    },
    Entry {
        portal: Portal::Authority,
        class: "card authority",
        title: "Authority Portal",
        description: "Manage and resolve community issues assigned to your department",
        bullets: [
            "View assigned department issues",
            "Update issue status and progress",
            "Prioritize issues by community votes",
            "Communicate with citizens",
        ],
        button: "Login as Authority",
        button_class: "btn btn-secondary",
    },
];

/// Departments whose demo email is listed on the authority card.
static LISTED_DEPARTMENTS: [&str; 3] = ["PWD", "Water", "Waste Management"];

fn demo_accounts(portal: Portal) -> Markup {
    html! {
        div class="demo-list" {
            @match portal {
                Portal::Citizen => {
                    div class="label" { "Demo Account:" }
                    div class="mono" { (demo::CITIZEN.identifier) }
                }
                Portal::Authority => {
                    div class="label" { "Demo Accounts:" }
                    @for credentials in LISTED_DEPARTMENTS.iter().filter_map(|label| demo::department(label)) {
                        div class="mono" { (credentials.identifier) }
                    }
                }
            }
        }
    }
}

fn entry(entry: &Entry) -> Markup {
    let icon = match entry.portal {
        Portal::Citizen => assets::icons::users(),
        Portal::Authority => assets::icons::shield(),
    };

    html! {
        div class=(entry.class) {
            div class="card-header" {
                div class="portal-icon" { (icon) }
                h2 class="card-title" { (entry.title) }
                p class="card-description" { (entry.description) }
            }

            div class="card-body" {
                ul class="bullets" {
                    @for bullet in &entry.bullets {
                        li { (bullet) }
                    }
                }

                a class=(entry.button_class) href=(entry.portal.path()) {
                    (entry.button)
                    (assets::icons::arrow_right())
                }

                (demo_accounts(entry.portal))
            }
        }
    }
}

/// Role selection page linking to both login pages.
pub(crate) fn page() -> Markup {
    let content = html! {
        div class="section-title" {
            h2 { "Choose Your Login" }
            p class="card-description" { "Select the appropriate login portal based on your role" }
        }

        div class="grid" {
            @for item in &ENTRIES {
                (entry(item))
            }
        }
    };

    layout(
        "Choose Your Login",
        "Empowering communities to report local issues and connect with authorities for swift resolution.",
        Width::Wide,
        content,
    )
}

pub(crate) async fn select(CurrentUser(user): CurrentUser, HxRequest(hx): HxRequest) -> Response {
    if let Some(redirect) = guard::check(user.as_ref(), hx) {
        return redirect;
    }

    page().into_response()
}
