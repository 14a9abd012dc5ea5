use maud::{DOCTYPE, Markup, html};

use crate::partials;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4/dist/htmx.min.js";
const HTMX_INTEGRITY: &str = "sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+";

/// Width of the content column below the hero.
#[derive(Clone, Copy)]
pub(crate) enum Width {
    Narrow,
    Wide,
}

/// Render a full page: hero banner with `tagline`, followed by `content`.
pub(crate) fn layout(title: &str, tagline: &str, width: Width, content: Markup) -> Markup {
    let column = match width {
        Width::Narrow => "content narrow",
        Width::Wide => "content wide",
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            (partials::head::head(title))

            body class="page" {
                header class="hero" {
                    h1 class="hero-title" { "LOCALEYES" }
                    p class="hero-tagline" { (tagline) }
                }

                main class=(column) {
                    (content)
                }

                script src=(HTMX_SRC) integrity=(HTMX_INTEGRITY) crossorigin="anonymous" {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_wraps_content() {
        let html = layout("Login", "Tagline here", Width::Narrow, html! { p #inner { "hi" } })
            .into_string();

        assert!(html.starts_with("<!DOCTYPE html>"), "{html}");
        assert!(html.contains("LOCALEYES"), "{html}");
        assert!(html.contains("Tagline here"), "{html}");
        assert!(html.contains(r#"<main class="content narrow"><p id="inner">hi</p></main>"#), "{html}");
    }

    #[test]
    fn test_htmx_loaded_with_integrity() {
        let html = layout("Login", "", Width::Wide, html! {}).into_string();
        assert!(html.contains(HTMX_SRC), "{html}");
        assert!(html.contains(HTMX_INTEGRITY), "{html}");
    }
}
