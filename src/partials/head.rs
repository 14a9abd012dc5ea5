use maud::{Markup, html};

/// Render the `<head>` element with meta tags and styles.
pub(crate) fn head(title: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            link rel="stylesheet" type="text/css" href="/app.css";
            link rel="shortcut icon" type="image/svg+xml" href="/favicon.svg";
            title { (title) " · LOCALEYES" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        let html = head("Citizen Login").into_string();
        assert!(html.contains("<title>Citizen Login · LOCALEYES</title>"), "{html}");
    }

    #[test]
    fn test_assets_linked() {
        let html = head("x").into_string();
        assert!(html.contains(r#"href="/app.css""#), "{html}");
        assert!(html.contains(r#"href="/favicon.svg""#), "{html}");
    }

    #[test]
    fn test_title_is_escaped() {
        let html = head("<script>").into_string();
        assert!(!html.contains("<script>"), "{html}");
    }
}
