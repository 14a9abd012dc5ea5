use maud::{Markup, html};

pub(crate) fn eye() -> Markup {
    html! {
        svg class="icon-sm" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="M2 12s3-7 10-7 10 7 10 7-3 7-10 7-10-7-10-7Z" {}
            circle cx="12" cy="12" r="3" {}
        }
    }
}

pub(crate) fn eye_off() -> Markup {
    html! {
        svg class="icon-sm" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="M9.88 9.88a3 3 0 1 0 4.24 4.24" {}
            path d="M10.73 5.08A10.43 10.43 0 0 1 12 5c7 0 10 7 10 7a13.16 13.16 0 0 1-1.67 2.68" {}
            path d="M6.61 6.61A13.526 13.526 0 0 0 2 12s3 7 10 7a9.74 9.74 0 0 0 5.39-1.61" {}
            line x1="2" x2="22" y1="2" y2="22" {}
        }
    }
}

pub(crate) fn users() -> Markup {
    html! {
        svg class="icon" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2" {}
            circle cx="9" cy="7" r="4" {}
            path d="M22 21v-2a4 4 0 0 0-3-3.87" {}
            path d="M16 3.13a4 4 0 0 1 0 7.75" {}
        }
    }
}

pub(crate) fn shield() -> Markup {
    html! {
        svg class="icon" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z" {}
        }
    }
}

pub(crate) fn arrow_left() -> Markup {
    html! {
        svg class="icon-xs" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="m12 19-7-7 7-7" {}
            path d="M19 12H5" {}
        }
    }
}

pub(crate) fn arrow_right() -> Markup {
    html! {
        svg class="icon-sm" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="M5 12h14" {}
            path d="m12 5 7 7-7 7" {}
        }
    }
}
