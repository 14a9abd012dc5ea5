use serde::Deserialize;

use crate::auth::{self, Authenticator, User};
use crate::demo;

/// The only message a failed sign in ever shows.
pub(crate) const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

/// Which login page a form belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Portal {
    Citizen,
    Authority,
}

impl Portal {
    /// Path segment used by the form partial routes.
    pub(crate) fn slug(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Authority => "authority",
        }
    }

    /// Page the form lives on and posts to.
    pub(crate) fn path(self) -> &'static str {
        match self {
            Self::Citizen => "/user-login",
            Self::Authority => "/admin-login",
        }
    }
}

/// Raw fields posted by a login form.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Fields {
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) show_password: bool,
    /// Set while the card shows a failed attempt.
    #[serde(default)]
    pub(crate) failed: bool,
    /// Currently selected demo department.
    #[serde(default)]
    pub(crate) department: String,
    /// Department picked in the demo selector.
    #[serde(default)]
    pub(crate) pick: Option<String>,
}

/// State of one login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LoginForm {
    pub(crate) identifier: String,
    pub(crate) secret: String,
    pub(crate) secret_visible: bool,
    pub(crate) submitting: bool,
    pub(crate) error: Option<String>,
    pub(crate) department: Option<String>,
}

/// Reasons a submission never reaches the authenticator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Rejected {
    /// A previous attempt has not settled yet.
    InFlight,
    /// Identifier or secret is empty.
    Incomplete,
}

/// Credentials taken from the form for one attempt.
#[derive(Debug)]
pub(crate) struct Attempt {
    pub(crate) identifier: String,
    pub(crate) secret: String,
}

#[derive(Debug)]
pub(crate) enum Outcome {
    Authenticated(User),
    Failed(auth::Error),
    Rejected(Rejected),
}

impl From<Fields> for LoginForm {
    fn from(fields: Fields) -> Self {
        Self {
            identifier: fields.email,
            secret: fields.password,
            secret_visible: fields.show_password,
            submitting: false,
            error: fields
                .failed
                .then(|| INVALID_CREDENTIALS.to_owned()),
            department: (!fields.department.is_empty()).then_some(fields.department),
        }
    }
}

impl LoginForm {
    pub(crate) fn toggle_secret(&mut self) {
        self.secret_visible = !self.secret_visible;
    }

    pub(crate) fn fill_citizen_demo(&mut self) {
        self.identifier = demo::CITIZEN.identifier.to_owned();
        self.secret = demo::CITIZEN.secret.to_owned();
    }

    /// Fill in the demo account of `label`. Unknown labels leave the form untouched and return
    /// false.
    pub(crate) fn fill_department_demo(&mut self, label: &str) -> bool {
        let Some(credentials) = demo::department(label) else {
            return false;
        };

        self.identifier = credentials.identifier.to_owned();
        self.secret = credentials.secret.to_owned();
        self.department = Some(label.to_owned());
        true
    }

    /// Start a submission: mark the form as submitting and clear the previous error.
    pub(crate) fn begin_submit(&mut self) -> Result<Attempt, Rejected> {
        if self.submitting {
            return Err(Rejected::InFlight);
        }

        if self.identifier.is_empty() || self.secret.is_empty() {
            return Err(Rejected::Incomplete);
        }

        self.submitting = true;
        self.error = None;

        Ok(Attempt {
            identifier: self.identifier.clone(),
            secret: self.secret.clone(),
        })
    }

    /// Settle a submission started with [`LoginForm::begin_submit`].
    pub(crate) fn finish_submit<T>(&mut self, result: &Result<T, auth::Error>) {
        if result.is_err() {
            self.error = Some(INVALID_CREDENTIALS.to_owned());
        }

        self.submitting = false;
    }

    /// Run one complete submission against `authenticator`.
    pub(crate) async fn submit<A: Authenticator>(&mut self, authenticator: &A) -> Outcome {
        let attempt = match self.begin_submit() {
            Ok(attempt) => attempt,
            Err(rejected) => return Outcome::Rejected(rejected),
        };

        let result = authenticator
            .login(&attempt.identifier, &attempt.secret)
            .await;

        self.finish_submit(&result);

        match result {
            Ok(user) => Outcome::Authenticated(user),
            Err(err) => Outcome::Failed(err),
        }
    }
}
