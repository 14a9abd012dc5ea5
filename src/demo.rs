//! Fixed demo accounts offered on the login pages.

use crate::auth::Role;

/// A literal identifier/secret pair used to pre-fill a login form.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) identifier: &'static str,
    pub(crate) secret: &'static str,
}

/// Demo account for the citizen portal.
pub(crate) static CITIZEN: Credentials = Credentials {
    identifier: "citizen@example.com",
    secret: "password123",
};

/// Demo accounts for the authority portal keyed by department label, in the order they are offered.
pub(crate) static DEPARTMENTS: [(&str, Credentials); 4] = [
    (
        "PWD",
        Credentials {
            identifier: "pwd@kseb.localeyes.com",
            secret: "authority123",
        },
    ),
    (
        "Water",
        Credentials {
            identifier: "water@kerala.localeyes.com",
            secret: "authority123",
        },
    ),
    (
        "KSEB",
        Credentials {
            identifier: "kseb@kerala.localeyes.com",
            secret: "authority123",
        },
    ),
    (
        "Waste Management",
        Credentials {
            identifier: "waste@kerala.localeyes.com",
            secret: "authority123",
        },
    ),
];

/// Look up the demo pair of a department. Labels are matched exactly.
pub(crate) fn department(label: &str) -> Option<&'static Credentials> {
    DEPARTMENTS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, credentials)| credentials)
}

/// All demo accounts with the role and department they sign in as.
pub(crate) fn accounts() -> impl Iterator<Item = (&'static Credentials, Role, Option<&'static str>)> {
    std::iter::once((&CITIZEN, Role::Citizen, None)).chain(
        DEPARTMENTS
            .iter()
            .map(|(name, credentials)| (credentials, Role::Authority, Some(*name))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_kseb() {
        let credentials = department("KSEB").expect("KSEB is a demo department");
        assert_eq!(credentials.identifier, "kseb@kerala.localeyes.com");
        assert_eq!(credentials.secret, "authority123");
    }

    #[test]
    fn test_department_with_space() {
        let credentials = department("Waste Management").expect("label with space");
        assert_eq!(credentials.identifier, "waste@kerala.localeyes.com");
    }

    #[test]
    fn test_department_unknown_and_case_sensitive() {
        assert!(department("Fire").is_none());
        assert!(department("kseb").is_none());
        assert!(department("").is_none());
    }

    #[test]
    fn test_accounts_cover_every_demo_pair() {
        let accounts: Vec<_> = accounts().collect();
        assert_eq!(accounts.len(), 5);
        assert_eq!(accounts[0].1, Role::Citizen);
        assert!(accounts[1..].iter().all(|(_, role, department)| {
            *role == Role::Authority && department.is_some()
        }));
    }
}
