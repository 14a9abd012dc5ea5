use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use serde::{Deserialize, Serialize};

use crate::demo;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = digest::SHA256_OUTPUT_LEN;

/// PBKDF2-HMAC-SHA256 rounds used unless configured otherwise.
pub(crate) const DEFAULT_ITERATIONS: NonZeroU32 = NonZeroU32::new(600_000).unwrap();

/// Salt and secret of the stand-in hash checked for unknown identifiers.
const DUMMY_SALT: [u8; SALT_LEN] = *b"localeyes-absent";
const DUMMY_SECRET: &str = "no account";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    Citizen,
    Authority,
}

/// An authenticated principal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct User {
    pub(crate) email: String,
    pub(crate) role: Role,
    /// Department label, only set for authorities.
    pub(crate) department: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("no account for {0}")]
    UnknownAccount(String),

    #[error("wrong secret for {0}")]
    InvalidSecret(String),

    #[error("failed to generate salt")]
    Salt,

    #[error("failed to read accounts from {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse accounts in {path}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Something that can turn an identifier and a secret into a [`User`].
pub(crate) trait Authenticator {
    async fn login(&self, identifier: &str, secret: &str) -> Result<User, Error>;
}

/// Account definition as found in an accounts file.
#[derive(Debug, Deserialize)]
pub(crate) struct AccountSpec {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) role: Role,
    #[serde(default)]
    pub(crate) department: Option<String>,
}

struct Account {
    user: User,
    salt: [u8; SALT_LEN],
    hash: [u8; HASH_LEN],
}

/// In-memory account directory with PBKDF2 hashed secrets.
pub(crate) struct Directory {
    accounts: HashMap<String, Account>,
    rng: SystemRandom,
    iterations: NonZeroU32,
    /// Verified in place of a missing account so both failures cost the same.
    absent: Account,
}

fn normalize(identifier: &str) -> String {
    identifier.trim().to_ascii_lowercase()
}

fn derive(iterations: NonZeroU32, salt: &[u8; SALT_LEN], secret: &str) -> [u8; HASH_LEN] {
    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(ALGORITHM, iterations, salt, secret.as_bytes(), &mut hash);
    hash
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl Directory {
    pub(crate) fn new(iterations: NonZeroU32) -> Self {
        let absent = Account {
            user: User {
                email: String::new(),
                role: Role::Citizen,
                department: None,
            },
            salt: DUMMY_SALT,
            hash: derive(iterations, &DUMMY_SALT, DUMMY_SECRET),
        };

        Self {
            accounts: HashMap::new(),
            rng: SystemRandom::new(),
            iterations,
            absent,
        }
    }

    /// Directory containing every demo account.
    pub(crate) fn with_demo_accounts(iterations: NonZeroU32) -> Result<Self, Error> {
        let mut directory = Self::new(iterations);

        for (credentials, role, department) in demo::accounts() {
            directory.insert(AccountSpec {
                email: credentials.identifier.to_owned(),
                password: credentials.secret.to_owned(),
                role,
                department: department.map(str::to_owned),
            })?;
        }

        Ok(directory)
    }

    /// Add or replace an account.
    pub(crate) fn insert(&mut self, spec: AccountSpec) -> Result<(), Error> {
        let mut salt = [0u8; SALT_LEN];
        self.rng.fill(&mut salt).map_err(|_| Error::Salt)?;

        let hash = derive(self.iterations, &salt, &spec.password);

        let key = normalize(&spec.email);
        let user = User {
            email: key.clone(),
            department: match spec.role {
                Role::Authority => spec.department,
                Role::Citizen => None,
            },
            role: spec.role,
        };

        self.accounts.insert(key, Account { user, salt, hash });
        Ok(())
    }

    /// Load additional accounts from a JSON array of [`AccountSpec`] and return how many were read.
    pub(crate) fn load(&mut self, path: &Path) -> Result<usize, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;

        let specs: Vec<AccountSpec> =
            serde_json::from_str(&content).map_err(|source| Error::Json {
                path: path.to_owned(),
                source,
            })?;

        let count = specs.len();

        for spec in specs {
            self.insert(spec)?;
        }

        Ok(count)
    }

    pub(crate) fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Check `secret` against `account`, or against the stand-in hash if there is no account.
    fn verify(&self, account: Option<&Account>, secret: &str) -> bool {
        let account = account.unwrap_or(&self.absent);

        pbkdf2::verify(
            ALGORITHM,
            self.iterations,
            &account.salt,
            secret.as_bytes(),
            &account.hash,
        )
        .is_ok()
    }
}

impl Authenticator for Directory {
    async fn login(&self, identifier: &str, secret: &str) -> Result<User, Error> {
        let key = normalize(identifier);
        let account = self.accounts.get(&key);
        let verified = self.verify(account, secret);

        match account {
            None => Err(Error::UnknownAccount(key)),
            Some(_) if !verified => Err(Error::InvalidSecret(key)),
            Some(account) => Ok(account.user.clone()),
        }
    }
}

/// Cheap rounds for directories built in tests.
#[cfg(test)]
pub(crate) const TEST_ITERATIONS: NonZeroU32 = NonZeroU32::new(1_000).unwrap();
