//! Connection and pull request settings.
//!
//! Every field is resolved with the same three tiers: an explicit value
//! (command line or config file), then the first non-empty environment
//! variable Jenkins exports for it, then a fixed default. Resolution happens
//! once at process entry and the resulting [`Settings`] is passed by
//! reference into each operation.

use std::fmt;

use log::debug;

use crate::environment;

/// Description of one resolvable setting.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub env: &'static [&'static str],
    pub default: &'static str,
}

pub const BASE_API_LINK: Field = Field {
    name: "base_api_link",
    env: &["BASE_API_LINK"],
    default: "0",
};
pub const USERNAME: Field = Field {
    name: "username",
    env: &["USERNAME"],
    default: "0",
};
pub const PASSWORD: Field = Field {
    name: "password",
    env: &["PASSWD"],
    default: "0",
};
pub const SLUG: Field = Field {
    name: "slug",
    env: &["SLUG"],
    default: "0",
};
pub const PROJECT_NAME: Field = Field {
    name: "project_name",
    env: &["PROJECT_NAME", "PROJECT"],
    default: "0",
};
pub const PULL_REQUEST_ID: Field = Field {
    name: "pull_request_id",
    env: &["PULL_REQUEST_ID", "PR_ID"],
    default: "0",
};
pub const GIT_COMMIT: Field = Field {
    name: "git_commit",
    env: &["GIT_COMMIT"],
    default: "TEST_HASH",
};
pub const CHECK_AUTHOR: Field = Field {
    name: "check_author",
    env: &["CHECK_AUTHOR"],
    default: "jenkins",
};
pub const BUILD_URL: Field = Field {
    name: "build_url",
    env: &["BUILD_URL"],
    default: "http://jenkins.test",
};
/// Key reported with a build status.
pub const STATUS_KEY: Field = Field {
    name: "status_key",
    env: &["JOB_NAME"],
    default: "Custom BUILD_TAG",
};
/// Build link reported with a build status.
pub const STATUS_URL: Field = Field {
    name: "status_url",
    env: &["BUILD_URL"],
    default: "http://custombuildurl.com",
};

/// Resolve a single value: explicit, then environment, then default.
///
/// Only a missing explicit value or an unset variable falls through; an
/// empty string is a value like any other.
///
/// # Examples
///
/// ```
/// use jecket::settings::resolve;
///
/// let value = resolve("slug", Some("PROJ"), &["JECKET_DOC_UNSET"], "0");
/// assert_eq!(value, "PROJ");
/// let value = resolve("slug", None, &["JECKET_DOC_UNSET"], "0");
/// assert_eq!(value, "0");
/// ```
#[must_use]
pub fn resolve(field: &str, explicit: Option<&str>, env_names: &[&str], default: &str) -> String {
    if let Some(value) = explicit {
        return value.to_owned();
    }
    if let Some((key, value)) = environment::first_set(env_names) {
        debug!("{field} not provided, using environment variable {key}");
        return value;
    }
    debug!("{field} not provided and not in environment, using default {default:?}");
    default.to_owned()
}

/// Resolve `field` using its declared environment names and default.
#[must_use]
pub fn resolve_field(field: Field, explicit: Option<&str>) -> String {
    resolve(field.name, explicit, field.env, field.default)
}

/// Values supplied explicitly by the caller.
///
/// `None` defers to the environment and then to the default.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_api_link: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub slug: Option<String>,
    pub project_name: Option<String>,
    pub pull_request_id: Option<String>,
    pub git_commit: Option<String>,
    pub check_author: Option<String>,
    pub build_url: Option<String>,
}

/// Identifies the target pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub slug: String,
    pub project_name: String,
    pub pull_request_id: String,
}

/// Basic authentication credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fully resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_api_link: String,
    pub credentials: Credentials,
    pub pull_request: PullRequestRef,
    pub git_commit: String,
    pub check_author: String,
    pub build_url: String,
}

impl Settings {
    /// Resolve every field from `overrides`, the environment and defaults.
    #[must_use]
    pub fn resolve(overrides: &Overrides) -> Self {
        Self {
            base_api_link: resolve_field(BASE_API_LINK, overrides.base_api_link.as_deref()),
            credentials: Credentials {
                username: resolve_field(USERNAME, overrides.username.as_deref()),
                password: resolve_field(PASSWORD, overrides.password.as_deref()),
            },
            pull_request: PullRequestRef {
                slug: resolve_field(SLUG, overrides.slug.as_deref()),
                project_name: resolve_field(PROJECT_NAME, overrides.project_name.as_deref()),
                pull_request_id: resolve_field(
                    PULL_REQUEST_ID,
                    overrides.pull_request_id.as_deref(),
                ),
            },
            git_commit: resolve_field(GIT_COMMIT, overrides.git_commit.as_deref()),
            check_author: resolve_field(CHECK_AUTHOR, overrides.check_author.as_deref()),
            build_url: resolve_field(BUILD_URL, overrides.build_url.as_deref()),
        }
    }
}
