//! # CLI Module
//!
//! Command implementations of the `newreleases` binary. Each submodule owns
//! the clap argument types of one command group and the functions `main`
//! dispatches to.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`get_auth_key`] - sign in and store one of the account's auth keys
//! - [`configure`] - store an auth key typed at the prompt
//! - [`auth`] - list the account's auth keys
//!
//! ### Projects and releases
//!
//! - [`project`] - list, search, add, update and remove tracked projects
//! - [`release`] - project releases, the latest release and release notes
//! - [`provider`] - supported and used project providers
//! - [`tag`] - project tags
//!
//! ### Notifications
//!
//! - [`integrations`] - Slack, Telegram, Discord, Matrix and webhook targets
//!
//! ## Output
//!
//! Results are printed as tables on standard output. Outcomes that are not
//! failures, like an empty list or a missing project, are reported with the
//! status macros. Errors are returned to `main`, which prints them on
//! standard error and exits with status 1.

pub mod auth;
pub mod configure;
pub mod get_auth_key;
pub mod integrations;
pub mod project;
pub mod provider;
pub mod release;
pub mod tag;

use clap::Args;

use crate::{
    Res,
    api::Client,
    config::{CONFIGURATION_HELP, Config, ConfigError},
    types::ProjectRef,
};

pub use auth::list_auth_keys;
pub use configure::configure;
pub use get_auth_key::get_auth_key;

/// Positional project reference shared by the project and release commands.
#[derive(Args, Debug, Clone)]
pub struct ProjectRefArgs {
    /// PROVIDER PROJECT_NAME or PROJECT_ID
    #[arg(value_name = "PROJECT", num_args = 1..=2, required = true)]
    pub project: Vec<String>,
}

impl ProjectRefArgs {
    pub fn project_ref(&self) -> Res<ProjectRef> {
        ProjectRef::from_args(&self.project)
            .ok_or_else(|| "expected PROVIDER PROJECT_NAME or PROJECT_ID".into())
    }
}

/// Builds an authenticated client, printing the setup instructions when no
/// auth key is configured.
pub fn client(config: &Config) -> Res<Client> {
    if config.auth_key.is_none() {
        eprintln!("{CONFIGURATION_HELP}");
        return Err(ConfigError::AuthKeyNotConfigured.into());
    }
    Client::from_config(config)
}
