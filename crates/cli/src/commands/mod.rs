//! Subcommand implementations.
//!
//! Every resource command drives the same screen machinery a graphical
//! front end would: mount (fetch), pick an entity, open its dialog or run an
//! inline action, and let the screen refetch. Toasts go to the terminal.

pub mod coupons;
pub mod customers;
pub mod images;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod session;
pub mod settings;
pub mod sub_categories;
pub mod upload;
pub mod users;

use shopdesk_admin::config::ConfigError;
use shopdesk_admin::controller::{Resource, ResourceList};
use shopdesk_admin::dialog::SubmitOutcome;
use shopdesk_admin::reorder::ReorderError;
use shopdesk_admin::session::SessionError;
use shopdesk_admin::{ApiClient, ApiError, ClientConfig};
use shopdesk_core::CurrencyCode;
use thiserror::Error;
use tracing::{debug, warn};

use crate::output::ConsoleNotifier;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Reorder(#[from] ReorderError),

    #[error("No {0} matches {1}")]
    NotFound(&'static str, String),

    #[error("Missing required fields: {}", .0.join(", "))]
    Invalid(Vec<&'static str>),

    #[error("Invalid value for {0}: {1}")]
    InvalidArg(&'static str, String),

    /// The failure was already shown as an error toast.
    #[error("{0} failed")]
    Reported(&'static str),
}

/// Shared state of a command run.
pub struct Context {
    pub client: ApiClient,
    pub console: ConsoleNotifier,
}

impl Context {
    /// Build the API context from the environment and the stored session.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        debug!(?config, "Loaded configuration");
        let client = ApiClient::from_config(&config)?;
        if !client.is_authenticated() {
            warn!("No session token; requests are sent without authorization");
        }
        Ok(Self {
            client,
            console: ConsoleNotifier::new(),
        })
    }

    /// Fetch `list`, failing the command when the fetch fails.
    pub async fn load<T: Resource>(&mut self, list: &mut ResourceList<T>) -> Result<(), CliError> {
        if list.load(&self.client, &mut self.console).await {
            Ok(())
        } else {
            Err(CliError::Reported(T::PLURAL))
        }
    }

    /// Store currency for price display; USD when settings are unavailable.
    pub async fn currency(&self) -> CurrencyCode {
        match self.client.get_settings().await {
            Ok(settings) => settings.currency_code(),
            Err(e) => {
                debug!(error = %e, "Settings unavailable, assuming default currency");
                CurrencyCode::default()
            }
        }
    }
}

/// Turn a dialog outcome into a command result.
pub fn saved<E>(outcome: SubmitOutcome<E>) -> Result<E, CliError> {
    match outcome {
        SubmitOutcome::Saved(entity) => Ok(entity),
        SubmitOutcome::Invalid(fields) => Err(CliError::Invalid(fields)),
        SubmitOutcome::Failed(e) => Err(e.into()),
        SubmitOutcome::NotOpen => Err(CliError::Reported("dialog")),
    }
}

/// Fail with `Reported` when a screen mutation did not go through.
pub fn applied<R>(result: Option<R>, what: &'static str) -> Result<R, CliError> {
    result.ok_or(CliError::Reported(what))
}
