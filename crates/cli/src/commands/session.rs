//! Session commands.
//!
//! The backend's login flow issues the token; these commands only store,
//! show and forget it.

use clap::Subcommand;
use secrecy::SecretString;
use shopdesk_admin::config::session_path_from_env;
use shopdesk_admin::session::{AdminProfile, Session, SessionStore};
use shopdesk_core::{AdminRole, AdminUserId};
use tracing::info;

use super::CliError;
use crate::output;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Show the stored session (never the token itself)
    Show,
    /// Store a bearer token and, optionally, the admin it belongs to
    SetToken {
        #[arg(long)]
        token: String,
        #[arg(long, requires_all = ["name", "email"])]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "admin")]
        role: AdminRole,
    },
    /// Forget the stored session
    Logout,
}

pub fn run(action: SessionAction) -> Result<(), CliError> {
    let store = SessionStore::new(session_path_from_env()?);

    match action {
        SessionAction::Show => match store.load()? {
            Some(session) => {
                let user = session.user.as_ref();
                output::details(&[
                    ("Session", store.path().display().to_string()),
                    ("Token", "stored".to_string()),
                    ("Name", output::opt(user.map(|u| u.name.as_str()))),
                    ("Email", output::opt(user.map(|u| u.email.as_str()))),
                    ("Role", output::opt(user.map(|u| u.role))),
                ]);
            }
            None => output::line(format!("Not signed in ({})", store.path().display())),
        },
        SessionAction::SetToken {
            token,
            id,
            name,
            email,
            role,
        } => {
            if token.trim().is_empty() {
                return Err(CliError::InvalidArg("--token", "must not be empty".to_string()));
            }
            let user = match (id, name, email) {
                (Some(id), Some(name), Some(email)) => Some(AdminProfile {
                    id: AdminUserId::new(id),
                    name,
                    email,
                    role,
                }),
                _ => None,
            };
            store.save(&Session {
                token: SecretString::from(token),
                user,
            })?;
            info!(path = %store.path().display(), "Session stored");
            output::line("Session stored");
        }
        SessionAction::Logout => {
            store.clear()?;
            info!(path = %store.path().display(), "Session cleared");
            output::line("Signed out");
        }
    }
    Ok(())
}
