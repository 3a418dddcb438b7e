//! Admin account commands.

use clap::{Args, Subcommand};
use shopdesk_admin::controller::Screen;
use shopdesk_admin::models::{AdminUser, AdminUserInput};
use shopdesk_core::{AdminRole, AdminUserId};

use super::{CliError, Context, applied, saved};
use crate::output;

#[derive(Subcommand)]
pub enum UserAction {
    /// List admin accounts
    List {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Create an admin account
    Create(UserFields),
    /// Update an admin account; omit --password to keep it
    Update {
        id: String,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete an admin account
    Delete { id: String },
}

#[derive(Args)]
pub struct UserFields {
    #[arg(short, long)]
    name: Option<String>,
    #[arg(short, long)]
    email: Option<String>,
    #[arg(short, long)]
    password: Option<String>,
    /// `admin`, `manager` or `viewer`
    #[arg(short, long)]
    role: Option<AdminRole>,
    #[arg(long)]
    active: Option<bool>,
}

impl UserFields {
    fn apply(self, form: &mut AdminUserInput) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(password) = self.password {
            form.password = password;
        }
        if let Some(role) = self.role {
            form.role = role;
        }
        if let Some(active) = self.active {
            form.is_active = active;
        }
    }
}

type UserScreen = Screen<AdminUser, AdminUserInput>;

pub async fn run(ctx: &mut Context, action: UserAction) -> Result<(), CliError> {
    let mut screen = UserScreen::new();
    ctx.load(&mut screen.list).await?;

    match action {
        UserAction::List { query } => {
            screen.list.set_query(query);
            print(&screen);
        }
        UserAction::Create(fields) => {
            fields.apply(screen.dialog.open_create());
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
            print(&screen);
        }
        UserAction::Update { id, fields } => {
            let id = AdminUserId::new(id);
            let form = screen
                .edit_where(|u| u.id == id)
                .ok_or_else(|| CliError::NotFound("admin user", id.to_string()))?;
            fields.apply(form);
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
        UserAction::Delete { id } => {
            let id = AdminUserId::new(id);
            if screen.list.find(|u| u.id == id).is_none() {
                return Err(CliError::NotFound("admin user", id.to_string()));
            }
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "User deleted",
                    ctx.client.delete_admin_user(&id),
                )
                .await;
            applied(done, "delete")?;
        }
    }
    Ok(())
}

fn print(screen: &UserScreen) {
    let rows: Vec<Vec<String>> = screen
        .list
        .visible()
        .into_iter()
        .map(|u| {
            vec![
                u.id.to_string(),
                u.name.clone(),
                u.email.clone(),
                u.role.to_string(),
                output::yes_no(u.is_active),
            ]
        })
        .collect();
    output::table(&["ID", "NAME", "EMAIL", "ROLE", "ACTIVE"], &rows);
}
