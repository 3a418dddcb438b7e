//! Customer commands.

use clap::Subcommand;
use shopdesk_admin::controller::Screen;
use shopdesk_admin::models::{Customer, CustomerNotesInput};
use shopdesk_core::{CustomerId, Money};

use super::{CliError, Context, applied, saved};
use crate::output;

#[derive(Subcommand)]
pub enum CustomerAction {
    /// List customers
    List {
        /// Case-insensitive search over name, email and phone
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only banned customers
        #[arg(long)]
        banned: bool,
    },
    /// Ban a customer
    Ban { id: String },
    /// Lift a customer's ban
    Unban { id: String },
    /// Replace a customer's internal notes
    Notes {
        id: String,
        #[arg(long)]
        notes: String,
    },
    /// Delete a customer
    Delete { id: String },
}

type CustomerScreen = Screen<Customer, CustomerNotesInput>;

pub async fn run(ctx: &mut Context, action: CustomerAction) -> Result<(), CliError> {
    let mut screen = CustomerScreen::new();
    ctx.load(&mut screen.list).await?;

    match action {
        CustomerAction::List { query, banned } => {
            screen.list.set_query(query);
            let currency = ctx.currency().await;
            let rows: Vec<Vec<String>> = screen
                .list
                .visible_where(|c| !banned || c.is_banned)
                .into_iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.name.clone(),
                        c.email.clone(),
                        output::opt(c.phone.as_deref()),
                        c.total_orders.to_string(),
                        Money::new(c.total_spent, currency.clone()).to_string(),
                        output::yes_no(c.is_banned),
                    ]
                })
                .collect();
            output::table(
                &["ID", "NAME", "EMAIL", "PHONE", "ORDERS", "SPENT", "BANNED"],
                &rows,
            );
        }
        CustomerAction::Ban { id } => {
            let id = existing(&screen, id)?;
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "Customer banned",
                    ctx.client.ban_customer(&id),
                )
                .await;
            applied(done, "ban")?;
        }
        CustomerAction::Unban { id } => {
            let id = existing(&screen, id)?;
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "Customer unbanned",
                    ctx.client.unban_customer(&id),
                )
                .await;
            applied(done, "unban")?;
        }
        CustomerAction::Notes { id, notes } => {
            let id = CustomerId::new(id);
            let form = screen
                .edit_where(|c| c.id == id)
                .ok_or_else(|| CliError::NotFound("customer", id.to_string()))?;
            form.notes = notes;
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
        CustomerAction::Delete { id } => {
            let id = existing(&screen, id)?;
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "Customer deleted",
                    ctx.client.delete_customer(&id),
                )
                .await;
            applied(done, "delete")?;
        }
    }
    Ok(())
}

fn existing(screen: &CustomerScreen, id: String) -> Result<CustomerId, CliError> {
    let id = CustomerId::new(id);
    screen
        .list
        .find(|c| c.id == id)
        .map(|c| c.id.clone())
        .ok_or_else(|| CliError::NotFound("customer", id.to_string()))
}
