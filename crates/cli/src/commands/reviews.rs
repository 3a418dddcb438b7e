//! Review moderation commands.

use clap::Subcommand;
use shopdesk_admin::controller::Screen;
use shopdesk_admin::models::{Review, ReviewResponseInput};
use shopdesk_core::{ReviewId, ReviewStatus};

use super::{CliError, Context, applied, saved};
use crate::output;

#[derive(Subcommand)]
pub enum ReviewAction {
    /// List reviews
    List {
        /// Case-insensitive search over product, customer and comment
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only reviews in this status
        #[arg(long)]
        status: Option<ReviewStatus>,
    },
    /// Approve a review for publication
    Approve { id: String },
    /// Reject a review
    Reject { id: String },
    /// Publish a response to a review
    Respond {
        id: String,
        #[arg(long)]
        text: String,
    },
    /// Delete a review
    Delete { id: String },
}

type ReviewScreen = Screen<Review, ReviewResponseInput>;

pub async fn run(ctx: &mut Context, action: ReviewAction) -> Result<(), CliError> {
    let mut screen = ReviewScreen::new();
    ctx.load(&mut screen.list).await?;

    match action {
        ReviewAction::List { query, status } => {
            screen.list.set_query(query);
            let rows: Vec<Vec<String>> = screen
                .list
                .visible_where(|r| status.is_none_or(|s| r.status == s))
                .into_iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.product.title.clone(),
                        r.customer.name.clone(),
                        r.stars(),
                        r.status.to_string(),
                        output::yes_no(r.admin_response.is_some()),
                        r.comment.chars().take(48).collect(),
                    ]
                })
                .collect();
            output::table(
                &["ID", "PRODUCT", "CUSTOMER", "RATING", "STATUS", "REPLIED", "COMMENT"],
                &rows,
            );
        }
        ReviewAction::Approve { id } => {
            moderate(ctx, &mut screen, id, ReviewStatus::Approved).await?;
        }
        ReviewAction::Reject { id } => {
            moderate(ctx, &mut screen, id, ReviewStatus::Rejected).await?;
        }
        ReviewAction::Respond { id, text } => {
            let id = ReviewId::new(id);
            let form = screen
                .edit_where(|r| r.id == id)
                .ok_or_else(|| CliError::NotFound("review", id.to_string()))?;
            form.admin_response = text;
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
        ReviewAction::Delete { id } => {
            let id = existing(&screen, id)?;
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "Review deleted",
                    ctx.client.delete_review(&id),
                )
                .await;
            applied(done, "delete")?;
        }
    }
    Ok(())
}

async fn moderate(
    ctx: &mut Context,
    screen: &mut ReviewScreen,
    id: String,
    status: ReviewStatus,
) -> Result<(), CliError> {
    let id = existing(screen, id)?;
    let message = match status {
        ReviewStatus::Approved => "Review approved",
        ReviewStatus::Rejected => "Review rejected",
        ReviewStatus::Pending => "Review reset to pending",
    };
    let done = screen
        .list
        .mutate(
            &ctx.client,
            &mut ctx.console,
            message,
            ctx.client.set_review_status(&id, status),
        )
        .await;
    applied(done, "moderation")
}

fn existing(screen: &ReviewScreen, id: String) -> Result<ReviewId, CliError> {
    let id = ReviewId::new(id);
    screen
        .list
        .find(|r| r.id == id)
        .map(|r| r.id.clone())
        .ok_or_else(|| CliError::NotFound("review", id.to_string()))
}
