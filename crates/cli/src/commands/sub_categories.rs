//! Sub-category commands.

use clap::Subcommand;
use shopdesk_admin::controller::Screen;
use shopdesk_admin::models::{SubCategory, SubCategoryInput};
use shopdesk_core::SubCategoryId;

use super::{CliError, Context, applied, saved};
use crate::output;

#[derive(Subcommand)]
pub enum SubCategoryAction {
    /// List sub-categories
    List {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Create a sub-category under a category
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
    },
    /// Rename or move a sub-category
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a sub-category
    Delete { id: String },
}

type SubCategoryScreen = Screen<SubCategory, SubCategoryInput>;

pub async fn run(ctx: &mut Context, action: SubCategoryAction) -> Result<(), CliError> {
    let mut screen = SubCategoryScreen::new();
    ctx.load(&mut screen.list).await?;

    match action {
        SubCategoryAction::List { query } => {
            screen.list.set_query(query);
            let rows: Vec<Vec<String>> = screen
                .list
                .visible()
                .into_iter()
                .map(|s| vec![s.id.to_string(), s.name.clone(), s.category.clone()])
                .collect();
            output::table(&["ID", "NAME", "CATEGORY"], &rows);
        }
        SubCategoryAction::Create { name, category } => {
            let form = screen.dialog.open_create();
            form.name = name;
            form.category = category;
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
        SubCategoryAction::Update { id, name, category } => {
            let id = SubCategoryId::new(id);
            let form = screen
                .edit_where(|s| s.id == id)
                .ok_or_else(|| CliError::NotFound("sub-category", id.to_string()))?;
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(category) = category {
                form.category = category;
            }
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
        SubCategoryAction::Delete { id } => {
            let id = SubCategoryId::new(id);
            if screen.list.find(|s| s.id == id).is_none() {
                return Err(CliError::NotFound("sub-category", id.to_string()));
            }
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "Sub-category deleted",
                    ctx.client.delete_sub_category(&id),
                )
                .await;
            applied(done, "delete")?;
        }
    }
    Ok(())
}
