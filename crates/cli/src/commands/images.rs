//! Carousel image commands.
//!
//! `up` and `down` move an image one slot and persist the whole sequence
//! using the configured reorder mode (`SHOPDESK_REORDER_MODE`).

use clap::Subcommand;
use shopdesk_admin::controller::Screen;
use shopdesk_admin::models::{CarouselImage, CarouselImageInput};
use shopdesk_admin::reorder::Direction;
use shopdesk_core::ImageId;
use tracing::info;

use super::{CliError, Context, applied, saved};
use crate::output;

#[derive(Subcommand)]
pub enum ImageAction {
    /// List carousel images in display order
    List,
    /// Add an image by URL (see `upload` to store a local file first)
    Add {
        #[arg(long)]
        url: String,
        /// Add hidden
        #[arg(long)]
        inactive: bool,
    },
    /// Change an image's URL or visibility
    Update {
        id: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Move an image one slot towards the front
    Up { id: String },
    /// Move an image one slot towards the back
    Down { id: String },
    /// Remove an image
    Delete { id: String },
}

type ImageScreen = Screen<CarouselImage, CarouselImageInput>;

pub async fn run(ctx: &mut Context, action: ImageAction) -> Result<(), CliError> {
    let mut screen = ImageScreen::new();
    ctx.load(&mut screen.list).await?;

    match action {
        ImageAction::List => print(&screen),
        ImageAction::Add { url, inactive } => {
            let next_order = screen.list.items().iter().map(|i| i.order + 1).max();
            let form = screen.dialog.open_create();
            form.image_url = url;
            form.is_active = !inactive;
            form.order = Some(next_order.unwrap_or(0));
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
            print(&screen);
        }
        ImageAction::Update { id, url, active } => {
            let id = ImageId::new(id);
            let form = screen
                .edit_where(|i| i.id == id)
                .ok_or_else(|| CliError::NotFound("image", id.to_string()))?;
            if let Some(url) = url {
                form.image_url = url;
            }
            if let Some(active) = active {
                form.is_active = active;
            }
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
        ImageAction::Up { id } => shift(ctx, &mut screen, &id, Direction::Up).await?,
        ImageAction::Down { id } => shift(ctx, &mut screen, &id, Direction::Down).await?,
        ImageAction::Delete { id } => {
            let id = ImageId::new(id);
            if screen.list.find(|i| i.id == id).is_none() {
                return Err(CliError::NotFound("image", id.to_string()));
            }
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "Image deleted",
                    ctx.client.delete_image(&id),
                )
                .await;
            applied(done, "delete")?;
        }
    }
    Ok(())
}

async fn shift(
    ctx: &mut Context,
    screen: &mut ImageScreen,
    id: &str,
    direction: Direction,
) -> Result<(), CliError> {
    let index = screen
        .list
        .items()
        .iter()
        .position(|i| i.id.as_str() == id)
        .ok_or_else(|| CliError::NotFound("image", id.to_string()))?;

    let moved = screen
        .list
        .reorder(&ctx.client, &mut ctx.console, index, direction)
        .await?;
    if moved {
        print(screen);
    } else {
        info!(id, ?direction, "Image is already at the edge");
        output::line("Image is already at the edge; nothing to do");
    }
    Ok(())
}

fn print(screen: &ImageScreen) {
    let rows: Vec<Vec<String>> = screen
        .list
        .visible()
        .into_iter()
        .map(|i| {
            vec![
                i.order.to_string(),
                i.id.to_string(),
                output::yes_no(i.is_active),
                i.image_url.clone(),
            ]
        })
        .collect();
    output::table(&["POS", "ID", "ACTIVE", "URL"], &rows);
}
