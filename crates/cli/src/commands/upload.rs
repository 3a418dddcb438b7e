//! File upload command.

use std::path::PathBuf;

use shopdesk_admin::controller::Screen;
use shopdesk_admin::models::{CarouselImage, CarouselImageInput};
use shopdesk_core::MediaKind;

use super::{CliError, Context, saved};
use crate::output;

/// Upload `path`; with `carousel`, also append the stored image to the
/// home page carousel.
pub async fn run(ctx: &mut Context, path: PathBuf, carousel: bool) -> Result<(), CliError> {
    let media = ctx.client.upload_file(&path).await?;
    output::details(&[("URL", media.url.clone()), ("Type", media.kind.to_string())]);

    if !carousel {
        return Ok(());
    }
    if media.kind != MediaKind::Image {
        return Err(CliError::InvalidArg(
            "--carousel",
            format!("{} is a {}, not an image", path.display(), media.kind),
        ));
    }

    let mut screen = Screen::<CarouselImage, CarouselImageInput>::new();
    ctx.load(&mut screen.list).await?;
    let next_order = screen.list.items().iter().map(|i| i.order + 1).max();
    let form = screen.dialog.open_create();
    form.image_url = media.url;
    form.order = Some(next_order.unwrap_or(0));
    saved(screen.save(&ctx.client, &mut ctx.console).await)?;
    Ok(())
}
