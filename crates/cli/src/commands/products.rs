//! Product catalogue commands.

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use shopdesk_admin::controller::Screen;
use shopdesk_admin::models::{Product, ProductInput};
use shopdesk_core::{Money, ProductId};

use super::{CliError, Context, applied, saved};
use crate::output;

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
    List {
        /// Case-insensitive search over title and category
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only products with no stock left
        #[arg(long)]
        out_of_stock: bool,
    },
    /// Create a product
    Create(ProductFields),
    /// Update a product
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<Decimal>,
    #[arg(long)]
    stock: Option<i64>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    sub_category: Option<String>,
    /// Image URL; repeat to set several
    #[arg(long = "image")]
    images: Vec<String>,
    #[arg(long)]
    active: Option<bool>,
}

impl ProductFields {
    fn apply(self, form: &mut ProductInput) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if self.price.is_some() {
            form.price = self.price;
        }
        if self.stock.is_some() {
            form.stock = self.stock;
        }
        if self.category.is_some() {
            form.category = self.category;
        }
        if self.sub_category.is_some() {
            form.sub_category = self.sub_category;
        }
        if !self.images.is_empty() {
            form.images = self.images;
        }
        if let Some(active) = self.active {
            form.is_active = active;
        }
    }
}

type ProductScreen = Screen<Product, ProductInput>;

pub async fn run(ctx: &mut Context, action: ProductAction) -> Result<(), CliError> {
    let mut screen = ProductScreen::new();
    ctx.load(&mut screen.list).await?;

    match action {
        ProductAction::List {
            query,
            out_of_stock,
        } => {
            screen.list.set_query(query);
            let currency = ctx.currency().await;
            let rows: Vec<Vec<String>> = screen
                .list
                .visible_where(|p| !out_of_stock || !p.in_stock())
                .into_iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        p.title.clone(),
                        Money::new(p.price, currency.clone()).to_string(),
                        p.stock.to_string(),
                        output::opt(p.category.as_deref()),
                        output::opt(p.sub_category.as_deref()),
                        output::yes_no(p.is_active),
                    ]
                })
                .collect();
            output::table(
                &["ID", "TITLE", "PRICE", "STOCK", "CATEGORY", "SUB-CATEGORY", "ACTIVE"],
                &rows,
            );
        }
        ProductAction::Create(fields) => {
            fields.apply(screen.dialog.open_create());
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
        ProductAction::Update { id, fields } => {
            let id = ProductId::new(id);
            let form = screen
                .edit_where(|p| p.id == id)
                .ok_or_else(|| CliError::NotFound("product", id.to_string()))?;
            fields.apply(form);
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
        ProductAction::Delete { id } => {
            let id = ProductId::new(id);
            if screen.list.find(|p| p.id == id).is_none() {
                return Err(CliError::NotFound("product", id.to_string()));
            }
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "Product deleted",
                    ctx.client.delete_product(&id),
                )
                .await;
            applied(done, "delete")?;
        }
    }
    Ok(())
}
