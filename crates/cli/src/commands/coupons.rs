//! Coupon commands.
//!
//! # Usage
//!
//! ```bash
//! shopdesk coupons list --query spring
//! shopdesk coupons create --code SPRING10 --type percentage --value 10
//! shopdesk coupons update SPRING10 --max-discount 25
//! shopdesk coupons disable SPRING10
//! shopdesk coupons delete SPRING10
//! ```

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use shopdesk_admin::controller::Screen;
use shopdesk_admin::models::{Coupon, CouponInput};
use shopdesk_core::{CouponCode, CouponType};

use super::{CliError, Context, applied, saved};
use crate::output;

#[derive(Subcommand)]
pub enum CouponAction {
    /// List coupons
    List {
        /// Case-insensitive search over the code
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Create a coupon
    Create(CouponFields),
    /// Update a coupon's fields
    Update {
        code: String,
        #[command(flatten)]
        fields: CouponFields,
    },
    /// Enable a coupon
    Enable { code: String },
    /// Disable a coupon
    Disable { code: String },
    /// Delete a coupon
    Delete { code: String },
}

#[derive(Args)]
pub struct CouponFields {
    /// Coupon code (required on create)
    #[arg(long)]
    code: Option<String>,
    /// `percentage` or `flat`
    #[arg(long = "type")]
    kind: Option<CouponType>,
    /// Discount value (required on create)
    #[arg(long)]
    value: Option<Decimal>,
    /// Minimum order amount
    #[arg(long)]
    min_amount: Option<Decimal>,
    /// Maximum discount for percentage coupons
    #[arg(long)]
    max_discount: Option<Decimal>,
    /// Total number of uses allowed
    #[arg(long)]
    usage_limit: Option<u32>,
    /// Expiry as RFC 3339, e.g. 2026-12-31T23:59:59Z
    #[arg(long)]
    expires_at: Option<DateTime<Utc>>,
    /// Whether the coupon combines with others
    #[arg(long)]
    stackable: Option<bool>,
    /// Whether the coupon can be redeemed
    #[arg(long)]
    active: Option<bool>,
}

impl CouponFields {
    fn apply(self, form: &mut CouponInput) {
        if let Some(code) = self.code {
            form.code = code;
        }
        if let Some(kind) = self.kind {
            form.kind = kind;
        }
        if self.value.is_some() {
            form.value = self.value;
        }
        if self.min_amount.is_some() {
            form.min_amount = self.min_amount;
        }
        if self.max_discount.is_some() {
            form.max_discount = self.max_discount;
        }
        if self.usage_limit.is_some() {
            form.usage_limit = self.usage_limit;
        }
        if self.expires_at.is_some() {
            form.expires_at = self.expires_at;
        }
        if let Some(stackable) = self.stackable {
            form.is_stackable = stackable;
        }
        if let Some(active) = self.active {
            form.is_active = active;
        }
    }
}

type CouponScreen = Screen<Coupon, CouponInput>;

pub async fn run(ctx: &mut Context, action: CouponAction) -> Result<(), CliError> {
    let mut screen = CouponScreen::new();
    ctx.load(&mut screen.list).await?;

    match action {
        CouponAction::List { query } => {
            screen.list.set_query(query);
            print(&screen);
        }
        CouponAction::Create(fields) => {
            fields.apply(screen.dialog.open_create());
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
            print(&screen);
        }
        CouponAction::Update { code, fields } => {
            let code = CouponCode::new(code);
            let form = screen
                .edit_where(|c| c.code == code)
                .ok_or_else(|| CliError::NotFound("coupon", code.to_string()))?;
            fields.apply(form);
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
        CouponAction::Enable { code } => set_active(ctx, &mut screen, &code, true).await?,
        CouponAction::Disable { code } => set_active(ctx, &mut screen, &code, false).await?,
        CouponAction::Delete { code } => {
            let code = CouponCode::new(code);
            if screen.list.find(|c| c.code == code).is_none() {
                return Err(CliError::NotFound("coupon", code.to_string()));
            }
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "Coupon deleted",
                    ctx.client.delete_coupon(&code),
                )
                .await;
            applied(done, "delete")?;
        }
    }
    Ok(())
}

async fn set_active(
    ctx: &mut Context,
    screen: &mut CouponScreen,
    code: &str,
    active: bool,
) -> Result<(), CliError> {
    let coupon = screen
        .list
        .find(|c| c.code.as_str() == code)
        .cloned()
        .ok_or_else(|| CliError::NotFound("coupon", code.to_string()))?;
    let message = if active { "Coupon enabled" } else { "Coupon disabled" };
    let done = screen
        .list
        .mutate(
            &ctx.client,
            &mut ctx.console,
            message,
            ctx.client.set_coupon_active(&coupon, active),
        )
        .await;
    applied(done, "update")
}

fn print(screen: &CouponScreen) {
    let now = Utc::now();
    let rows: Vec<Vec<String>> = screen
        .list
        .visible()
        .into_iter()
        .map(|c| {
            let value = match c.kind {
                CouponType::Percentage => format!("{}%", c.value),
                CouponType::Flat => c.value.to_string(),
            };
            let status = match (c.is_active, c.is_expired_at(now)) {
                (false, _) => "inactive",
                (true, true) => "expired",
                (true, false) => "active",
            };
            vec![
                c.code.to_string(),
                value,
                output::opt(c.min_amount),
                format!("{}/{}", c.used_count, output::opt(c.usage_limit)),
                output::opt(c.remaining_uses()),
                output::opt(c.expires_at.map(|d| d.format("%Y-%m-%d"))),
                output::yes_no(c.is_stackable),
                status.to_string(),
            ]
        })
        .collect();
    output::table(
        &["CODE", "VALUE", "MIN", "USED", "LEFT", "EXPIRES", "STACKABLE", "STATUS"],
        &rows,
    );
}
