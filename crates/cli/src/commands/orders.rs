//! Order commands.
//!
//! Orders can be addressed by backend id or by order number (`1001` or
//! `#1001`).

use clap::Subcommand;
use shopdesk_admin::controller::Screen;
use shopdesk_admin::models::{Order, TrackingInput};
use shopdesk_core::{Money, OrderStatus};

use super::{CliError, Context, applied, saved};
use crate::output;

#[derive(Subcommand)]
pub enum OrderAction {
    /// List orders
    List {
        /// Case-insensitive search over order number and customer
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only orders in this status
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// Show one order with its items
    Show { order: String },
    /// Change an order's status
    Status { order: String, status: OrderStatus },
    /// Record shipment tracking
    Tracking {
        order: String,
        #[arg(long)]
        number: String,
        #[arg(long)]
        carrier: String,
    },
}

type OrderScreen = Screen<Order, TrackingInput>;

fn is_match(order: &Order, reference: &str) -> bool {
    let number = reference.trim_start_matches('#');
    order.id.as_str() == reference || order.order_number.trim_start_matches('#') == number
}

pub async fn run(ctx: &mut Context, action: OrderAction) -> Result<(), CliError> {
    let mut screen = OrderScreen::new();
    ctx.load(&mut screen.list).await?;

    match action {
        OrderAction::List { query, status } => {
            screen.list.set_query(query);
            let currency = ctx.currency().await;
            let rows: Vec<Vec<String>> = screen
                .list
                .visible_where(|o| status.is_none_or(|s| o.status == s))
                .into_iter()
                .map(|o| {
                    vec![
                        format!("#{}", o.order_number.trim_start_matches('#')),
                        o.customer.name.clone(),
                        o.item_count().to_string(),
                        Money::new(o.total, currency.clone()).to_string(),
                        o.status.to_string(),
                        output::opt(o.tracking_number.as_deref()),
                        output::opt(o.created_at.map(|d| d.format("%Y-%m-%d"))),
                    ]
                })
                .collect();
            output::table(
                &["ORDER", "CUSTOMER", "ITEMS", "TOTAL", "STATUS", "TRACKING", "PLACED"],
                &rows,
            );
        }
        OrderAction::Show { order } => {
            let id = screen
                .list
                .find(|o| is_match(o, &order))
                .map(|o| o.id.clone())
                .ok_or_else(|| CliError::NotFound("order", order.clone()))?;
            let detail = ctx.client.get_order(&id).await?;
            let currency = ctx.currency().await;
            output::details(&[
                ("Order", format!("#{}", detail.order_number)),
                ("Status", detail.status.to_string()),
                ("Customer", detail.customer.name.clone()),
                ("Email", detail.customer.email.clone()),
                ("Carrier", output::opt(detail.carrier.as_deref())),
                ("Tracking", output::opt(detail.tracking_number.as_deref())),
                ("Total", Money::new(detail.total, currency.clone()).to_string()),
            ]);
            let rows: Vec<Vec<String>> = detail
                .items
                .iter()
                .map(|item| {
                    vec![
                        item.title.clone(),
                        item.quantity.to_string(),
                        Money::new(item.price, currency.clone()).to_string(),
                        Money::new(item.line_total(), currency.clone()).to_string(),
                    ]
                })
                .collect();
            output::table(&["ITEM", "QTY", "PRICE", "LINE"], &rows);
        }
        OrderAction::Status { order, status } => {
            let id = screen
                .list
                .find(|o| is_match(o, &order))
                .map(|o| o.id.clone())
                .ok_or_else(|| CliError::NotFound("order", order.clone()))?;
            let done = screen
                .list
                .mutate(
                    &ctx.client,
                    &mut ctx.console,
                    "Order status updated",
                    ctx.client.update_order_status(&id, status),
                )
                .await;
            applied(done, "status update")?;
        }
        OrderAction::Tracking {
            order,
            number,
            carrier,
        } => {
            let form = screen
                .edit_where(|o| is_match(o, &order))
                .ok_or_else(|| CliError::NotFound("order", order.clone()))?;
            form.tracking_number = number;
            form.carrier = carrier;
            saved(screen.save(&ctx.client, &mut ctx.console).await)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopdesk_core::OrderId;

    use super::*;

    #[test]
    fn test_order_reference_matches_id_or_number() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "_id": "ord_1",
            "orderNumber": 1001,
            "total": 10.0,
            "status": "pending"
        }))
        .unwrap();
        assert_eq!(order.id, OrderId::new("ord_1"));
        assert!(is_match(&order, "ord_1"));
        assert!(is_match(&order, "1001"));
        assert!(is_match(&order, "#1001"));
        assert!(!is_match(&order, "1002"));
    }
}
