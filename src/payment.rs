//! Payment instructions for an accepted order.
//!
//! There is no gateway integration: the customer scans a UPI QR code, pays
//! out of band, and the admin marks the order paid after verifying the
//! payment in their own app.

use serde::Serialize;
use url::form_urlencoded::Serializer;

use crate::domain::order::{Order, OrderStatus};
use crate::error::AppError;

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_SIZE: &str = "300x300";

#[derive(Debug, Clone, Serialize)]
pub struct PaymentInstructions {
    pub order_id: u64,
    pub amount: u32,
    pub currency: &'static str,
    pub upi_uri: String,
    pub qr_url: String,
}

/// Builds payment instructions for `order`, or explains why payment is not
/// currently possible. Only an accepted order can be paid; a `paid` order
/// still renders so the customer can revisit the page.
pub fn for_order(
    order: &Order,
    payee_id: &str,
    payee_name: &str,
) -> Result<PaymentInstructions, AppError> {
    match order.status {
        OrderStatus::Pending => Err(AppError::InvalidTransition(
            "order has not been accepted yet".to_string(),
        )),
        OrderStatus::Declined => Err(AppError::InvalidTransition(
            "order was declined".to_string(),
        )),
        OrderStatus::PaymentPending | OrderStatus::Paid => {
            let upi_query = Serializer::new(String::new())
                .append_pair("pa", payee_id)
                .append_pair("pn", payee_name)
                .append_pair("am", &order.total.to_string())
                .append_pair("cu", "INR")
                .append_pair("tn", &format!("Order{}", order.id))
                .finish();
            let upi_uri = format!("upi://pay?{upi_query}");

            let qr_query = Serializer::new(String::new())
                .append_pair("data", &upi_uri)
                .append_pair("size", QR_SIZE)
                .finish();
            let qr_url = format!("{QR_ENDPOINT}?{qr_query}");

            Ok(PaymentInstructions {
                order_id: order.id,
                amount: order.total,
                currency: "INR",
                upi_uri,
                qr_url,
            })
        }
    }
}
