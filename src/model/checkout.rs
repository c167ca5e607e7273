use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::order::OrderDto;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct CheckoutDto {
    pub shipping_address: String,
    /// Buyer mobile number passed on to the payment provider.
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct CheckoutResultDto {
    pub order: OrderDto,
    /// Escrow checkout link; null when the payment provider could not be reached.
    pub payment_url: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct PaymentLinkDto {
    pub payment_url: String,
}
