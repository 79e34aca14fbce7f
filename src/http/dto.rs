use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Product;
use crate::domain::order::{LineItem, OrderLineView, OrderView, PlaceOrder};
use crate::domain::party::{Party, Registration, Role};

// ============================================================================
// Wire Types
// ============================================================================
//
// camelCase JSON. Money goes out as JSON numbers carrying the exact decimal
// digits and comes in as numbers or strings. It never passes through f64.
//
// ============================================================================

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub delivery_source_address: String,
    pub delivery_destination_address: String,
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}

impl From<PlaceOrderRequest> for PlaceOrder {
    fn from(request: PlaceOrderRequest) -> Self {
        PlaceOrder {
            buyer_id: request.buyer_id,
            seller_id: request.seller_id,
            delivery_source_address: request.delivery_source_address,
            delivery_destination_address: request.delivery_destination_address,
            items: request
                .items
                .into_iter()
                .map(|item| LineItem::new(item.product_id, item.quantity))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    pub price: Decimal,
    pub seller_id: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            seller_id: product.seller_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: i64,
    pub product: ProductResponse,
    pub quantity: i64,
    /// Unit price at order time.
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    pub price: Decimal,
}

impl From<OrderLineView> for OrderItemResponse {
    fn from(line: OrderLineView) -> Self {
        Self {
            id: line.id,
            product: line.product.into(),
            quantity: line.quantity,
            price: line.unit_price,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub delivery_source_address: String,
    pub delivery_destination_address: String,
    pub total_quantity: i64,
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    pub total_price: Decimal,
    pub status: i16,
    pub order_date: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        Self {
            id: order.id,
            buyer_id: order.buyer_id,
            seller_id: order.seller_id,
            delivery_source_address: order.delivery_source_address,
            delivery_destination_address: order.delivery_destination_address,
            total_quantity: order.total_quantity,
            total_price: order.total_price,
            status: order.status.code(),
            order_date: format_order_date(order.order_date),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// RFC 3339, UTC, whole seconds: `2024-03-01T12:30:45Z`.
pub fn format_order_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize")]
    pub price: Decimal,
}

// ---------------------------------------------------------------------------
// Buyers and sellers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBuyerRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub sending_address: String,
}

impl From<RegisterBuyerRequest> for Registration {
    fn from(request: RegisterBuyerRequest) -> Self {
        Registration {
            email: request.email,
            name: request.name,
            password: request.password,
            address: request.sending_address,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSellerRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub pickup_address: String,
}

impl From<RegisterSellerRequest> for Registration {
    fn from(request: RegisterSellerRequest) -> Self {
        Registration {
            email: request.email,
            name: request.name,
            password: request.password,
            address: request.pickup_address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A party as shown to clients. The address key depends on the role and
/// the credential hash is never included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(rename = "sendingAddress", skip_serializing_if = "Option::is_none")]
    pub sending_address: Option<String>,
    #[serde(rename = "pickupAddress", skip_serializing_if = "Option::is_none")]
    pub pickup_address: Option<String>,
}

impl From<Party> for PartyResponse {
    fn from(party: Party) -> Self {
        let (sending_address, pickup_address) = match party.role {
            Role::Buyer => (Some(party.address), None),
            Role::Seller => (None, Some(party.address)),
        };
        Self {
            id: party.id,
            email: party.email,
            name: party.name,
            sending_address,
            pickup_address,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub data: PartyResponse,
    #[serde(rename = "type")]
    pub role: Role,
    pub token: String,
}
