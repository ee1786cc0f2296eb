//! Current order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use catalog::{ProductId, SizeId, Topping, ToppingId};
use chrono::{DateTime, Utc};
use common::ItemId;
use domain::{Aggregate, ItemSelection, Order, OrderError, OrderItem};
use serde::{Deserialize, Serialize};
use session::{Finalized, Notification};

use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Debug, Default, Deserialize)]
pub struct StartOrderRequest {
    /// Cancel the pending order, if any, instead of rejecting the request.
    #[serde(default)]
    pub replace: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub size_id: Option<String>,
    #[serde(default)]
    pub topping_ids: Vec<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub notes: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: Option<i64>,
    pub topping_ids: Option<Vec<String>>,
    /// A blank string clears the notes.
    pub notes: Option<String>,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub order_number: u64,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub total_cents: i64,
    pub total: String,
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub size_id: String,
    pub size_name: String,
    pub toppings: Vec<ToppingResponse>,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub price_cents: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToppingResponse {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct StartOrderResponse {
    pub order: OrderResponse,
    /// Set when a pending order was canceled to make room.
    pub replaced: Option<FinalizedResponse>,
}

#[derive(Debug, Serialize)]
pub struct ItemAddedResponse {
    pub item_id: String,
    pub order: OrderResponse,
}

#[derive(Debug, Serialize)]
pub struct FinalizedResponse {
    pub order: OrderResponse,
    pub notifications: Vec<Notification>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            order_number: order.order_number().value(),
            status: order.status().to_string(),
            items: order.items().iter().map(OrderItemResponse::from).collect(),
            total_cents: order.total().cents(),
            total: order.total().to_string(),
            created_at: order.created_at(),
            finalized_at: order.finalized_at(),
        }
    }
}

impl From<&OrderItem> for OrderItemResponse {
    fn from(item: &OrderItem) -> Self {
        Self {
            id: item.id().to_string(),
            product_id: item.product().id.to_string(),
            product_name: item.product().name.clone(),
            size_id: item.size().id.to_string(),
            size_name: item.size().name.clone(),
            toppings: item
                .toppings()
                .iter()
                .map(|t| ToppingResponse {
                    id: t.id.to_string(),
                    name: t.name.clone(),
                    price_cents: t.price.cents(),
                })
                .collect(),
            quantity: item.quantity(),
            unit_price_cents: item.unit_price().cents(),
            price_cents: item.price().cents(),
            notes: item.notes().map(String::from),
        }
    }
}

impl From<Finalized> for FinalizedResponse {
    fn from(finalized: Finalized) -> Self {
        Self {
            order: OrderResponse::from(&finalized.order),
            notifications: finalized.notifications,
        }
    }
}

// -- Handlers --

/// POST /orders: start a new order.
#[tracing::instrument(skip(state))]
pub async fn start(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartOrderRequest>,
) -> Result<(StatusCode, Json<StartOrderResponse>), ApiError> {
    let mut session = state.session.lock().await;

    let replaced = if req.replace {
        session.start_new_order_replacing().await?
    } else {
        session.start_new_order().await?;
        None
    };

    let order = current_order(session.current_order())?;
    Ok((
        StatusCode::CREATED,
        Json(StartOrderResponse {
            order,
            replaced: replaced.map(FinalizedResponse::from),
        }),
    ))
}

/// GET /orders/current: the order being built.
#[tracing::instrument(skip(state))]
pub async fn current(State(state): State<Arc<AppState>>) -> Result<Json<OrderResponse>, ApiError> {
    let session = state.session.lock().await;
    Ok(Json(current_order(session.current_order())?))
}

/// POST /orders/current/items: add a line item, starting an order if needed.
#[tracing::instrument(skip(state))]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<ItemAddedResponse>), ApiError> {
    let product = state
        .catalog
        .product(&ProductId::new(req.product_id.as_str()))
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Product not found: {}", req.product_id)))?;
    let size = match &req.size_id {
        Some(id) => Some(
            state
                .catalog
                .size(&SizeId::new(id.as_str()))
                .cloned()
                .ok_or_else(|| ApiError::NotFound(format!("Size not found: {id}")))?,
        ),
        None => None,
    };
    let toppings = resolve_toppings(&state, &req.topping_ids)?;

    let selection = ItemSelection {
        product: Some(product),
        size,
        toppings,
        quantity: req.quantity,
        notes: req.notes,
    };

    let mut session = state.session.lock().await;
    let item_id = session.add_item(selection).await?;
    let order = current_order(session.current_order())?;

    Ok((
        StatusCode::CREATED,
        Json(ItemAddedResponse {
            item_id: item_id.to_string(),
            order,
        }),
    ))
}

/// PATCH /orders/current/items/:item_id: change quantity, toppings or notes.
#[tracing::instrument(skip(state))]
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let toppings = req
        .topping_ids
        .as_deref()
        .map(|ids| resolve_toppings(&state, ids))
        .transpose()?;

    let mut session = state.session.lock().await;
    ensure_item(session.current_order(), item_id)?;

    if let Some(quantity) = req.quantity {
        session.update_item_quantity(item_id, quantity)?;
    }
    if let Some(toppings) = toppings {
        session.update_item_toppings(item_id, toppings)?;
    }
    if let Some(notes) = req.notes {
        session.update_item_notes(item_id, Some(notes))?;
    }

    Ok(Json(current_order(session.current_order())?))
}

/// DELETE /orders/current/items/:item_id: remove a line item.
#[tracing::instrument(skip(state))]
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let mut session = state.session.lock().await;
    session.remove_item(item_id)?;
    Ok(Json(current_order(session.current_order())?))
}

/// POST /orders/current/complete: finalize the current order.
///
/// Save and print failures do not fail the request; they come back as
/// error notifications.
#[tracing::instrument(skip(state))]
pub async fn complete(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FinalizedResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let finalized = session.complete_order().await?;
    Ok(Json(finalized.into()))
}

/// POST /orders/current/cancel: cancel the current order.
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FinalizedResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let finalized = session.cancel_order().await?;
    Ok(Json(finalized.into()))
}

fn current_order(order: Option<&Order>) -> Result<OrderResponse, ApiError> {
    order
        .map(OrderResponse::from)
        .ok_or_else(|| OrderError::NoCurrentOrder.into())
}

/// Checks the item exists before applying a multi-part update.
fn ensure_item(order: Option<&Order>, item_id: ItemId) -> Result<(), ApiError> {
    let order = order.ok_or(OrderError::NoCurrentOrder)?;
    match order.item(item_id) {
        Some(_) => Ok(()),
        None => Err(OrderError::ItemNotFound { item_id }.into()),
    }
}

fn resolve_toppings(state: &AppState, ids: &[String]) -> Result<Vec<Topping>, ApiError> {
    let ids: Vec<ToppingId> = ids.iter().map(|id| ToppingId::new(id.as_str())).collect();
    state
        .catalog
        .resolve_toppings(&ids)
        .map_err(|id| ApiError::NotFound(format!("Topping not found: {id}")))
}

fn parse_item_id(id: &str) -> Result<ItemId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid item ID format: {e}")))?;
    Ok(ItemId::from_uuid(uuid))
}
