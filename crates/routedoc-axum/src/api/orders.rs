//! Order endpoints.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::app::{Controller, ControllerRoutes};
use crate::state::AppState;

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: Uuid,
    /// Ordering user.
    pub user_id: u64,
    /// Ordered item.
    pub item: String,
    /// When the order was placed (UTC).
    pub placed_at_utc: DateTime<Utc>,
}

/// Body for placing an order.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    /// Ordering user; must exist.
    pub user_id: u64,
    /// Ordered item.
    pub item: String,
}

/// Orders, mounted at `/orders`.
pub struct OrdersController;

impl Controller for OrdersController {
    fn base_path(&self) -> Option<&str> {
        Some("orders")
    }

    fn method_names(&self) -> Vec<&'static str> {
        vec!["findAll", "place", "findOne"]
    }

    fn routes(&self, routes: ControllerRoutes) -> ControllerRoutes {
        routes
            .get("", find_all)
            .post("", place)
            .get("/{id}", find_one)
    }
}

async fn find_all(Extension(state): Extension<AppState>) -> Json<Vec<Order>> {
    let orders = state.orders().await;
    Json(orders.clone())
}

async fn place(
    Extension(state): Extension<AppState>,
    Json(request): Json<PlaceOrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    if request.item.trim().is_empty() {
        return Err(ApiError::bad_request("invalid_item", "Order item cannot be empty"));
    }
    let user_exists = state.users().await.iter().any(|user| user.id == request.user_id);
    if !user_exists {
        return Err(ApiError::not_found(
            "user_not_found",
            format!("No user with id {}", request.user_id),
        ));
    }

    let order = Order {
        id: Uuid::new_v4(),
        user_id: request.user_id,
        item: request.item.trim().to_string(),
        placed_at_utc: Utc::now(),
    };
    state.orders_mut().await.push(order.clone());

    tracing::info!(order_id = %order.id, user_id = order.user_id, "order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

async fn find_one(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    let orders = state.orders().await;
    let order = orders.iter().find(|order| order.id == id).cloned();
    order
        .map(Json)
        .ok_or_else(|| ApiError::not_found("order_not_found", format!("No order with id {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_request_deserialization() {
        let json = r#"{"user_id": 3, "item": "Keyboard"}"#;
        let request: PlaceOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.user_id, 3);
        assert_eq!(request.item, "Keyboard");
    }

    #[test]
    fn test_order_serialization() {
        let order = Order {
            id: Uuid::nil(),
            user_id: 1,
            item: "Mouse".to_string(),
            placed_at_utc: DateTime::<Utc>::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"id\":\"00000000-0000-0000-0000-000000000000\""));
        assert!(json.contains("\"placed_at_utc\":\"1970-01-01T00:00:00Z\""));
    }
}
