//! Application state shared across handlers.

use std::sync::Arc;

use routedoc_core::OpenApiDocument;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api::orders::Order;
use crate::api::users::User;

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Default)]
struct AppStateInner {
    users: RwLock<Vec<User>>,
    orders: RwLock<Vec<Order>>,
    document: RwLock<Option<OpenApiDocument>>,
}

impl AppState {
    /// Create empty application state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get read access to users.
    pub async fn users(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.inner.users.read().await
    }

    /// Get write access to users.
    pub async fn users_mut(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.inner.users.write().await
    }

    /// Get read access to orders.
    pub async fn orders(&self) -> RwLockReadGuard<'_, Vec<Order>> {
        self.inner.orders.read().await
    }

    /// Get write access to orders.
    pub async fn orders_mut(&self) -> RwLockWriteGuard<'_, Vec<Order>> {
        self.inner.orders.write().await
    }

    /// The most recently published OpenAPI document.
    pub async fn document(&self) -> Option<OpenApiDocument> {
        self.inner.document.read().await.clone()
    }

    /// Publish a generated document for the `/openapi.json` endpoint.
    pub async fn publish_document(&self, document: OpenApiDocument) {
        *self.inner.document.write().await = Some(document);
    }
}
