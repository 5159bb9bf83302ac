//! User management endpoints.
//!
//! Two controllers share the `/users` prefix: the regular user CRUD
//! controller and the moderation controller mounted at `/users/admin`.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::app::{Controller, ControllerRoutes};
use crate::state::AppState;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Sequential identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Whether a moderator banned this user.
    pub banned: bool,
}

/// Body for creating or renaming a user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    /// Display name, must not be blank.
    pub name: String,
}

impl UserInput {
    fn validated_name(self) -> ApiResult<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::bad_request("invalid_name", "User name cannot be empty"));
        }
        Ok(name.to_string())
    }
}

fn user_not_found(id: u64) -> ApiError {
    ApiError::not_found("user_not_found", format!("No user with id {id}"))
}

// ============================================================================
// Controllers
// ============================================================================

/// CRUD over users, mounted at `/users`.
pub struct UsersController;

impl Controller for UsersController {
    fn base_path(&self) -> Option<&str> {
        Some("users")
    }

    fn method_names(&self) -> Vec<&'static str> {
        vec!["findAll", "findOne", "create", "update", "remove"]
    }

    fn routes(&self, routes: ControllerRoutes) -> ControllerRoutes {
        routes
            .get("", find_all)
            .get("/{id}", find_one)
            .post("", create)
            .put("/{id}", update)
            .delete("/{id}", remove)
    }
}

/// Moderation, mounted at `/users/admin`.
pub struct UserAdminController;

impl Controller for UserAdminController {
    fn base_path(&self) -> Option<&str> {
        Some("users/admin")
    }

    fn method_names(&self) -> Vec<&'static str> {
        vec!["listBanned", "ban"]
    }

    fn routes(&self, routes: ControllerRoutes) -> ControllerRoutes {
        routes
            .get("/banned", list_banned)
            .post("/{id}/ban", ban)
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn find_all(Extension(state): Extension<AppState>) -> Json<Vec<User>> {
    let users = state.users().await;
    Json(users.clone())
}

async fn find_one(
    Extension(state): Extension<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<User>> {
    let users = state.users().await;
    let user = users.iter().find(|user| user.id == id).cloned();
    user.map(Json).ok_or_else(|| user_not_found(id))
}

async fn create(
    Extension(state): Extension<AppState>,
    Json(input): Json<UserInput>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let name = input.validated_name()?;
    let mut users = state.users_mut().await;
    let id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;
    let user = User {
        id,
        name,
        banned: false,
    };
    users.push(user.clone());

    tracing::info!(user_id = id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update(
    Extension(state): Extension<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UserInput>,
) -> ApiResult<Json<User>> {
    let name = input.validated_name()?;
    let mut users = state.users_mut().await;
    let user = users
        .iter_mut()
        .find(|user| user.id == id)
        .ok_or_else(|| user_not_found(id))?;
    user.name = name;
    Ok(Json(user.clone()))
}

async fn remove(
    Extension(state): Extension<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<StatusCode> {
    let mut users = state.users_mut().await;
    let before = users.len();
    users.retain(|user| user.id != id);
    if users.len() == before {
        return Err(user_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_banned(Extension(state): Extension<AppState>) -> Json<Vec<User>> {
    let users = state.users().await;
    Json(users.iter().filter(|user| user.banned).cloned().collect())
}

async fn ban(
    Extension(state): Extension<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<User>> {
    let mut users = state.users_mut().await;
    let user = users
        .iter_mut()
        .find(|user| user.id == id)
        .ok_or_else(|| user_not_found(id))?;
    user.banned = true;

    tracing::info!(user_id = id, "user banned");
    Ok(Json(user.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Application, Module};
    use routedoc_core::RouteEnumeration;

    #[test]
    fn test_declared_methods_match_registration_count() {
        let app = Application::eager(vec![Module::new("UsersModule")
            .controller(UsersController)
            .controller(UserAdminController)]);

        assert_eq!(
            app.registered_routes().len(),
            UsersController.method_names().len() + UserAdminController.method_names().len()
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let input = UserInput {
            name: "   ".to_string(),
        };
        let err = input.validated_name().unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "invalid_name");
    }
}
