//! End-to-end checks: detect the demo application's routes, generate the
//! document, and read it back over HTTP and from disk.

use axum::http::StatusCode;
use axum_test::TestServer;
use routedoc_axum::api::{self, openapi};
use routedoc_axum::{AppState, Application};
use routedoc_core::{
    add_route_detection, generate_openapi_in, GenerateOptions, Info, OpenApiDocument,
    RouteRegistry, Server, SourceKind,
};
use serde_json::{json, Value};

fn options() -> GenerateOptions {
    GenerateOptions::new(
        vec![Server::new("http://localhost:3000")],
        Info::new("Demo API", "1.0.0"),
        "demo",
    )
}

async fn published_server() -> TestServer {
    let state = AppState::new();
    let registry = RouteRegistry::new();

    let mut app = Application::deferred(api::modules());
    assert_eq!(add_route_detection(&app, &registry).unwrap(), SourceKind::Hooked);
    app.initialize();

    openapi::publish(&app, &registry, &options(), &state)
        .await
        .unwrap();

    TestServer::new(api::create_router(app, state)).unwrap()
}

#[tokio::test]
async fn document_is_not_served_before_generation() {
    let app = Application::eager(api::modules());
    let server = TestServer::new(api::create_router(app, AppState::new())).unwrap();

    let response = server.get(openapi::OPENAPI_PATH).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "document_not_generated");
}

#[tokio::test]
async fn served_document_describes_demo_routes() {
    let server = published_server().await;

    let response = server.get(openapi::OPENAPI_PATH).await;
    response.assert_status_ok();
    let text = response.text();
    let doc: Value = serde_json::from_str(&text).unwrap();
    // serde_json::Value sorts keys; the typed document keeps generation order.
    let typed: OpenApiDocument = serde_json::from_str(&text).unwrap();

    assert_eq!(doc["openapi"], "3.0.3");
    assert_eq!(doc["servers"], json!([{ "url": "http://localhost:3000" }]));
    assert_eq!(doc["info"], json!({ "title": "Demo API", "version": "1.0.0" }));
    assert_eq!(
        doc["tags"],
        json!([{ "name": "users" }, { "name": "users/admin" }, { "name": "orders" }])
    );

    assert_eq!(
        typed.paths.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "/users",
            "/users/{id}",
            "/users/admin/banned",
            "/users/admin/{id}/ban",
            "/orders",
            "/orders/{id}",
            "/health",
        ]
    );

    let paths = &doc["paths"];
    assert_eq!(paths["/users"]["get"]["summary"], "findAll");
    assert_eq!(paths["/users"]["post"]["summary"], "create");
    assert_eq!(paths["/users/{id}"]["delete"]["summary"], "remove");
    assert!(paths["/users"]["get"].get("parameters").is_none());

    let ban = &paths["/users/admin/{id}/ban"]["post"];
    assert_eq!(ban["tags"], json!(["users/admin"]));
    assert_eq!(ban["summary"], "ban");
    assert_eq!(
        ban["parameters"],
        json!([{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }])
    );

    let health = &paths["/health"]["get"];
    assert_eq!(health["tags"], json!(["/"]));
    assert!(health.get("summary").is_none());
    assert_eq!(
        health["responses"],
        json!({ "200": { "description": "successful operation" } })
    );
}

#[tokio::test]
async fn document_endpoint_is_not_documented() {
    let server = published_server().await;

    let doc: Value = server.get(openapi::OPENAPI_PATH).await.json();

    assert!(doc["paths"].get(openapi::OPENAPI_PATH).is_none());
}

#[tokio::test]
async fn documented_routes_are_served() {
    let server = published_server().await;

    server
        .post("/users")
        .json(&json!({ "name": "Ada" }))
        .await
        .assert_status(StatusCode::CREATED);

    let user: Value = server.get("/users/1").await.json();
    assert_eq!(user["name"], "Ada");

    server
        .post("/users/admin/1/ban")
        .await
        .assert_status_ok();
    let banned: Value = server.get("/users/admin/banned").await.json();
    assert_eq!(banned.as_array().unwrap().len(), 1);

    server
        .post("/orders")
        .json(&json!({ "user_id": 1, "item": "Keyboard" }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/orders")
        .json(&json!({ "user_id": 42, "item": "Mouse" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn eager_application_writes_the_same_paths_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let registry = RouteRegistry::new();
    let app = Application::eager(api::modules());
    assert_eq!(
        add_route_detection(&app, &registry).unwrap(),
        SourceKind::Enumerated
    );

    let path = generate_openapi_in(dir.path(), &app, &registry, &options())
        .await
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "demo-1.0.0.json");
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["paths"].as_object().unwrap().len(), 7);
    assert_eq!(written["paths"]["/orders/{id}"]["get"]["summary"], "findOne");
}

#[tokio::test]
async fn regenerating_without_reset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let registry = RouteRegistry::new();
    let app = Application::eager(api::modules());

    add_route_detection(&app, &registry).unwrap();
    generate_openapi_in(dir.path(), &app, &registry, &options())
        .await
        .unwrap();

    add_route_detection(&app, &registry).unwrap();
    let err = generate_openapi_in(dir.path(), &app, &registry, &options())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "SUMMARY_OUT_OF_RANGE");

    registry.reset();
    add_route_detection(&app, &registry).unwrap();
    assert!(generate_openapi_in(dir.path(), &app, &registry, &options())
        .await
        .is_ok());
}
