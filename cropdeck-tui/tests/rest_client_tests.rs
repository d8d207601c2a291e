//! RestClient against a stub HTTP backend.

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cropdeck_core::{
    ContainerCreate, ContainerFilters, ContainerPurpose, ContainerStatus, ContainerType,
    ContainerUpdate, FilterChange,
};
use cropdeck_test_utils::{container_named, list_response, metrics_fixture, tenants};
use cropdeck_tui::api_client::{ApiClientError, ContainerApi, RestClient};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorded {
    queries: Arc<Mutex<Vec<Option<String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    deleted: Arc<Mutex<Vec<String>>>,
}

async fn list(State(rec): State<Recorded>, RawQuery(query): RawQuery) -> Json<Value> {
    rec.queries.lock().unwrap().push(query);
    let body = list_response(vec![container_named("Bay 1")]);
    Json(serde_json::to_value(body).unwrap())
}

async fn create(State(rec): State<Recorded>, Json(body): Json<Value>) -> Response {
    rec.bodies.lock().unwrap().push(body.clone());
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let created = serde_json::to_value(container_named(&name)).unwrap();
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn get_one(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "missing" => StatusCode::NOT_FOUND.into_response(),
        "broken" => (StatusCode::BAD_REQUEST, "{\"detail\":\"bad id\"}").into_response(),
        _ => Json(serde_json::to_value(container_named("Bay 1")).unwrap()).into_response(),
    }
}

async fn update(
    State(rec): State<Recorded>,
    Path(_id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.bodies.lock().unwrap().push(body);
    Json(serde_json::to_value(container_named("Bay 1")).unwrap())
}

async fn remove(State(rec): State<Recorded>, Path(id): Path<String>) -> StatusCode {
    rec.deleted.lock().unwrap().push(id);
    StatusCode::NO_CONTENT
}

async fn performance(State(rec): State<Recorded>, RawQuery(query): RawQuery) -> Json<Value> {
    rec.queries.lock().unwrap().push(query);
    Json(serde_json::to_value(metrics_fixture()).unwrap())
}

async fn tenant_list() -> Json<Value> {
    Json(serde_json::to_value(tenants(&["Acme", "Globex"])).unwrap())
}

async fn serve() -> (RestClient, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/v1/containers", get(list).post(create))
        .route("/api/v1/containers/performance", get(performance))
        .route(
            "/api/v1/containers/:id",
            get(get_one).put(update).delete(remove),
        )
        .route("/api/v1/tenants", get(tenant_list))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = RestClient::with_base_url(&format!("http://{}/api/v1/", addr)).unwrap();
    (client, recorded)
}

#[tokio::test]
async fn default_filters_send_no_query_string() {
    let (client, recorded) = serve().await;

    let response = client
        .list_containers(&ContainerFilters::default().to_params())
        .await
        .unwrap();

    assert_eq!(response.containers.len(), 1);
    assert_eq!(recorded.queries.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn active_filters_use_backend_parameter_names() {
    let (client, recorded) = serve().await;
    let filters = ContainerFilters::default()
        .apply(FilterChange::Search("bay".to_string()))
        .apply(FilterChange::Type(Some(ContainerType::Virtual)))
        .apply(FilterChange::Purpose(Some(ContainerPurpose::Research)))
        .apply(FilterChange::Status(Some(ContainerStatus::Active)))
        .apply(FilterChange::HasAlerts(true));

    client.list_containers(&filters.to_params()).await.unwrap();

    let query = recorded.queries.lock().unwrap()[0].clone().unwrap();
    assert_eq!(
        query,
        "search=bay&type_filter=virtual&purpose_filter=research&status_filter=active&has_alerts=true"
    );
}

#[tokio::test]
async fn performance_type_filter_is_optional() {
    let (client, recorded) = serve().await;

    let metrics = client.performance_metrics(None).await.unwrap();
    assert_eq!(metrics.physical.yield_data.len(), 7);
    client
        .performance_metrics(Some(ContainerType::Physical))
        .await
        .unwrap();

    let queries = recorded.queries.lock().unwrap().clone();
    assert_eq!(queries, vec![None, Some("type_filter=physical".to_string())]);
}

#[tokio::test]
async fn error_body_text_becomes_the_message() {
    let (client, _) = serve().await;

    let err = client.get_container("broken").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.user_message("Failed to fetch container"),
        "{\"detail\":\"bad id\"}"
    );
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_text() {
    let (client, _) = serve().await;

    let err = client.get_container("missing").await.unwrap_err();
    assert!(matches!(
        err,
        ApiClientError::Status { status: 404, ref message } if message == "Not Found"
    ));
}

#[tokio::test]
async fn create_posts_json_body() {
    let (client, recorded) = serve().await;
    let payload = ContainerCreate {
        name: "Bay 3".to_string(),
        tenant: "Acme".to_string(),
        purpose: ContainerPurpose::Production,
        ..ContainerCreate::default()
    };

    let created = client.create_container(&payload).await.unwrap();

    assert_eq!(created.name, "Bay 3");
    let body = recorded.bodies.lock().unwrap()[0].clone();
    cropdeck_test_utils::assertions::assert_json_contains(
        &body,
        &json!({"name": "Bay 3", "type": "physical", "tenant": "Acme", "purpose": "production"}),
    );
    assert!(body.get("location").is_none());
}

#[tokio::test]
async fn update_sends_only_present_fields() {
    let (client, recorded) = serve().await;
    let payload = ContainerUpdate {
        status: Some(ContainerStatus::Maintenance),
        ..ContainerUpdate::default()
    };

    client.update_container("c-bay-1", &payload).await.unwrap();

    let body = recorded.bodies.lock().unwrap()[0].clone();
    assert_eq!(body, json!({"status": "maintenance"}));
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let (client, recorded) = serve().await;

    client.delete_container("c-bay-1").await.unwrap();

    assert_eq!(recorded.deleted.lock().unwrap().as_slice(), &["c-bay-1".to_string()]);
}

#[tokio::test]
async fn tenants_are_listed() {
    let (client, _) = serve().await;

    let tenants = client.list_tenants().await.unwrap();
    let names: Vec<&str> = tenants.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "Globex"]);
}

#[tokio::test]
async fn unreachable_backend_reports_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = RestClient::with_base_url(&format!("http://{}/api/v1", addr)).unwrap();

    let err = client
        .list_containers(&ContainerFilters::default().to_params())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiClientError::Transport(_)));
    assert_eq!(err.status(), None);
    assert_eq!(
        err.user_message("Failed to fetch containers"),
        "Failed to fetch containers"
    );
}
