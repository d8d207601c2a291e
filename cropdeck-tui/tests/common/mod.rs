//! Shared helpers for the dashboard integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use cropdeck_core::{
    Container, ContainerCreate, ContainerListResponse, ContainerType, ContainerUpdate,
    ListContainersParams, PerformanceMetrics, Tenant,
};
use cropdeck_test_utils::{container_id_for, container_named, list_response, metrics_fixture};
use cropdeck_tui::api_client::{ApiClientError, ContainerApi};
use cropdeck_tui::dispatch::{execute, Command};
use cropdeck_tui::events::TuiEvent;
use cropdeck_tui::state::App;
use std::collections::HashMap;
use std::sync::Mutex;

/// One call seen by the fake backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListContainersParams),
    Get(String),
    Create(ContainerCreate),
    Update(String, ContainerUpdate),
    Delete(String),
    Metrics(Option<ContainerType>),
    Tenants,
}

impl Call {
    pub fn op(&self) -> &'static str {
        match self {
            Call::List(_) => "list_containers",
            Call::Get(_) => "get_container",
            Call::Create(_) => "create_container",
            Call::Update(..) => "update_container",
            Call::Delete(_) => "delete_container",
            Call::Metrics(_) => "performance_metrics",
            Call::Tenants => "list_tenants",
        }
    }
}

/// In-memory backend that records every call and can be scripted to fail.
pub struct FakeContainerApi {
    containers: Mutex<Vec<Container>>,
    tenants: Vec<Tenant>,
    metrics: PerformanceMetrics,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, (u16, String)>>,
}

impl FakeContainerApi {
    pub fn new(containers: Vec<Container>, tenants: Vec<Tenant>) -> Self {
        Self {
            containers: Mutex::new(containers),
            tenants,
            metrics: metrics_fixture(),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Make every call to `op` fail with the given status and body text.
    pub fn fail(&self, op: &'static str, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (status, message.to_string()));
    }

    pub fn recover(&self) {
        self.failures.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ops(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::op).collect()
    }

    pub fn stored(&self) -> Vec<Container> {
        self.containers.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiClientError> {
        let op = call.op();
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(op) {
            Some((status, message)) => Err(ApiClientError::Status {
                status: *status,
                message: status_text(*status, message),
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiClientError {
        ApiClientError::Status {
            status: 404,
            message: "Container not found".to_string(),
        }
    }
}

/// Same fallback as the REST client: an empty body reads as the status reason.
fn status_text(status: u16, body: &str) -> String {
    if !body.trim().is_empty() {
        return body.to_string();
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map_or_else(|| status.to_string(), str::to_string)
}

#[async_trait]
impl ContainerApi for FakeContainerApi {
    async fn list_containers(
        &self,
        params: &ListContainersParams,
    ) -> Result<ContainerListResponse, ApiClientError> {
        self.record(Call::List(params.clone()))?;
        let search = params.search.clone().unwrap_or_default().to_lowercase();
        let matching = self
            .stored()
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&search))
            .filter(|c| params.type_filter.map_or(true, |t| c.container_type == t))
            .filter(|c| params.status_filter.map_or(true, |s| c.status == s))
            .collect();
        Ok(list_response(matching))
    }

    async fn get_container(&self, id: &str) -> Result<Container, ApiClientError> {
        self.record(Call::Get(id.to_string()))?;
        self.stored()
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(Self::not_found)
    }

    async fn create_container(
        &self,
        payload: &ContainerCreate,
    ) -> Result<Container, ApiClientError> {
        self.record(Call::Create(payload.clone()))?;
        let container = Container {
            id: container_id_for(&payload.name),
            name: payload.name.clone(),
            container_type: payload.container_type,
            tenant: payload.tenant.clone(),
            purpose: payload.purpose,
            seed_types: payload.seed_types.clone(),
            location: payload.location.clone(),
            notes: payload.notes.clone(),
            settings: payload.settings.clone(),
            ..container_named(&payload.name)
        };
        self.containers.lock().unwrap().push(container.clone());
        Ok(container)
    }

    async fn update_container(
        &self,
        id: &str,
        payload: &ContainerUpdate,
    ) -> Result<Container, ApiClientError> {
        self.record(Call::Update(id.to_string(), payload.clone()))?;
        let mut containers = self.containers.lock().unwrap();
        let container = containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(Self::not_found)?;
        if let Some(tenant) = &payload.tenant {
            container.tenant = tenant.clone();
        }
        if let Some(purpose) = payload.purpose {
            container.purpose = purpose;
        }
        if let Some(status) = payload.status {
            container.status = status;
        }
        if let Some(notes) = &payload.notes {
            container.notes = Some(notes.clone());
        }
        Ok(container.clone())
    }

    async fn delete_container(&self, id: &str) -> Result<(), ApiClientError> {
        self.record(Call::Delete(id.to_string()))?;
        let mut containers = self.containers.lock().unwrap();
        let before = containers.len();
        containers.retain(|c| c.id != id);
        if containers.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn performance_metrics(
        &self,
        type_filter: Option<ContainerType>,
    ) -> Result<PerformanceMetrics, ApiClientError> {
        self.record(Call::Metrics(type_filter))?;
        Ok(self.metrics.clone())
    }

    async fn list_tenants(&self) -> Result<Vec<Tenant>, ApiClientError> {
        self.record(Call::Tenants)?;
        Ok(self.tenants.clone())
    }
}

/// Run commands in order against `api`, feeding every outcome back into the
/// app and following up on the commands that produces.
pub async fn drive(api: &FakeContainerApi, app: &mut App, commands: Vec<Command>) {
    let mut pending = commands;
    while !pending.is_empty() {
        let mut next = Vec::new();
        for command in pending {
            match execute(api, command).await {
                TuiEvent::Fetched(result) => app.handle_fetch(result),
                TuiEvent::Submitted(result) => next.extend(app.handle_submit(result)),
                other => panic!("unexpected event: {:?}", other),
            }
        }
        pending = next;
    }
}
