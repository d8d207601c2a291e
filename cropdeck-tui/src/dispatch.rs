//! Side effects requested by the app state and their execution.
//!
//! State transitions return `Command`s instead of doing I/O. The dispatcher
//! runs each one on the tokio runtime and posts the outcome back to the event
//! loop, where it is routed to the query or form that asked for it.

use crate::api_client::{ApiClientError, ContainerApi};
use crate::events::TuiEvent;
use crate::query::FetchTicket;
use cropdeck_core::{
    Container, ContainerCreate, ContainerId, ContainerListResponse, ContainerType,
    ContainerUpdate, ListContainersParams, PerformanceMetrics, Tenant,
};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchContainers {
        ticket: FetchTicket,
        params: ListContainersParams,
    },
    FetchMetrics {
        ticket: FetchTicket,
        type_filter: Option<ContainerType>,
    },
    FetchTenants {
        ticket: FetchTicket,
    },
    FetchContainer {
        ticket: FetchTicket,
        id: ContainerId,
    },
    CreateContainer {
        form_id: u64,
        payload: ContainerCreate,
    },
    UpdateContainer {
        form_id: u64,
        id: ContainerId,
        payload: ContainerUpdate,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::FetchContainers { .. } => "fetch_containers",
            Command::FetchMetrics { .. } => "fetch_metrics",
            Command::FetchTenants { .. } => "fetch_tenants",
            Command::FetchContainer { .. } => "fetch_container",
            Command::CreateContainer { .. } => "create_container",
            Command::UpdateContainer { .. } => "update_container",
        }
    }
}

/// Outcome of a read, tagged with the ticket it was issued under.
#[derive(Debug, Clone)]
pub enum FetchResult {
    Containers {
        ticket: FetchTicket,
        result: Result<ContainerListResponse, String>,
    },
    Metrics {
        ticket: FetchTicket,
        result: Result<PerformanceMetrics, String>,
    },
    Tenants {
        ticket: FetchTicket,
        result: Result<Vec<Tenant>, String>,
    },
    Container {
        ticket: FetchTicket,
        id: ContainerId,
        result: Result<Container, String>,
    },
}

/// Outcome of a form submission, tagged with the form instance.
#[derive(Debug, Clone)]
pub enum SubmitResult {
    Created {
        form_id: u64,
        result: Result<Container, String>,
    },
    Updated {
        form_id: u64,
        result: Result<Container, String>,
    },
}

fn user_facing<T>(result: Result<T, ApiClientError>, fallback: &str) -> Result<T, String> {
    result.map_err(|err| {
        tracing::warn!(error = %err, "{}", fallback);
        err.user_message(fallback)
    })
}

/// Run one command to completion and produce the event that reports it.
pub async fn execute(api: &dyn ContainerApi, command: Command) -> TuiEvent {
    match command {
        Command::FetchContainers { ticket, params } => {
            let result = user_facing(
                api.list_containers(&params).await,
                "Failed to fetch containers",
            );
            TuiEvent::Fetched(FetchResult::Containers { ticket, result })
        }
        Command::FetchMetrics {
            ticket,
            type_filter,
        } => {
            let result = user_facing(
                api.performance_metrics(type_filter).await,
                "Failed to fetch metrics",
            );
            TuiEvent::Fetched(FetchResult::Metrics { ticket, result })
        }
        Command::FetchTenants { ticket } => {
            let result = user_facing(api.list_tenants().await, "Failed to fetch tenants");
            TuiEvent::Fetched(FetchResult::Tenants { ticket, result })
        }
        Command::FetchContainer { ticket, id } => {
            let result = user_facing(api.get_container(&id).await, "Failed to fetch container");
            TuiEvent::Fetched(FetchResult::Container { ticket, id, result })
        }
        Command::CreateContainer { form_id, payload } => {
            let result = user_facing(
                api.create_container(&payload).await,
                "Failed to create container",
            );
            TuiEvent::Submitted(SubmitResult::Created { form_id, result })
        }
        Command::UpdateContainer {
            form_id,
            id,
            payload,
        } => {
            let result = user_facing(
                api.update_container(&id, &payload).await,
                "Failed to update container",
            );
            TuiEvent::Submitted(SubmitResult::Updated { form_id, result })
        }
    }
}

/// Spawns commands and forwards their outcome to the event loop.
///
/// Requests are fire-once: no retries, no cancellation. Superseded reads are
/// discarded on arrival by the owning query.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn ContainerApi>,
    sender: mpsc::Sender<TuiEvent>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn ContainerApi>, sender: mpsc::Sender<TuiEvent>) -> Self {
        Self { api, sender }
    }

    pub fn dispatch(&self, command: Command) {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        tracing::debug!(command = command.name(), "dispatching");
        tokio::spawn(async move {
            let event = execute(api.as_ref(), command).await;
            if sender.send(event).await.is_err() {
                tracing::debug!("event loop closed before response arrived");
            }
        });
    }

    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }
}
