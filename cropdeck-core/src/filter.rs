//! Container list filters and their query-string form.
//!
//! `ContainerFilters` is a plain value: every change produces a new value so
//! dependents can compare old and new.

use crate::enums::{ContainerPurpose, ContainerStatus, ContainerType};
use serde::{Deserialize, Serialize};

/// Active search/filter criteria for the container list.
///
/// Empty strings and `None` mean "no constraint". `Default` is the cleared
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContainerFilters {
    pub search: String,
    #[serde(rename = "type")]
    pub container_type: Option<ContainerType>,
    pub tenant: String,
    pub purpose: Option<ContainerPurpose>,
    pub status: Option<ContainerStatus>,
    pub has_alerts: bool,
}

/// A single-field filter update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Search(String),
    Type(Option<ContainerType>),
    Tenant(String),
    Purpose(Option<ContainerPurpose>),
    Status(Option<ContainerStatus>),
    HasAlerts(bool),
}

impl ContainerFilters {
    /// Merge one field over the current filters, leaving the rest untouched.
    pub fn apply(&self, change: FilterChange) -> ContainerFilters {
        let mut next = self.clone();
        match change {
            FilterChange::Search(search) => next.search = search,
            FilterChange::Type(container_type) => next.container_type = container_type,
            FilterChange::Tenant(tenant) => next.tenant = tenant,
            FilterChange::Purpose(purpose) => next.purpose = purpose,
            FilterChange::Status(status) => next.status = status,
            FilterChange::HasAlerts(has_alerts) => next.has_alerts = has_alerts,
        }
        next
    }

    /// The cleared filter set, regardless of the current one.
    pub fn cleared(&self) -> ContainerFilters {
        ContainerFilters::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == ContainerFilters::default()
    }

    /// Map to list query parameters.
    ///
    /// Every falsy field is dropped, so `has_alerts: false` is never sent.
    pub fn to_params(&self) -> ListContainersParams {
        ListContainersParams {
            skip: None,
            limit: None,
            search: non_empty(&self.search),
            type_filter: self.container_type,
            tenant_filter: non_empty(&self.tenant),
            purpose_filter: self.purpose,
            status_filter: self.status,
            has_alerts: self.has_alerts.then_some(true),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Query parameters of `GET /containers`. `None` fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ListContainersParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_filter: Option<ContainerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_filter: Option<ContainerPurpose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<ContainerStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_alerts: Option<bool>,
}

impl ListContainersParams {
    /// Key/value pairs in wire order, skipping absent and empty values.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(container_type) = self.type_filter {
            pairs.push(("type_filter", container_type.as_str().to_string()));
        }
        if let Some(tenant) = self.tenant_filter.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("tenant_filter", tenant.to_string()));
        }
        if let Some(purpose) = self.purpose_filter {
            pairs.push(("purpose_filter", purpose.as_str().to_string()));
        }
        if let Some(status) = self.status_filter {
            pairs.push(("status_filter", status.as_str().to_string()));
        }
        if let Some(has_alerts) = self.has_alerts {
            pairs.push(("has_alerts", has_alerts.to_string()));
        }
        pairs
    }
}
