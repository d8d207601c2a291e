//! Request bodies for container writes.

use crate::entities::{Container, ContainerEnvironment, ContainerSettings, Location, SeedType};
use crate::enums::{ContainerPurpose, ContainerStatus, ContainerType};
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// Body of `POST /containers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContainerCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub container_type: ContainerType,
    pub tenant: String,
    pub purpose: ContainerPurpose,
    #[serde(default)]
    pub seed_types: Vec<SeedType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub settings: ContainerSettings,
    #[serde(default)]
    pub environment: ContainerEnvironment,
}

impl ContainerCreate {
    /// Name and tenant must be non-empty. Whitespace is left for the backend
    /// to judge.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.is_empty() {
            return Err(ValidationError::RequiredFieldMissing { field: "name" });
        }
        if self.tenant.is_empty() {
            return Err(ValidationError::RequiredFieldMissing { field: "tenant" });
        }
        Ok(())
    }

    /// The payload as it goes on the wire.
    ///
    /// Virtual containers never carry a location, whatever was typed before the
    /// type was switched. Empty notes are omitted.
    pub fn normalized(&self) -> ContainerCreate {
        let mut out = self.clone();
        if !out.container_type.has_location() {
            out.location = None;
        }
        if out.notes.as_deref().is_some_and(|n| n.trim().is_empty()) {
            out.notes = None;
        }
        out
    }
}

/// Body of `PUT /containers/{id}`. Absent fields are left untouched server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContainerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<ContainerPurpose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_types: Option<Vec<SeedType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ContainerSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<ContainerEnvironment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ContainerStatus>,
}

impl ContainerUpdate {
    /// Seed an update from an existing record.
    pub fn from_container(container: &Container) -> Self {
        Self {
            tenant: Some(container.tenant.clone()),
            purpose: Some(container.purpose),
            seed_types: Some(container.seed_types.clone()),
            location: container.location.clone(),
            notes: container.notes.clone(),
            settings: Some(container.settings.clone()),
            environment: None,
            status: Some(container.status),
        }
    }
}
