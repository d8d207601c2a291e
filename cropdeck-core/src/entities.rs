//! Entity types mirrored from the container REST backend.
//!
//! The server is authoritative for every value here; the dashboard only holds
//! snapshots of the last response.

use crate::enums::{ContainerPurpose, ContainerStatus, ContainerType};
use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// Server-assigned container identifier.
pub type ContainerId = String;

/// Address of a physical container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Location {
    pub city: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    /// Short "city, country" form used in list rows.
    pub fn short(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// Catalog entry for a crop variety. Reference data, never created here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedType {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
}

impl SeedType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, variety: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variety: variety.map(str::to_string),
            supplier: None,
            batch_id: None,
        }
    }

    /// "Name (Variety)" or just "Name".
    pub fn label(&self) -> String {
        match &self.variety {
            Some(variety) => format!("{} ({})", self.name, variety),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContainerSettings {
    #[serde(default)]
    pub shadow_service_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copied_environment_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robotics_simulation_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Water/nutrient readings for one growing station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StationReadings {
    pub water_temperature: f64,
    pub ec: f64,
    pub ph: f64,
    pub water_hours: f64,
    pub light_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContainerEnvironment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nursery_station: Option<StationReadings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultivation_area: Option<StationReadings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContainerInventory {
    #[serde(default)]
    pub tray_ids: Vec<String>,
    #[serde(default)]
    pub panel_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ContainerMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_utilization_percentage: Option<f64>,
}

/// A tenant-owned growing environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub name: String,
    #[serde(rename = "type")]
    pub container_type: ContainerType,
    /// Tenant name, not id.
    pub tenant: String,
    pub purpose: ContainerPurpose,
    #[serde(default)]
    pub seed_types: Vec<SeedType>,
    /// Meaningful only when `container_type` is physical.
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub settings: ContainerSettings,
    #[serde(default)]
    pub environment: ContainerEnvironment,
    #[serde(default)]
    pub inventory: ContainerInventory,
    #[serde(default)]
    pub metrics: ContainerMetrics,
    pub status: ContainerStatus,
    #[serde(with = "crate::timestamp")]
    pub created: Timestamp,
    #[serde(with = "crate::timestamp")]
    pub modified: Timestamp,
    #[serde(default)]
    pub has_alert: bool,
}

impl Container {
    /// Location text for list rows: "city, country" for physical containers
    /// that have one, `-` otherwise.
    pub fn location_text(&self) -> String {
        match (&self.location, self.container_type.has_location()) {
            (Some(location), true) => location.short(),
            _ => "-".to_string(),
        }
    }

    pub fn seed_type_labels(&self) -> Vec<String> {
        self.seed_types.iter().map(SeedType::label).collect()
    }

    pub fn ecosystem_connected(&self) -> bool {
        self.settings.ecosystem.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
}

/// Envelope returned by `GET /containers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContainerListResponse {
    pub containers: Vec<Container>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
    pub pages: u64,
}

/// Aggregates for one container type, computed server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TypeMetrics {
    pub count: u64,
    pub avg_yield: f64,
    pub total_yield: f64,
    pub avg_utilization: f64,
    /// One point per weekday, Monday first.
    #[serde(default)]
    pub yield_data: Vec<f64>,
    #[serde(default)]
    pub utilization_data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceMetrics {
    pub physical: TypeMetrics,
    #[serde(rename = "virtual")]
    pub r#virtual: TypeMetrics,
}

impl PerformanceMetrics {
    pub fn for_type(&self, container_type: ContainerType) -> &TypeMetrics {
        match container_type {
            ContainerType::Physical => &self.physical,
            ContainerType::Virtual => &self.r#virtual,
        }
    }
}

/// Weekday labels for the 7-point metric series.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER_JSON: &str = r#"{
        "id": "c-1",
        "name": "Bay 3",
        "type": "physical",
        "tenant": "Acme",
        "purpose": "production",
        "seed_types": [{"id": "1", "name": "Lettuce", "variety": "Butterhead"}],
        "location": {"city": "Utrecht", "country": "NL", "address": null},
        "notes": null,
        "settings": {"shadow_service_enabled": true, "copied_environment_from": null},
        "environment": {"air_temperature": 21.5, "humidity": null},
        "inventory": {"tray_ids": ["t1"], "panel_ids": []},
        "metrics": {"yield_kg": 12.0, "space_utilization_percentage": 80.0},
        "status": "active",
        "created": "2024-03-01T10:00:00",
        "modified": "2024-03-02T10:00:00Z",
        "has_alert": true
    }"#;

    #[test]
    fn test_container_deserializes_backend_shape() {
        let container: Container = serde_json::from_str(CONTAINER_JSON).unwrap();
        assert_eq!(container.container_type, ContainerType::Physical);
        assert_eq!(container.purpose, ContainerPurpose::Production);
        assert_eq!(container.status, ContainerStatus::Active);
        assert_eq!(container.seed_type_labels(), vec!["Lettuce (Butterhead)"]);
        assert!(container.settings.shadow_service_enabled);
        assert_eq!(container.environment.air_temperature, Some(21.5));
        assert!(container.has_alert);
    }

    #[test]
    fn test_location_text_for_physical() {
        let container: Container = serde_json::from_str(CONTAINER_JSON).unwrap();
        assert_eq!(container.location_text(), "Utrecht, NL");
    }

    #[test]
    fn test_location_text_ignored_for_virtual() {
        let mut container: Container = serde_json::from_str(CONTAINER_JSON).unwrap();
        container.container_type = ContainerType::Virtual;
        assert_eq!(container.location_text(), "-");
        container.container_type = ContainerType::Physical;
        container.location = None;
        assert_eq!(container.location_text(), "-");
    }

    #[test]
    fn test_performance_metrics_virtual_key() {
        let json = r#"{
            "physical": {"count": 2, "avg_yield": 63.0, "total_yield": 81.0, "avg_utilization": 80.0,
                         "yield_data": [45, 52, 63, 58, 71, 69, 75], "utilization_data": [75, 82, 80, 85, 78, 83, 80]},
            "virtual": {"count": 1, "avg_yield": 45.0, "total_yield": 67.0, "avg_utilization": 65.0,
                        "yield_data": [32, 38, 45, 41, 52, 48, 55], "utilization_data": [60, 68, 65, 70, 62, 67, 65]}
        }"#;
        let metrics: PerformanceMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.for_type(ContainerType::Virtual).count, 1);
        assert_eq!(metrics.for_type(ContainerType::Physical).yield_data.len(), 7);
    }

    #[test]
    fn test_seed_type_label_without_variety() {
        let seed = SeedType::new("4", "Spinach", None);
        assert_eq!(seed.label(), "Spinach");
    }
}
