//! cropdeck Test Utilities
//!
//! Shared test infrastructure for the cropdeck workspace:
//! - Proptest generators for domain types
//! - Fixtures for common containers, tenants and metrics
//! - Assertions for payload shape on the wire

pub use cropdeck_core::{
    Container, ContainerCreate, ContainerEnvironment, ContainerFilters, ContainerInventory,
    ContainerListResponse, ContainerMetrics, ContainerPurpose, ContainerSettings,
    ContainerStatus, ContainerType, FilterChange, Location, PerformanceMetrics, SeedType,
    StationReadings, Tenant, Timestamp, TypeMetrics,
};

pub use fixtures::*;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for cropdeck domain types.

    use super::*;
    use proptest::prelude::*;

    pub fn arb_container_type() -> impl Strategy<Value = ContainerType> {
        prop_oneof![Just(ContainerType::Physical), Just(ContainerType::Virtual)]
    }

    pub fn arb_purpose() -> impl Strategy<Value = ContainerPurpose> {
        prop_oneof![
            Just(ContainerPurpose::Development),
            Just(ContainerPurpose::Research),
            Just(ContainerPurpose::Production),
        ]
    }

    pub fn arb_status() -> impl Strategy<Value = ContainerStatus> {
        prop_oneof![
            Just(ContainerStatus::Created),
            Just(ContainerStatus::Active),
            Just(ContainerStatus::Maintenance),
            Just(ContainerStatus::Inactive),
        ]
    }

    /// Timestamps between 2020 and 2030, whole seconds.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
        })
    }

    pub fn arb_location() -> impl Strategy<Value = Location> {
        (
            "[A-Z][a-z]{2,10}",
            "[A-Z]{2}",
            proptest::option::of("[A-Za-z0-9 ]{1,20}"),
        )
            .prop_map(|(city, country, address)| Location {
                city,
                country,
                address,
            })
    }

    pub fn arb_filters() -> impl Strategy<Value = ContainerFilters> {
        (
            "[a-z0-9 ]{0,8}",
            proptest::option::of(arb_container_type()),
            "[A-Za-z]{0,6}",
            proptest::option::of(arb_purpose()),
            proptest::option::of(arb_status()),
            any::<bool>(),
        )
            .prop_map(
                |(search, container_type, tenant, purpose, status, has_alerts)| {
                    ContainerFilters {
                        search,
                        container_type,
                        tenant,
                        purpose,
                        status,
                        has_alerts,
                    }
                },
            )
    }

    pub fn arb_filter_change() -> impl Strategy<Value = FilterChange> {
        prop_oneof![
            "[a-z0-9 ]{0,8}".prop_map(FilterChange::Search),
            proptest::option::of(arb_container_type()).prop_map(FilterChange::Type),
            "[A-Za-z]{0,6}".prop_map(FilterChange::Tenant),
            proptest::option::of(arb_purpose()).prop_map(FilterChange::Purpose),
            proptest::option::of(arb_status()).prop_map(FilterChange::Status),
            any::<bool>().prop_map(FilterChange::HasAlerts),
        ]
    }

    /// A create payload as a user could leave it in the form, including
    /// location typed before switching to virtual.
    pub fn arb_container_create() -> impl Strategy<Value = ContainerCreate> {
        (
            "[A-Za-z0-9 ]{0,12}",
            arb_container_type(),
            "[A-Za-z]{0,8}",
            arb_purpose(),
            proptest::option::of(arb_location()),
            proptest::option::of("[a-z ]{0,16}"),
            any::<bool>(),
        )
            .prop_map(
                |(name, container_type, tenant, purpose, location, notes, shadow)| {
                    ContainerCreate {
                        name,
                        container_type,
                        tenant,
                        purpose,
                        location,
                        notes,
                        settings: ContainerSettings {
                            shadow_service_enabled: shadow,
                            ..ContainerSettings::default()
                        },
                        ..ContainerCreate::default()
                    }
                },
            )
    }

    pub fn arb_container() -> impl Strategy<Value = Container> {
        (
            "[A-Za-z0-9 ]{1,12}",
            arb_container_type(),
            arb_purpose(),
            arb_status(),
            proptest::option::of(arb_location()),
            arb_timestamp(),
            any::<bool>(),
        )
            .prop_map(
                |(name, container_type, purpose, status, location, created, has_alert)| {
                    Container {
                        location: location.filter(|_| container_type.has_location()),
                        container_type,
                        purpose,
                        status,
                        created,
                        modified: created,
                        has_alert,
                        ..container_named(&name)
                    }
                },
            )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common testing scenarios.

    use super::*;

    fn fixed_time() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Stable id derived from a display name, e.g. "Bay 3" -> "c-bay-3".
    pub fn container_id_for(name: &str) -> String {
        format!("c-{}", name.trim().to_lowercase().replace(' ', "-"))
    }

    /// An active physical container in Utrecht owned by "Acme".
    pub fn container_named(name: &str) -> Container {
        Container {
            id: container_id_for(name),
            name: name.to_string(),
            container_type: ContainerType::Physical,
            tenant: "Acme".to_string(),
            purpose: ContainerPurpose::Development,
            seed_types: vec![SeedType::new("5", "Basil", None)],
            location: Some(Location {
                city: "Utrecht".to_string(),
                country: "NL".to_string(),
                address: None,
            }),
            notes: None,
            settings: ContainerSettings::default(),
            environment: ContainerEnvironment {
                air_temperature: Some(21.5),
                humidity: Some(64.0),
                co2: Some(820.0),
                nursery_station: Some(StationReadings {
                    water_temperature: 19.0,
                    ec: 1.4,
                    ph: 6.1,
                    water_hours: 2.0,
                    light_hours: 16.0,
                }),
                cultivation_area: None,
            },
            inventory: ContainerInventory {
                tray_ids: vec!["TR-1".to_string(), "TR-2".to_string()],
                panel_ids: vec!["PN-1".to_string()],
            },
            metrics: ContainerMetrics {
                yield_kg: Some(42.5),
                space_utilization_percentage: Some(78.0),
            },
            status: ContainerStatus::Active,
            created: fixed_time(),
            modified: fixed_time(),
            has_alert: false,
        }
    }

    /// A container of the given type with a fresh random id.
    pub fn container_of_type(container_type: ContainerType) -> Container {
        let id = Uuid::now_v7().to_string();
        let mut container = container_named(&format!("{} {}", container_type.label(), &id[..8]));
        container.id = id;
        container.container_type = container_type;
        if !container_type.has_location() {
            container.location = None;
            container.settings.robotics_simulation_enabled = Some(false);
        }
        container
    }

    /// Tenants with ids `t-1`, `t-2`, ... in the given order.
    pub fn tenants(names: &[&str]) -> Vec<Tenant> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Tenant {
                id: format!("t-{}", i + 1),
                name: name.to_string(),
            })
            .collect()
    }

    /// Single-page list envelope around `containers`.
    pub fn list_response(containers: Vec<Container>) -> ContainerListResponse {
        let total = containers.len() as u64;
        ContainerListResponse {
            containers,
            total,
            page: 1,
            size: total,
            pages: if total == 0 { 0 } else { 1 },
        }
    }

    pub fn metrics_fixture() -> PerformanceMetrics {
        PerformanceMetrics {
            physical: TypeMetrics {
                count: 4,
                avg_yield: 12.5,
                total_yield: 50.0,
                avg_utilization: 81.0,
                yield_data: vec![10.0, 11.0, 12.0, 13.0, 12.0, 14.0, 15.0],
                utilization_data: vec![80.0, 82.0, 79.0, 81.0, 83.0, 80.0, 82.0],
            },
            r#virtual: TypeMetrics {
                count: 2,
                avg_yield: 8.0,
                total_yield: 16.0,
                avg_utilization: 55.0,
                yield_data: vec![7.0, 8.0, 8.5, 7.5, 8.0, 9.0, 8.0],
                utilization_data: vec![50.0, 55.0, 60.0, 52.0, 58.0, 54.0, 56.0],
            },
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions on payloads as they appear on the wire.

    use super::*;

    /// Assert that the serialized create payload has no `location` key.
    #[track_caller]
    pub fn assert_no_location_on_wire(payload: &ContainerCreate) {
        let value = serde_json::to_value(payload)
            .unwrap_or_else(|e| panic!("payload did not serialize: {}", e));
        assert!(
            value.get("location").is_none(),
            "Expected no location, got: {}",
            value
        );
    }

    /// Assert that every key in `expected` appears in the serialized payload
    /// with the same value.
    #[track_caller]
    pub fn assert_json_contains(actual: &serde_json::Value, expected: &serde_json::Value) {
        let (Some(actual_map), Some(expected_map)) = (actual.as_object(), expected.as_object())
        else {
            assert_eq!(actual, expected);
            return;
        };
        for (key, want) in expected_map {
            match actual_map.get(key) {
                Some(got) if got.is_object() && want.is_object() => assert_json_contains(got, want),
                Some(got) => assert_eq!(got, want, "Mismatch at key {:?}", key),
                None => panic!("Missing key {:?} in {}", key, actual),
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_container_named_fixture() {
        let container = container_named("Bay 3");
        assert_eq!(container.id, "c-bay-3");
        assert_eq!(container.location_text(), "Utrecht, NL");
    }

    #[test]
    fn test_virtual_fixture_has_no_location() {
        let container = container_of_type(ContainerType::Virtual);
        assert!(container.location.is_none());
        assert_ne!(container.id, container_of_type(ContainerType::Virtual).id);
    }

    #[test]
    fn test_list_response_counts() {
        let response = list_response(vec![container_named("a"), container_named("b")]);
        assert_eq!(response.total, 2);
        assert_eq!(list_response(Vec::new()).pages, 0);
    }

    #[test]
    fn test_json_contains_nested() {
        let actual = serde_json::json!({"a": 1, "b": {"c": 2, "d": 3}});
        assertions::assert_json_contains(&actual, &serde_json::json!({"b": {"c": 2}}));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_generated_container_round_trips(container in generators::arb_container()) {
            let json = serde_json::to_string(&container).unwrap();
            let back: Container = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, container);
        }

        #[test]
        fn prop_virtual_containers_never_carry_location(container in generators::arb_container()) {
            if container.container_type == ContainerType::Virtual {
                prop_assert!(container.location.is_none());
            }
        }
    }
}
