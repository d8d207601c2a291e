//! Fetch state machines for server resources.
//!
//! Each query goes `idle -> loading -> {success, error}`. Every fetch is tagged
//! with a generation; a response for a superseded generation is dropped, so a
//! slow stale response can never overwrite a fresher one.

use crate::dispatch::Command;
use cropdeck_core::{
    Container, ContainerFilters, ContainerId, ContainerListResponse, ContainerType,
    PerformanceMetrics, Tenant, TimeRange,
};

/// Identifies one fetch of one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Query<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> Query<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `generation`, so tickets issued by an earlier
    /// query for the same slot never match this one.
    pub fn resuming(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a fetch. Supersedes any fetch still in flight.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchTicket(self.generation)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Settle a fetch. Returns `false` and changes nothing when the ticket is
    /// stale. On failure the previous data is kept.
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<T, String>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                stale = ticket.0,
                current = self.generation,
                "dropping superseded response"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> QueryPhase {
        if self.loading {
            QueryPhase::Loading
        } else if self.error.is_some() {
            QueryPhase::Error
        } else if self.data.is_some() {
            QueryPhase::Success
        } else {
            QueryPhase::Idle
        }
    }
}

// ============================================================================
// CONTAINERS
// ============================================================================

/// Container list keyed by the active filters.
#[derive(Debug, Clone, Default)]
pub struct ContainersQuery {
    filters: ContainerFilters,
    query: Query<ContainerListResponse>,
}

impl ContainersQuery {
    pub fn new(filters: ContainerFilters) -> Self {
        Self {
            filters,
            query: Query::new(),
        }
    }

    pub fn filters(&self) -> &ContainerFilters {
        &self.filters
    }

    /// Replace the filters; fetches only when they differ from the current ones.
    pub fn set_filters(&mut self, filters: ContainerFilters) -> Option<Command> {
        if filters == self.filters {
            return None;
        }
        self.filters = filters;
        Some(self.refetch())
    }

    /// Fetch with the current filters regardless of whether anything changed.
    pub fn refetch(&mut self) -> Command {
        let ticket = self.query.begin();
        Command::FetchContainers {
            ticket,
            params: self.filters.to_params(),
        }
    }

    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<ContainerListResponse, String>,
    ) -> bool {
        self.query.resolve(ticket, result)
    }

    /// Last fetched containers, empty before the first success.
    pub fn containers(&self) -> &[Container] {
        self.query
            .data()
            .map(|r| r.containers.as_slice())
            .unwrap_or(&[])
    }

    pub fn total(&self) -> u64 {
        self.query.data().map(|r| r.total).unwrap_or(0)
    }

    pub fn loading(&self) -> bool {
        self.query.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.query.error()
    }

    pub fn phase(&self) -> QueryPhase {
        self.query.phase()
    }
}

// ============================================================================
// PERFORMANCE METRICS
// ============================================================================

/// Performance aggregates keyed by type filter and time range.
#[derive(Debug, Clone, Default)]
pub struct PerformanceQuery {
    type_filter: Option<ContainerType>,
    time_range: TimeRange,
    query: Query<PerformanceMetrics>,
}

impl PerformanceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_filter(type_filter: Option<ContainerType>) -> Self {
        Self {
            type_filter,
            ..Self::default()
        }
    }

    pub fn type_filter(&self) -> Option<ContainerType> {
        self.type_filter
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn set_type_filter(&mut self, type_filter: Option<ContainerType>) -> Option<Command> {
        self.set_dependencies(type_filter, self.time_range)
    }

    pub fn set_time_range(&mut self, time_range: TimeRange) -> Option<Command> {
        self.set_dependencies(self.type_filter, time_range)
    }

    fn set_dependencies(
        &mut self,
        type_filter: Option<ContainerType>,
        time_range: TimeRange,
    ) -> Option<Command> {
        if type_filter == self.type_filter && time_range == self.time_range {
            return None;
        }
        self.type_filter = type_filter;
        self.time_range = time_range;
        Some(self.refetch())
    }

    pub fn refetch(&mut self) -> Command {
        let ticket = self.query.begin();
        Command::FetchMetrics {
            ticket,
            type_filter: self.type_filter,
        }
    }

    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<PerformanceMetrics, String>) -> bool {
        self.query.resolve(ticket, result)
    }

    pub fn metrics(&self) -> Option<&PerformanceMetrics> {
        self.query.data()
    }

    pub fn loading(&self) -> bool {
        self.query.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.query.error()
    }
}

// ============================================================================
// TENANTS
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TenantsQuery {
    query: Query<Vec<Tenant>>,
}

impl TenantsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refetch(&mut self) -> Command {
        Command::FetchTenants {
            ticket: self.query.begin(),
        }
    }

    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<Vec<Tenant>, String>) -> bool {
        self.query.resolve(ticket, result)
    }

    pub fn tenants(&self) -> &[Tenant] {
        self.query.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn loading(&self) -> bool {
        self.query.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.query.error()
    }
}

// ============================================================================
// SINGLE CONTAINER
// ============================================================================

/// One container loaded by id, for the detail screen.
#[derive(Debug, Clone)]
pub struct ContainerQuery {
    id: ContainerId,
    query: Query<Container>,
}

impl ContainerQuery {
    pub fn new(id: impl Into<ContainerId>) -> Self {
        Self::resuming(id, 0)
    }

    pub fn resuming(id: impl Into<ContainerId>, generation: u64) -> Self {
        Self {
            id: id.into(),
            query: Query::resuming(generation),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.query.generation()
    }

    pub fn refetch(&mut self) -> Command {
        Command::FetchContainer {
            ticket: self.query.begin(),
            id: self.id.clone(),
        }
    }

    /// Settle a fetch for `id`. A response for any other container is dropped.
    pub fn resolve(
        &mut self,
        id: &str,
        ticket: FetchTicket,
        result: Result<Container, String>,
    ) -> bool {
        if id != self.id {
            tracing::debug!(response = id, showing = %self.id, "dropping response for another container");
            return false;
        }
        self.query.resolve(ticket, result)
    }

    pub fn container(&self) -> Option<&Container> {
        self.query.data()
    }

    pub fn loading(&self) -> bool {
        self.query.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.query.error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropdeck_core::FilterChange;

    fn list_of(names: &[&str]) -> ContainerListResponse {
        ContainerListResponse {
            containers: names
                .iter()
                .map(|n| cropdeck_test_utils::container_named(n))
                .collect(),
            total: names.len() as u64,
            page: 1,
            size: names.len() as u64,
            pages: 1,
        }
    }

    #[test]
    fn test_query_starts_idle() {
        let query: Query<u32> = Query::new();
        assert_eq!(query.phase(), QueryPhase::Idle);
        assert!(query.data().is_none());
    }

    #[test]
    fn test_begin_clears_error_and_sets_loading() {
        let mut query: Query<u32> = Query::new();
        let ticket = query.begin();
        assert!(query.resolve(ticket, Err("boom".to_string())));
        assert_eq!(query.phase(), QueryPhase::Error);

        query.begin();
        assert!(query.loading());
        assert!(query.error().is_none());
        assert_eq!(query.phase(), QueryPhase::Loading);
    }

    #[test]
    fn test_stale_ticket_is_noop() {
        let mut query: Query<u32> = Query::new();
        let first = query.begin();
        let second = query.begin();

        assert!(query.resolve(second, Ok(2)));
        assert!(!query.resolve(first, Ok(1)));
        assert_eq!(query.data(), Some(&2));
        assert!(!query.loading());
    }

    #[test]
    fn test_stale_ticket_does_not_end_loading() {
        let mut query: Query<u32> = Query::new();
        let first = query.begin();
        let _second = query.begin();
        assert!(!query.resolve(first, Err("late".to_string())));
        assert!(query.loading());
        assert!(query.error().is_none());
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let mut query: Query<u32> = Query::new();
        let ticket = query.begin();
        query.resolve(ticket, Ok(7));
        let ticket = query.begin();
        query.resolve(ticket, Err("down".to_string()));
        assert_eq!(query.data(), Some(&7));
        assert_eq!(query.error(), Some("down"));
        assert!(!query.loading());
    }

    #[test]
    fn test_set_filters_fetches_only_on_change() {
        let mut containers = ContainersQuery::new(ContainerFilters::default());
        assert!(containers.set_filters(ContainerFilters::default()).is_none());

        let next = containers
            .filters()
            .apply(FilterChange::Search("bay".to_string()));
        match containers.set_filters(next) {
            Some(Command::FetchContainers { params, .. }) => {
                assert_eq!(params.search.as_deref(), Some("bay"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(containers.loading());
    }

    #[test]
    fn test_containers_error_then_refetch_recovers() {
        let mut containers = ContainersQuery::default();
        let Command::FetchContainers { ticket, .. } = containers.refetch() else {
            panic!("expected containers fetch");
        };
        containers.resolve(ticket, Err("Failed to fetch containers".to_string()));
        assert!(!containers.loading());
        assert_eq!(containers.error(), Some("Failed to fetch containers"));
        assert!(containers.containers().is_empty());

        let Command::FetchContainers { ticket, .. } = containers.refetch() else {
            panic!("expected containers fetch");
        };
        containers.resolve(ticket, Ok(list_of(&["a", "b"])));
        assert!(containers.error().is_none());
        assert_eq!(containers.containers().len(), 2);
        assert_eq!(containers.total(), 2);
    }

    #[test]
    fn test_performance_dependencies() {
        let mut metrics = PerformanceQuery::new();
        assert!(metrics.set_type_filter(None).is_none());
        assert!(matches!(
            metrics.set_type_filter(Some(ContainerType::Virtual)),
            Some(Command::FetchMetrics {
                type_filter: Some(ContainerType::Virtual),
                ..
            })
        ));
        assert!(metrics.set_time_range(TimeRange::Week).is_none());
        assert!(metrics.set_time_range(TimeRange::Year).is_some());
    }

    #[test]
    fn test_container_query_uses_id() {
        let mut query = ContainerQuery::new("c-42");
        match query.refetch() {
            Command::FetchContainer { id, .. } => assert_eq!(id, "c-42"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_container_query_drops_other_ids_and_old_generations() {
        let mut first = ContainerQuery::new("a");
        let Command::FetchContainer { ticket: old, .. } = first.refetch() else {
            panic!("expected container fetch");
        };

        let mut second = ContainerQuery::resuming("b", first.generation());
        let Command::FetchContainer { ticket, .. } = second.refetch() else {
            panic!("expected container fetch");
        };
        assert_ne!(ticket, old);

        let a = cropdeck_test_utils::container_named("a");
        assert!(!second.resolve("a", old, Ok(a.clone())));
        assert!(!second.resolve("a", ticket, Ok(a)));
        assert!(second.container().is_none());
        assert!(second.loading());
    }
}
