//! cropdeck Core - Domain Types
//!
//! Client-side representations of the container backend's resources, the
//! list filter value object and pagination math. No I/O lives here.

use chrono::{DateTime, Utc};

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

pub mod entities;
pub mod enums;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod payloads;
pub mod timestamp;

pub use entities::{
    Container, ContainerEnvironment, ContainerId, ContainerInventory, ContainerListResponse,
    ContainerMetrics, ContainerSettings, Location, PerformanceMetrics, SeedType,
    StationReadings, Tenant, TypeMetrics, WEEKDAY_LABELS,
};
pub use enums::{
    cycle_next, cycle_optional, ContainerPurpose, ContainerStatus, ContainerType, TimeRange,
};
pub use error::{EnumParseError, ValidationError, ValidationResult};
pub use filter::{ContainerFilters, FilterChange, ListContainersParams};
pub use pagination::{Pagination, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};
pub use payloads::{ContainerCreate, ContainerUpdate};
