//! Reusable widget components.

pub mod detail;
pub mod filter;
pub mod metric_card;
pub mod progress;
pub mod status;

pub use detail::DetailPanel;
pub use filter::{FilterBar, FilterOption};
pub use metric_card::MetricCard;
pub use progress::UtilizationGauge;
pub use status::StatusMessage;
