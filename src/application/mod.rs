//! Aggregate data fetchers and the invalidation surface.

mod dashboard;
mod history;
mod invalidation;
mod loader;
mod profile;

pub use dashboard::{DashboardData, DashboardService};
pub use history::{HistoryData, HistoryService};
pub use invalidation::{DataEvent, InvalidationTrigger};
pub use loader::SectionLoad;
pub use profile::{ProfileData, ProfileService};
