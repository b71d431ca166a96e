//! Service layer: the convergence engine, the sweep scheduler and its
//! concurrency primitives, the reference point consumer, and display mapping.

pub mod admission_pool;
pub mod convergence_engine;
pub mod coordinate_mapping;
pub mod in_flight;
pub mod point_collector;
pub mod sweep_scheduler;

pub use admission_pool::{AdmissionPermit, AdmissionPool};
pub use convergence_engine::compute_point;
pub use coordinate_mapping::{map_to_display, DisplayMode, ScreenPosition};
pub use in_flight::{InFlightCounter, InFlightGuard};
pub use point_collector::{CollectedPoints, CollectionEnd, PointCollector};
pub use sweep_scheduler::SweepScheduler;
