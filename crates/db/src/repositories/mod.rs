//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! a pool, connection, or transaction as the first argument. The six
//! reference tables share their queries through [`reference`].

pub mod activity_log_repo;
pub mod activity_repo;
pub mod aggregation_repo;
pub mod domain_repo;
pub mod location_repo;
pub mod reference;
pub mod student_repo;
pub mod supervisor_repo;
pub mod unit_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use activity_repo::ActivityRepo;
pub use aggregation_repo::AggregationRepo;
pub use domain_repo::DomainRepo;
pub use location_repo::LocationRepo;
pub use reference::{resolve, ReferenceTable, ResolveError, Resolved};
pub use student_repo::StudentRepo;
pub use supervisor_repo::SupervisorRepo;
pub use unit_repo::UnitRepo;
