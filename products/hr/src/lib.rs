//! HR module: employee records with email uniqueness.

pub mod error;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use error::{HrError, HrResult};
pub use model::{Employee, EmployeeChanges, NewEmployee};
pub use service::EmployeeService;
pub use store::{EmployeeStore, SeaOrmEmployeeStore, StoreError, StoreResult};
