//! sea-orm entities for the employee directory.

pub mod employees;
