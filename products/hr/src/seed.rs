//! Demo fixture data for local development.

use tracing::info;

use crate::{
    error::{HrError, HrResult},
    model::NewEmployee,
    service::EmployeeService,
};

const DEMO_EMPLOYEES: &[(&str, &str, &str)] = &[
    ("Mori", "Java", "Mori@Java.com"),
    ("Ada", "Lovelace", "ada@analytical.engine"),
    ("Grace", "Hopper", "grace@cobol.navy"),
    ("Ken", "Thompson", "ken@bell-labs.com"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub removed: u64,
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert the demo employees, skipping emails that already exist.
/// With `reset`, every existing row is deleted first.
pub async fn seed_demo(service: &EmployeeService, reset: bool) -> HrResult<SeedReport> {
    let mut report = SeedReport::default();
    if reset {
        report.removed = service.delete_all().await?;
    }
    for (first, last, email) in DEMO_EMPLOYEES {
        match service.create(NewEmployee::new(*first, *last, *email)).await {
            Ok(_) => report.inserted += 1,
            Err(HrError::DuplicateEmail(_)) => report.skipped += 1,
            Err(err) => return Err(err),
        }
    }
    info!(?report, "demo employees seeded");
    Ok(report)
}
