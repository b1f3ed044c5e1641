use std::path::PathBuf;

use thiserror::Error;

use crate::employee::EmployeeId;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("employee {0} not found")]
    NotFound(EmployeeId),
    #[error("employee id must not be empty")]
    InvalidEmployeeId,
    /// An employee is, directly or transitively, their own report.
    #[error("employee {employee_id} reports to themselves through the hierarchy")]
    ReportingCycle { employee_id: EmployeeId },
    #[error("employee {0} already exists")]
    DuplicateEmployee(EmployeeId),
    #[error("failed to load directory seed {}", path.display())]
    Seed {
        path: PathBuf,
        #[source]
        source: SeedError,
    },
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Directory(Box<HrError>),
}
