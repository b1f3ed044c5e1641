//! HR vertical slice: employee records, the directory port and reporting
//! structures computed over it.

pub mod directory;
pub mod employee;
pub mod error;
pub mod reporting;

pub use directory::{EmployeeDirectory, InMemoryDirectory};
pub use employee::{DirectReport, Employee, EmployeeId, EmployeeRef, ReportingStructure};
pub use error::{HrError, HrResult, SeedError};
pub use reporting::ReportingStructureService;
