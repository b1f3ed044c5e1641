use std::{collections::HashMap, fs, path::Path, sync::Arc};

use tracing::{debug, info};

use crate::{
    employee::{Employee, EmployeeId},
    error::{HrError, HrResult, SeedError},
};

/// Lookup port used by the reporting calculator.
///
/// `read` returns the full record for an id, with direct reports in whatever
/// form the backing store keeps them (usually references).
pub trait EmployeeDirectory: Send + Sync {
    fn read(&self, employee_id: &EmployeeId) -> HrResult<Employee>;
}

impl<T: EmployeeDirectory + ?Sized> EmployeeDirectory for &T {
    fn read(&self, employee_id: &EmployeeId) -> HrResult<Employee> {
        (**self).read(employee_id)
    }
}

impl<T: EmployeeDirectory + ?Sized> EmployeeDirectory for Arc<T> {
    fn read(&self, employee_id: &EmployeeId) -> HrResult<Employee> {
        (**self).read(employee_id)
    }
}

/// Immutable directory held in memory, seeded once at startup.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    employees: HashMap<EmployeeId, Employee>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_employees(employees: impl IntoIterator<Item = Employee>) -> HrResult<Self> {
        let mut directory = Self::new();
        for employee in employees {
            directory.insert(employee)?;
        }
        Ok(directory)
    }

    /// Parse a JSON array of employee records.
    pub fn from_json_str(raw: &str) -> Result<Self, SeedError> {
        let employees: Vec<Employee> = serde_json::from_str(raw)?;
        Self::from_employees(employees).map_err(|err| SeedError::Directory(Box::new(err)))
    }

    pub fn load(path: impl AsRef<Path>) -> HrResult<Self> {
        let path = path.as_ref();
        let seed = |source: SeedError| HrError::Seed {
            path: path.to_path_buf(),
            source,
        };
        let raw = fs::read_to_string(path).map_err(|err| seed(err.into()))?;
        let directory = Self::from_json_str(&raw).map_err(seed)?;
        info!(
            path = %path.display(),
            employees = directory.len(),
            "employee directory loaded"
        );
        Ok(directory)
    }

    pub fn insert(&mut self, employee: Employee) -> HrResult<()> {
        if self.employees.contains_key(&employee.employee_id) {
            return Err(HrError::DuplicateEmployee(employee.employee_id));
        }
        self.employees.insert(employee.employee_id.clone(), employee);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn read(&self, employee_id: &EmployeeId) -> HrResult<Employee> {
        debug!(%employee_id, "directory lookup");
        self.employees
            .get(employee_id)
            .cloned()
            .ok_or_else(|| HrError::NotFound(employee_id.clone()))
    }
}
