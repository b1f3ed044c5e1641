use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// Unique, non-empty employee identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn parse(raw: impl Into<String>) -> HrResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HrError::InvalidEmployeeId);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = HrError;

    fn try_from(value: String) -> HrResult<Self> {
        Self::parse(value)
    }
}

impl From<EmployeeId> for String {
    fn from(value: EmployeeId) -> Self {
        value.0
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A fully loaded employee record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
    #[serde(default, deserialize_with = "reports_or_null")]
    pub direct_reports: Vec<DirectReport>,
}

impl Employee {
    pub fn new(
        employee_id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            employee_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            position: position.into(),
            department: department.into(),
            direct_reports: Vec::new(),
        }
    }

    pub fn with_reports(mut self, reports: impl IntoIterator<Item = DirectReport>) -> Self {
        self.direct_reports.extend(reports);
        self
    }
}

/// Identifier-only stand-in for an employee that has not been looked up yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    pub employee_id: EmployeeId,
}

/// One entry of an employee's direct-report list.
///
/// On the wire a loaded report is a full employee object and a reference is
/// `{"employeeId": "..."}`; the loaded form is tried first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DirectReport {
    Loaded(Box<Employee>),
    Reference(EmployeeRef),
}

impl DirectReport {
    pub fn reference(employee_id: EmployeeId) -> Self {
        Self::Reference(EmployeeRef { employee_id })
    }

    pub fn employee_id(&self) -> &EmployeeId {
        match self {
            Self::Loaded(employee) => &employee.employee_id,
            Self::Reference(stub) => &stub.employee_id,
        }
    }
}

impl From<Employee> for DirectReport {
    fn from(value: Employee) -> Self {
        Self::Loaded(Box::new(value))
    }
}

impl From<EmployeeId> for DirectReport {
    fn from(value: EmployeeId) -> Self {
        Self::reference(value)
    }
}

/// Computed view of an employee and everyone below them. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructure {
    pub employee: Employee,
    pub number_of_reports: usize,
}

fn reports_or_null<'de, D>(deserializer: D) -> Result<Vec<DirectReport>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Vec<DirectReport>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
