use async_graphql::{ID, SimpleObject};
use products_hr::{Employee, ReportingStructure};

#[derive(Clone, Debug, SimpleObject)]
pub struct EmployeePayload {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
    /// Ids of direct reports, in directory order.
    pub direct_reports: Vec<ID>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ReportingStructurePayload {
    pub employee: EmployeePayload,
    pub number_of_reports: i32,
}

impl From<Employee> for EmployeePayload {
    fn from(employee: Employee) -> Self {
        Self {
            id: ID::from(employee.employee_id.as_str()),
            direct_reports: employee
                .direct_reports
                .iter()
                .map(|report| ID::from(report.employee_id().as_str()))
                .collect(),
            first_name: employee.first_name,
            last_name: employee.last_name,
            position: employee.position,
            department: employee.department,
        }
    }
}

impl From<ReportingStructure> for ReportingStructurePayload {
    fn from(structure: ReportingStructure) -> Self {
        Self {
            number_of_reports: i32::try_from(structure.number_of_reports).unwrap_or(i32::MAX),
            employee: structure.employee.into(),
        }
    }
}
