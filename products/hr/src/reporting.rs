use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::{
    directory::EmployeeDirectory,
    employee::{DirectReport, Employee, EmployeeId, ReportingStructure},
    error::{HrError, HrResult},
};

enum Step {
    Visit(DirectReport),
    /// All reports below this employee have been walked.
    Leave(EmployeeId),
}

/// Builds reporting structures by walking direct reports through a directory.
///
/// Holds nothing but the directory handle; every call recomputes from scratch.
#[derive(Clone, Debug)]
pub struct ReportingStructureService<D> {
    directory: D,
}

impl<D: EmployeeDirectory> ReportingStructureService<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Look the employee up, then count everyone below them.
    #[instrument(name = "hr.reporting_structure.by_id", skip(self))]
    pub fn generate_for_id(&self, employee_id: &EmployeeId) -> HrResult<ReportingStructure> {
        let employee = self.directory.read(employee_id)?;
        self.generate(employee)
    }

    /// Accepts either a stub or a loaded record; stubs are resolved first.
    pub fn generate_for_report(&self, report: DirectReport) -> HrResult<ReportingStructure> {
        let employee = self.ensure_loaded(report)?;
        self.generate(employee)
    }

    #[instrument(
        name = "hr.reporting_structure",
        skip_all,
        fields(employee_id = %employee.employee_id)
    )]
    pub fn generate(&self, employee: Employee) -> HrResult<ReportingStructure> {
        debug!("building reporting structure");
        let number_of_reports = self.count_reports(&employee)?;
        debug!(number_of_reports, "reporting structure built");
        Ok(ReportingStructure {
            employee,
            number_of_reports,
        })
    }

    /// Depth-first walk with an explicit stack, so deep chains cannot
    /// exhaust the call stack. An employee reachable through several managers
    /// is counted once; meeting an employee that is still on the current path
    /// is a cycle.
    fn count_reports(&self, root: &Employee) -> HrResult<usize> {
        let mut visited = HashSet::from([root.employee_id.clone()]);
        let mut on_path = HashSet::from([root.employee_id.clone()]);
        let mut pending: Vec<Step> = root
            .direct_reports
            .iter()
            .rev()
            .cloned()
            .map(Step::Visit)
            .collect();
        let mut count = 0usize;

        while let Some(step) = pending.pop() {
            let report = match step {
                Step::Leave(employee_id) => {
                    on_path.remove(&employee_id);
                    continue;
                }
                Step::Visit(report) => report,
            };
            let employee_id = report.employee_id().clone();
            if on_path.contains(&employee_id) {
                return Err(HrError::ReportingCycle { employee_id });
            }
            if !visited.insert(employee_id.clone()) {
                trace!(%employee_id, "already counted through another manager");
                continue;
            }

            let employee = self.ensure_loaded(report)?;
            count += 1;
            on_path.insert(employee_id.clone());
            pending.push(Step::Leave(employee_id));
            pending.extend(employee.direct_reports.into_iter().rev().map(Step::Visit));
        }

        Ok(count)
    }

    fn ensure_loaded(&self, report: DirectReport) -> HrResult<Employee> {
        match report {
            DirectReport::Loaded(employee) => Ok(*employee),
            DirectReport::Reference(stub) => {
                trace!(employee_id = %stub.employee_id, "resolving direct report");
                self.directory.read(&stub.employee_id)
            }
        }
    }
}
