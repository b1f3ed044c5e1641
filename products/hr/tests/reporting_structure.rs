use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use products_hr::{
    DirectReport, Employee, EmployeeDirectory, EmployeeId, HrError, HrResult, InMemoryDirectory,
    ReportingStructureService,
};

/// Wraps the in-memory directory and records how many lookups were made.
struct CountingDirectory {
    inner: InMemoryDirectory,
    reads: AtomicUsize,
}

impl CountingDirectory {
    fn new(inner: InMemoryDirectory) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl EmployeeDirectory for CountingDirectory {
    fn read(&self, employee_id: &EmployeeId) -> HrResult<Employee> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(employee_id)
    }
}

fn id(raw: &str) -> EmployeeId {
    EmployeeId::parse(raw).unwrap()
}

fn person(raw: &str, reports: &[&str]) -> Employee {
    Employee::new(id(raw), "First", format!("Last-{raw}"), "Staff", "Ops")
        .with_reports(reports.iter().map(|r| DirectReport::reference(id(r))))
}

/// a -> [b, c], b -> [d]
fn sample_directory() -> InMemoryDirectory {
    InMemoryDirectory::from_employees([
        person("a", &["b", "c"]),
        person("b", &["d"]),
        person("c", &[]),
        person("d", &[]),
    ])
    .unwrap()
}

/// Four levels, with a few wide layers.
fn wide_directory() -> InMemoryDirectory {
    InMemoryDirectory::from_employees([
        person("ceo", &["cto", "cfo", "coo"]),
        person("cto", &["eng1", "eng2", "eng3"]),
        person("cfo", &["acct"]),
        person("coo", &[]),
        person("eng1", &["intern1", "intern2"]),
        person("eng2", &[]),
        person("eng3", &["contractor"]),
        person("acct", &[]),
        person("intern1", &[]),
        person("intern2", &[]),
        person("contractor", &[]),
    ])
    .unwrap()
}

#[test]
fn leaf_employee_has_no_reports() {
    let service = ReportingStructureService::new(sample_directory());
    let structure = service.generate(person("lonely", &[])).unwrap();
    assert_eq!(structure.number_of_reports, 0);
}

#[test]
fn sample_org_counts() {
    let service = ReportingStructureService::new(sample_directory());
    for (who, expected) in [("a", 3), ("b", 1), ("c", 0), ("d", 0)] {
        let structure = service.generate_for_id(&id(who)).unwrap();
        assert_eq!(structure.number_of_reports, expected, "reports under {who}");
        assert_eq!(structure.employee.employee_id, id(who));
    }
}

#[test]
fn count_is_sum_over_direct_reports_at_every_node() {
    let directory = wide_directory();
    let service = ReportingStructureService::new(&directory);
    for who in [
        "ceo", "cto", "cfo", "coo", "eng1", "eng2", "eng3", "acct", "intern1",
    ] {
        let employee = directory.read(&id(who)).unwrap();
        let total = service.generate(employee.clone()).unwrap().number_of_reports;
        let summed: usize = employee
            .direct_reports
            .iter()
            .map(|report| {
                1 + service
                    .generate_for_id(report.employee_id())
                    .unwrap()
                    .number_of_reports
            })
            .sum();
        assert_eq!(total, summed, "induction fails at {who}");
    }
    assert_eq!(
        service.generate_for_id(&id("ceo")).unwrap().number_of_reports,
        10
    );
}

#[test]
fn generate_is_idempotent() {
    let service = ReportingStructureService::new(wide_directory());
    let first = service.generate_for_id(&id("ceo")).unwrap();
    let second = service.generate_for_id(&id("ceo")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn by_id_matches_fully_loaded_record() {
    let directory = sample_directory();
    let service = ReportingStructureService::new(&directory);

    let loaded = person("a", &[]).with_reports([
        DirectReport::from(person("b", &[]).with_reports([DirectReport::from(person("d", &[]))])),
        DirectReport::from(person("c", &[])),
    ]);

    let by_id = service.generate_for_id(&id("a")).unwrap();
    let by_record = service.generate(loaded).unwrap();
    assert_eq!(by_id.number_of_reports, by_record.number_of_reports);
}

#[test]
fn unknown_id_is_not_found() {
    let service = ReportingStructureService::new(sample_directory());
    let err = service.generate_for_id(&id("ghost")).unwrap_err();
    assert!(matches!(err, HrError::NotFound(missing) if missing == id("ghost")));
}

#[test]
fn dangling_stub_aborts_the_walk() {
    let directory =
        InMemoryDirectory::from_employees([person("boss", &["real", "missing"]), person("real", &[])])
            .unwrap();
    let service = ReportingStructureService::new(directory);
    let err = service.generate_for_id(&id("boss")).unwrap_err();
    assert!(matches!(err, HrError::NotFound(missing) if missing == id("missing")));
}

#[test]
fn stub_reports_are_resolved_before_counting() {
    let directory = Arc::new(CountingDirectory::new(sample_directory()));
    let service = ReportingStructureService::new(directory.clone());

    let with_stub = person("a", &["b", "c"]);
    let structure = service.generate(with_stub).unwrap();

    assert_eq!(structure.number_of_reports, 3);
    // b, c and d were stubs; a was passed in loaded.
    assert_eq!(directory.reads(), 3);
}

#[test]
fn loaded_subtrees_skip_the_directory() {
    let directory = Arc::new(CountingDirectory::new(InMemoryDirectory::new()));
    let service = ReportingStructureService::new(directory.clone());

    let root = person("root", &[]).with_reports([
        DirectReport::from(person("left", &[]).with_reports([DirectReport::from(person("leaf", &[]))])),
        DirectReport::from(person("right", &[])),
    ]);
    let structure = service.generate(root).unwrap();

    assert_eq!(structure.number_of_reports, 3);
    assert_eq!(directory.reads(), 0);
}

#[test]
fn mixed_stub_and_loaded_reports() {
    let directory = Arc::new(CountingDirectory::new(sample_directory()));
    let service = ReportingStructureService::new(directory.clone());

    let root = person("a", &[]).with_reports([
        DirectReport::from(person("b", &["d"])),
        DirectReport::reference(id("c")),
    ]);
    let structure = service.generate(root).unwrap();

    assert_eq!(structure.number_of_reports, 3);
    assert_eq!(directory.reads(), 2);
}

#[test]
fn shared_report_is_counted_once() {
    let directory = InMemoryDirectory::from_employees([
        person("top", &["left", "right"]),
        person("left", &["shared"]),
        person("right", &["shared"]),
        person("shared", &[]),
    ])
    .unwrap();
    let directory = Arc::new(CountingDirectory::new(directory));
    let service = ReportingStructureService::new(directory.clone());
    let structure = service.generate_for_id(&id("top")).unwrap();
    assert_eq!(structure.number_of_reports, 3);
    // top, left, right, shared: the second path to shared is not re-read.
    assert_eq!(directory.reads(), 4);
}

#[test]
fn back_edge_is_a_cycle() {
    let directory = InMemoryDirectory::from_employees([
        person("top", &["mid"]),
        person("mid", &["low"]),
        person("low", &["top"]),
    ])
    .unwrap();
    let service = ReportingStructureService::new(directory);
    let err = service.generate_for_id(&id("mid")).unwrap_err();
    assert!(matches!(err, HrError::ReportingCycle { employee_id } if employee_id == id("mid")));
}

#[test]
fn deep_chain_does_not_recurse() {
    const DEPTH: usize = 10_000;
    let employees = (0..DEPTH).map(|level| {
        let name = format!("level-{level}");
        if level + 1 < DEPTH {
            let next = format!("level-{}", level + 1);
            person(&name, &[next.as_str()])
        } else {
            person(&name, &[])
        }
    });
    let directory = InMemoryDirectory::from_employees(employees).unwrap();
    let service = ReportingStructureService::new(directory);

    let structure = service.generate_for_id(&id("level-0")).unwrap();
    assert_eq!(structure.number_of_reports, DEPTH - 1);
}
