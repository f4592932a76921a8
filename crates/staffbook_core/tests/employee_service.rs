use staffbook_core::db::open_db_in_memory;
use staffbook_core::{
    Employee, EmployeeService, EmployeeUpdate, EmployeeValidationError, NewEmployee,
    ServiceError, SqliteEmployeeRepository, UniqueField,
};

fn payload(id: &str, email: &str) -> NewEmployee {
    NewEmployee {
        employee_id: Some(id.to_string()),
        name: Some("Margaret Hamilton".to_string()),
        email: Some(email.to_string()),
        phone: Some("6175550100".to_string()),
        department: Some("Engineering".to_string()),
        date_of_joining: Some("2024-07-20".to_string()),
        role: Some("Director".to_string()),
    }
}

#[test]
fn create_then_list_contains_exactly_the_submitted_record() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let created = service
        .create_employee(payload("E-1", "mh@example.com"))
        .unwrap();
    let listed = service.list_employees().unwrap();

    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(
        created,
        Employee {
            employee_id: "E-1".to_string(),
            name: "Margaret Hamilton".to_string(),
            email: "mh@example.com".to_string(),
            phone: "6175550100".to_string(),
            department: "Engineering".to_string(),
            date_of_joining: "2024-07-20".to_string(),
            role: "Director".to_string(),
        }
    );
}

#[test]
fn create_returns_trimmed_stored_values() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let mut input = payload("  E-2 ", "mh2@example.com");
    input.role = Some(" Director\t".to_string());
    let created = service.create_employee(input).unwrap();

    assert_eq!(created.employee_id, "E-2");
    assert_eq!(created.role, "Director");
    assert_eq!(service.get_employee("E-2").unwrap(), created);
}

#[test]
fn create_with_missing_field_is_a_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());

    let mut input = payload("E-1", "mh@example.com");
    input.phone = None;
    let err = service.create_employee(input).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(EmployeeValidationError::MissingFields(ref fields))
            if fields == &["phone"]
    ));
    assert!(service.list_employees().unwrap().is_empty());
}

#[test]
fn conflicting_create_leaves_records_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    service
        .create_employee(payload("E-1", "mh@example.com"))
        .unwrap();
    let before = service.list_employees().unwrap();

    let by_id = service
        .create_employee(payload("E-1", "fresh@example.com"))
        .unwrap_err();
    let by_email = service
        .create_employee(payload("E-2", "mh@example.com"))
        .unwrap_err();

    assert!(matches!(by_id, ServiceError::Conflict(UniqueField::EmployeeId)));
    assert!(matches!(by_email, ServiceError::Conflict(UniqueField::Email)));
    assert_eq!(by_email.to_string(), "Email already exists");
    assert_eq!(service.list_employees().unwrap(), before);
}

#[test]
fn update_replaces_all_mutable_fields_and_keeps_identifier() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    service
        .create_employee(payload("E-1", "mh@example.com"))
        .unwrap();

    let changes = EmployeeUpdate {
        name: Some("M. Hamilton".to_string()),
        email: Some("hamilton@example.com".to_string()),
        phone: Some("0000000001".to_string()),
        department: Some("HR".to_string()),
        date_of_joining: Some("2020-02-02".to_string()),
        role: Some("Advisor".to_string()),
    };
    let updated = service.update_employee("E-1", changes).unwrap();

    assert_eq!(updated.employee_id, "E-1");
    assert_eq!(updated.name, "M. Hamilton");
    assert_eq!(updated.email, "hamilton@example.com");
    assert_eq!(updated.phone, "0000000001");
    assert_eq!(updated.department, "HR");
    assert_eq!(updated.date_of_joining, "2020-02-02");
    assert_eq!(updated.role, "Advisor");
    assert_eq!(service.list_employees().unwrap(), vec![updated]);
}

#[test]
fn update_of_unknown_identifier_is_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let existing = service
        .create_employee(payload("E-1", "mh@example.com"))
        .unwrap();

    let changes = EmployeeUpdate::from(&existing);
    let err = service.update_employee("E-404", changes).unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(ref id) if id == "E-404"));
    assert_eq!(service.list_employees().unwrap(), vec![existing]);
}

#[test]
fn partial_update_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    let existing = service
        .create_employee(payload("E-1", "mh@example.com"))
        .unwrap();

    let changes = EmployeeUpdate {
        role: None,
        ..EmployeeUpdate::from(&existing)
    };
    let err = service.update_employee("E-1", changes).unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(service.get_employee("E-1").unwrap(), existing);
}

#[test]
fn delete_removes_one_record_and_unknown_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    service
        .create_employee(payload("E-1", "one@example.com"))
        .unwrap();
    service
        .create_employee(payload("E-2", "two@example.com"))
        .unwrap();

    service.delete_employee("E-1").unwrap();
    assert_eq!(service.list_employees().unwrap().len(), 1);

    assert!(matches!(
        service.delete_employee("E-1").unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        service.delete_employee("   ").unwrap_err(),
        ServiceError::Validation(EmployeeValidationError::MissingEmployeeId)
    ));
}

#[test]
fn unexpected_errors_are_not_user_facing() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    conn.execute_batch("DROP TABLE employees;").unwrap();

    let err = service.list_employees().unwrap_err();
    assert!(matches!(err, ServiceError::Unexpected(_)));
    assert!(!err.is_user_facing());
}
