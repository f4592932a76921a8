//! Document export of the employee list.

use crate::model::employee::Employee;

const TITLE: &str = "Employee Details";
const COLUMNS: [&str; 7] = [
    "Name",
    "Employee ID",
    "Email",
    "Phone",
    "Department",
    "Date of Joining",
    "Role",
];

/// Renders `employees` as a Markdown document with one table row per record.
pub fn render_markdown(employees: &[Employee]) -> String {
    let mut out = format!("# {TITLE}\n\n");

    if employees.is_empty() {
        out.push_str("_No employee data available._\n");
        return out;
    }

    push_row(&mut out, COLUMNS.iter().copied());
    push_row(&mut out, COLUMNS.iter().map(|_| "---"));
    for employee in employees {
        push_row(
            &mut out,
            [
                employee.name.as_str(),
                employee.employee_id.as_str(),
                employee.email.as_str(),
                employee.phone.as_str(),
                employee.department.as_str(),
                employee.date_of_joining.as_str(),
                employee.role.as_str(),
            ]
            .into_iter(),
        );
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&escape_cell(cell));
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::render_markdown;
    use crate::model::employee::Employee;

    #[test]
    fn renders_header_and_rows() {
        let employee = Employee {
            employee_id: "E-9".to_string(),
            name: "Barbara | Liskov".to_string(),
            email: "bl@mit.edu".to_string(),
            phone: "6170000000".to_string(),
            department: "Engineering".to_string(),
            date_of_joining: "2019-09-09".to_string(),
            role: "Professor".to_string(),
        };

        let doc = render_markdown(&[employee]);
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines[0], "# Employee Details");
        assert_eq!(
            lines[2],
            "| Name | Employee ID | Email | Phone | Department | Date of Joining | Role |"
        );
        assert!(lines[4].starts_with("| Barbara \\| Liskov | E-9 |"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert!(render_markdown(&[]).contains("No employee data available"));
    }
}
