//! Text rendering for menu, listings and search results.

use super::command::MENU;
use hrdesk_core::Employee;

pub const TITLE: &str = "HR DESK MANAGEMENT SYSTEM";
const RULE: &str = "----------------------------------------";

pub fn render_menu() -> String {
    let entries: String = MENU
        .iter()
        .enumerate()
        .map(|(index, command)| format!("  {}. {}\n", index + 1, command.label()))
        .collect();
    format!("{RULE}\n{TITLE}\n{RULE}\n{entries}")
}

/// Shortest text that reads back as the stored value, e.g. `95000.0` or
/// `12000.555`. No rounding is applied.
pub fn format_salary(salary: f64) -> String {
    format!("{salary:?}")
}

/// One line per employee: `name, department, email, phone, salary`.
pub fn render_listing(employees: &[Employee]) -> String {
    let lines: String = employees
        .iter()
        .map(|employee| {
            format!(
                "{}, {}, {}, {}, {}\n",
                employee.name(),
                employee.department(),
                employee.email(),
                employee.phone_number(),
                format_salary(employee.salary())
            )
        })
        .collect();
    format!("Employees:\n{lines}")
}

pub fn render_found(employee: &Employee) -> String {
    format!(
        "Found:\nName: {}\nDepartment: {}\nEmail: {}\nPhone: {}\nSalary: {}",
        employee.name(),
        employee.department(),
        employee.email(),
        employee.phone_number(),
        format_salary(employee.salary())
    )
}

#[cfg(test)]
mod tests {
    use super::{format_salary, render_found, render_listing, render_menu};
    use hrdesk_core::Employee;

    #[test]
    fn listing_renders_one_line_per_employee() {
        let employees = vec![
            Employee::new("Jane Doe", "Engineering", "jane@x.com", "555-1234", 95000.0).unwrap(),
            Employee::new("Ana", "Finance", "ana@x.com", "555-0001", 12000.5).unwrap(),
        ];
        assert_eq!(
            render_listing(&employees),
            "Employees:\n\
             Jane Doe, Engineering, jane@x.com, 555-1234, 95000.0\n\
             Ana, Finance, ana@x.com, 555-0001, 12000.5\n"
        );
    }

    #[test]
    fn empty_listing_keeps_header() {
        assert_eq!(render_listing(&[]), "Employees:\n");
    }

    #[test]
    fn found_block_lists_every_field() {
        let employee = Employee::new("Jane Doe", "Engineering", "jane@x.com", "555-1234", 95000.0)
            .unwrap();
        let text = render_found(&employee);
        assert!(text.starts_with("Found:\n"));
        assert!(text.contains("Phone: 555-1234"));
        assert!(text.ends_with("Salary: 95000.0"));
    }

    #[test]
    fn menu_numbers_every_command() {
        let menu = render_menu();
        assert!(menu.contains("1. Add Employee"));
        assert!(menu.contains("7. Exit"));
        assert!(menu.starts_with("----"));
    }

    #[test]
    fn salary_is_shown_without_rounding() {
        assert_eq!(format_salary(12000.555), "12000.555");
        assert_eq!(format_salary(95000.0), "95000.0");
        assert_eq!(format_salary(12000.50), "12000.5");
    }
}
