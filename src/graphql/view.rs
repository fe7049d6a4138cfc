//! GraphQL output types
//!
//! Wire-facing views over the storage models. Record ids go out as plain
//! strings, timestamps as RFC 3339, and the joining date keeps its
//! `YYYY-MM-DD` form. The employee object keeps snake_case field names
//! except for the camelCase audit timestamps, matching the published API.

use async_graphql::SimpleObject;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::models::{Account, Employee};

fn iso(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Account> for UserView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username,
            email: account.email,
            created_at: iso(account.created_at),
            updated_at: iso(account.updated_at),
        }
    }
}

/// Token plus the account it names, returned by signup and login alike
#[derive(Debug, Clone, SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Employee", rename_fields = "snake_case")]
pub struct EmployeeView {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub designation: String,
    pub salary: f64,
    pub date_of_joining: String,
    pub department: String,
    pub employee_photo: Option<String>,
    #[graphql(name = "createdAt")]
    pub created_at: String,
    #[graphql(name = "updatedAt")]
    pub updated_at: String,
}

impl From<Employee> for EmployeeView {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            gender: employee.gender.map(|g| g.to_string()),
            designation: employee.designation,
            salary: employee.salary,
            date_of_joining: employee.date_of_joining.to_string(),
            department: employee.department,
            employee_photo: employee.employee_photo,
            created_at: iso(employee.created_at),
            updated_at: iso(employee.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_render_as_rfc3339() {
        assert_eq!(iso(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(iso(1_700_000_000_000), "2023-11-14T22:13:20.000Z");
    }
}
