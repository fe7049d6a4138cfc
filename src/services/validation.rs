//! Input validation
//!
//! Per-operation rule sets over the raw GraphQL inputs. Each validator
//! either returns a normalized payload (trimmed strings, lowercased email,
//! parsed date/enum) or fails with the ordered list of every violated
//! rule's message, not just the first. Validators never touch storage.

use async_graphql::InputObject;
use chrono::{DateTime, NaiveDate};
use validator::ValidateEmail;

use crate::db::models::{EmployeeCreate, EmployeeUpdate, Gender};
use crate::utils::{AppError, AppResult};

// ========== Field limits ==========

pub const MAX_USERNAME_LEN: usize = 100;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_SALARY: f64 = 1000.0;

// ========== Raw inputs (schema shapes mirror the GraphQL surface) ==========

#[derive(Debug, Clone, InputObject)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, InputObject)]
#[graphql(rename_fields = "snake_case")]
pub struct AddEmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub designation: String,
    pub salary: f64,
    pub date_of_joining: String,
    pub department: String,
    pub employee_photo: Option<String>,
}

#[derive(Debug, Clone, Default, InputObject)]
#[graphql(rename_fields = "snake_case")]
pub struct UpdateEmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<String>,
    pub department: Option<String>,
    pub employee_photo: Option<String>,
}

// ========== Shared rules ==========

fn required_text(value: &str, message: &str, errors: &mut Vec<String>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(message.to_string());
    }
    trimmed.to_string()
}

fn checked_email(value: &str, errors: &mut Vec<String>) -> String {
    let email = value.trim().to_lowercase();
    if email.is_empty() {
        errors.push("Email is required".to_string());
    } else if !email.validate_email() {
        errors.push("Email must be valid".to_string());
    }
    email
}

fn checked_gender(value: &str, errors: &mut Vec<String>) -> Option<Gender> {
    match value.parse::<Gender>() {
        Ok(gender) => Some(gender),
        Err(()) => {
            errors.push("Gender must be Male, Female, or Other".to_string());
            None
        }
    }
}

fn checked_salary(value: f64, errors: &mut Vec<String>) {
    if !(value >= MIN_SALARY) {
        errors.push("Salary must be at least 1000".to_string());
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
fn checked_date(value: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    let raw = value.trim();
    if raw.is_empty() {
        errors.push("Date of joining is required".to_string());
        return None;
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()));
    if parsed.is_none() {
        errors.push("Date of joining must be a valid date".to_string());
    }
    parsed
}

fn trimmed_photo(value: String) -> Option<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

fn finish<T>(errors: Vec<String>, value: T) -> AppResult<T> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(AppError::Validation(errors))
    }
}

// ========== Per-operation validators ==========

/// Login: key non-empty after trim, password present
pub fn validate_login(username_or_email: &str, password: &str) -> AppResult<(String, String)> {
    let mut errors = Vec::new();
    let key = username_or_email.trim().to_string();
    if key.is_empty() {
        errors.push("Username or email is required".to_string());
    }
    if password.is_empty() {
        errors.push("Password is required".to_string());
    }
    finish(errors, (key, password.to_string()))
}

/// Signup: username 1–100 chars, valid lowercased email, password ≥ 6 chars
pub fn validate_signup(input: SignupInput) -> AppResult<SignupInput> {
    let mut errors = Vec::new();

    let username = input.username.trim().to_string();
    if username.is_empty() {
        errors.push("Username is required".to_string());
    } else if username.chars().count() > MAX_USERNAME_LEN {
        errors.push("Username must be between 1 and 100 characters".to_string());
    }

    let email = checked_email(&input.email, &mut errors);

    if input.password.is_empty() {
        errors.push("Password is required".to_string());
    } else if input.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("Password must be at least 6 characters".to_string());
    }

    finish(
        errors,
        SignupInput {
            username,
            email,
            password: input.password,
        },
    )
}

/// Add employee: all required fields, salary floor, calendar date, gender enum
pub fn validate_new_employee(input: AddEmployeeInput) -> AppResult<EmployeeCreate> {
    let mut errors = Vec::new();

    let first_name = required_text(&input.first_name, "First name is required", &mut errors);
    let last_name = required_text(&input.last_name, "Last name is required", &mut errors);
    let email = checked_email(&input.email, &mut errors);
    let gender = input
        .gender
        .as_deref()
        .and_then(|g| checked_gender(g, &mut errors));
    let designation = required_text(&input.designation, "Designation is required", &mut errors);
    checked_salary(input.salary, &mut errors);
    let date_of_joining = checked_date(&input.date_of_joining, &mut errors);
    let department = required_text(&input.department, "Department is required", &mut errors);
    let employee_photo = input.employee_photo.and_then(trimmed_photo);

    finish(
        errors,
        EmployeeCreate {
            first_name,
            last_name,
            email,
            gender,
            designation,
            salary: input.salary,
            date_of_joining: date_of_joining.unwrap_or_default(),
            department,
            employee_photo,
        },
    )
}

/// Update employee: every field optional; present fields follow the
/// add-employee rules, absent fields stay untouched downstream.
pub fn validate_employee_patch(input: UpdateEmployeeInput) -> AppResult<EmployeeUpdate> {
    let mut errors = Vec::new();

    let first_name = input
        .first_name
        .map(|v| required_text(&v, "First name is required", &mut errors));
    let last_name = input
        .last_name
        .map(|v| required_text(&v, "Last name is required", &mut errors));
    let email = input.email.map(|v| checked_email(&v, &mut errors));
    let gender = input
        .gender
        .as_deref()
        .and_then(|g| checked_gender(g, &mut errors));
    let designation = input
        .designation
        .map(|v| required_text(&v, "Designation is required", &mut errors));
    if let Some(salary) = input.salary {
        checked_salary(salary, &mut errors);
    }
    let date_of_joining = input
        .date_of_joining
        .as_deref()
        .and_then(|v| checked_date(v, &mut errors));
    let department = input
        .department
        .map(|v| required_text(&v, "Department is required", &mut errors));
    let employee_photo = input.employee_photo.and_then(trimmed_photo);

    finish(
        errors,
        EmployeeUpdate {
            first_name,
            last_name,
            email,
            gender,
            designation,
            salary: input.salary,
            date_of_joining,
            department,
            employee_photo,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_input() -> AddEmployeeInput {
        AddEmployeeInput {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "Ann@X.com".to_string(),
            gender: None,
            designation: "Dev".to_string(),
            salary: 50000.0,
            date_of_joining: "2024-01-01".to_string(),
            department: "Eng".to_string(),
            employee_photo: None,
        }
    }

    #[test]
    fn signup_collects_every_violation_in_order() {
        let err = validate_signup(SignupInput {
            username: "  ".to_string(),
            email: "not-an-email".to_string(),
            password: "abc".to_string(),
        })
        .unwrap_err();

        match err {
            AppError::Validation(messages) => {
                assert_eq!(
                    messages,
                    vec![
                        "Username is required",
                        "Email must be valid",
                        "Password must be at least 6 characters",
                    ]
                );
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn signup_normalizes_username_and_email() {
        let valid = validate_signup(SignupInput {
            username: "  ann  ".to_string(),
            email: "  Ann@X.Com ".to_string(),
            password: "secret1".to_string(),
        })
        .unwrap();

        assert_eq!(valid.username, "ann");
        assert_eq!(valid.email, "ann@x.com");
    }

    #[test]
    fn login_requires_both_fields() {
        let err = validate_login("  ", "").unwrap_err();
        match err {
            AppError::Validation(messages) => assert_eq!(
                messages,
                vec!["Username or email is required", "Password is required"]
            ),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(validate_login("ann", "pw").is_ok());
    }

    #[test]
    fn salary_floor_is_inclusive() {
        let mut input = add_input();
        input.salary = 999.0;
        assert!(validate_new_employee(input).is_err());

        let mut input = add_input();
        input.salary = 1000.0;
        assert!(validate_new_employee(input).is_ok());
    }

    #[test]
    fn new_employee_is_normalized() {
        let created = validate_new_employee(add_input()).unwrap();
        assert_eq!(created.email, "ann@x.com");
        assert_eq!(
            created.date_of_joining,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn gender_is_checked_only_when_supplied() {
        let mut input = add_input();
        input.gender = Some("Robot".to_string());
        let err = validate_new_employee(input).unwrap_err();
        match err {
            AppError::Validation(messages) => {
                assert_eq!(messages, vec!["Gender must be Male, Female, or Other"])
            }
            other => panic!("expected Validation, got {other:?}"),
        }

        let mut input = add_input();
        input.gender = Some("Female".to_string());
        assert_eq!(
            validate_new_employee(input).unwrap().gender,
            Some(Gender::Female)
        );
    }

    #[test]
    fn patch_validates_only_supplied_fields() {
        let patch = validate_employee_patch(UpdateEmployeeInput {
            salary: Some(2000.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.salary, Some(2000.0));
        assert!(patch.first_name.is_none());
        assert!(patch.email.is_none());

        let err = validate_employee_patch(UpdateEmployeeInput {
            salary: Some(500.0),
            email: Some("broken".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        match err {
            AppError::Validation(messages) => assert_eq!(
                messages,
                vec!["Email must be valid", "Salary must be at least 1000"]
            ),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn rfc3339_joining_dates_are_accepted() {
        let mut input = add_input();
        input.date_of_joining = "2024-01-01T09:30:00Z".to_string();
        let created = validate_new_employee(input).unwrap();
        assert_eq!(
            created.date_of_joining,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );

        let mut input = add_input();
        input.date_of_joining = "yesterday".to_string();
        assert!(validate_new_employee(input).is_err());
    }
}
