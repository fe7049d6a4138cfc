//! Employee service
//!
//! Orchestrates the employee operations: validate, run the uniqueness
//! pre-checks, then hand the normalized payload to the repository. Lookup
//! misses on write operations are hard `NotFound` failures; the read path
//! stays nullable for the resolver to pass through.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::Employee;
use crate::db::repository::EmployeeRepository;
use crate::services::validation::{
    AddEmployeeInput, UpdateEmployeeInput, validate_employee_patch, validate_new_employee,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct EmployeeService {
    employees: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            employees: EmployeeRepository::new(db),
        }
    }

    /// Every employee, newest first
    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        Ok(self.employees.find_all().await?)
    }

    /// Lookup by id; `None` when the id is well-formed but unknown
    pub async fn get(&self, eid: &str) -> AppResult<Option<Employee>> {
        Ok(self.employees.find_by_id(eid).await?)
    }

    /// Filtered listing by designation and/or department substring.
    ///
    /// Blank filters count as absent; at least one must be supplied.
    pub async fn search(
        &self,
        designation: Option<String>,
        department: Option<String>,
    ) -> AppResult<Vec<Employee>> {
        let designation = normalize_filter(designation);
        let department = normalize_filter(department);
        if designation.is_none() && department.is_none() {
            return Err(AppError::bad_request(
                "At least one of designation or department is required",
            ));
        }
        Ok(self
            .employees
            .search(designation.as_deref(), department.as_deref())
            .await?)
    }

    /// Create an employee record
    pub async fn add(&self, input: AddEmployeeInput) -> AppResult<Employee> {
        let data = validate_new_employee(input)?;

        if self.employees.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::already_exists("Email already registered"));
        }

        let employee = self.employees.create(data).await?;
        tracing::info!(employee = %employee.id, "Employee created");
        Ok(employee)
    }

    /// Partial update by id
    ///
    /// A malformed id fails before the field values are even looked at. An
    /// empty patch returns the record as-is without bumping its timestamp.
    pub async fn update(&self, eid: &str, input: UpdateEmployeeInput) -> AppResult<Employee> {
        let rid = EmployeeRepository::parse_id(eid)?;
        let patch = validate_employee_patch(input)?;

        let existing = self
            .employees
            .find_by_id(eid)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))?;
        if patch.is_empty() {
            return Ok(existing);
        }

        if let Some(email) = &patch.email
            && self.employees.email_taken_by_other(email, &rid).await?
        {
            return Err(AppError::already_exists("Email already registered"));
        }

        let updated = self.employees.update(eid, patch).await?;
        updated.ok_or_else(|| AppError::not_found("Employee not found"))
    }

    /// Delete by id, returning the record's final state
    pub async fn delete(&self, eid: &str) -> AppResult<Employee> {
        let deleted = self.employees.delete(eid).await?;
        match &deleted {
            Some(employee) => tracing::info!(employee = %employee.id, "Employee deleted"),
            None => {}
        }
        deleted.ok_or_else(|| AppError::not_found("Employee not found"))
    }
}

fn normalize_filter(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_count_as_absent() {
        assert_eq!(normalize_filter(None), None);
        assert_eq!(normalize_filter(Some("   ".to_string())), None);
        assert_eq!(
            normalize_filter(Some("  Engineer ".to_string())),
            Some("Engineer".to_string())
        );
    }
}
