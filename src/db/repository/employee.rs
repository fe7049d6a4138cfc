//! Employee repository

use chrono::Utc;
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};

const TABLE: &str = "employee";

#[derive(Serialize)]
struct NewEmployeeRow {
    #[serde(flatten)]
    fields: EmployeeCreate,
    created_at: i64,
    updated_at: i64,
}

#[derive(Serialize)]
struct EmployeePatchRow {
    #[serde(flatten)]
    fields: EmployeeUpdate,
    updated_at: i64,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Parse a client-supplied employee id
    pub fn parse_id(id: &str) -> RepoResult<RecordId> {
        parse_record_id(TABLE, id)
    }

    /// All employees, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Case-insensitive substring search on designation and/or department.
    ///
    /// With both patterns supplied the match is OR: either field matching
    /// qualifies the record.
    pub async fn search(
        &self,
        designation: Option<&str>,
        department: Option<&str>,
    ) -> RepoResult<Vec<Employee>> {
        let sql = match (designation, department) {
            (Some(_), Some(_)) => {
                "SELECT * FROM employee \
                 WHERE string::contains(string::lowercase(designation), $designation) \
                    OR string::contains(string::lowercase(department), $department) \
                 ORDER BY created_at DESC"
            }
            (Some(_), None) => {
                "SELECT * FROM employee \
                 WHERE string::contains(string::lowercase(designation), $designation) \
                 ORDER BY created_at DESC"
            }
            (None, Some(_)) => {
                "SELECT * FROM employee \
                 WHERE string::contains(string::lowercase(department), $department) \
                 ORDER BY created_at DESC"
            }
            (None, None) => return self.find_all().await,
        };

        let mut query = self.base.db().query(sql);
        if let Some(pattern) = designation {
            query = query.bind(("designation", pattern.to_lowercase()));
        }
        if let Some(pattern) = department {
            query = query.bind(("department", pattern.to_lowercase()));
        }

        let employees: Vec<Employee> = query.await?.take(0)?;
        Ok(employees)
    }

    /// Find employee by id; malformed ids are rejected before the query
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let rid = Self::parse_id(id)?;
        let employee: Option<Employee> = self.base.db().select(rid).await?;
        Ok(employee)
    }

    /// Find employee by (lowercased) email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// True when another record than `exclude` already holds `email`
    pub async fn email_taken_by_other(&self, email: &str, exclude: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email AND id != $exclude LIMIT 1")
            .bind(("email", email.to_string()))
            .bind(("exclude", exclude.clone()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(!employees.is_empty())
    }

    /// Create a new employee record
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let now = Utc::now().timestamp_millis();
        let created: Option<Employee> = self
            .base
            .db()
            .create(TABLE)
            .content(NewEmployeeRow {
                fields: data,
                created_at: now,
                updated_at: now,
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Merge the supplied fields into an existing record.
    ///
    /// Absent fields are untouched; the table schema re-asserts the salary
    /// floor on the merged value. Returns the post-update record, or none
    /// when the id does not exist.
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Option<Employee>> {
        let rid = Self::parse_id(id)?;
        let updated: Option<Employee> = self
            .base
            .db()
            .update(rid)
            .merge(EmployeePatchRow {
                fields: data,
                updated_at: Utc::now().timestamp_millis(),
            })
            .await?;
        Ok(updated)
    }

    /// Delete by id, returning the record's last state (none if absent)
    pub async fn delete(&self, id: &str) -> RepoResult<Option<Employee>> {
        let rid = Self::parse_id(id)?;
        let deleted: Option<Employee> = self.base.db().delete(rid).await?;
        Ok(deleted)
    }
}
