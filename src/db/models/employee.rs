//! Employee record model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Employee id type
pub type EmployeeId = RecordId;

/// Fixed gender enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

/// Employee model matching the `employee` table schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub designation: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create employee payload (normalized by validation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub designation: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
}

/// Partial update payload; absent fields are left untouched by MERGE
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
}

impl EmployeeUpdate {
    /// True when no field is supplied at all
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.gender.is_none()
            && self.designation.is_none()
            && self.salary.is_none()
            && self.date_of_joining.is_none()
            && self.department.is_none()
            && self.employee_photo.is_none()
    }
}
