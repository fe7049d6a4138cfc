//! Storage models for the two collections

pub mod account;
pub mod employee;

pub use account::{Account, AccountCreate, AccountId};
pub use employee::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate, Gender};
