//! Service layer: validation plus the operation orchestrators

pub mod account;
pub mod employee;
pub mod validation;

pub use account::AccountService;
pub use employee::EmployeeService;
pub use validation::{AddEmployeeInput, SignupInput, UpdateEmployeeInput};
