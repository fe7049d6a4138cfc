//! REST side-channel routes

pub mod upload;
