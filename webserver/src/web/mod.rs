//! HTTP layer: handlers, form parsing, and HTML views

pub mod forms;
pub mod handlers;
pub mod views;
