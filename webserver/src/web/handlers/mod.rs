//! HTTP request handlers

pub mod api;
pub mod automation;
pub mod pages;
