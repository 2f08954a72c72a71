//! HTTP request handlers for the conversion service.

pub mod form;
pub mod health;
pub mod upload;
