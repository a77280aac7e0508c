//! # REST API Interface Layer
//!
//! Provides the HTTP endpoints the frontend talks to. This layer handles:
//! - JSON request/response serialization
//! - Input validation before the domain layer
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! It is a pure translation layer; business rules live in the domain
//! services.

pub mod attendance_apis;
pub mod course_apis;
pub mod export_apis;
pub mod preference_apis;

pub mod mappers;
