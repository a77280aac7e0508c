//! Domain model for a course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course the user tracks attendance for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    /// Required attendance percentage threshold (0-100)
    pub required_attendance: f64,
    pub created_at: DateTime<Utc>,
}
