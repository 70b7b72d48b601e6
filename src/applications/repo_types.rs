use serde::Serialize;
use sqlx::FromRow;
use time::Date;

/// Job application row. Always read through an ownership filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct JobApplication {
    pub id: i64,
    pub user_id: i64,
    pub role: String,
    pub company: String,
    #[serde(with = "super::iso_date")]
    pub date_applied: Date,
    pub status: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "super::iso_date::option")]
    pub next_steps: Option<Date>,
}

/// Validated values for a new application.
#[derive(Debug, Clone)]
pub struct ApplicationFields {
    pub role: String,
    pub company: String,
    pub date_applied: Date,
    pub status: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub next_steps: Option<Date>,
}

/// Validated partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub role: Option<String>,
    pub company: Option<String>,
    pub date_applied: Option<Date>,
    pub status: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub next_steps: Option<Date>,
}
