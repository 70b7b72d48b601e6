use serde::Deserialize;
use time::Date;

use super::repo_types::{ApplicationFields, ApplicationPatch};
use crate::auth::services::is_valid_email;
use crate::error::AppError;

pub const DEFAULT_STATUS: &str = "Applied";

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub role: String,
    pub company: String,
    #[serde(with = "super::iso_date")]
    pub date_applied: Date,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "super::iso_date::option")]
    pub next_steps: Option<Date>,
}

impl CreateApplicationRequest {
    pub fn validate(self) -> Result<ApplicationFields, AppError> {
        let status = match optional_text(self.status) {
            Some(s) => s,
            None => DEFAULT_STATUS.to_string(),
        };
        Ok(ApplicationFields {
            role: required_text("role", self.role)?,
            company: required_text("company", self.company)?,
            date_applied: self.date_applied,
            status,
            contact_name: optional_text(self.contact_name),
            contact_email: contact_email(self.contact_email)?,
            location: optional_text(self.location),
            notes: optional_text(self.notes),
            next_steps: self.next_steps,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateApplicationRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, with = "super::iso_date::option")]
    pub date_applied: Option<Date>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "super::iso_date::option")]
    pub next_steps: Option<Date>,
}

impl UpdateApplicationRequest {
    pub fn validate(self) -> Result<ApplicationPatch, AppError> {
        Ok(ApplicationPatch {
            role: self.role.map(|v| required_text("role", v)).transpose()?,
            company: self.company.map(|v| required_text("company", v)).transpose()?,
            date_applied: self.date_applied,
            status: self.status.map(|v| required_text("status", v)).transpose()?,
            contact_name: optional_text(self.contact_name),
            contact_email: contact_email(self.contact_email)?,
            location: optional_text(self.location),
            notes: optional_text(self.notes),
            next_steps: self.next_steps,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

impl Pagination {
    pub const MAX_LIMIT: i64 = 500;

    /// (limit, offset) with limit in 1..=MAX_LIMIT and offset >= 0.
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, Self::MAX_LIMIT), self.offset.max(0))
    }
}

fn required_text(field: &str, value: String) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn contact_email(value: Option<String>) -> Result<Option<String>, AppError> {
    match optional_text(value) {
        Some(email) if !is_valid_email(&email) => {
            Err(AppError::validation("contact_email is not a valid email"))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn create_body(json: &str) -> CreateApplicationRequest {
        serde_json::from_str(json).expect("valid body")
    }

    #[test]
    fn create_defaults_status_and_parses_dates() {
        let fields = create_body(
            r#"{"role":" Backend Engineer ","company":"Acme","date_applied":"2024-03-01","next_steps":"2024-03-15"}"#,
        )
        .validate()
        .unwrap();
        assert_eq!(fields.role, "Backend Engineer");
        assert_eq!(fields.status, DEFAULT_STATUS);
        assert_eq!(fields.date_applied, date!(2024 - 03 - 01));
        assert_eq!(fields.next_steps, Some(date!(2024 - 03 - 15)));
        assert_eq!(fields.contact_name, None);
    }

    #[test]
    fn create_rejects_blank_required_fields() {
        let err = create_body(r#"{"role":"  ","company":"Acme","date_applied":"2024-03-01"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "role must not be empty");
    }

    #[test]
    fn create_rejects_bad_contact_email() {
        let err = create_body(
            r#"{"role":"Dev","company":"Acme","date_applied":"2024-03-01","contact_email":"bob"}"#,
        )
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn create_body_rejects_malformed_date() {
        let res = serde_json::from_str::<CreateApplicationRequest>(
            r#"{"role":"Dev","company":"Acme","date_applied":"03/01/2024"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn update_keeps_absent_fields_unset() {
        let patch: UpdateApplicationRequest =
            serde_json::from_str(r#"{"status":"Interviewing"}"#).unwrap();
        let patch = patch.validate().unwrap();
        assert_eq!(patch.status.as_deref(), Some("Interviewing"));
        assert!(patch.role.is_none());
        assert!(patch.date_applied.is_none());
    }

    #[test]
    fn update_rejects_blank_status() {
        let patch = UpdateApplicationRequest {
            status: Some("".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn pagination_is_clamped() {
        let p = Pagination { limit: 10_000, offset: -5 };
        assert_eq!(p.clamped(), (Pagination::MAX_LIMIT, 0));
        let p = Pagination { limit: 0, offset: 3 };
        assert_eq!(p.clamped(), (1, 3));
    }
}
