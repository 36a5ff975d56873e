use serde::Deserialize;
use utoipa::ToSchema;

use super::repo_types::{CompanyFields, CompanyType};
use crate::error::ApiError;

pub const REQUIRED_FIELDS: &str = "Name, Employees, and Type are required fields";
pub const INVALID_TYPE: &str = "Type must be one of Corporation, NonProfit, Cooperative, SoleProprietorship";

/// Request body for create and patch. Absent fields take their zero value,
/// so "missing" and "empty" are the same thing.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(default)]
pub struct CompanyPayload {
    pub name: String,
    pub description: Option<String>,
    pub employees: i32,
    pub registered: bool,
    #[serde(rename = "type")]
    pub company_type: String,
}

impl CompanyPayload {
    /// Checks applied before insert: name, employees and type must be present.
    pub fn validate_new(self) -> Result<CompanyFields, ApiError> {
        if self.name.is_empty() || self.employees == 0 || self.company_type.is_empty() {
            return Err(ApiError::Validation(REQUIRED_FIELDS.into()));
        }
        self.into_fields()
    }

    /// Full replacement for patch. Only the type has to be recognisable.
    pub fn into_fields(self) -> Result<CompanyFields, ApiError> {
        let company_type: CompanyType = self
            .company_type
            .parse()
            .map_err(|_| ApiError::Validation(INVALID_TYPE.into()))?;
        Ok(CompanyFields {
            name: self.name,
            description: self.description,
            employees: self.employees,
            registered: self.registered,
            company_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, employees: i32, company_type: &str) -> CompanyPayload {
        CompanyPayload {
            name: name.into(),
            employees,
            company_type: company_type.into(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let fields = payload("Acme", 10, "Corporation").validate_new().unwrap();
        assert_eq!(fields.company_type, CompanyType::Corporation);
        assert_eq!(fields.employees, 10);
    }

    #[test]
    fn rejects_missing_required_fields() {
        for p in [
            payload("", 10, "Corporation"),
            payload("Acme", 0, "Corporation"),
            payload("Acme", 10, ""),
        ] {
            match p.validate_new() {
                Err(ApiError::Validation(msg)) => assert_eq!(msg, REQUIRED_FIELDS),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_unknown_type() {
        match payload("Acme", 1, "Guild").validate_new() {
            Err(ApiError::Validation(msg)) => assert_eq!(msg, INVALID_TYPE),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn patch_does_not_require_name_or_employees() {
        let fields = payload("", 0, "Cooperative").into_fields().unwrap();
        assert!(fields.name.is_empty());
        assert_eq!(fields.employees, 0);
    }

    #[test]
    fn missing_json_fields_default_to_empty() {
        let p: CompanyPayload = serde_json::from_str(r#"{"name":"Acme"}"#).unwrap();
        assert_eq!(p.employees, 0);
        assert!(p.company_type.is_empty());
        assert!(p.validate_new().is_err());
    }
}
