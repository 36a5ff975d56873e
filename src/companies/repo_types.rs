use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CompanyType {
    Corporation,
    NonProfit,
    Cooperative,
    #[serde(alias = "Sole Proprietorship")]
    SoleProprietorship,
}

#[derive(Debug, Error)]
#[error("unknown company type: {0:?}")]
pub struct ParseCompanyTypeError(pub String);

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Corporation => "Corporation",
            CompanyType::NonProfit => "NonProfit",
            CompanyType::Cooperative => "Cooperative",
            CompanyType::SoleProprietorship => "SoleProprietorship",
        }
    }
}

impl FromStr for CompanyType {
    type Err = ParseCompanyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Corporation" => Ok(CompanyType::Corporation),
            "NonProfit" => Ok(CompanyType::NonProfit),
            "Cooperative" => Ok(CompanyType::Cooperative),
            "SoleProprietorship" | "Sole Proprietorship" => Ok(CompanyType::SoleProprietorship),
            other => Err(ParseCompanyTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A company as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub employees: i32,
    pub registered: bool,
    #[serde(rename = "type")]
    pub company_type: CompanyType,
}

/// Mutable fields of a company, used for both insert and full replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyFields {
    pub name: String,
    pub description: Option<String>,
    pub employees: i32,
    pub registered: bool,
    pub company_type: CompanyType,
}

impl CompanyFields {
    pub fn with_id(self, id: Uuid) -> Company {
        Company {
            id,
            name: self.name,
            description: self.description,
            employees: self.employees,
            registered: self.registered,
            company_type: self.company_type,
        }
    }
}

/// Raw `company` row; `type` is plain text in the table.
#[derive(Debug, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub employees: i32,
    pub registered: bool,
    #[sqlx(rename = "type")]
    pub company_type: String,
}

impl TryFrom<CompanyRow> for Company {
    type Error = ParseCompanyTypeError;

    fn try_from(r: CompanyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            name: r.name,
            description: r.description,
            employees: r.employees,
            registered: r.registered,
            company_type: r.company_type.parse()?,
        })
    }
}
