use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

// A posting owned by a company. `equity` is NUMERIC in the store and a
// decimal string on the wire, never a binary float.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

impl CreateJob {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title must not be empty".to_string()));
        }
        if self.company_handle.trim().is_empty() {
            return Err(AppError::BadRequest(
                "company_handle must not be empty".to_string(),
            ));
        }
        if let Some(salary) = self.salary {
            validate_salary(salary)?;
        }
        if let Some(equity) = &self.equity {
            validate_equity(equity)?;
        }
        Ok(())
    }
}

// `id` and `company_handle` are immutable; a patch may only carry these three.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
}

impl UpdateJob {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::BadRequest("title must not be empty".to_string()));
            }
        }
        if let Some(salary) = self.salary {
            validate_salary(salary)?;
        }
        if let Some(equity) = &self.equity {
            validate_equity(equity)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    pub title: Option<String>,
    #[serde(rename = "minSalary")]
    pub min_salary: Option<i32>,
    #[serde(rename = "hasEquity")]
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity.is_none()
    }
}

fn validate_salary(salary: i32) -> Result<(), AppError> {
    if salary < 0 {
        return Err(AppError::BadRequest(
            "salary must be non-negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_equity(equity: &BigDecimal) -> Result<(), AppError> {
    if *equity < BigDecimal::from(0) || *equity > BigDecimal::from(1) {
        return Err(AppError::BadRequest(
            "equity must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}
