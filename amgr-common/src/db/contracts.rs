//! Contract repository operations

use crate::input::{self, FormValue};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Management contract with the signed artist's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contract {
    pub contract_id: i64,
    /// Free-text label, e.g. "Management" or "Recording"
    pub contract_type: String,
    pub management_fee: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub artist_name: Option<String>,
    pub artist_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractForm {
    pub contract_type: Option<FormValue>,
    pub management_fee: Option<FormValue>,
    pub start_date: Option<FormValue>,
    pub end_date: Option<FormValue>,
    pub artist_id: Option<FormValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContract {
    pub contract_type: String,
    pub management_fee: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub artist_id: i64,
}

impl ContractForm {
    pub fn validate(&self) -> Result<NewContract> {
        let (Some(contract_type), Some(artist_id)) = (
            input::text(&self.contract_type),
            input::identity("artist_id", &self.artist_id)?,
        ) else {
            return Err(Error::Validation(
                "Contract type and artist_id are required".to_string(),
            ));
        };

        let management_fee = input::decimal("management_fee", &self.management_fee)?;
        if matches!(management_fee, Some(fee) if fee < 0.0) {
            return Err(Error::Validation(
                "management_fee cannot be negative".to_string(),
            ));
        }

        let start_date = input::date("start_date", &self.start_date)?;
        let end_date = input::date("end_date", &self.end_date)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(Error::Validation(
                    "end_date cannot be before start_date".to_string(),
                ));
            }
        }

        Ok(NewContract {
            contract_type,
            management_fee,
            start_date,
            end_date,
            artist_id,
        })
    }
}

const SELECT_CONTRACTS: &str = r#"
    SELECT
        co.contract_id,
        co.contract_type,
        co.management_fee,
        co.start_date,
        co.end_date,
        ar.stage_name AS artist_name,
        ar.artist_id
    FROM contracts co
    LEFT JOIN artists ar ON co.artist_id = ar.artist_id
"#;

/// List all contracts, latest end date first; open-ended contracts last
pub async fn list_contracts(pool: &SqlitePool) -> Result<Vec<Contract>> {
    let sql = format!(
        "{} ORDER BY co.end_date DESC, co.contract_id DESC",
        SELECT_CONTRACTS
    );
    let contracts = sqlx::query_as::<_, Contract>(&sql).fetch_all(pool).await?;
    Ok(contracts)
}

pub async fn get_contract(pool: &SqlitePool, contract_id: i64) -> Result<Option<Contract>> {
    let sql = format!("{} WHERE co.contract_id = ?", SELECT_CONTRACTS);
    let contract = sqlx::query_as::<_, Contract>(&sql)
        .bind(contract_id)
        .fetch_optional(pool)
        .await?;
    Ok(contract)
}

pub async fn create_contract(pool: &SqlitePool, form: &ContractForm) -> Result<(i64, NewContract)> {
    let contract = form.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO contracts (contract_type, management_fee, start_date, end_date, artist_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&contract.contract_type)
    .bind(contract.management_fee)
    .bind(contract.start_date)
    .bind(contract.end_date)
    .bind(contract.artist_id)
    .execute(pool)
    .await?;

    Ok((result.last_insert_rowid(), contract))
}

pub async fn update_contract(
    pool: &SqlitePool,
    contract_id: i64,
    form: &ContractForm,
) -> Result<NewContract> {
    let contract = form.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE contracts
        SET contract_type = ?, management_fee = ?, start_date = ?, end_date = ?, artist_id = ?
        WHERE contract_id = ?
        "#,
    )
    .bind(&contract.contract_type)
    .bind(contract.management_fee)
    .bind(contract.start_date)
    .bind(contract.end_date)
    .bind(contract.artist_id)
    .bind(contract_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Contract not found".to_string()));
    }

    Ok(contract)
}

pub async fn delete_contract(pool: &SqlitePool, contract_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM contracts WHERE contract_id = ?")
        .bind(contract_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Contract not found".to_string()));
    }

    Ok(())
}
