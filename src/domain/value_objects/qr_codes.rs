use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body accepted by both registration endpoints. Every field is optional on the
/// wire so that missing values reach validation instead of failing extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterQrCodeModel {
    pub id: Option<i64>,
    #[serde(rename = "valor")]
    pub value: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "dataAtualizacao")]
    pub updated_date: Option<NaiveDate>,
    #[serde(rename = "dataExpiracao")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(rename = "dataVencimento")]
    pub due_date: Option<NaiveDate>,
}
