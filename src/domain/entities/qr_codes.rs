use chrono::NaiveDate;
use diesel::prelude::*;

use crate::{
    domain::value_objects::enums::qr_code_statuses::QrCodeStatus,
    infrastructure::postgres::schema::qrcode,
};

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = qrcode)]
pub struct QrCodeEntity {
    pub id: i64,
    pub external_id: i64,
    pub valor: String,
    pub descricao: Option<String>,
    pub status: String,
    pub data_atualizacao: NaiveDate,
    pub data_expiracao: NaiveDate,
    pub data_vencimento: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = qrcode)]
pub struct InsertQrCodeEntity {
    pub external_id: i64,
    pub valor: String,
    pub descricao: Option<String>,
    pub status: String,
    pub data_atualizacao: NaiveDate,
    pub data_expiracao: NaiveDate,
    pub data_vencimento: Option<NaiveDate>,
}

impl InsertQrCodeEntity {
    /// Assembles a record from already validated input. The only rule applied
    /// here is the status fallback to `OPEN`.
    pub fn build(
        external_id: i64,
        valor: String,
        descricao: Option<String>,
        status: Option<String>,
        data_atualizacao: NaiveDate,
        data_expiracao: NaiveDate,
        data_vencimento: Option<NaiveDate>,
    ) -> Self {
        Self {
            external_id,
            valor,
            descricao,
            status: QrCodeStatus::resolve(status),
            data_atualizacao,
            data_expiracao,
            data_vencimento,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_with_status(status: Option<&str>) -> InsertQrCodeEntity {
        InsertQrCodeEntity::build(
            1,
            "100.00".to_string(),
            Some("Test".to_string()),
            status.map(str::to_string),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
            None,
        )
    }

    #[test]
    fn copies_fields_and_keeps_given_status() {
        let entity = build_with_status(Some("Ativo"));

        assert_eq!(entity.external_id, 1);
        assert_eq!(entity.valor, "100.00");
        assert_eq!(entity.descricao.as_deref(), Some("Test"));
        assert_eq!(entity.status, "Ativo");
        assert_eq!(entity.data_vencimento, None);
    }

    #[test]
    fn blank_status_becomes_open() {
        assert_eq!(build_with_status(None).status, "OPEN");
        assert_eq!(build_with_status(Some("")).status, "OPEN");
        assert_eq!(build_with_status(Some("  ")).status, "OPEN");
    }

    #[test]
    fn keeps_due_date_when_given() {
        let due = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap();
        let entity = InsertQrCodeEntity::build(
            2,
            "5".to_string(),
            None,
            None,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
            Some(due),
        );

        assert_eq!(entity.data_vencimento, Some(due));
        assert_eq!(entity.descricao, None);
    }
}
