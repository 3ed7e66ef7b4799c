use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, SelectableHelper, insert_into};
use std::sync::Arc;

use crate::{
    domain::{
        entities::qr_codes::{InsertQrCodeEntity, QrCodeEntity},
        repositories::qr_codes::QrCodeRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::qrcode},
};

pub struct QrCodePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl QrCodePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl QrCodeRepository for QrCodePostgres {
    async fn save(&self, insert_qr_code_entity: InsertQrCodeEntity) -> Result<QrCodeEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(qrcode::table)
            .values(&insert_qr_code_entity)
            .returning(QrCodeEntity::as_returning())
            .get_result::<QrCodeEntity>(&mut conn)?;

        Ok(result)
    }
}
