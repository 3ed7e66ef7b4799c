use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::qr_codes::{InsertQrCodeEntity, QrCodeEntity};

#[automock]
#[async_trait]
pub trait QrCodeRepository {
    /// Stores a new record and returns it with the identity assigned by storage.
    async fn save(&self, insert_qr_code_entity: InsertQrCodeEntity) -> Result<QrCodeEntity>;
}
