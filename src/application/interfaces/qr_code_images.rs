use anyhow::Result;
use mockall::automock;
use std::path::PathBuf;

use crate::domain::entities::qr_codes::QrCodeEntity;

#[automock]
pub trait QrCodeImageRenderer {
    /// Writes the QR image for `qr_code` and returns where it landed.
    fn render(&self, qr_code: &QrCodeEntity) -> Result<PathBuf>;
}
