use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use image::{GrayImage, ImageFormat, Luma, imageops};
use qrcode::{EcLevel, QrCode};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    application::interfaces::qr_code_images::QrCodeImageRenderer,
    domain::entities::qr_codes::QrCodeEntity,
};

pub const IMAGE_SIZE: u32 = 400;
pub const FILE_PREFIX: &str = "QRCode-";
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const NULL_TEXT: &str = "null";

/// Renders registered QR codes as PNG files inside a single local directory.
#[derive(Debug, Clone)]
pub struct PngQrCodeRenderer {
    output_dir: PathBuf,
}

impl PngQrCodeRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory when missing and names the file after `now`.
    fn prepare_output_path(&self, now: NaiveDateTime) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create QR code output directory {}",
                self.output_dir.display()
            )
        })?;

        Ok(self.output_dir.join(file_name(now)))
    }
}

impl QrCodeImageRenderer for PngQrCodeRenderer {
    fn render(&self, qr_code: &QrCodeEntity) -> Result<PathBuf> {
        let summary = format_summary(qr_code);
        let path = self.prepare_output_path(Local::now().naive_local())?;
        let bitmap = encode(&summary)?;

        bitmap
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("failed to write QR code image {}", path.display()))?;

        debug!(
            qr_code_id = qr_code.id,
            path = %path.display(),
            "qr_image: PNG written"
        );

        Ok(path)
    }
}

/// `QRCode-YYYYMMDDHHMMSS.png`, 24-hour clock.
pub fn file_name(now: NaiveDateTime) -> String {
    format!("{FILE_PREFIX}{}.png", now.format(TIMESTAMP_FORMAT))
}

/// One `Label: value` line per field; absent optional fields print as `null`.
/// `ID` is the caller's identifier, not the storage key.
pub fn format_summary(qr_code: &QrCodeEntity) -> String {
    let description = qr_code.descricao.as_deref().unwrap_or(NULL_TEXT);
    let due_date = qr_code
        .data_vencimento
        .map(|date| date.to_string())
        .unwrap_or_else(|| NULL_TEXT.to_string());

    format!(
        "ID: {}\nValue: {}\nDescription: {}\nStatus: {}\nUpdated Date: {}\nExpiration Date: {}\nDue Date: {}",
        qr_code.external_id,
        qr_code.valor,
        description,
        qr_code.status,
        qr_code.data_atualizacao,
        qr_code.data_expiracao,
        due_date,
    )
}

/// Encodes the UTF-8 bytes of `text` and centers the symbol on a white
/// `IMAGE_SIZE` square, scaled by the largest whole module size that fits.
fn encode(text: &str) -> Result<GrayImage> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::L)
        .context("failed to encode QR code payload")?;

    let symbol = code
        .render::<Luma<u8>>()
        .max_dimensions(IMAGE_SIZE, IMAGE_SIZE)
        .build();

    let mut canvas = GrayImage::from_pixel(IMAGE_SIZE, IMAGE_SIZE, Luma([255]));
    let x = i64::from(IMAGE_SIZE.saturating_sub(symbol.width()) / 2);
    let y = i64::from(IMAGE_SIZE.saturating_sub(symbol.height()) / 2);
    imageops::overlay(&mut canvas, &symbol, x, y);

    Ok(canvas)
}
