use std::{path::PathBuf, sync::Arc};
use thiserror::Error;
use tracing::{Instrument, Span, error, info, info_span, warn};

use crate::{
    application::interfaces::qr_code_images::QrCodeImageRenderer,
    domain::{
        entities::qr_codes::{InsertQrCodeEntity, QrCodeEntity},
        repositories::qr_codes::QrCodeRepository,
        value_objects::{
            qr_code_validation::{QrCodeValidationError, validate_core, validate_due_date},
            qr_codes::RegisterQrCodeModel,
        },
    },
};

#[derive(Debug, Error)]
pub enum RegisterQrCodeError {
    #[error(transparent)]
    Validation(#[from] QrCodeValidationError),

    #[error("failed to persist QR code")]
    Persistence(#[source] anyhow::Error),
}

/// What happened to the image after the record was stored. Rendering is
/// best-effort: a failure is logged and reported here, never as an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutcome {
    Written(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredQrCode {
    pub qr_code: QrCodeEntity,
    pub image: ImageOutcome,
}

pub struct QrCodeUseCase<R, I>
where
    R: QrCodeRepository + Send + Sync + 'static,
    I: QrCodeImageRenderer + Send + Sync + 'static,
{
    qr_code_repository: Arc<R>,
    image_renderer: Arc<I>,
    span: Span,
}

impl<R, I> QrCodeUseCase<R, I>
where
    R: QrCodeRepository + Send + Sync + 'static,
    I: QrCodeImageRenderer + Send + Sync + 'static,
{
    pub fn new(qr_code_repository: Arc<R>, image_renderer: Arc<I>) -> Self {
        Self {
            qr_code_repository,
            image_renderer,
            span: info_span!("qr_code_usecase"),
        }
    }

    pub async fn register_immediate(
        &self,
        model: RegisterQrCodeModel,
    ) -> Result<RegisteredQrCode, RegisterQrCodeError> {
        async move {
            info!(external_id = ?model.id, "qr_codes: immediate registration requested");

            let insert_qr_code_entity = build_validated(model, false)?;
            self.persist_and_render(insert_qr_code_entity).await
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn register_with_due_date(
        &self,
        model: RegisterQrCodeModel,
    ) -> Result<RegisteredQrCode, RegisterQrCodeError> {
        async move {
            info!(
                external_id = ?model.id,
                due_date = ?model.due_date,
                "qr_codes: registration with due date requested"
            );

            let insert_qr_code_entity = build_validated(model, true)?;
            self.persist_and_render(insert_qr_code_entity).await
        }
        .instrument(self.span.clone())
        .await
    }

    async fn persist_and_render(
        &self,
        insert_qr_code_entity: InsertQrCodeEntity,
    ) -> Result<RegisteredQrCode, RegisterQrCodeError> {
        let external_id = insert_qr_code_entity.external_id;

        let qr_code = self
            .qr_code_repository
            .save(insert_qr_code_entity)
            .await
            .map_err(|err| {
                error!(
                    external_id,
                    db_error = ?err,
                    "qr_codes: failed to persist record"
                );
                RegisterQrCodeError::Persistence(err)
            })?;

        info!(
            qr_code_id = qr_code.id,
            external_id,
            status = %qr_code.status,
            "qr_codes: record persisted"
        );

        let image = match self.image_renderer.render(&qr_code) {
            Ok(path) => {
                info!(
                    qr_code_id = qr_code.id,
                    path = %path.display(),
                    "qr_codes: image rendered"
                );
                ImageOutcome::Written(path)
            }
            Err(err) => {
                error!(
                    qr_code_id = qr_code.id,
                    render_error = ?err,
                    "qr_codes: failed to render image, keeping persisted record"
                );
                ImageOutcome::Failed(format!("{err:#}"))
            }
        };

        Ok(RegisteredQrCode { qr_code, image })
    }
}

/// Runs the core checks, then the due date check when `require_due_date` is
/// set, and assembles the record. Otherwise the due date is dropped.
fn build_validated(
    model: RegisterQrCodeModel,
    require_due_date: bool,
) -> Result<InsertQrCodeEntity, QrCodeValidationError> {
    let core = validate_core(
        model.id,
        model.value.as_deref(),
        model.updated_date,
        model.expiration_date,
    )
    .map_err(|err| {
        warn!(external_id = ?model.id, error = %err, "qr_codes: invalid registration");
        err
    })?;

    let due_date = if require_due_date {
        let due_date = validate_due_date(model.due_date).map_err(|err| {
            warn!(
                external_id = core.id,
                due_date = ?model.due_date,
                error = %err,
                "qr_codes: invalid due date"
            );
            err
        })?;
        Some(due_date)
    } else {
        None
    };

    Ok(InsertQrCodeEntity::build(
        core.id,
        core.value.to_string(),
        model.description,
        model.status,
        core.updated_date,
        core.expiration_date,
        due_date,
    ))
}
