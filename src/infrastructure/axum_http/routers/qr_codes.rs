use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use std::{path::PathBuf, sync::Arc};

use crate::{
    application::{
        interfaces::qr_code_images::QrCodeImageRenderer, usecases::qr_codes::QrCodeUseCase,
    },
    domain::{
        repositories::qr_codes::QrCodeRepository, value_objects::qr_codes::RegisterQrCodeModel,
    },
    infrastructure::{
        axum_http::error_responses::AppError,
        postgres::{postgres_connection::PgPoolSquad, repositories::qr_codes::QrCodePostgres},
        qr_image::png_renderer::PngQrCodeRenderer,
    },
};

pub const IMMEDIATE_CONFIRMATION: &str = "QR Code Imediato Cadastrado com Sucesso!";
pub const DUE_DATE_CONFIRMATION: &str = "QR Code Imediato com Vencimento Cadastrado com Sucesso!";

pub fn routes(db_pool: Arc<PgPoolSquad>, output_dir: PathBuf) -> Router {
    let qr_code_repository = QrCodePostgres::new(Arc::clone(&db_pool));
    let image_renderer = PngQrCodeRenderer::new(output_dir);
    let qr_code_usecase =
        QrCodeUseCase::new(Arc::new(qr_code_repository), Arc::new(image_renderer));

    routes_with_usecase(Arc::new(qr_code_usecase))
}

pub fn routes_with_usecase<R, I>(qr_code_usecase: Arc<QrCodeUseCase<R, I>>) -> Router
where
    R: QrCodeRepository + Send + Sync + 'static,
    I: QrCodeImageRenderer + Send + Sync + 'static,
{
    Router::new()
        .route("/cadastroQrCode", post(register_immediate::<R, I>))
        .route(
            "/cadastroQrCodeVencimento",
            post(register_with_due_date::<R, I>),
        )
        .with_state(qr_code_usecase)
}

pub async fn register_immediate<R, I>(
    State(qr_code_usecase): State<Arc<QrCodeUseCase<R, I>>>,
    payload: Result<Json<RegisterQrCodeModel>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    R: QrCodeRepository + Send + Sync + 'static,
    I: QrCodeImageRenderer + Send + Sync + 'static,
{
    let Json(model) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    qr_code_usecase.register_immediate(model).await?;

    Ok((StatusCode::OK, IMMEDIATE_CONFIRMATION))
}

pub async fn register_with_due_date<R, I>(
    State(qr_code_usecase): State<Arc<QrCodeUseCase<R, I>>>,
    payload: Result<Json<RegisterQrCodeModel>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    R: QrCodeRepository + Send + Sync + 'static,
    I: QrCodeImageRenderer + Send + Sync + 'static,
{
    let Json(model) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    qr_code_usecase.register_with_due_date(model).await?;

    Ok((StatusCode::OK, DUE_DATE_CONFIRMATION))
}
