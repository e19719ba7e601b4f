use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("{0}")]
    InvalidPagination(String),

    #[error("Failed to create product")]
    CreateFailed,

    #[error("Failed to update product")]
    UpdateFailed,

    #[error("Failed to delete product")]
    DeleteFailed,

    #[error("Failed to fetch products")]
    ListFailed,

    #[error("Failed to fetch product")]
    LookupFailed,

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}

/// Convert ProductError to AppError for standardized error responses
///
/// Store failures keep their cause out of the response body; the service
/// logs it before converting.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::MissingField(_)
            | ProductError::InvalidField { .. }
            | ProductError::InvalidPagination(_)
            | ProductError::CreateFailed
            | ProductError::UpdateFailed
            | ProductError::DeleteFailed => AppError::BadRequest(err.to_string()),
            ProductError::ListFailed | ProductError::LookupFailed => {
                AppError::InternalServerError(err.to_string())
            }
            ProductError::Database(_) => {
                AppError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
