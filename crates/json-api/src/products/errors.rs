//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidPrice => StatusError::bad_request()
            .brief("Price must be a non-negative amount with at most two decimal places"),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn validation_failures_are_bad_requests() {
        for error in [
            ProductsServiceError::InvalidPrice,
            ProductsServiceError::MissingRequiredData,
            ProductsServiceError::InvalidData,
        ] {
            assert_eq!(into_status_error(error).code, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn conflicts_and_missing_products_keep_their_status() {
        assert_eq!(
            into_status_error(ProductsServiceError::AlreadyExists).code,
            StatusCode::CONFLICT
        );
        assert_eq!(
            into_status_error(ProductsServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }
}
