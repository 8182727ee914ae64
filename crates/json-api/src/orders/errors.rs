//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::observability::CheckoutOutcome;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::CartNotActive => {
            StatusError::conflict().brief("Cart was already checked out")
        }
        OrdersServiceError::NotFound => {
            StatusError::not_found().brief("Order or address not found")
        }
        OrdersServiceError::EmptyCart
        | OrdersServiceError::UnavailableProduct(_)
        | OrdersServiceError::MissingShippingField(_)
        | OrdersServiceError::InvalidStatus(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Storage failures and lost conversions count as failed checkouts, everything else as
/// rejected.
pub(crate) fn checkout_outcome(error: &OrdersServiceError) -> CheckoutOutcome {
    match error {
        OrdersServiceError::Sql(_) | OrdersServiceError::CartNotActive => CheckoutOutcome::Failed,
        _ => CheckoutOutcome::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn checkout_validation_errors_are_bad_requests() {
        for (error, brief) in [
            (OrdersServiceError::EmptyCart, "cart is empty"),
            (
                OrdersServiceError::MissingShippingField("zip"),
                "missing shipping field: zip",
            ),
            (
                OrdersServiceError::InvalidStatus("refunded".to_string()),
                "unknown order status \"refunded\"",
            ),
        ] {
            let status = into_status_error(error);

            assert_eq!(status.code, StatusCode::BAD_REQUEST);
            assert_eq!(status.brief, brief);
        }
    }

    #[test]
    fn missing_orders_are_not_found() {
        assert_eq!(
            into_status_error(OrdersServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn lost_conversion_is_a_failed_conflict() {
        assert_eq!(
            checkout_outcome(&OrdersServiceError::CartNotActive),
            CheckoutOutcome::Failed
        );
        assert_eq!(
            into_status_error(OrdersServiceError::CartNotActive).code,
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn storage_failures_are_failed_server_errors() {
        let error = OrdersServiceError::Sql(sqlx::Error::PoolTimedOut);

        assert_eq!(checkout_outcome(&error), CheckoutOutcome::Failed);
        assert_eq!(
            into_status_error(error).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_failures_are_rejected_checkouts() {
        for error in [
            OrdersServiceError::EmptyCart,
            OrdersServiceError::NotFound,
            OrdersServiceError::MissingShippingField("email"),
        ] {
            assert_eq!(checkout_outcome(&error), CheckoutOutcome::Rejected);
        }
    }
}
