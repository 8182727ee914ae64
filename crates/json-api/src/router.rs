//! App Router

use salvo::Router;

use crate::{addresses, auth, carts, healthcheck, observability, orders, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .delete(carts::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{item}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                )
                .push(
                    Router::with_path("addresses")
                        .get(addresses::index::handler)
                        .post(addresses::create::handler)
                        .push(Router::with_path("{address}").delete(addresses::delete::handler)),
                )
                .push(admin_router()),
        )
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::middleware::require_admin)
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(
                            Router::with_path("variants")
                                .post(products::variants::create::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::admin::index::handler)
                .push(
                    Router::with_path("{order}/status").put(orders::admin::status::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::StatusCode,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::MockProductsService;

    use crate::{
        auth::middleware::GUEST_TOKEN_HEADER,
        state::State,
        test_helpers::{TEST_GUEST_TOKEN, products_app, strict_app},
    };

    use super::app_router;

    fn make_service(app: storefront_app::context::AppContext) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(app)))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_catalog_is_public() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products_app(products)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_requires_an_identity() -> TestResult {
        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(strict_app()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_guest_cannot_reach_admin_routes() -> TestResult {
        let service = make_service(strict_app());

        let create = TestClient::post("http://example.com/admin/products")
            .add_header(GUEST_TOKEN_HEADER, TEST_GUEST_TOKEN, true)
            .json(&json!({ "name": "Tee", "price": "50.00" }))
            .send(&service)
            .await;

        let status = TestClient::put(format!(
            "http://example.com/admin/orders/{}/status",
            uuid::Uuid::now_v7()
        ))
        .add_header(GUEST_TOKEN_HEADER, TEST_GUEST_TOKEN, true)
        .json(&json!({ "status": "shipped" }))
        .send(&service)
        .await;

        assert_eq!(create.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(status.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_guest_cannot_manage_addresses() -> TestResult {
        let res = TestClient::get("http://example.com/addresses")
            .add_header(GUEST_TOKEN_HEADER, TEST_GUEST_TOKEN, true)
            .send(&make_service(strict_app()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_is_public() -> TestResult {
        let body: serde_json::Value = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(strict_app()))
            .await
            .take_json()
            .await?;

        assert_eq!(body["status"], "ok");

        Ok(())
    }
}
