//! Create Address Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::addresses::{data::NewAddress, records::AddressUuid};

use crate::{
    addresses::{errors::into_status_error, index::AddressResponse},
    extensions::*,
    state::State,
};

/// Create Address Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAddressRequest {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl From<CreateAddressRequest> for NewAddress {
    fn from(request: CreateAddressRequest) -> Self {
        NewAddress {
            uuid: request.uuid.map_or_else(AddressUuid::new, Into::into),
            first_name: request.first_name,
            last_name: request.last_name,
            street: request.street,
            city: request.city,
            state: request.state,
            zip: request.zip,
            country: request.country,
        }
    }
}

/// Create Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Save Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Address saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing field"),
        (status_code = StatusCode::CONFLICT, description = "Address already exists"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Registered user required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let address = state
        .app
        .addresses
        .create_address(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/addresses/{}", address.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(address.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use storefront_app::domain::addresses::{AddressesServiceError, MockAddressesService};

    use crate::test_helpers::{TEST_USER_UUID, addresses_app, as_user, make_address, service_as};

    use super::*;

    fn make_service(addresses: MockAddressesService) -> Service {
        service_as(
            addresses_app(addresses),
            as_user(),
            Router::with_path("addresses").post(handler),
        )
    }

    fn payload() -> Value {
        json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "street": "742 Evergreen Terrace",
            "city": "Springfield",
            "state": "OR",
            "zip": "97477",
            "country": "US"
        })
    }

    #[tokio::test]
    async fn test_create_address_success() -> TestResult {
        let address = make_address("Springfield");
        let uuid = address.uuid;

        let mut addresses = MockAddressesService::new();

        addresses
            .expect_create_address()
            .once()
            .withf(|user, new| *user == TEST_USER_UUID && new.city == "Springfield")
            .return_once(move |_, _| Ok(address));

        let mut res = TestClient::post("http://example.com/addresses")
            .json(&payload())
            .send(&make_service(addresses))
            .await;

        let body: AddressResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/addresses/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_address_blank_field_returns_400() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_create_address()
            .once()
            .return_once(|_, _| Err(AddressesServiceError::MissingField("zip")));

        let mut body = payload();

        body["zip"] = json!("");

        let res = TestClient::post("http://example.com/addresses")
            .json(&body)
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_address_missing_field_is_rejected_before_service() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses.expect_create_address().never();

        let res = TestClient::post("http://example.com/addresses")
            .json(&json!({ "first_name": "Ada" }))
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
