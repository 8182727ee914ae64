//! Order Data

use crate::domain::{
    addresses::records::{AddressRecord, AddressUuid},
    orders::records::ShippingContact,
};

/// Checkout request.
///
/// Fields left empty are filled from the saved address when one is referenced. A
/// registered user's email falls back to their account email.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrder {
    pub address_uuid: Option<AddressUuid>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

impl NewOrder {
    /// Merge the request with its fallbacks.
    ///
    /// # Errors
    ///
    /// Returns the name of the first field that no source provides.
    pub fn resolve_shipping(
        self,
        address: Option<&AddressRecord>,
        account_email: Option<String>,
    ) -> Result<ShippingContact, &'static str> {
        let from_address = |pick: fn(&AddressRecord) -> &String| address.map(|a| pick(a).clone());

        Ok(ShippingContact {
            email: pick_field("email", self.email, account_email)?,
            first_name: pick_field(
                "first_name",
                self.first_name,
                from_address(|a| &a.first_name),
            )?,
            last_name: pick_field("last_name", self.last_name, from_address(|a| &a.last_name))?,
            street: pick_field("street", self.street, from_address(|a| &a.street))?,
            city: pick_field("city", self.city, from_address(|a| &a.city))?,
            state: pick_field("state", self.state, from_address(|a| &a.state))?,
            zip: pick_field("zip", self.zip, from_address(|a| &a.zip))?,
            country: pick_field("country", self.country, from_address(|a| &a.country))?,
        })
    }
}

fn pick_field(
    name: &'static str,
    requested: Option<String>,
    fallback: Option<String>,
) -> Result<String, &'static str> {
    [requested, fallback]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .ok_or(name)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::{auth::UserUuid, domain::addresses::records::AddressUuid};

    use super::*;

    fn saved_address() -> AddressRecord {
        AddressRecord {
            uuid: AddressUuid::new(),
            user_uuid: UserUuid::new(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            street: "12 St James's Square".to_string(),
            city: "London".to_string(),
            state: "Greater London".to_string(),
            zip: "SW1Y 4JH".to_string(),
            country: "GB".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn full_request() -> NewOrder {
        NewOrder {
            address_uuid: None,
            email: Some("grace@example.com".to_string()),
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            street: Some("1 Navy Way".to_string()),
            city: Some("Arlington".to_string()),
            state: Some("VA".to_string()),
            zip: Some("22202".to_string()),
            country: Some("US".to_string()),
        }
    }

    #[test]
    fn request_fields_take_precedence() {
        let contact = full_request()
            .resolve_shipping(Some(&saved_address()), Some("account@example.com".to_string()))
            .unwrap();

        assert_eq!(contact.email, "grace@example.com");
        assert_eq!(contact.first_name, "Grace");
        assert_eq!(contact.country, "US");
    }

    #[test]
    fn blank_fields_fall_back_to_address_and_account() {
        let request = NewOrder {
            email: Some("   ".to_string()),
            city: Some("Paris".to_string()),
            ..NewOrder::default()
        };

        let contact = request
            .resolve_shipping(Some(&saved_address()), Some("ada@example.com".to_string()))
            .unwrap();

        assert_eq!(contact.email, "ada@example.com");
        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.city, "Paris");
        assert_eq!(contact.zip, "SW1Y 4JH");
    }

    #[test]
    fn missing_field_is_named() {
        let request = NewOrder {
            zip: None,
            ..full_request()
        };

        assert_eq!(request.resolve_shipping(None, None), Err("zip"));
        assert_eq!(NewOrder::default().resolve_shipping(None, None), Err("email"));
    }
}
