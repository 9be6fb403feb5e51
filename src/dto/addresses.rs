use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Address;

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct AddressForm {
    pub name: String,
    /// ISO 3166-1 alpha-2
    pub country: String,
    pub city: String,
    pub address: String,
    pub zip_code: String,
}

impl From<&Address> for AddressForm {
    fn from(address: &Address) -> Self {
        Self {
            name: address.name.clone(),
            country: address.country.clone(),
            city: address.city.clone(),
            address: address.address.clone(),
            zip_code: address.zip_code.clone(),
        }
    }
}

/// Edit page: the address and its form.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddressEditPage {
    pub address_id: i32,
    pub form: AddressForm,
}
