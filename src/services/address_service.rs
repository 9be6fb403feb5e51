use crate::{
    auth::UserIdentity,
    dto::addresses::{AddressEditPage, AddressForm},
    error::{AppError, AppResult},
    models::{Address, AddressFields},
    response::ApiResponse,
    services::profile_id,
    store::Store,
    validation::{self, Validator, max_length},
};

fn validate(form: &AddressForm) -> AppResult<AddressFields> {
    let mut v = Validator::new();
    let name = v.field(
        "name",
        validation::required(&form.name).and_then(max_length(100)),
    );
    let country = v.field(
        "country",
        validation::required(&form.country).and_then(validation::country),
    );
    let city = v.field(
        "city",
        validation::required(&form.city).and_then(max_length(100)),
    );
    let address = v.field(
        "address",
        validation::required(&form.address).and_then(max_length(100)),
    );
    let zip_code = v.field(
        "zip_code",
        validation::required(&form.zip_code).and_then(max_length(10)),
    );

    match (name, country, city, address, zip_code) {
        (Some(name), Some(country), Some(city), Some(address), Some(zip_code)) => {
            Ok(AddressFields {
                name,
                country,
                city,
                address,
                zip_code,
            })
        }
        _ => Err(AppError::invalid(form, v.into_errors())),
    }
}

pub async fn add_address(
    store: &dyn Store,
    user: &UserIdentity,
    form: AddressForm,
) -> AppResult<ApiResponse<Address>> {
    let profile_id = profile_id(user)?;
    let fields = validate(&form)?;
    let address = store.create_address(profile_id, fields).await?;

    tracing::info!(user_id = user.user_id, address_id = address.id, "address added");
    Ok(ApiResponse::success("Address added", address))
}

pub async fn get_address(
    store: &dyn Store,
    user: &UserIdentity,
    address_id: i32,
) -> AppResult<ApiResponse<Address>> {
    let address = store
        .find_address(profile_id(user)?, address_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", address))
}

pub async fn delete_address(
    store: &dyn Store,
    user: &UserIdentity,
    address_id: i32,
) -> AppResult<()> {
    if !store.delete_address(profile_id(user)?, address_id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(user_id = user.user_id, address_id, "address deleted");
    Ok(())
}

pub async fn address_form(
    store: &dyn Store,
    user: &UserIdentity,
    address_id: i32,
) -> AppResult<ApiResponse<AddressEditPage>> {
    let address = store
        .find_address(profile_id(user)?, address_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "OK",
        AddressEditPage {
            address_id: address.id,
            form: AddressForm::from(&address),
        },
    ))
}

pub async fn update_address(
    store: &dyn Store,
    user: &UserIdentity,
    address_id: i32,
    form: AddressForm,
) -> AppResult<ApiResponse<AddressEditPage>> {
    let profile_id = profile_id(user)?;
    // Foreign ids are not-found even when the submitted form is invalid.
    if store.find_address(profile_id, address_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let fields = validate(&form)?;
    let address = store
        .update_address(profile_id, address_id, fields)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(user_id = user.user_id, address_id, "address changed");
    Ok(ApiResponse::success(
        "Address changed",
        AddressEditPage {
            address_id: address.id,
            form: AddressForm::from(&address),
        },
    ))
}
