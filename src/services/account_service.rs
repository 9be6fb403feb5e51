use chrono::NaiveDate;

use crate::{
    auth::{self, UserIdentity, password},
    dto::accounts::{
        AccountView, ChangePasswordForm, Dashboard, LoginForm, RegistrationComplete,
        RegistrationForm, UpdateUserForm,
    },
    error::{AppError, AppResult, FormRejection},
    models::{AccountChanges, NewAccount, User},
    response::ApiResponse,
    services::today,
    store::{Store, StoreError},
    validation::{self, FieldErrors, Validator},
};

const USERNAME_TAKEN: &str = "A user with that username already exists.";
const INVALID_LOGIN: &str = "Invalid login or password.";

pub async fn register(
    store: &dyn Store,
    form: RegistrationForm,
) -> AppResult<ApiResponse<RegistrationComplete>> {
    register_on(store, form, today()).await
}

/// Registration with an explicit reference date for the age check.
pub async fn register_on(
    store: &dyn Store,
    form: RegistrationForm,
    today: NaiveDate,
) -> AppResult<ApiResponse<RegistrationComplete>> {
    let mut v = Validator::new();
    let username = v.field("username", validation::username(&form.username));
    let password = v.field("password", validation::required_secret(&form.password));
    let email = v.field("email", validation::email(&form.email));
    let first_name = v.field("first_name", validation::name_part(&form.first_name));
    let last_name = v.field("last_name", validation::name_part(&form.last_name));
    let birth_date = v.field("birth_date", validation::birth_date(&form.birth_date, today));

    let (
        Some(username),
        Some(password),
        Some(email),
        Some(first_name),
        Some(last_name),
        Some(birth_date),
    ) = (username, password, email, first_name, last_name, birth_date)
    else {
        return Err(AppError::invalid(&form, v.into_errors()));
    };

    let password_hash = password::hash_password(&password)?;
    let account = NewAccount {
        username,
        password_hash,
        email,
        first_name,
        last_name,
        birth_date,
    };

    let (user, profile) = match store.create_account(account).await {
        Ok(created) => created,
        Err(StoreError::Conflict("username")) => {
            return Err(AppError::invalid(
                &form,
                FieldErrors::field("username", USERNAME_TAKEN),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = user.id, profile_id = profile.id, "account registered");
    Ok(ApiResponse::success(
        "Account created",
        RegistrationComplete {
            username: user.username,
        },
    ))
}

/// Checks the credentials and returns the user to bind to the session.
pub async fn login(store: &dyn Store, form: LoginForm) -> AppResult<User> {
    let mut v = Validator::new();
    let username = v.field("username", validation::required(&form.username));
    let password = v.field("password", validation::required_secret(&form.password));
    let (Some(username), Some(password)) = (username, password) else {
        return Err(AppError::invalid(&form, v.into_errors()));
    };

    let rejected = || {
        AppError::InvalidCredentials(FormRejection::new(
            &form,
            FieldErrors::non_field(INVALID_LOGIN),
        ))
    };

    let Some(identity) = auth::authenticate(store, &username, &password).await? else {
        tracing::info!(username = %username, "login rejected");
        return Err(rejected());
    };
    let user = store.get_user(identity.user_id).await?.ok_or_else(rejected)?;

    tracing::info!(user_id = user.id, "login succeeded");
    Ok(user)
}

pub async fn dashboard(
    store: &dyn Store,
    user: &UserIdentity,
) -> AppResult<ApiResponse<Dashboard>> {
    let account = store.get_user(user.user_id).await?.ok_or(AppError::NotFound)?;
    let profile = store.find_profile(user.user_id).await?;
    let addresses = match &profile {
        Some(profile) => store.list_addresses(profile.id).await?,
        None => Vec::new(),
    };
    let orders = store.list_orders(user.user_id).await?;

    Ok(ApiResponse::success(
        "OK",
        Dashboard {
            account: AccountView::new(account, profile.as_ref()),
            addresses,
            orders,
        },
    ))
}

/// The account form pre-filled with the caller's data.
pub async fn account_form(
    store: &dyn Store,
    user: &UserIdentity,
) -> AppResult<ApiResponse<UpdateUserForm>> {
    let account = store.get_user(user.user_id).await?.ok_or(AppError::NotFound)?;
    let profile = store.find_profile(user.user_id).await?;
    Ok(ApiResponse::success(
        "OK",
        UpdateUserForm::prefilled(&account, profile.as_ref()),
    ))
}

pub async fn update_account(
    store: &dyn Store,
    user: &UserIdentity,
    form: UpdateUserForm,
) -> AppResult<ApiResponse<AccountView>> {
    update_account_on(store, user, form, today()).await
}

pub async fn update_account_on(
    store: &dyn Store,
    user: &UserIdentity,
    form: UpdateUserForm,
    today: NaiveDate,
) -> AppResult<ApiResponse<AccountView>> {
    let mut v = Validator::new();
    let username = v.field("username", validation::username(&form.username));
    let first_name = v.field("first_name", validation::name_part(&form.first_name));
    let last_name = v.field("last_name", validation::name_part(&form.last_name));
    let email = v.field("email", validation::email(&form.email));
    let birth_date = v.field("birth_date", validation::birth_date(&form.birth_date, today));

    let (Some(username), Some(first_name), Some(last_name), Some(email), Some(birth_date)) =
        (username, first_name, last_name, email, birth_date)
    else {
        return Err(AppError::invalid(&form, v.into_errors()));
    };

    let changes = AccountChanges {
        username,
        email,
        first_name,
        last_name,
        birth_date,
    };
    let (account, profile) = match store.update_account(user.user_id, changes).await {
        Ok(Some(updated)) => updated,
        Ok(None) => return Err(AppError::NotFound),
        Err(StoreError::Conflict("username")) => {
            return Err(AppError::invalid(
                &form,
                FieldErrors::field("username", USERNAME_TAKEN),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = account.id, "account updated");
    Ok(ApiResponse::success(
        "Account updated",
        AccountView::new(account, Some(&profile)),
    ))
}

/// Stores a new credential and returns the updated user; the caller must
/// rehash its session with it.
pub async fn change_password(
    store: &dyn Store,
    user: &UserIdentity,
    form: ChangePasswordForm,
) -> AppResult<User> {
    let mut v = Validator::new();
    let Some(password) = v.field("password", validation::required_secret(&form.password)) else {
        return Err(AppError::invalid(&form, v.into_errors()));
    };

    let password_hash = password::hash_password(&password)?;
    let updated = store
        .set_password_hash(user.user_id, password_hash)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(user_id = updated.id, "password changed");
    Ok(updated)
}
