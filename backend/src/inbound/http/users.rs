//! Users API handlers.
//!
//! ```text
//! POST /users {"username":"testuser","email":"test@test.com","profilePicture":"https://x/y.jpg"}
//! GET /users
//! GET /users/1
//! PUT /users/1 {"email":"new@test.com"}
//! DELETE /users/1
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::{FieldInput, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Request body for creating or updating a user.
///
/// Every field is optional on the wire so validation can report all missing
/// fields together. On update, absent fields keep their stored values while
/// an explicit null is rejected.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRequest {
    /// Unique login name.
    #[schema(default, value_type = Option<String>, example = "testuser")]
    pub username: FieldInput<String>,
    /// Unique contact address.
    #[schema(default, value_type = Option<String>, example = "test@test.com")]
    pub email: FieldInput<String>,
    /// Absolute http, https or ftp URL of the avatar.
    #[schema(default, value_type = Option<String>, example = "https://x/y.jpg")]
    pub profile_picture: FieldInput<String>,
}

impl From<UserRequest> for UserDraft {
    fn from(value: UserRequest) -> Self {
        Self {
            username: value.username,
            email: value.email,
            profile_picture: value.profile_picture,
        }
    }
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Validation or uniqueness failure", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create_user(payload.into_inner().into()).await?;
    Ok(created(&user))
}

fn created(user: &User) -> HttpResponse {
    HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/users/{}", user.id())))
        .json(user)
}

/// List every user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use rentals::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users_query
        .get_user(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(user))
}

/// Update a user. Absent fields keep their stored values.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserSchema),
        (status = 400, description = "Validation or uniqueness failure", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users
        .update_user(UserId::new(path.into_inner()), payload.into_inner().into())
        .await?;
    Ok(web::Json(user))
}

/// Delete a user and every accomodation it owns.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User and owned accomodations deleted"),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.users.delete_user(UserId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}
