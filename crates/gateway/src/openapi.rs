//! OpenAPI documentation.

use utoipa::OpenApi;

use domain::{ErrorMessage, User, UserFields};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::fetch_user,
        crate::handlers::user_handler::fetch_all_users,
        crate::handlers::user_handler::edit_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            UserFields,
            User,
            ErrorMessage,
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;
