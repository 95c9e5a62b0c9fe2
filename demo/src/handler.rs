use http::{header::LOCATION, Method};
use respond::Respond;
use uuid::Uuid;

use crate::{
    domains::User,
    http::{Request, Response},
    repositories::DuplicateEmail,
    AppState,
};

use self::payload::NewUser;

type Responder<'a, 'r> = &'a mut Respond<'r, Response>;

pub async fn route_request(request: Request, app_state: AppState) -> Response {
    let mut response = Response::default();

    {
        let mut respond = Respond::with_options(&mut response, app_state.options);
        if let Err(err) = dispatch(&mut respond, request, &app_state).await {
            tracing::error!(%err, "failed to build response");

            if let Err(err) = respond.internal_server_error("failed to build response") {
                tracing::error!(%err, "failed to report failure");
            }
        }
    }

    response
}

async fn dispatch(
    respond: Responder<'_, '_>,
    request: Request,
    app_state: &AppState,
) -> respond::Result<()> {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (&parts.method, segments.as_slice()) {
        (&Method::GET, []) => respond.ok(()),
        (&Method::GET, ["users"]) => list_users(respond, app_state).await,
        (&Method::POST, ["users"]) => create_user(respond, app_state, body).await,
        (&Method::GET, ["users", id]) => get_user(respond, app_state, id).await,
        (method, [] | ["users"] | ["users", _]) => {
            respond.method_not_allowed(format!("{method} is not allowed on {path}"))
        }
        (method, _) => respond.not_found(format!("Unknown route {method} {path}")),
    }
}

async fn get_user(
    respond: Responder<'_, '_>,
    app_state: &AppState,
    id: &str,
) -> respond::Result<()> {
    let Ok(id): Result<Uuid, _> = id.parse() else {
        return respond.unprocessable_entity("invalid id");
    };

    match app_state.repository.find_one(id).await {
        Ok(Some(user)) => respond.ok(user),
        Ok(None) => respond.not_found(format!("user {id} does not exist")),
        Err(err) => {
            tracing::error!(%err, "failed to get user");
            respond.internal_server_error("failed to get user")
        }
    }
}

async fn list_users(respond: Responder<'_, '_>, app_state: &AppState) -> respond::Result<()> {
    match app_state.repository.list().await {
        Ok(users) => respond.ok(users),
        Err(err) => {
            tracing::error!(%err, "failed to list users");
            respond.internal_server_error("failed to list users")
        }
    }
}

async fn create_user(
    respond: Responder<'_, '_>,
    app_state: &AppState,
    body: Option<bytes::Bytes>,
) -> respond::Result<()> {
    let Some(body) = body else {
        return respond.length_required("missing body");
    };
    let Ok(user): Result<NewUser, _> = serde_json::from_slice(&body) else {
        return respond.bad_request("invalid json");
    };
    let user: User = user.into();

    if let Err(err) = user.validate() {
        return respond.unprocessable_entity(err.to_string());
    }

    if let Err(err) = app_state.repository.insert(&user).await {
        if let Some(err) = err.downcast_ref::<DuplicateEmail>() {
            return respond.conflict(err.to_string());
        }

        tracing::error!(%err, "failed to insert user");
        return respond.internal_server_error("failed to create user");
    }

    respond
        .add_header(LOCATION.as_str(), &format!("/users/{}", user.id))?
        .created(user)
}

mod payload {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    pub(super) struct NewUser {
        pub name: String,
        pub email: String,
    }

    impl From<NewUser> for User {
        fn from(value: NewUser) -> Self {
            Self {
                id: Uuid::now_v7(),
                name: value.name,
                email: value.email,
            }
        }
    }
}
