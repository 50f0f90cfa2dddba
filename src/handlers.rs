use crate::errors::AppError;
use crate::models::{ClickerParams, ClickerView, RegisterRequest, Registration, Team};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{error, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let cached = state.session.load().await;
    let initial = match cached.user_id {
        Some(_) => Some(state.screen().await.view().await),
        None => None,
    };
    Html(render_index(initial.as_ref()))
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<Registration>, AppError> {
    let team = payload
        .team
        .as_deref()
        .and_then(|raw| raw.parse::<Team>().map_err(|err| warn!("{err}")).ok());

    let registration = state
        .service
        .register(&state.session, team, &payload.username)
        .await
        .map_err(|err| {
            error!("error creating user: {err}");
            AppError::from(err)
        })?;

    state
        .mount(ClickerParams {
            team: Some(registration.team.to_string()),
            username: Some(registration.username.clone()),
            user_id: Some(registration.user_id.clone()),
        })
        .await;

    Ok(Json(registration))
}

pub async fn clicker(
    State(state): State<AppState>,
    Query(params): Query<ClickerParams>,
) -> Json<ClickerView> {
    let screen = state.mount(params).await;
    Json(screen.view().await)
}

pub async fn tap(State(state): State<AppState>) -> Json<ClickerView> {
    let screen = state.screen().await;
    screen.tap().await;
    Json(screen.view().await)
}

pub async fn clear_session(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.unmount().await;
    state.session.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
