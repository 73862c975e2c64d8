use axum::Json;
use axum::extract::State;

use crate::application::ports::LlmClient;
use crate::presentation::state::AppState;

use super::dto::TopicResponse;

pub async fn topic_handler<L>(State(state): State<AppState<L>>) -> Json<TopicResponse>
where
    L: LlmClient + 'static,
{
    Json(TopicResponse {
        topic: state.settings.analysis.default_topic.clone(),
    })
}
