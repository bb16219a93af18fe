use faststr::FastStr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A question as served to the quiz player. Only the envelope is typed; the
/// state data is handed through to the player untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDict {
    pub id:                  FastStr,
    pub question_state_data: Value,
    #[serde(default)]
    pub language_code:       FastStr,
    #[serde(default)]
    pub version:             i64,

    #[serde(flatten)]
    pub extra_values: Map<String, Value>,
}

/// Body of `GET /question_player_handler`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBatch {
    pub question_dicts:    Vec<QuestionDict>,
    #[serde(default)]
    pub next_start_cursor: Option<FastStr>,
}
