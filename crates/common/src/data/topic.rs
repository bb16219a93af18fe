use faststr::FastStr;
use serde::{Deserialize, Serialize};

/// Body of `POST /topic_editor_handler/create_new`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTopic<'a> {
    pub name:             &'a str,
    pub abbreviated_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCreated {
    #[serde(rename = "topicId", alias = "topic_id")]
    pub topic_id: FastStr,
}
