mod question_player;
mod skill_rights;
mod topic_creation;

pub use question_player::QuestionPlayerBackendApi;
pub use skill_rights::{SKILL_RIGHTS_HANDLER_URL, SkillRightsBackendApi};
pub use topic_creation::TopicCreationBackendApi;
