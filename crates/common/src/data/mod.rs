mod question;
mod request;
mod skill;
mod topic;

pub use question::{QuestionBatch, QuestionDict};
pub use request::{
    Method, RequestData, ResponseData, XSSI_PREFIX, encode_path_segment, strip_xssi_prefix,
};
pub use skill::SkillRights;
pub use topic::{NewTopic, TopicCreated};
