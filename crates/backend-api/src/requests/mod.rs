pub mod question;
pub mod topic;
pub mod validate;

pub use question::QuestionQuery;
