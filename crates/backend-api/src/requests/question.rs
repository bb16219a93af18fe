use super::validate::{
    parse_number, require_comma_separated_numbers, require_positive, require_present,
};
use common::data::RequestData;
use common::error::Result;
use faststr::FastStr;

pub const QUESTION_PLAYER_HANDLER_URL: &str = "/question_player_handler";

/// Validated parameters of one question-player page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQuery {
    pub skill_ids:      FastStr,
    pub question_count: u64,
    pub start_cursor:   FastStr,
}

impl QuestionQuery {
    /// Rules are checked in order and only the first failure is reported.
    pub fn new(skill_ids: &str, question_count: &str) -> Result<Self> {
        let skill_ids = require_present("Skill ids", skill_ids)?;
        require_comma_separated_numbers("Skill ids", skill_ids)?;
        let question_count = require_present("Question count", question_count)?;
        let question_count = parse_number("Question count", question_count)?;
        let question_count = require_positive("Question count", question_count)?;

        Ok(Self {
            skill_ids: FastStr::new(skill_ids),
            question_count,
            start_cursor: FastStr::empty(),
        })
    }

    pub fn with_start_cursor<T: Into<FastStr>>(mut self, start_cursor: T) -> Self {
        self.start_cursor = start_cursor.into();
        self
    }

    pub fn to_request(&self) -> RequestData {
        RequestData::get(QUESTION_PLAYER_HANDLER_URL)
            .query("skill_ids", self.skill_ids.clone())
            .query("question_count", self.question_count.to_string())
            .query("start_cursor", self.start_cursor.clone())
    }

    pub fn cache_key(&self) -> FastStr {
        format!(
            "{}|{}|{}",
            self.skill_ids, self.question_count, self.start_cursor
        )
        .into()
    }
}
