use super::validate::require_present;
use common::data::NewTopic;
use common::error::Result;

pub const TOPIC_CREATION_HANDLER_URL: &str = "/topic_editor_handler/create_new";

pub fn new_topic<'a>(name: &'a str, abbreviated_name: &'a str) -> Result<NewTopic<'a>> {
    Ok(NewTopic {
        name:             require_present("Topic name", name)?,
        abbreviated_name: require_present("Abbreviated name", abbreviated_name)?,
    })
}
