use faststr::FastStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRights {
    pub skill_id:                   FastStr,
    pub can_edit_skill_description: bool,
}
