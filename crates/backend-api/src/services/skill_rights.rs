use crate::requests::validate::{require_path_segment, require_present};
use common::HttpTransport;
use common::data::{RequestData, SkillRights, encode_path_segment};
use common::error::Result;
use storage::{KVCache, MemoryCache, RemoteResourceAccessor};

pub const SKILL_RIGHTS_HANDLER_URL: &str = "/skill_editor_handler/rights";

#[derive(Clone)]
pub struct SkillRightsBackendApi<T, C = MemoryCache<SkillRights>> {
    transport: T,
    accessor:  RemoteResourceAccessor<SkillRights, C>,
}

impl<T: HttpTransport> SkillRightsBackendApi<T> {
    pub fn new(transport: T) -> Self {
        Self::with_cache(transport, MemoryCache::new())
    }
}

impl<T, C> SkillRightsBackendApi<T, C>
where
    T: HttpTransport,
    C: KVCache<SkillRights>,
{
    pub fn with_cache(transport: T, cache: C) -> Self {
        Self {
            transport,
            accessor: RemoteResourceAccessor::new(cache),
        }
    }

    pub fn is_cached(&self, skill_id: &str) -> bool {
        self.accessor.is_cached(skill_id)
    }

    pub async fn cache_skill_rights(&self, skill_id: &str, skill_rights: SkillRights) {
        self.accessor.cache_resource(skill_id, skill_rights).await;
    }

    /// Always asks the backend; the result is not cached.
    pub async fn fetch_skill_rights(&self, skill_id: &str) -> Result<SkillRights> {
        let skill_id = validate_skill_id(skill_id)?;
        self.accessor
            .fetch_resource(skill_id, || self.request_skill_rights(skill_id))
            .await
    }

    pub async fn load_skill_rights(&self, skill_id: &str) -> Result<SkillRights> {
        let skill_id = validate_skill_id(skill_id)?;
        self.accessor
            .load_resource(skill_id, || self.request_skill_rights(skill_id))
            .await
    }

    async fn request_skill_rights(&self, skill_id: &str) -> Result<SkillRights> {
        let request = RequestData::get(format!(
            "{SKILL_RIGHTS_HANDLER_URL}/{}",
            encode_path_segment(skill_id)
        ));
        self.transport.send(request).await?.into_result()
    }
}

fn validate_skill_id(skill_id: &str) -> Result<&str> {
    let skill_id = require_present("Skill id", skill_id)?;
    require_path_segment("Skill id", skill_id)?;
    Ok(skill_id)
}
