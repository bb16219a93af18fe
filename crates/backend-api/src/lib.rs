pub mod requests;
pub mod services;

#[cfg(test)]
mod testing;

use common::error::Result;
use common::{ClientConfig, CsrfTokenService, HttpTransport, ReqwestTransport};
use faststr::FastStr;
pub use services::{QuestionPlayerBackendApi, SkillRightsBackendApi, TopicCreationBackendApi};

/// Every backend service the client talks to, sharing one transport.
#[derive(Clone)]
pub struct BackendApi<T = ReqwestTransport> {
    pub questions:    QuestionPlayerBackendApi<T>,
    pub topics:       TopicCreationBackendApi<T, CsrfTokenService<T>>,
    pub skill_rights: SkillRightsBackendApi<T>,
}

impl<T: HttpTransport> BackendApi<T> {
    pub fn new(transport: T, csrf_token: Option<FastStr>) -> Self {
        let csrf = match csrf_token {
            Some(token) => CsrfTokenService::with_token(transport.clone(), token),
            None => CsrfTokenService::new(transport.clone()),
        };
        Self {
            questions:    QuestionPlayerBackendApi::new(transport.clone()),
            topics:       TopicCreationBackendApi::new(transport.clone(), csrf),
            skill_rights: SkillRightsBackendApi::new(transport),
        }
    }
}

impl BackendApi {
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::new(transport, config.csrf_token.clone()))
    }
}
