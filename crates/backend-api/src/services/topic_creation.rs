use crate::requests::topic::{TOPIC_CREATION_HANDLER_URL, new_topic};
use common::data::{RequestData, TopicCreated};
use common::error::Result;
use common::{CsrfTokenProvider, HttpTransport};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct TopicCreationBackendApi<T, P> {
    transport: T,
    csrf:      P,
}

impl<T, P> TopicCreationBackendApi<T, P>
where
    T: HttpTransport,
    P: CsrfTokenProvider,
{
    pub fn new(transport: T, csrf: P) -> Self {
        Self { transport, csrf }
    }

    pub async fn create_topic(&self, name: &str, abbreviated_name: &str) -> Result<TopicCreated> {
        let body = serde_json::to_value(new_topic(name, abbreviated_name)?)?;
        let token = self.csrf.get_token_async().await?;

        let mut request = RequestData::post(TOPIC_CREATION_HANDLER_URL, body);
        request.csrf_token(token);

        debug!(name, "creating topic");
        let created = self.transport.send(request).await?.into_result();
        if let Err(e) = &created {
            warn!(name, error = %e, "failed to create topic");
        }
        created
    }
}
