use super::HttpTransport;
use crate::config::ClientConfig;
use crate::data::{RequestData, ResponseData};
use crate::error::{Error, Result};
use crate::RequestBuilder;
use reqwest::Client as ReqwestClient;
use tracing::debug;
use url::Url;

#[inline]
pub fn build_http_client(config: &ClientConfig) -> Result<ReqwestClient> {
    let client = ReqwestClient::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()?;
    Ok(client)
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client:   ReqwestClient,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(client: ReqwestClient, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(build_http_client(config)?, config.base_url.clone()))
    }

    fn url_for(&self, request: &RequestData) -> Result<Url> {
        // handler paths are absolute; keep any prefix the base url carries
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{}", request.path))
            .map_err(|e| Error::MsgError(format!("invalid request path {}: {e}", request.path).into()))?;
        if let Some(query) = request.encoded_query() {
            url.set_query(Some(&query));
        }
        Ok(url)
    }

    fn request_builder(&self, request: RequestData) -> Result<RequestBuilder> {
        let url = self.url_for(&request)?;
        let RequestData {
            method,
            headers,
            body,
            ..
        } = request;
        let mut builder = self.client.request(method.into(), url);
        for (k, v) in headers {
            builder = builder.header(k.as_str(), v.as_str());
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        Ok(builder)
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: RequestData) -> Result<ResponseData> {
        debug!(method = ?request.method, path = %request.path_and_query(), "sending backend request");
        let builder = self.request_builder(request)?;
        let res = builder.send().await?;
        let status = res.status().as_u16();
        let body = res.text().await?;
        Ok(ResponseData::new(status, body))
    }
}
