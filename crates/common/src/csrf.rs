use crate::data::RequestData;
use crate::error::{Error, Result};
use crate::transport::HttpTransport;
use faststr::FastStr;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

pub const CSRF_HANDLER_URL: &str = "/csrfhandler";

/// Supplies the token mutating requests must carry.
pub trait CsrfTokenProvider: Send + Sync {
    fn get_token_async(&self) -> impl Future<Output = Result<FastStr>> + Send;
}

#[derive(Deserialize)]
struct CsrfTokenResponse {
    token: FastStr,
}

/// Fetches the token from the backend once and hands out the same value
/// afterwards. A failed fetch is not memoized.
#[derive(Clone)]
pub struct CsrfTokenService<T> {
    transport: T,
    token:     Arc<OnceCell<FastStr>>,
}

impl<T: HttpTransport> CsrfTokenService<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            token: Arc::new(OnceCell::new()),
        }
    }

    pub fn with_token<S: Into<FastStr>>(transport: T, token: S) -> Self {
        Self {
            transport,
            token: Arc::new(OnceCell::new_with(Some(token.into()))),
        }
    }

    async fn fetch_token(&self) -> Result<FastStr> {
        debug!("fetching csrf token");
        let res = self
            .transport
            .send(RequestData::get(CSRF_HANDLER_URL))
            .await?;
        let CsrfTokenResponse { token } = res.into_result()?;
        if token.is_empty() {
            return Err(Error::MsgError("backend returned an empty csrf token".into()));
        }
        Ok(token)
    }
}

impl<T: HttpTransport> CsrfTokenProvider for CsrfTokenService<T> {
    async fn get_token_async(&self) -> Result<FastStr> {
        self.token
            .get_or_try_init(|| self.fetch_token())
            .await
            .cloned()
    }
}
