mod http_client;

pub use http_client::{ReqwestTransport, build_http_client};

use crate::data::{RequestData, ResponseData};
use crate::error::Result;

/// Sends one request to the backend.
///
/// Every response that arrives, whatever its status, is `Ok`; only
/// network-level failures are reported as `Err`.
pub trait HttpTransport: Clone + Send + Sync + 'static {
    fn send(&self, request: RequestData) -> impl Future<Output = Result<ResponseData>> + Send;
}
