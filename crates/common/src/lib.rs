pub mod config;
pub mod csrf;
pub mod data;
pub mod error;
pub mod transport;

mod log;

pub use config::ClientConfig;
pub use csrf::{CsrfTokenProvider, CsrfTokenService};
pub use log::logging_stdout;
pub use reqwest::RequestBuilder;
pub use transport::{HttpTransport, ReqwestTransport};
