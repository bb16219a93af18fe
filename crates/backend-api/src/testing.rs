use common::HttpTransport;
use common::data::{RequestData, ResponseData};
use common::error::{Error, Result};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockState {
    requests:  Vec<RequestData>,
    responses: VecDeque<Result<ResponseData>>,
}

/// Records every request and answers from a queue of canned responses.
/// A request with nothing queued panics, like an unexpected call would.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn respond_json(&self, status: u16, value: &Value) -> &Self {
        self.push(Ok(ResponseData::json(status, value)))
    }

    pub fn respond_text(&self, status: u16, text: &str) -> &Self {
        self.push(Ok(ResponseData::new(status, text.to_owned())))
    }

    pub fn fail(&self, error: Error) -> &Self {
        self.push(Err(error))
    }

    fn push(&self, response: Result<ResponseData>) -> &Self {
        self.state.lock().unwrap().responses.push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<RequestData> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> RequestData {
        self.requests().pop().expect("no request was sent")
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: RequestData) -> Result<ResponseData> {
        let response = {
            let mut state = self.state.lock().unwrap();
            let path = request.path_and_query();
            state.requests.push(request);
            state
                .responses
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request: {path}"))
        };
        // let concurrent callers observe the request as in flight
        tokio::task::yield_now().await;
        response
    }
}
