use crate::error::{Error, Result};
use faststr::FastStr;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use url::form_urlencoded;

/// Prefix the backend puts in front of every JSON body to defeat XSSI.
pub const XSSI_PREFIX: &str = ")]}'";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestData {
    pub method:  Method,
    pub path:    FastStr,
    pub query:   Vec<(FastStr, FastStr)>,
    pub headers: HashMap<FastStr, FastStr>,
    pub body:    Option<Value>,
}

impl RequestData {
    pub fn new<T>(method: Method, path: T) -> Self
    where
        T: Into<FastStr>,
    {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Default::default(),
            body: None,
        }
    }

    pub fn get<T: Into<FastStr>>(path: T) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post<T: Into<FastStr>>(path: T, body: Value) -> Self {
        let mut request = Self::new(Method::Post, path);
        request.body = Some(body);
        request
    }

    /// Empty values are kept: `start_cursor=` is part of the wire contract.
    pub fn query<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<FastStr>,
        V: Into<FastStr>,
    {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header<K, V>(&mut self, key: K, value: V)
    where
        K: Into<FastStr>,
        V: Into<FastStr>,
    {
        self.headers.insert(key.into(), value.into());
    }

    pub fn csrf_token<T>(&mut self, token: T)
    where
        T: Into<FastStr>,
    {
        self.header("X-CSRFToken", token);
    }

    pub fn path_and_query(&self) -> String {
        match self.encoded_query() {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.to_string(),
        }
    }

    /// Urlencoded query string, or `None` when there are no parameters.
    /// Commas stay literal so id lists go out as `skill_ids=1,2`.
    pub fn encoded_query(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode_query_part(k), encode_query_part(v)))
            .collect::<Vec<_>>()
            .join("&");
        Some(query)
    }
}

fn encode_query_part(part: &str) -> String {
    form_urlencoded::byte_serialize(part.as_bytes())
        .collect::<String>()
        .replace("%2C", ",")
}

/// Escapes `segment` so it stays a single path segment: `/`, `?`, `#` and
/// `%` are percent-encoded and spaces become `%20`.
pub fn encode_path_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseData {
    pub status: u16,
    pub body:   FastStr,
}

impl ResponseData {
    pub fn new<T: Into<FastStr>>(status: u16, body: T) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes a 2xx body, or turns anything else into the backend's own
    /// error message.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            return Err(self.into_error());
        }
        Ok(serde_json::from_str(strip_xssi_prefix(&self.body))?)
    }

    pub fn into_error(self) -> Error {
        let text = strip_xssi_prefix(&self.body).trim();
        let message = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map
                .get("error")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| text.to_owned()),
            Ok(Value::String(s)) => s,
            _ => text.to_owned(),
        };
        let message = if message.is_empty() {
            format!("Request failed with status {}", self.status)
        } else {
            message
        };
        Error::Backend(message.into(), self.status)
    }
}

pub fn strip_xssi_prefix(body: &str) -> &str {
    body.strip_prefix(XSSI_PREFIX).unwrap_or(body)
}
