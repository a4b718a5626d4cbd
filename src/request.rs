//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;

use crate::error::{BoxError, Error};
use crate::method::Method;

/// An incoming HTTP request.
///
/// The body is not read until a handler asks for it with
/// [`read_body`](Request::read_body), so handlers that ignore it never wait on
/// the client.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) params: HashMap<String, String>,
    pub(crate) body: UnsyncBoxBody<Bytes, BoxError>,
}

impl Request {
    /// Builds a request around any body stream.
    ///
    /// `target` is the raw request target: a path with an optional `?query`.
    pub fn new<B>(method: Method, target: &str, body: B) -> Self
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_owned())),
            None => (target, None),
        };
        Self {
            method,
            path: path.to_owned(),
            query,
            params: HashMap::new(),
            body: body.map_err(Into::into).boxed_unsync(),
        }
    }

    /// Builds a request whose body is already in memory.
    pub fn buffered(method: Method, target: &str, body: impl Into<Bytes>) -> Self {
        Self::new(method, target, Full::new(body.into()))
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }

    /// Returns a named path parameter.
    ///
    /// For a route `/articles/{id}`, `req.param("id")` on `/articles/a%20b`
    /// returns `Some("a b")`: values are percent-decoded.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Reads the whole body into memory.
    pub async fn read_body(self) -> Result<Bytes, Error> {
        let collected = self.body.collect().await.map_err(Error::BodyRead)?;
        Ok(collected.to_bytes())
    }
}
