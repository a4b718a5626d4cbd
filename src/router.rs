//! Radix-tree request router.
//!
//! One tree per HTTP method, plus one tree for routes that accept any method.
//! O(path-length) lookup. Paths that exist under a different method answer
//! `405`, paths that only differ by a trailing slash redirect to the
//! registered form (or answer `405` if that form takes another method),
//! everything else is `404`.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::{Match, Router as MatchitRouter};
use percent_encoding::percent_decode_str;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    any: MatchitRouter<BoxedHandler>,
}

/// Outcome of matching a method + path pair.
pub(crate) enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    MethodNotAllowed,
    Redirect(String),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), any: MatchitRouter::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let tree = self.routes.entry(method).or_default();
        insert(tree, path, handler);
        self
    }

    /// Register a handler that answers every method on `path`.
    ///
    /// Method-specific routes on the same path take precedence.
    pub fn any(mut self, path: &str, handler: impl Handler) -> Self {
        insert(&mut self.any, path, handler);
        self
    }

    /// Routes one request and runs its handler.
    pub async fn handle(&self, mut req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Lookup::Found(handler, params) => {
                req.set_params(params);
                handler.call(req).await
            }
            Lookup::MethodNotAllowed => Response::status(Status::MethodNotAllowed),
            Lookup::Redirect(mut location) => {
                if let Some(query) = req.query() {
                    location.push('?');
                    location.push_str(query);
                }
                Response::builder()
                    .status(Status::MovedPermanently)
                    .header("location", &location)
                    .no_body()
            }
            Lookup::NotFound => Response::status(Status::NotFound),
        }
    }

    /// Matches on the raw path; captured parameters are percent-decoded.
    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup {
        if let Some(matched) = self.at(method, path) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), percent_decode_str(v).decode_utf8_lossy().into_owned()))
                .collect();
            return Lookup::Found(handler, params);
        }

        if self.matches_path(path) {
            return Lookup::MethodNotAllowed;
        }

        let toggled = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed.to_owned(),
            Some(_) => return Lookup::NotFound,
            None => format!("{path}/"),
        };
        if self.at(method, &toggled).is_some() {
            return Lookup::Redirect(toggled);
        }
        if self.matches_path(&toggled) {
            return Lookup::MethodNotAllowed;
        }

        Lookup::NotFound
    }

    /// The route `method` would take for `path`, method-specific first.
    fn at<'r, 'p>(&'r self, method: Method, path: &'p str) -> Option<Match<'r, 'p, &'r BoxedHandler>> {
        self.routes
            .get(&method)
            .and_then(|tree| tree.at(path).ok())
            .or_else(|| self.any.at(path).ok())
    }

    /// Whether any tree, for any method, matches `path`.
    fn matches_path(&self, path: &str) -> bool {
        self.any.at(path).is_ok() || self.routes.values().any(|tree| tree.at(path).is_ok())
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn insert(tree: &mut MatchitRouter<BoxedHandler>, path: &str, handler: impl Handler) {
    tree.insert(path, handler.into_boxed_handler())
        .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
}
