//! Article endpoints.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | any | `/` | [`home`] |
//! | GET | `/articles` | [`list`] |
//! | POST | `/articles` | [`create`] |
//! | GET | `/articles/{id}` | [`get_one`] |
//! | PUT | `/articles/{id}` | [`update`] |
//! | DELETE | `/articles/{id}` | [`delete`] |

use std::sync::Arc;

use tracing::{debug, error};

use crate::article::Article;
use crate::error::Error;
use crate::handler::with_state;
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::ArticleStore;

/// Builds the service router with every handler bound to `store`.
pub fn routes(store: Arc<ArticleStore>) -> Router {
    Router::new()
        .any("/", home)
        .on(Method::Get, "/articles", with_state(Arc::clone(&store), list))
        .on(Method::Post, "/articles", with_state(Arc::clone(&store), create))
        .on(Method::Get, "/articles/{id}", with_state(Arc::clone(&store), get_one))
        .on(Method::Put, "/articles/{id}", with_state(Arc::clone(&store), update))
        .on(Method::Delete, "/articles/{id}", with_state(store, delete))
}

pub async fn home(_req: Request) -> &'static str {
    "Hello homepage!"
}

pub async fn list(store: Arc<ArticleStore>, _req: Request) -> Json<Vec<Article>> {
    Json(store.all())
}

/// An unknown id answers `200` with an empty body, not `404`.
pub async fn get_one(store: Arc<ArticleStore>, req: Request) -> Response {
    let id = req.param("id").unwrap_or_default();
    match store.get(id) {
        Some(article) => Json(article).into_response(),
        None => {
            debug!(id, "article not found");
            Response::status(Status::Ok)
        }
    }
}

/// Appends the posted article. A body that is not a JSON article is not an
/// error: an article with every field empty is appended instead.
pub async fn create(store: Arc<ArticleStore>, req: Request) -> Response {
    let body = match req.read_body().await {
        Ok(body) => body,
        Err(e) => {
            error!("{e}");
            return Status::BadRequest.into_response();
        }
    };

    let article = decode(&body).unwrap_or_else(|e| {
        debug!("{e}; appending an empty article");
        Article::default()
    });
    store.push(article.clone());
    Json(article).into_response()
}

/// Replaces title, description and content. The `id` in the body is ignored.
pub async fn update(store: Arc<ArticleStore>, req: Request) -> Response {
    let id = req.param("id").unwrap_or_default().to_owned();

    let changes = match req.read_body().await.and_then(|body| decode(&body)) {
        Ok(changes) => changes,
        Err(e) => {
            if matches!(e, Error::BodyRead(_)) {
                error!("{e}");
            } else {
                debug!(id = %id, "{e}");
            }
            return Status::BadRequest.into_response();
        }
    };

    match store.update(&id, changes) {
        Some(article) => Json(article).into_response(),
        None => Status::NotFound.into_response(),
    }
}

pub async fn delete(store: Arc<ArticleStore>, req: Request) -> Response {
    let id = req.param("id").unwrap_or_default();
    match store.remove(id) {
        Some(article) => Json(article).into_response(),
        None => Status::NotFound.into_response(),
    }
}

fn decode(body: &[u8]) -> Result<Article, Error> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use bytes::Bytes;
    use hyper::body::{Body, Frame};

    use super::*;
    use crate::config::seed_articles;

    /// A body whose stream fails on the first read.
    struct FailingBody;

    impl Body for FailingBody {
        type Data = Bytes;
        type Error = io::Error;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<Frame<Bytes>, io::Error>>> {
            Poll::Ready(Some(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))))
        }
    }

    fn app() -> (Arc<ArticleStore>, Router) {
        let store = Arc::new(ArticleStore::new(seed_articles()));
        (Arc::clone(&store), routes(store))
    }

    async fn send(router: &Router, method: Method, path: &str, body: &'static str) -> Response {
        router.handle(Request::buffered(method, path, body)).await
    }

    fn article(res: &Response) -> Article {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[tokio::test]
    async fn home_says_hello() {
        let (_, router) = app();
        let res = send(&router, Method::Get, "/", "").await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.body(), b"Hello homepage!");
    }

    #[tokio::test]
    async fn list_returns_seed_in_order() {
        let (_, router) = app();
        let res = send(&router, Method::Get, "/articles", "").await;
        let articles: Vec<Article> = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(articles, seed_articles());
    }

    #[tokio::test]
    async fn get_one_finds_by_id() {
        let (_, router) = app();
        let res = send(&router, Method::Get, "/articles/2", "").await;
        assert_eq!(article(&res).id, "2");
    }

    #[tokio::test]
    async fn get_one_unknown_is_empty_200() {
        let (_, router) = app();
        let res = send(&router, Method::Get, "/articles/404", "").await;
        assert_eq!(res.status_code(), Status::Ok);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn create_appends_and_echoes() {
        let (store, router) = app();
        let res = send(
            &router,
            Method::Post,
            "/articles",
            r#"{"id":"3","title":"T","desc":"D","content":"C"}"#,
        )
        .await;
        assert_eq!(article(&res), Article::new("3", "T", "D", "C"));
        assert_eq!(store.all().len(), 3);
        assert_eq!(store.get("3"), Some(Article::new("3", "T", "D", "C")));
    }

    #[tokio::test]
    async fn create_with_malformed_json_appends_empty_article() {
        let (store, router) = app();
        let res = send(&router, Method::Post, "/articles", "not json").await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(article(&res), Article::default());
        assert_eq!(store.all().last(), Some(&Article::default()));
    }

    #[tokio::test]
    async fn create_with_unreadable_body_is_400() {
        let (store, router) = app();
        let res = router
            .handle(Request::new(Method::Post, "/articles", FailingBody))
            .await;
        assert_eq!(res.status_code(), Status::BadRequest);
        assert!(res.body().is_empty());
        assert_eq!(store.all().len(), 2);
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id() {
        let (store, router) = app();
        let res = send(
            &router,
            Method::Put,
            "/articles/1",
            r#"{"id":"77","title":"T","desc":"D","content":"C"}"#,
        )
        .await;
        assert_eq!(article(&res), Article::new("1", "T", "D", "C"));
        assert_eq!(store.get("1"), Some(Article::new("1", "T", "D", "C")));
        assert_eq!(store.get("77"), None);
    }

    #[tokio::test]
    async fn update_with_malformed_json_is_400_and_unchanged() {
        let (store, router) = app();
        let res = send(&router, Method::Put, "/articles/1", "not json").await;
        assert_eq!(res.status_code(), Status::BadRequest);
        assert!(res.body().is_empty());
        assert_eq!(store.all(), seed_articles());
    }

    #[tokio::test]
    async fn update_with_unreadable_body_is_400() {
        let (store, router) = app();
        let req = Request::new(Method::Put, "/articles/1", FailingBody);
        let res = router.handle(req).await;
        assert_eq!(res.status_code(), Status::BadRequest);
        assert_eq!(store.all(), seed_articles());
    }

    #[tokio::test]
    async fn update_with_null_body_clears_fields() {
        let (store, router) = app();
        let res = send(&router, Method::Put, "/articles/1", "null").await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(article(&res), Article::new("1", "", "", ""));
        assert_eq!(store.get("1"), Some(Article::new("1", "", "", "")));
    }

    #[tokio::test]
    async fn update_with_repeated_key_takes_last_value() {
        let (store, router) = app();
        let res = send(&router, Method::Put, "/articles/1", r#"{"title":"a","title":"b"}"#).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(store.get("1").unwrap().title, "b");
    }

    #[tokio::test]
    async fn create_matches_keys_case_insensitively() {
        let (store, router) = app();
        let res = send(&router, Method::Post, "/articles", r#"{"ID":"7","Title":"T"}"#).await;
        assert_eq!(article(&res), Article::new("7", "T", "", ""));
        assert_eq!(store.get("7"), Some(Article::new("7", "T", "", "")));
    }

    #[tokio::test]
    async fn encoded_ids_reach_get_update_and_delete() {
        let (store, router) = app();
        send(&router, Method::Post, "/articles", r#"{"id":"a b"}"#).await;

        let res = send(&router, Method::Get, "/articles/a%20b", "").await;
        assert_eq!(article(&res).id, "a b");

        let res = send(&router, Method::Put, "/articles/a%20b", r#"{"title":"T"}"#).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(store.get("a b").unwrap().title, "T");

        let res = send(&router, Method::Delete, "/articles/a%20b", "").await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(store.get("a b"), None);
    }

    #[tokio::test]
    async fn update_unknown_is_404() {
        let (_, router) = app();
        let res = send(&router, Method::Put, "/articles/9", r#"{"title":"x"}"#).await;
        assert_eq!(res.status_code(), Status::NotFound);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_and_echoes() {
        let (store, router) = app();
        let res = send(&router, Method::Delete, "/articles/1", "").await;
        assert_eq!(article(&res), seed_articles()[0]);
        assert_eq!(store.all(), seed_articles()[1..].to_vec());

        let res = send(&router, Method::Get, "/articles/1", "").await;
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_is_404() {
        let (store, router) = app();
        let res = send(&router, Method::Delete, "/articles/9", "").await;
        assert_eq!(res.status_code(), Status::NotFound);
        assert!(res.body().is_empty());
        assert_eq!(store.all().len(), 2);
    }

    #[tokio::test]
    async fn unregistered_method_is_405() {
        let (_, router) = app();
        let res = send(&router, Method::Patch, "/articles", "").await;
        assert_eq!(res.status_code(), Status::MethodNotAllowed);
    }
}
