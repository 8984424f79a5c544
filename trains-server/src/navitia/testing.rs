//! Test doubles: a local fake of the coverage API and a hand-driven clock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::task::JoinHandle;

use super::cache::Clock;

/// Clock that only moves when told to.
#[derive(Debug)]
pub(crate) struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

/// What the fake upstream answers for one path.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Reply {
    /// 200 with a JSON body
    Json(&'static str),
    /// Empty body with this status
    Status(u16),
    /// 200 with a JSON body after a pause
    Delayed(Duration, &'static str),
}

#[derive(Default)]
struct Routes {
    replies: Mutex<HashMap<String, Reply>>,
    hits: AtomicUsize,
}

/// Fake coverage API bound to a random local port.
///
/// Replies are keyed by path and query; unknown paths get a 404. Every
/// request is counted, whatever the reply.
pub(crate) struct Upstream {
    base_url: String,
    routes: Arc<Routes>,
    server: JoinHandle<()>,
}

impl Upstream {
    pub(crate) async fn start() -> Self {
        let routes = Arc::new(Routes::default());
        let app = Router::new().fallback(answer).with_state(routes.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            routes,
            server,
        }
    }

    /// Answer requests for `path_and_query` with `reply` from now on.
    pub(crate) fn serve(&self, path_and_query: &str, reply: Reply) {
        self.routes
            .replies
            .lock()
            .unwrap()
            .insert(path_and_query.to_string(), reply);
    }

    pub(crate) fn hits(&self) -> usize {
        self.routes.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for Upstream {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn answer(State(routes): State<Arc<Routes>>, uri: Uri) -> Response {
    routes.hits.fetch_add(1, Ordering::SeqCst);

    let key = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let reply = routes.replies.lock().unwrap().get(&key).copied();

    match reply {
        Some(Reply::Json(body)) => json(body),
        Some(Reply::Delayed(pause, body)) => {
            tokio::time::sleep(pause).await;
            json(body)
        }
        Some(Reply::Status(code)) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn json(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
