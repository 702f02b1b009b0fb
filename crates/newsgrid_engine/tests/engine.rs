use std::sync::{Arc, Mutex};
use std::time::Duration;

use newsgrid_engine::{
    ApiArticle, EngineEvent, EngineHandle, FailureKind, FetchError, NewsClient, SearchResponse,
};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct ScriptedClient {
    queries: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl NewsClient for ScriptedClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, FetchError> {
        self.queries.lock().unwrap().push(query.to_string());
        if query == "offline" {
            return Err(FetchError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        Ok(SearchResponse {
            status: Some("ok".to_string()),
            total_results: Some(1),
            articles: vec![ApiArticle {
                title: Some(query.to_uppercase()),
                ..ApiArticle::default()
            }],
        })
    }
}

#[test]
fn search_completion_carries_generation_and_result() {
    let client = Arc::new(ScriptedClient::default());
    let engine = EngineHandle::with_client(client.clone());

    engine.search(4, "rust");
    let event = engine.recv_timeout(WAIT).expect("completion event");

    let EngineEvent::SearchCompleted { generation, result } = event else {
        panic!("unexpected event {event:?}");
    };
    assert_eq!(generation, 4);
    assert_eq!(
        result.unwrap().articles[0].title.as_deref(),
        Some("RUST")
    );
    assert_eq!(*client.queries.lock().unwrap(), vec!["rust".to_string()]);
}

#[test]
fn search_failure_is_reported_not_panicked() {
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default()));

    engine.search(1, "offline");
    let event = engine.recv_timeout(WAIT).expect("completion event");

    assert!(matches!(
        event,
        EngineEvent::SearchCompleted { generation: 1, result: Err(ref err) } if err.kind == FailureKind::Network
    ));
}

#[test]
fn rescheduling_replaces_pending_timer() {
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default()));

    engine.schedule_fetch(1, Duration::from_millis(300));
    engine.schedule_fetch(2, Duration::from_millis(50));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::DebounceElapsed { generation: 2 })
    );
    assert_eq!(engine.recv_timeout(Duration::from_millis(600)), None);
}

#[test]
fn cancel_pending_drops_timer() {
    let engine = EngineHandle::with_client(Arc::new(ScriptedClient::default()));

    engine.schedule_fetch(1, Duration::from_millis(100));
    engine.cancel_pending();

    assert_eq!(engine.recv_timeout(Duration::from_millis(400)), None);
}
