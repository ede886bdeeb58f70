//! Honeycomb event API sink.
//!
//! Sends one JSON event per log record to `{api_host}/1/events/{dataset}`,
//! authenticated with the team API key header.

use std::future::Future;
use std::pin::Pin;

use chrono::SecondsFormat;
use serde_json::Value;
use tracing::debug;

use crate::domain::Event;
use crate::error::RelayError;
use crate::port::EventSink;

const TEAM_HEADER: &str = "X-Honeycomb-Team";
const EVENT_TIME_HEADER: &str = "X-Honeycomb-Event-Time";

/// Constant field stamped on every relayed event, identifying this relay
/// as the producer.
const PARSER_FIELD: &str = "event.parser";
const PARSER_NAME: &str = env!("CARGO_PKG_NAME");

pub struct HoneycombSink {
    client: reqwest::Client,
    event_url: String,
    api_key: String,
}

impl HoneycombSink {
    #[must_use]
    pub fn new(client: reqwest::Client, api_host: &str, api_key: String, dataset: &str) -> Self {
        let event_url = format!("{}/1/events/{}", api_host.trim_end_matches('/'), dataset);
        Self {
            client,
            event_url,
            api_key,
        }
    }

    #[must_use]
    pub fn event_url(&self) -> &str {
        &self.event_url
    }
}

impl EventSink for HoneycombSink {
    fn send_event(
        &self,
        event: Event,
    ) -> Pin<Box<dyn Future<Output = Result<(), RelayError>> + Send + '_>> {
        Box::pin(async move {
            let event_time = event.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true);
            let mut fields = event.fields;
            fields.insert(
                PARSER_FIELD.to_string(),
                Value::String(PARSER_NAME.to_string()),
            );

            let response = self
                .client
                .post(&self.event_url)
                .header(TEAM_HEADER, &self.api_key)
                .header(EVENT_TIME_HEADER, &event_time)
                .json(&fields)
                .send()
                .await
                .map_err(|e| RelayError::Sink(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RelayError::Sink(format!(
                    "event endpoint returned status {status}"
                )));
            }

            debug!(status = %status, "Delivered event");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::Router;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use chrono::{DateTime, Utc};
    use serde_json::Map;
    use tokio::time::sleep;

    use super::*;

    #[derive(Clone, Default)]
    struct Received {
        requests: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    }

    async fn capture_event(
        State(received): State<Received>,
        headers: HeaderMap,
        axum::Json(body): axum::Json<Value>,
    ) -> StatusCode {
        received.requests.lock().unwrap().push((headers, body));
        StatusCode::OK
    }

    async fn spawn_capture_server(received: Received) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        tokio::spawn(async move {
            let app = Router::new()
                .route("/1/events/{dataset}", post(capture_event))
                .with_state(received);
            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}"))
                .await
                .unwrap();
            axum::serve(listener, app).await.unwrap();
        });

        sleep(Duration::from_millis(100)).await;
        port
    }

    fn test_event() -> Event {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String("hello".into()));
        Event {
            timestamp: DateTime::<Utc>::from_timestamp(1, 0).unwrap(),
            fields,
        }
    }

    #[test]
    fn test_event_url_composition() {
        let sink = HoneycombSink::new(
            reqwest::Client::new(),
            "https://api.honeycomb.io/",
            "key".into(),
            "prod-logs",
        );
        assert_eq!(
            sink.event_url(),
            "https://api.honeycomb.io/1/events/prod-logs"
        );
    }

    #[tokio::test]
    async fn test_send_event_posts_json_with_credentials() {
        let received = Received::default();
        let port = spawn_capture_server(received.clone()).await;

        let sink = HoneycombSink::new(
            reqwest::Client::new(),
            &format!("http://127.0.0.1:{port}"),
            "team-key".into(),
            "test-dataset",
        );

        sink.send_event(test_event()).await.unwrap();

        let requests = received.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);

        let (headers, body) = &requests[0];
        assert_eq!(headers.get(TEAM_HEADER).unwrap(), "team-key");
        assert_eq!(
            headers.get(EVENT_TIME_HEADER).unwrap(),
            "1970-01-01T00:00:01Z"
        );
        assert_eq!(body["name"], Value::String("hello".into()));
        assert_eq!(body[PARSER_FIELD], Value::String(PARSER_NAME.into()));
    }

    #[tokio::test]
    async fn test_send_event_non_success_status_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        tokio::spawn(async move {
            let app = Router::new().route(
                "/1/events/{dataset}",
                post(|| async { StatusCode::UNAUTHORIZED }),
            );
            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}"))
                .await
                .unwrap();
            axum::serve(listener, app).await.unwrap();
        });
        sleep(Duration::from_millis(100)).await;

        let sink = HoneycombSink::new(
            reqwest::Client::new(),
            &format!("http://127.0.0.1:{port}"),
            "bad-key".into(),
            "test-dataset",
        );

        let result = sink.send_event(test_event()).await;
        assert!(matches!(result, Err(RelayError::Sink(_))));
    }

    #[tokio::test]
    async fn test_send_event_unreachable_sink_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let sink = HoneycombSink::new(
            reqwest::Client::new(),
            &format!("http://127.0.0.1:{port}"),
            "key".into(),
            "test-dataset",
        );

        let result = sink.send_event(test_event()).await;
        assert!(matches!(result, Err(RelayError::Sink(_))));
    }
}
