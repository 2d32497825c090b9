//! HTTP client behaviour against a loopback stub server.

use price_dashboard::http::DashboardHttp;
use price_dashboard::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

/// One canned HTTP response.
struct Reply {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: String,
}

impl Reply {
    fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }
}

/// Running stub server: base URL plus a count of requests served.
struct Stub {
    url: String,
    hits: Arc<AtomicUsize>,
}

impl Stub {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serve `route(path_and_query, request_index)` on a loopback port.
async fn serve<F>(route: F) -> Stub
where
    F: Fn(&str, usize) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let hits = Arc::new(AtomicUsize::new(0));
    let route = Arc::new(route);

    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let route = route.clone();
            let counter = counter.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&request);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let index = counter.fetch_add(1, Ordering::SeqCst);
                let reply = route(&path, index);

                let mut response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
                    reply.status,
                    reply.body.len()
                );
                for (name, value) in &reply.headers {
                    response.push_str(&format!("{}: {}\r\n", name, value));
                }
                response.push_str("\r\n");
                response.push_str(&reply.body);
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    Stub { url, hits }
}

const PRICES_BODY: &str = r#"{
    "timestamp": "2024-01-05T14:30:00",
    "data": {
        "btc": {"price": 43250.5, "change_24h": 2.41, "market_cap": 847000000000.0, "symbol": "BTC", "name": "Bitcoin"},
        "sp500": {"price": 4783.45, "change_24h": -0.35, "prev_close": 4800.2, "symbol": "^GSPC", "name": "S&P 500"}
    }
}"#;

const HISTORY_BODY: &str = r#"{
    "timestamps": ["2024-01-04T00:00:00", "2024-01-05T00:00:00"],
    "prices": [42000.0, 43250.5]
}"#;

fn client(url: &str) -> DashboardClient {
    DashboardClient::builder().base_url(url).build().unwrap()
}

fn http(url: &str, retry: RetryPolicy) -> DashboardHttp {
    DashboardHttp::new(url, Duration::from_secs(5), retry).unwrap()
}

fn quick_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy::Custom(RetryConfig {
        max_retries,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(1),
        backoff_factor: 1.0,
        jitter: false,
        retryable_statuses: vec![503],
    })
}

/// Every endpoint answers its usual body; anything else is a 404.
fn backend(path: &str, _index: usize) -> Reply {
    match path {
        "/api/prices" => Reply::json(200, PRICES_BODY),
        "/api/price/sp500" => Reply::json(
            200,
            r#"{"timestamp": "2024-01-05T14:30:00", "data": {"price": 4783.45, "change_24h": -0.35, "prev_close": 4800.2}}"#,
        ),
        "/api/historical/btc?days=7" | "/api/historical/sp500?days=7" => {
            Reply::json(200, HISTORY_BODY)
        }
        "/health" => Reply::json(200, r#"{"status": "healthy", "timestamp": "2024-01-05T14:30:00"}"#),
        _ => Reply::json(404, r#"{"error": "unknown route"}"#),
    }
}

#[tokio::test]
async fn every_endpoint_decodes_through_the_client() {
    let stub = serve(backend).await;
    let client = client(&stub.url);

    let snapshot = assert_ok!(client.prices().all().await);
    let btc = snapshot.get(Asset::Btc).unwrap();
    assert_eq!(btc.price, Some(43250.5));
    assert_eq!(btc.market_cap, Some(847e9));
    assert_eq!(snapshot.get(Asset::Sp500).unwrap().prev_close, Some(4800.2));

    let sp500 = assert_ok!(client.prices().get(Asset::Sp500).await);
    assert_eq!(sp500.price, Some(4783.45));
    assert_eq!(sp500.change_24h, Some(-0.35));

    let history = assert_ok!(client.history().get(Asset::Btc, 7).await);
    assert_eq!(history.prices(), [42000.0, 43250.5]);
    assert_eq!(history.chart_labels(7), ["Jan 4", "Jan 5"]);

    let health = assert_ok!(client.health().await);
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn zero_day_window_is_requested_as_one_day() {
    let stub = serve(|path, _| match path {
        "/api/historical/btc?days=1" => Reply::json(200, HISTORY_BODY),
        _ => Reply::json(404, "{}"),
    })
    .await;
    assert_ok!(client(&stub.url).history().get(Asset::Btc, 0).await);
}

#[tokio::test]
async fn non_success_statuses_map_to_http_errors() {
    let cases: [(u16, Option<&'static str>, &'static str); 7] = [
        (404, None, "gone"),
        (408, None, ""),
        (429, Some("2"), ""),
        (429, None, ""),
        (400, None, "bad days"),
        (500, None, "boom"),
        (503, None, ""),
    ];

    for (status, retry_after, body) in cases {
        let stub = serve(move |_, _| {
            let reply = Reply::json(status, body);
            match retry_after {
                Some(secs) => reply.header("Retry-After", secs),
                None => reply,
            }
        })
        .await;

        let err = assert_err!(http(&stub.url, RetryPolicy::None).health().await);
        let mapped = match status {
            404 => matches!(&err, HttpError::NotFound(b) if b == body),
            408 => matches!(&err, HttpError::Timeout),
            429 => matches!(
                &err,
                HttpError::RateLimited { retry_after_ms } if *retry_after_ms == retry_after.map(|_| 2000)
            ),
            400 => matches!(&err, HttpError::BadRequest(b) if b == body),
            _ => matches!(&err, HttpError::ServerError { status: s, body: b } if *s == status && b == body),
        };
        assert!(mapped, "status {} mapped to {:?}", status, err);
        assert_eq!(stub.hits(), 1);
    }
}

#[tokio::test]
async fn malformed_body_is_a_request_error() {
    let stub = serve(|_, _| Reply::json(200, "not json")).await;
    let err = assert_err!(client(&stub.url).prices().all().await);
    assert!(matches!(err, DashboardError::Http(HttpError::Reqwest(_))));
}

#[tokio::test]
async fn retry_recovers_from_a_transient_failure() {
    let stub = serve(|path, index| match index {
        0 => Reply::json(503, "warming up"),
        _ => backend(path, index),
    })
    .await;

    let health = assert_ok!(http(&stub.url, quick_retries(2)).health().await);
    assert_eq!(health.status, "healthy");
    assert_eq!(stub.hits(), 2);
}

#[tokio::test]
async fn retry_gives_up_after_max_retries() {
    let stub = serve(|_, _| Reply::json(503, "down")).await;

    let err = assert_err!(http(&stub.url, quick_retries(1)).health().await);
    match err {
        HttpError::MaxRetriesExceeded {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 2);
            assert!(last_error.contains("503"));
        }
        other => panic!("expected MaxRetriesExceeded, got {:?}", other),
    }
    assert_eq!(stub.hits(), 2);
}

#[tokio::test]
async fn non_retryable_status_fails_on_first_attempt() {
    let stub = serve(|_, _| Reply::json(404, "{}")).await;

    let err = assert_err!(http(&stub.url, quick_retries(3)).health().await);
    assert!(matches!(err, HttpError::NotFound(_)));
    assert_eq!(stub.hits(), 1);
}

fn dashboard_over(
    url: &str,
) -> UpdatePipeline<DashboardClient, Board, NoopChartSink> {
    UpdatePipeline::new(
        client(url),
        DashboardState::new(Board::new(), NoopChartSink, DEFAULT_DAYS),
    )
}

#[tokio::test]
async fn server_error_on_prices_disconnects() {
    let stub = serve(|_, _| Reply::json(503, "{}")).await;
    let p = dashboard_over(&stub.url);

    let err = assert_err!(p.run_cycle().await);
    assert!(matches!(err, DashboardError::Http(HttpError::ServerError { status: 503, .. })));

    let state = p.state().lock().await;
    assert_eq!(state.status.status(), ConnectionStatus::Disconnected);
    assert_eq!(state.display.errors_shown(), 1);
    assert_eq!(state.display.card(Asset::Btc).price, "--");
}

#[tokio::test]
async fn history_server_error_only_skips_that_chart() {
    let stub = serve(|path, index| match path {
        "/api/historical/sp500?days=7" => Reply::json(500, "{}"),
        _ => backend(path, index),
    })
    .await;
    let p = dashboard_over(&stub.url);

    let outcome = assert_ok!(p.run_cycle().await);
    assert_eq!(
        outcome,
        CycleOutcome::Completed(CycleReport {
            assets_rendered: 2,
            charts_replaced: 1,
        })
    );

    let state = p.state().lock().await;
    assert_eq!(state.status.status(), ConnectionStatus::Connected);
    assert_eq!(state.display.card(Asset::Btc).price, "43,250.50");
    assert_eq!(state.display.card(Asset::Sp500).secondary, "4,800.20");
    assert_eq!(state.charts.series(Asset::Btc).len(), 2);
    assert!(state.charts.series(Asset::Sp500).is_empty());
}

#[tokio::test]
async fn upstream_error_quote_is_not_shown_as_data() {
    let stub = serve(|path, index| match path {
        "/api/prices" => Reply::json(
            200,
            r#"{"data": {
                "btc": {"price": 43250.5, "change_24h": 2.41, "market_cap": 847000000000.0},
                "sp500": {"price": 0, "change_24h": 0, "error": "boom"}
            }}"#,
        ),
        _ => backend(path, index),
    })
    .await;
    let p = dashboard_over(&stub.url);
    assert_ok!(p.run_cycle().await);

    let state = p.state().lock().await;
    let sp500 = state.display.card(Asset::Sp500);
    assert!(sp500.errored);
    assert_eq!(sp500.price, "--");
    assert_eq!(sp500.change, "--");
    assert_eq!(sp500.direction, None);
    assert!(!state.display.card(Asset::Btc).errored);
}
