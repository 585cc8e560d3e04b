//! magicthegathering.io API client
//!
//! Blocking client for `GET /cards` and `GET /sets`. Requests are issued one
//! at a time and spaced by a minimum interval; any failure is returned to the
//! caller as is, there are no retries.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::cell::Cell;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};
use xcube_common::config::OracleConfig;

use super::{CardOracle, PrintRecord, SetCatalog, SetInfo};

const USER_AGENT: &str = concat!("xcube/", env!("CARGO_PKG_VERSION"));

/// magicthegathering.io client errors
#[derive(Debug, Error)]
pub enum MtgApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<MtgApiError> for xcube_common::Error {
    fn from(err: MtgApiError) -> Self {
        xcube_common::Error::Transport(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct CardsPage {
    cards: Vec<ApiCard>,
}

#[derive(Debug, Deserialize)]
struct ApiCard {
    name: String,
    #[serde(default)]
    names: Option<Vec<String>>,
    set: String,
    #[serde(default)]
    number: Option<String>,
}

impl ApiCard {
    fn into_print(self) -> Option<PrintRecord> {
        let number = self.number?;
        Some(PrintRecord {
            name: self.name,
            set_code: self.set,
            number,
            face_names: self.names.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SetsPage {
    sets: Vec<ApiSet>,
}

#[derive(Debug, Deserialize)]
struct ApiSet {
    code: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "releaseDate", default)]
    release_date: Option<String>,
}

impl ApiSet {
    fn into_set_info(self) -> SetInfo {
        let release_date = match self.release_date.as_deref() {
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!(code = %self.code, date = %raw, "Unparseable release date: {}", e);
                    None
                }
            },
            None => None,
        };
        SetInfo {
            code: self.code,
            kind: self.kind,
            release_date,
        }
    }
}

/// Keeps consecutive requests at least `min_interval` apart
struct RateLimiter {
    last_request: Cell<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Cell::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    /// Sleep if necessary to comply with the rate limit
    fn wait(&self) {
        if let Some(last_time) = self.last_request.get() {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("Rate limiting: waiting {:?}", wait_time);
                std::thread::sleep(wait_time);
            }
        }

        self.last_request.set(Some(Instant::now()));
    }
}

/// magicthegathering.io API client
pub struct MtgApiClient {
    http_client: reqwest::blocking::Client,
    base_url: String,
    page_size: u32,
    rate_limiter: RateLimiter,
}

impl MtgApiClient {
    /// Build a client from configuration
    ///
    /// Requests never time out unless `timeout_secs` is set.
    pub fn new(config: &OracleConfig) -> Result<Self, MtgApiError> {
        let http_client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| MtgApiError::NetworkError(e.to_string()))?;

        Ok(Self::with_http_client(http_client, config))
    }

    fn with_http_client(http_client: reqwest::blocking::Client, config: &OracleConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.max(1),
            rate_limiter: RateLimiter::new(config.min_interval_ms),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MtgApiError> {
        self.rate_limiter.wait();

        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, query = ?query, "Querying card API");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| MtgApiError::NetworkError(e.to_string()))?;

        let status = response.status();
        debug!("Response status code: {}", status.as_u16());

        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            return Err(MtgApiError::ApiError(status.as_u16(), error_text));
        }

        response
            .json()
            .map_err(|e| MtgApiError::ParseError(e.to_string()))
    }

    /// Fetch every page of a listing endpoint
    ///
    /// Stops on the first empty page. The server may cap pages below the
    /// requested size, so a short page does not mean the listing is done.
    fn get_all_pages<P, T, F>(
        &self,
        path: &str,
        query: &[(&str, String)],
        items: F,
    ) -> Result<Vec<T>, MtgApiError>
    where
        P: DeserializeOwned,
        F: Fn(P) -> Vec<T>,
    {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let mut paged = query.to_vec();
            paged.push(("page", page.to_string()));
            paged.push(("pageSize", self.page_size.to_string()));

            let batch = items(self.get_json::<P>(path, &paged)?);
            if batch.is_empty() {
                break;
            }
            debug!("Page {} of '{}': {} items", page, path, batch.len());
            all.extend(batch);
            page += 1;
        }

        Ok(all)
    }

    /// All cards whose name matches `name` (the API also returns near matches)
    pub fn fetch_cards(&self, name: &str) -> Result<Vec<PrintRecord>, MtgApiError> {
        let cards = self.get_all_pages("cards", &[("name", name.to_string())], |p: CardsPage| p.cards)?;
        let total = cards.len();
        let prints: Vec<PrintRecord> = cards.into_iter().filter_map(ApiCard::into_print).collect();
        if prints.len() < total {
            debug!(name = %name, skipped = total - prints.len(), "Skipped cards without a collector number");
        }
        debug!("Returned {} hits for cards with '{}'", prints.len(), name);
        Ok(prints)
    }

    /// All sets of the given product types
    pub fn fetch_sets(&self, kinds: &[String]) -> Result<Vec<SetInfo>, MtgApiError> {
        let sets = self.get_all_pages("sets", &[("type", kinds.join(","))], |p: SetsPage| p.sets)?;
        Ok(sets.into_iter().map(ApiSet::into_set_info).collect())
    }
}

impl CardOracle for MtgApiClient {
    fn cards_named(&self, name: &str) -> xcube_common::Result<Vec<PrintRecord>> {
        Ok(self.fetch_cards(name)?)
    }
}

impl SetCatalog for MtgApiClient {
    fn sets_of_kinds(&self, kinds: &[String]) -> xcube_common::Result<Vec<SetInfo>> {
        Ok(self.fetch_sets(kinds)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    /// Answer every request on a local port with `respond(path_and_query)`
    fn serve<F>(respond: F) -> String
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                loop {
                    let mut header = String::new();
                    match reader.read_line(&mut header) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if header == "\r\n" => break,
                        Ok(_) => {}
                    }
                }

                let target = request_line.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = respond(target);
                let response = format!(
                    "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}", addr)
    }

    fn query_param(target: &str, key: &str) -> Option<String> {
        let (_, query) = target.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }

    fn stub_client(base_url: String, page_size: u32) -> MtgApiClient {
        let config = OracleConfig {
            base_url,
            min_interval_ms: 0,
            timeout_secs: Some(5),
            page_size,
        };
        let http_client = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        MtgApiClient::with_http_client(http_client, &config)
    }

    /// `total` Island prints, served at most `cap` per page
    fn island_server(total: usize, cap: usize, requests: Arc<AtomicUsize>) -> String {
        serve(move |target| {
            requests.fetch_add(1, Ordering::SeqCst);
            let page: usize = query_param(target, "page").and_then(|p| p.parse().ok()).unwrap_or(1);
            let cards: Vec<String> = ((page - 1) * cap..(page * cap).min(total))
                .map(|i| format!(r#"{{"name": "Island", "set": "S{}", "number": "{}"}}"#, i, i))
                .collect();
            (200, format!(r#"{{"cards": [{}]}}"#, cards.join(",")))
        })
    }

    #[test]
    fn test_paging_continues_past_server_capped_pages() {
        let requests = Arc::new(AtomicUsize::new(0));
        let client = stub_client(island_server(230, 100, requests.clone()), 250);

        let prints = client.fetch_cards("Island").unwrap();

        assert_eq!(prints.len(), 230);
        assert_eq!(prints[229].number, "229");
        // Three full or partial pages, then the empty one
        assert_eq!(requests.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_paging_with_matching_page_size() {
        let requests = Arc::new(AtomicUsize::new(0));
        let client = stub_client(island_server(200, 100, requests.clone()), 100);

        let prints = client.fetch_cards("Island").unwrap();

        assert_eq!(prints.len(), 200);
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_server_error_is_transport_failure() {
        let base_url = serve(|_| (500, r#"{"error": "Internal Server Error"}"#.to_string()));
        let client = stub_client(base_url, 100);

        match client.fetch_cards("Island") {
            Err(MtgApiError::ApiError(status, _)) => assert_eq!(status, 500),
            other => panic!("expected API error, got {:?}", other.map(|p| p.len())),
        }

        match client.cards_named("Island") {
            Err(xcube_common::Error::Transport(msg)) => assert!(msg.contains("500")),
            other => panic!("expected transport error, got {:?}", other.map(|p| p.len())),
        }
    }

    #[test]
    fn test_undecodable_body_is_transport_failure() {
        let base_url = serve(|_| (200, "<html>maintenance</html>".to_string()));
        let client = stub_client(base_url, 100);

        assert!(matches!(client.fetch_sets(&["core".to_string()]), Err(MtgApiError::ParseError(_))));
        assert!(matches!(
            client.sets_of_kinds(&["core".to_string()]),
            Err(xcube_common::Error::Transport(_))
        ));
    }

    #[test]
    fn test_set_kinds_are_comma_joined() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let log = seen.clone();
        let base_url = serve(move |target| {
            log.lock().unwrap().push(target.to_string());
            let body = if query_param(target, "page").as_deref() == Some("1") {
                r#"{"sets": [{"code": "LEB", "type": "core", "releaseDate": "1993-10-01"}]}"#
            } else {
                r#"{"sets": []}"#
            };
            (200, body.to_string())
        });
        let client = stub_client(base_url, 100);

        let sets = client
            .fetch_sets(&["core".to_string(), "expansion".to_string()])
            .unwrap();

        assert_eq!(sets, vec![SetInfo::new("LEB", "core", NaiveDate::from_ymd_opt(1993, 10, 1))]);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].starts_with("/sets?"));
        assert_eq!(query_param(&seen[0], "type").as_deref(), Some("core%2Cexpansion"));
    }

    #[test]
    fn test_configured_timeout_aborts_slow_request() {
        let base_url = serve(|_| {
            thread::sleep(Duration::from_secs(3));
            (200, r#"{"cards": []}"#.to_string())
        });
        let config = OracleConfig {
            base_url,
            min_interval_ms: 0,
            timeout_secs: Some(1),
            page_size: 100,
        };
        let http_client = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .unwrap();
        let client = MtgApiClient::with_http_client(http_client, &config);

        assert!(matches!(client.fetch_cards("Island"), Err(MtgApiError::NetworkError(_))));
    }

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(1000);
        assert_eq!(limiter.min_interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_rate_limiter_timing() {
        let limiter = RateLimiter::new(200);

        let start = Instant::now();
        limiter.wait();
        let first_elapsed = start.elapsed();
        limiter.wait();
        let second_elapsed = start.elapsed();

        assert!(first_elapsed < Duration::from_millis(100));
        assert!(second_elapsed >= Duration::from_millis(190));
    }

    #[test]
    fn test_client_creation() {
        let client = MtgApiClient::new(&OracleConfig::default());
        assert!(client.is_ok());

        let config = OracleConfig {
            timeout_secs: Some(10),
            ..OracleConfig::default()
        };
        assert!(MtgApiClient::new(&config).is_ok());
    }

    #[test]
    fn test_parse_cards_page() {
        let body = r#"{"cards": [
            {"name": "Fire", "names": ["Fire", "Ice"], "set": "APC", "number": "128", "layout": "split"},
            {"name": "Fireball", "set": "LEA", "number": "149"},
            {"name": "Fire Ambush", "set": "PTK", "names": null},
            {"name": "Fire", "names": ["Fire", "Ice"], "set": "MH2", "number": "290"}
        ]}"#;

        let page: CardsPage = serde_json::from_str(body).unwrap();
        let prints: Vec<PrintRecord> = page.cards.into_iter().filter_map(ApiCard::into_print).collect();

        assert_eq!(prints.len(), 3);
        assert_eq!(prints[0], PrintRecord::new("Fire", "APC", "128").with_faces(["Fire", "Ice"]));
        assert!(prints[1].face_names.is_empty());
        assert_eq!(prints[2].set_code, "MH2");
    }

    #[test]
    fn test_parse_sets_page() {
        let body = r#"{"sets": [
            {"code": "LEB", "name": "Limited Edition Beta", "type": "core", "releaseDate": "1993-10-01"},
            {"code": "XXX", "name": "Mystery", "type": "expansion"},
            {"code": "BAD", "name": "Broken", "type": "expansion", "releaseDate": "someday"}
        ]}"#;

        let page: SetsPage = serde_json::from_str(body).unwrap();
        let sets: Vec<SetInfo> = page.sets.into_iter().map(ApiSet::into_set_info).collect();

        assert_eq!(
            sets[0],
            SetInfo::new("LEB", "core", NaiveDate::from_ymd_opt(1993, 10, 1))
        );
        assert_eq!(sets[1].release_date, None);
        assert_eq!(sets[2].release_date, None);
    }
}
