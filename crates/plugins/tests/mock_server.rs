use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use warp::Filter;
use warp::http::StatusCode;

/// Mock RubyGems API for testing
pub struct MockRegistry {
    port: u16,
    data: RegistryData,
    requests: Arc<Mutex<Vec<String>>>,
    server_handle: Option<tokio::task::JoinHandle<()>>,
}

/// Response bodies served by the mock, kept as raw text so tests can serve
/// payloads that are not valid JSON.
#[derive(Debug, Clone, Default)]
pub struct RegistryData {
    host: String,
    reverse_dependencies: String,
    gems: HashMap<String, String>,
    stalled: HashSet<String>,
}

/// How long a stalled gem holds its response.
const STALL: Duration = Duration::from_secs(10);

pub fn test_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_data")
}

/// Load a gem payload fixture from `tests/test_data/gems`.
pub fn load_gem_fixture(name: &str) -> Result<String> {
    let path = test_data_dir().join("gems").join(format!("{name}.json"));
    std::fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))
}

impl MockRegistry {
    /// Create a mock (not started) that lists `names` as dependents of `lita`.
    pub fn new(names: &[&str]) -> Self {
        let reverse_dependencies =
            serde_json::to_string(names).unwrap_or_else(|_| "[]".to_string());
        Self::with_raw_reverse_dependencies(reverse_dependencies)
    }

    /// Create a mock whose reverse dependency endpoint returns `body` verbatim.
    pub fn with_raw_reverse_dependencies(body: impl Into<String>) -> Self {
        MockRegistry {
            port: 0,
            data: RegistryData {
                host: "lita".to_string(),
                reverse_dependencies: body.into(),
                gems: HashMap::new(),
                stalled: HashSet::new(),
            },
            requests: Arc::new(Mutex::new(Vec::new())),
            server_handle: None,
        }
    }

    /// The standard fixture set: `lita-a`, `lita-b` and the denied `lita-console`.
    pub fn from_fixtures() -> Result<Self> {
        let reverse = std::fs::read_to_string(test_data_dir().join("reverse_dependencies.json"))
            .with_context(|| "Failed to read reverse_dependencies.json")?;
        Ok(Self::with_raw_reverse_dependencies(reverse)
            .with_gem("lita-a", load_gem_fixture("lita-a")?)
            .with_gem("lita-b", load_gem_fixture("lita-b")?))
    }

    /// Serve `body` for `/api/v1/gems/{name}.json`.
    pub fn with_gem(mut self, name: &str, body: impl Into<String>) -> Self {
        self.data.gems.insert(name.to_string(), body.into());
        self
    }

    /// Hold the response for `name` long enough for a client timeout.
    pub fn with_stalled_gem(mut self, name: &str) -> Self {
        self.data.stalled.insert(name.to_string());
        self
    }

    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Start the mock server and return the base URL
    pub async fn start(&mut self) -> Result<String> {
        let data = Arc::new(self.data.clone());

        let log = self.requests.clone();
        let record = warp::path::full().map(move |path: warp::path::FullPath| {
            if let Ok(mut requests) = log.lock() {
                requests.push(path.as_str().to_string());
            }
        });

        // Reverse dependencies endpoint
        let reverse_data = data.clone();
        let reverse = warp::path!("api" / "v1" / "gems" / String / "reverse_dependencies.json")
            .and(warp::get())
            .map(move |host: String| {
                if host == reverse_data.host {
                    json_reply(StatusCode::OK, reverse_data.reverse_dependencies.clone())
                } else {
                    not_found()
                }
            });

        // Per-gem endpoint
        let gem_data = data.clone();
        let gem = warp::path!("api" / "v1" / "gems" / String)
            .and(warp::get())
            .and_then(move |file: String| {
                let gem_data = gem_data.clone();
                async move {
                    let name = file.strip_suffix(".json").unwrap_or(&file);
                    if gem_data.stalled.contains(name) {
                        tokio::time::sleep(STALL).await;
                    }
                    let reply = match gem_data.gems.get(name) {
                        Some(body) => json_reply(StatusCode::OK, body.clone()),
                        None => not_found(),
                    };
                    Ok::<_, warp::Rejection>(reply)
                }
            });

        let routes = record
            .untuple_one()
            .and(reverse.or(gem).unify());

        // Start server on random port
        let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));

        self.port = addr.port();
        self.server_handle = Some(tokio::spawn(server));

        let base_url = format!("http://127.0.0.1:{}", self.port);

        // Wait a bit for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        Ok(base_url)
    }

    /// Stop the mock server
    pub async fn stop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for MockRegistry {
    fn drop(&mut self) {
        if let Some(handle) = &self.server_handle {
            handle.abort();
        }
    }
}

type Reply = warp::reply::WithStatus<warp::reply::WithHeader<String>>;

fn json_reply(status: StatusCode, body: String) -> Reply {
    warp::reply::with_status(
        warp::reply::with_header(body, "content-type", "application/json"),
        status,
    )
}

fn not_found() -> Reply {
    json_reply(
        StatusCode::NOT_FOUND,
        "This rubygem could not be found.".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_startup() {
        let mut server = MockRegistry::new(&["lita-a"]);
        let base_url = server.start().await.unwrap();

        assert!(base_url.starts_with("http://127.0.0.1:"));
        assert!(server.port > 0);

        server.stop().await;
    }

    #[test]
    fn test_load_fixtures() {
        let registry = MockRegistry::from_fixtures().unwrap();
        assert!(registry.data.gems.contains_key("lita-a"));
        assert!(registry.data.gems.contains_key("lita-b"));
        assert!(!registry.data.gems.contains_key("lita-console"));
        assert!(registry.data.reverse_dependencies.contains("lita-console"));
    }
}
