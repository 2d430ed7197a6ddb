use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::list::errors::ListError;
use crate::domain::list::models::Movie;
use crate::domain::list::models::MovieId;
use crate::domain::list::ports::MovieSearch;

/// Movie search backed by the Kinopoisk unofficial API.
#[derive(Clone)]
pub struct KinopoiskClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl KinopoiskClient {
    /// # Errors
    /// Fails when the HTTP client cannot be built (TLS backend unavailable).
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

impl fmt::Debug for KinopoiskClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KinopoiskClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    docs: Vec<MovieDocument>,
}

#[derive(Debug, Deserialize)]
struct MovieDocument {
    id: i64,
    name: Option<String>,
}

impl SearchResult {
    /// First document that carries a name.
    fn first_match(self) -> Option<Movie> {
        self.docs.into_iter().find_map(|doc| {
            doc.name.filter(|name| !name.is_empty()).map(|name| Movie {
                id: MovieId(doc.id),
                name,
            })
        })
    }
}

#[async_trait]
impl MovieSearch for KinopoiskClient {
    async fn search(&self, name: &str) -> Result<Option<Movie>, ListError> {
        let resp = self
            .client
            .get(format!("{}/v1.4/movie/search", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .query(&[("page", "1"), ("limit", "1"), ("query", name)])
            .send()
            .await
            .map_err(|e| ListError::Search(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            return Err(ListError::Search(format!(
                "provider answered {}",
                resp.status()
            )));
        }

        let result = resp
            .json::<SearchResult>()
            .await
            .map_err(|e| ListError::Search(format!("unexpected response: {}", e.without_url())))?;

        Ok(result.first_match())
    }
}
