//! Prompt-configuration service.
//!
//! Prompts used by the summarization/translation agents are identified by
//! numeric id and served from an external API, so they can change without a
//! redeploy. This client caches fetched prompts with a TTL and falls back
//! to a local file per prompt when the API is unreachable; only both
//! sources failing is an error. The extraction engine itself never touches
//! this crate.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use bhulekh_core::{BhulekhError, Result};
use serde::Deserialize;

/// Where a cached prompt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptSource {
    Api,
    File,
}

#[derive(Debug, Clone)]
struct CachedPrompt {
    prompt: String,
    fetched_at: Instant,
    source: PromptSource,
}

/// Cache statistics for one prompt entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCacheEntry {
    pub id: u32,
    pub source: PromptSource,
    pub age: Duration,
    pub valid: bool,
}

/// Wire shape of the prompt API response.
#[derive(Debug, Deserialize)]
struct PromptResponse {
    prompt: String,
}

/// Prompt client with TTL caching and local-file fallback.
pub struct PromptService {
    api_base_url: String,
    cache_ttl: Duration,
    fallback_dir: PathBuf,
    client: reqwest::blocking::Client,
    cache: Mutex<HashMap<u32, CachedPrompt>>,
}

impl PromptService {
    /// Default time-to-live for cached prompts.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    /// Build a service against `api_base_url` (trailing slash tolerated).
    pub fn new(
        api_base_url: &str,
        cache_ttl: Duration,
        fallback_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| BhulekhError::Http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            cache_ttl,
            fallback_dir: fallback_dir.into(),
            client,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Fetch a prompt by id: cache first, then the API, then the local
    /// fallback file. Errors only when every source fails.
    pub fn get_prompt(
        &self,
        prompt_id: u32,
        fallback_filename: Option<&str>,
        force_refresh: bool,
    ) -> Result<String> {
        if !force_refresh {
            if let Some(cached) = self.cached_if_valid(prompt_id) {
                log::debug!(
                    "Using cached prompt (id={prompt_id}, source={:?})",
                    cached.source
                );
                return Ok(cached.prompt);
            }
        }

        match self.fetch_from_api(prompt_id) {
            Ok(prompt) => {
                log::info!("Fetched prompt from API (id={prompt_id})");
                self.insert(prompt_id, prompt.clone(), PromptSource::Api);
                Ok(prompt)
            }
            Err(api_error) => {
                log::warn!("Failed to fetch prompt from API (id={prompt_id}): {api_error}");
                let Some(filename) = fallback_filename else {
                    return Err(BhulekhError::Prompt(format!(
                        "API fetch failed and no fallback file specified (id={prompt_id}): {api_error}"
                    )));
                };
                match self.load_from_file(filename) {
                    Ok(prompt) => {
                        log::info!("Using local fallback prompt: {filename}");
                        self.insert(prompt_id, prompt.clone(), PromptSource::File);
                        Ok(prompt)
                    }
                    Err(file_error) => Err(BhulekhError::Prompt(format!(
                        "API and fallback both failed (id={prompt_id}): \
                         API error: {api_error}, file error: {file_error}"
                    ))),
                }
            }
        }
    }

    /// Drop one cached prompt, or all of them.
    pub fn clear_cache(&self, prompt_id: Option<u32>) {
        let mut cache = self.cache.lock().expect("prompt cache mutex poisoned");
        match prompt_id {
            Some(id) => {
                cache.remove(&id);
            }
            None => cache.clear(),
        }
    }

    /// Per-entry cache statistics, in ascending id order.
    pub fn cache_stats(&self) -> Vec<PromptCacheEntry> {
        let cache = self.cache.lock().expect("prompt cache mutex poisoned");
        let mut entries: Vec<PromptCacheEntry> = cache
            .iter()
            .map(|(id, cached)| {
                let age = cached.fetched_at.elapsed();
                PromptCacheEntry {
                    id: *id,
                    source: cached.source,
                    age,
                    valid: age < self.cache_ttl,
                }
            })
            .collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    fn cached_if_valid(&self, prompt_id: u32) -> Option<CachedPrompt> {
        let cache = self.cache.lock().expect("prompt cache mutex poisoned");
        cache
            .get(&prompt_id)
            .filter(|cached| cached.fetched_at.elapsed() < self.cache_ttl)
            .cloned()
    }

    fn insert(&self, prompt_id: u32, prompt: String, source: PromptSource) {
        let mut cache = self.cache.lock().expect("prompt cache mutex poisoned");
        cache.insert(
            prompt_id,
            CachedPrompt {
                prompt,
                fetched_at: Instant::now(),
                source,
            },
        );
    }

    fn fetch_from_api(&self, prompt_id: u32) -> Result<String> {
        let url = format!("{}/api/cmn/get_prompt", self.api_base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("id", prompt_id)])
            .send()
            .map_err(|e| BhulekhError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| BhulekhError::Http(e.to_string()))?;
        let body: PromptResponse = response
            .json()
            .map_err(|e| BhulekhError::Http(format!("Bad prompt API response: {e}")))?;
        Ok(body.prompt)
    }

    fn load_from_file(&self, filename: &str) -> Result<String> {
        let path = self.fallback_dir.join(filename);
        let text = std::fs::read_to_string(&path)?;
        Ok(text.trim().to_string())
    }
}
