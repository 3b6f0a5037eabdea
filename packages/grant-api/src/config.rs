use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use grant_pipeline::{CrawlConfig, ModelCredentials};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub app_env: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub tavily_api_key: Option<String>,
    pub crawl_timeout_secs: u64,
    pub crawl_max_pages: usize,
    pub crawl_go_deeper: bool,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            host: env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("APP_PORT must be a valid number")?,
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| grant_pipeline::ai::DEFAULT_MODEL.to_string()),
            openai_base_url: non_empty("OPENAI_BASE_URL"),
            tavily_api_key: non_empty("TAVILY_API_KEY"),
            crawl_timeout_secs: env::var("CRAWL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("CRAWL_TIMEOUT_SECS must be a valid number")?,
            crawl_max_pages: env::var("CRAWL_MAX_PAGES")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .context("CRAWL_MAX_PAGES must be a valid number")?,
            crawl_go_deeper: env::var("CRAWL_GO_DEEPER")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
        })
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::default()
            .with_timeout(Duration::from_secs(self.crawl_timeout_secs))
            .with_max_pages(Some(self.crawl_max_pages))
            .with_go_deeper(self.crawl_go_deeper)
    }

    /// Model credentials for `api_key`, with the configured model and base URL.
    pub fn credentials_for(&self, api_key: impl Into<String>) -> ModelCredentials {
        let credentials = ModelCredentials::new(api_key, self.openai_model.clone());
        match &self.openai_base_url {
            Some(base_url) => credentials.with_base_url(base_url.clone()),
            None => credentials,
        }
    }

    /// `None` when no OpenAI key is configured.
    pub fn model_credentials(&self) -> Option<ModelCredentials> {
        self.openai_api_key
            .as_ref()
            .map(|key| self.credentials_for(key.clone()))
    }

    /// Names of unset keys, for the startup warning.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai_api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        if self.tavily_api_key.is_none() {
            missing.push("TAVILY_API_KEY");
        }
        missing
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            host: "127.0.0.1".into(),
            port: 9000,
            app_env: "test".into(),
            openai_api_key: Some("sk-test".into()),
            openai_model: "gpt-4o-mini".into(),
            openai_base_url: None,
            tavily_api_key: None,
            crawl_timeout_secs: 5,
            crawl_max_pages: 20,
            crawl_go_deeper: true,
            request_timeout_secs: 300,
        }
    }

    #[test]
    fn test_crawl_config_from_settings() {
        let crawl = config().crawl_config();
        assert_eq!(crawl.timeout, Duration::from_secs(5));
        assert_eq!(crawl.max_pages, Some(20));
        assert!(crawl.go_deeper);
    }

    #[test]
    fn test_model_credentials() {
        let creds = config().model_credentials().unwrap();
        assert_eq!(creds.api_key.expose(), "sk-test");
        assert_eq!(creds.model, "gpt-4o-mini");
        assert_eq!(creds.base_url, None);

        let mut proxied = config();
        proxied.openai_base_url = Some("https://gateway.example.com/v1".into());
        let creds = proxied.credentials_for("sk-cli");
        assert_eq!(creds.api_key.expose(), "sk-cli");
        assert_eq!(creds.base_url.as_deref(), Some("https://gateway.example.com/v1"));

        let mut keyless = config();
        keyless.openai_api_key = None;
        assert!(keyless.model_credentials().is_none());
    }

    #[test]
    fn test_missing_keys() {
        assert_eq!(config().missing_keys(), vec!["TAVILY_API_KEY"]);
        assert_eq!(config().bind_addr(), "127.0.0.1:9000");
    }
}
