use crate::config::AppConfig;
use crate::models::{Account, MultiReddit, Submission, Subreddit};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub mod error;
pub mod response;
pub mod transport;

pub use error::{ApiError, RedditClientError, Result};
pub use response::RestResponse;
pub use transport::HttpTransport;

pub const DEFAULT_USER_AGENT: &str = "redrust/1.0 (by /u/Aggravating-Fix-3871)";
pub const PUBLIC_API_BASE: &str = "https://www.reddit.com";
pub const OAUTH_API_BASE: &str = "https://oauth.reddit.com";

#[derive(Clone)]
pub struct RedditClient {
    pub client: Client,
    pub access_token: Option<String>,
    pub user_agent: String,
    api_base: String,
}

impl RedditClient {
    pub fn new() -> Result<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT.to_string())
    }

    pub fn with_user_agent(user_agent: String) -> Result<Self> {
        Ok(Self {
            client: Self::get_client(&user_agent, None)?,
            access_token: None,
            user_agent,
            api_base: PUBLIC_API_BASE.to_string(),
        })
    }

    /// Create a client from a configuration object
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        debug!(
            "Creating RedditClient with user_agent: {}",
            config.user_agent
        );

        Ok(Self {
            client: Self::get_client(&config.user_agent, Some(config.timeout))?,
            access_token: config.access_token.clone(),
            user_agent: config.user_agent.clone(),
            api_base: config.api_base(),
        })
    }

    /// Use an already-issued bearer token, switching to the OAuth host.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        if self.api_base == PUBLIC_API_BASE {
            self.api_base = OAUTH_API_BASE.to_string();
        }
        self
    }

    /// Point the client at another API root, e.g. a local test server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn get_client(user_agent: &str, timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Build the full request URL for an API path.
    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let path = if path.ends_with(".json") {
            path.to_string()
        } else {
            format!("{}.json", path)
        };
        let raw = format!("{}{}", self.api_base.trim_end_matches('/'), path);

        let mut url = Url::parse(&raw)
            .map_err(|e| RedditClientError::Config(format!("Invalid request URL {}: {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    /// Fetch a submission together with its top-level comments.
    pub async fn get_submission(&self, id: &str) -> Result<Submission> {
        let id = id.trim_start_matches("t3_");
        let response = self
            .get(&format!("/comments/{}", id), &[])
            .await?
            .error_for_api()?;
        response.as_thing()
    }

    pub async fn get_subreddit(&self, name: &str) -> Result<Subreddit> {
        let name = name.trim_start_matches("r/");
        let response = self
            .get(&format!("/r/{}/about", name), &[])
            .await?
            .error_for_api()?;
        response.as_thing()
    }

    pub async fn get_user(&self, username: &str) -> Result<Account> {
        let username = username.trim_start_matches("u/");
        let response = self
            .get(&format!("/user/{}/about", username), &[])
            .await?
            .error_for_api()?;
        response.as_thing()
    }

    /// Look up a multireddit by its path, e.g. `/user/reddit/m/fun`.
    pub async fn get_multireddit(&self, path: &str) -> Result<MultiReddit> {
        let response = self
            .get(&format!("/api/multi{}", path.trim_end_matches('/')), &[])
            .await?
            .error_for_api()?;
        response.as_thing()
    }
}

#[async_trait]
impl HttpTransport for RedditClient {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<RestResponse> {
        let url = self.url_for(path, query)?;
        debug!("Fetching URL: {}", url);
        debug!("Using User-Agent: {}", self.user_agent);

        let mut req_builder = self.client.get(url);

        // Add authorization header if we have a token
        if let Some(token) = &self.access_token {
            debug!("Adding Authorization header with token");
            req_builder = req_builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = req_builder.send().await?;
        RestResponse::from_reqwest(response)
            .await?
            .error_for_status()
    }
}
