pub mod token;

use crate::config::AppConfig;
use crate::models::{
    CommentThing, Listing, MoreChildrenResponse, PostData, SortOrder, SubredditData, Thing,
};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::fmt;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use token::{AccessToken, TokenResponse};
use url::Url;

const PUBLIC_BASE_URL: &str = "https://www.reddit.com";
const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";
const ACCESS_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const REVOKE_TOKEN_URL: &str = "https://www.reddit.com/api/v1/revoke_token";

/// Largest number of ids `/api/morechildren` accepts in one request
pub const MORE_CHILDREN_BATCH: usize = 100;

// Define a custom error type for handling Reddit API errors
#[derive(Debug)]
pub enum RedditClientError {
    RequestError(ReqwestError),
    ApiError(String),
    ParseError(serde_json::Error),
    NotFound(String),
    Unauthorized(String),
    InvalidArgument(String),
}

impl fmt::Display for RedditClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RedditClientError::RequestError(err) => write!(f, "Request error: {}", err),
            RedditClientError::ApiError(msg) => write!(f, "Reddit API error: {}", msg),
            RedditClientError::ParseError(err) => write!(f, "Parse error: {}", err),
            RedditClientError::NotFound(msg) => write!(f, "Not found: {}", msg),
            RedditClientError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            RedditClientError::InvalidArgument(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RedditClientError {}

impl From<ReqwestError> for RedditClientError {
    fn from(err: ReqwestError) -> Self {
        RedditClientError::RequestError(err)
    }
}

impl From<serde_json::Error> for RedditClientError {
    fn from(err: serde_json::Error) -> Self {
        RedditClientError::ParseError(err)
    }
}

/// Read-only Reddit operations the tools are built on.
///
/// `RedditClient` talks to the real API. Tests substitute their own
/// implementation.
#[async_trait]
pub trait RedditApi: Send + Sync {
    /// Metadata for one subreddit, from `/r/{name}/about`
    async fn fetch_subreddit(&self, name: &str) -> Result<SubredditData, RedditClientError>;

    /// Subreddits matching a search query
    async fn search_subreddits(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SubredditData>, RedditClientError>;

    /// Up to `limit` posts of a subreddit under a sort order
    async fn fetch_posts(
        &self,
        subreddit: &str,
        sort: SortOrder,
        limit: u32,
    ) -> Result<Vec<PostData>, RedditClientError>;

    /// Top-level entries of a post's comment tree, sorted by score
    async fn fetch_comment_tree(
        &self,
        post_id: &str,
        limit: u32,
    ) -> Result<Vec<CommentThing>, RedditClientError>;

    /// Expand collapsed comments of a post by id
    async fn fetch_more_comments(
        &self,
        post_id: &str,
        children: &[String],
    ) -> Result<Vec<CommentThing>, RedditClientError>;
}

#[derive(Debug, Clone)]
struct Credentials {
    client_id: String,
    client_secret: String,
}

/// Reddit API client shared by every tool call.
///
/// Requests use the app-only OAuth endpoint when credentials are configured,
/// and the public `.json` endpoints otherwise. The token is fetched on first
/// use and cached until it is about to expire. At most
/// `max_connections_per_host` reads are in flight at once.
pub struct RedditClient {
    client: Client,
    user_agent: String,
    credentials: Option<Credentials>,
    token: Mutex<Option<AccessToken>>,
    request_slots: Semaphore,
}

impl RedditClient {
    /// Create a client from a configuration object
    pub fn from_config(config: &AppConfig) -> Result<Self, RedditClientError> {
        debug!(
            "Creating RedditClient with user_agent: {}",
            config.user_agent
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.max_connections_per_host)
            .build()?;

        let credentials = match config.credentials() {
            Some((client_id, client_secret)) => Some(Credentials {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
            }),
            None => {
                info!("No Reddit credentials configured, using the public API");
                None
            }
        };

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            credentials,
            token: Mutex::new(None),
            request_slots: Semaphore::new(config.max_connections_per_host.max(1)),
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Get an application-only access token, reusing the cached one while it is valid.
    ///
    /// Returns `None` when no credentials are configured.
    async fn access_token(&self) -> Result<Option<String>, RedditClientError> {
        let credentials = match &self.credentials {
            Some(credentials) => credentials,
            None => return Ok(None),
        };

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_valid() {
                return Ok(Some(token.value.clone()));
            }
            debug!("Cached access token expired, requesting a new one");
        }

        let params = [("grant_type", "client_credentials")];
        let auth = base64::encode(format!(
            "{}:{}",
            credentials.client_id, credentials.client_secret
        ));

        let res = self
            .client
            .post(ACCESS_TOKEN_URL)
            .header("Authorization", format!("Basic {}", auth))
            .form(&params)
            .send()
            .await?;

        // Check for HTTP errors
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await?;
            return Err(RedditClientError::Unauthorized(format!(
                "Authentication failed: HTTP {}: {}",
                status, body
            )));
        }

        let json: TokenResponse = res.json().await?;

        // Check for API errors
        if let Some(error) = json.error {
            return Err(RedditClientError::Unauthorized(format!(
                "Authentication failed: {}",
                error
            )));
        }

        let value = json.access_token.ok_or_else(|| {
            RedditClientError::ApiError("Failed to extract access token from response".to_string())
        })?;
        let token = AccessToken::new(value.clone(), json.expires_in.unwrap_or(3600));
        debug!(
            "Application-only access token obtained with scopes: {:?}",
            json.scope
        );

        *cached = Some(token);
        Ok(Some(value))
    }

    /// Revoke the cached token and forget it.
    ///
    /// The HTTP pool is released when the client is dropped.
    pub async fn close(&self) -> Result<(), RedditClientError> {
        let token = self.token.lock().await.take();
        let (credentials, token) = match (&self.credentials, token) {
            (Some(credentials), Some(token)) => (credentials, token),
            _ => return Ok(()),
        };

        let auth = base64::encode(format!(
            "{}:{}",
            credentials.client_id, credentials.client_secret
        ));
        let params = [
            ("token", token.value.as_str()),
            ("token_type_hint", "access_token"),
        ];

        let res = self
            .client
            .post(REVOKE_TOKEN_URL)
            .header("Authorization", format!("Basic {}", auth))
            .form(&params)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(RedditClientError::ApiError(format!(
                "Token revocation failed: HTTP {}",
                res.status()
            )));
        }

        debug!("Access token revoked");
        Ok(())
    }

    /// GET a Reddit endpoint and decode its JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, RedditClientError> {
        let token = self.access_token().await?;
        let url = build_url(path, params, token.is_some())?;

        // Held until the body is read, so the connection is back in the pool
        let _slot = self
            .request_slots
            .acquire()
            .await
            .map_err(|_| RedditClientError::ApiError("Client is shut down".to_string()))?;
        debug!("Fetching {}", url);

        // Create request builder
        let mut req_builder = self.client.get(url);

        // Add authorization header if we have a token
        if let Some(token) = &token {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = req_builder.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);
        check_status(status, path)?;

        let body = response.text().await?;
        debug!("Response body length: {} bytes", body.len());

        serde_json::from_str::<T>(&body).map_err(|e| {
            debug!("Error parsing response from {}: {}", path, e);
            debug!("First 100 chars: {}", body.chars().take(100).collect::<String>());
            RedditClientError::ParseError(e)
        })
    }
}

/// Map a non-success HTTP status to the matching error
pub fn check_status(status: StatusCode, path: &str) -> Result<(), RedditClientError> {
    match status {
        StatusCode::NOT_FOUND => Err(RedditClientError::NotFound(format!(
            "{} returned 404",
            path
        ))),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RedditClientError::Unauthorized(
            format!("{} returned {}", path, status),
        )),
        _ if !status.is_success() => Err(RedditClientError::ApiError(format!(
            "Server returned error status: {}",
            status
        ))),
        _ => Ok(()),
    }
}

/// Subreddit data from an `/about` response.
///
/// Unknown names are redirected to a search listing instead of a 404, so
/// anything other than a `t5` thing means the subreddit does not exist.
pub fn subreddit_from_about(
    name: &str,
    thing: Thing<SubredditData>,
) -> Result<SubredditData, RedditClientError> {
    if thing.kind != "t5" {
        return Err(RedditClientError::NotFound(format!(
            "Subreddit r/{} does not exist",
            name
        )));
    }
    Ok(thing.data)
}

/// Build the request URL for a read endpoint.
///
/// OAuth requests go to `oauth.reddit.com`; anonymous ones need the `.json`
/// suffix on `www.reddit.com`. `raw_json=1` stops Reddit from HTML-escaping
/// text fields.
pub fn build_url(
    path: &str,
    params: &[(&str, String)],
    authenticated: bool,
) -> Result<Url, RedditClientError> {
    let address = if authenticated {
        format!("{}{}", OAUTH_BASE_URL, path)
    } else {
        format!("{}{}.json", PUBLIC_BASE_URL, path)
    };

    let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
    query.push(("raw_json", "1"));

    Url::parse_with_params(&address, &query)
        .map_err(|e| RedditClientError::InvalidArgument(format!("Invalid request URL: {}", e)))
}

#[async_trait]
impl RedditApi for RedditClient {
    async fn fetch_subreddit(&self, name: &str) -> Result<SubredditData, RedditClientError> {
        let path = format!("/r/{}/about", name);
        let thing: Thing<SubredditData> = self.get_json(&path, &[]).await?;
        subreddit_from_about(name, thing)
    }

    async fn search_subreddits(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SubredditData>, RedditClientError> {
        let params = [("q", query.to_string()), ("limit", limit.to_string())];
        let listing: Listing<Thing<SubredditData>> =
            self.get_json("/subreddits/search", &params).await?;

        debug!(
            "Search for '{}' returned {} subreddits",
            query,
            listing.data.children.len()
        );
        Ok(listing.into_data())
    }

    async fn fetch_posts(
        &self,
        subreddit: &str,
        sort: SortOrder,
        limit: u32,
    ) -> Result<Vec<PostData>, RedditClientError> {
        let path = format!("/r/{}/{}", subreddit, sort.as_str());
        let mut params = vec![("limit", limit.to_string())];
        if let Some(window) = sort.time_filter() {
            params.push(("t", window.to_string()));
        }

        let listing: Listing<Thing<PostData>> = self.get_json(&path, &params).await?;
        debug!(
            "Fetched {} {} posts from r/{}",
            listing.data.children.len(),
            sort,
            subreddit
        );
        Ok(listing.into_data())
    }

    async fn fetch_comment_tree(
        &self,
        post_id: &str,
        limit: u32,
    ) -> Result<Vec<CommentThing>, RedditClientError> {
        let path = format!("/comments/{}", post_id);
        let params = [
            ("sort", "top".to_string()),
            ("limit", limit.to_string()),
            ("depth", "1".to_string()),
        ];

        // The response is a pair of listings: the post itself, then its comments
        let (_post, comments): (Listing<IgnoredAny>, Listing<CommentThing>) =
            self.get_json(&path, &params).await?;

        Ok(comments.data.children)
    }

    async fn fetch_more_comments(
        &self,
        post_id: &str,
        children: &[String],
    ) -> Result<Vec<CommentThing>, RedditClientError> {
        let params = [
            ("api_type", "json".to_string()),
            ("link_id", format!("t3_{}", post_id)),
            ("children", children.join(",")),
            ("sort", "top".to_string()),
        ];

        let response: MoreChildrenResponse = self.get_json("/api/morechildren", &params).await?;
        if !response.json.errors.is_empty() {
            return Err(RedditClientError::ApiError(format!(
                "morechildren failed: {:?}",
                response.json.errors
            )));
        }

        Ok(response
            .json
            .data
            .map(|data| data.things)
            .unwrap_or_default())
    }
}
