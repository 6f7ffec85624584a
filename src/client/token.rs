use serde::Deserialize;

/// Seconds before expiry at which a token is treated as stale
const EXPIRY_BUFFER_SECS: i64 = 300;

/// App-only OAuth token held in memory for the lifetime of the client
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: i64,
}

impl AccessToken {
    pub fn new(value: String, expires_in: i64) -> Self {
        Self {
            value,
            expires_at: chrono::Utc::now().timestamp() + expires_in,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(chrono::Utc::now().timestamp())
    }

    /// Add a 5-minute buffer to avoid using a token that expires mid-request
    pub fn is_valid_at(&self, now: i64) -> bool {
        now + EXPIRY_BUFFER_SECS < self.expires_at
    }
}

/// Body of `/api/v1/access_token`
#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_valid_until_five_minutes_before_expiry() {
        let token = AccessToken {
            value: "abc".to_string(),
            expires_at: 10_000,
        };
        assert!(token.is_valid_at(10_000 - 301));
        assert!(!token.is_valid_at(10_000 - 300));
        assert!(!token.is_valid_at(10_001));
    }

    #[test]
    fn fresh_token_is_valid() {
        assert!(AccessToken::new("abc".to_string(), 3600).is_valid());
        assert!(!AccessToken::new("abc".to_string(), 60).is_valid());
    }

    #[test]
    fn token_response_reports_errors() {
        let parsed: TokenResponse = serde_json::from_str(r#"{"error": "invalid_grant"}"#).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("invalid_grant"));
        assert!(parsed.access_token.is_none());
    }
}
