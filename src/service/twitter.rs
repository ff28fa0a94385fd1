//! Minimal Twitter API v2 client for posting approved tweets.
//!
//! Creating a tweet needs user context, so requests are signed with OAuth 1.0a
//! (HMAC-SHA1) using the app's consumer pair and the account's access token pair.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use sha1::Sha1;

use crate::{config::TwitterCredentials, error::AppError, model::tweet::TweetPostResult};

const CREATE_TWEET_URL: &str = "https://api.twitter.com/2/tweets";

type HmacSha1 = Hmac<Sha1>;

#[derive(Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Deserialize)]
struct CreatedTweet {
    id: String,
}

/// Posts tweets on behalf of the account owning the access token.
#[derive(Clone)]
pub struct TwitterClient {
    http_client: reqwest::Client,
    credentials: TwitterCredentials,
}

impl TwitterClient {
    pub fn new(http_client: reqwest::Client, credentials: TwitterCredentials) -> Self {
        Self {
            http_client,
            credentials,
        }
    }

    /// Posts `text` as a new tweet.
    ///
    /// # Returns
    /// - `Ok(TweetPostResult::Posted)` - Any 2xx answer, with the tweet id when the body carries one
    /// - `Ok(TweetPostResult::Rejected)` - The API answered with a non-success status
    /// - `Err(AppError::ReqwestErr)` - Transport failure before a status was received
    pub async fn post_tweet(&self, text: &str) -> Result<TweetPostResult, AppError> {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let authorization =
            authorization_header(&self.credentials, "POST", CREATE_TWEET_URL, &nonce, &timestamp);

        let response = self
            .http_client
            .post(CREATE_TWEET_URL)
            .header(AUTHORIZATION, authorization)
            .json(&CreateTweetRequest { text })
            .send()
            .await?;

        let status = response.status().as_u16();
        // The tweet exists once a 2xx arrives, so a body we can't read must not trigger a retry.
        let body = response.text().await.unwrap_or_default();

        Ok(read_post_result(status, &body))
    }
}

fn read_post_result(status: u16, body: &str) -> TweetPostResult {
    if !(200..300).contains(&status) {
        return TweetPostResult::Rejected { status };
    }

    let tweet_id = serde_json::from_str::<CreateTweetResponse>(body)
        .ok()
        .map(|created| created.data.id);

    TweetPostResult::Posted { tweet_id }
}

/// Builds the `OAuth ...` header value for a request whose body is JSON.
///
/// JSON bodies are not part of the OAuth signature, so only the protocol
/// parameters are signed.
fn authorization_header(
    credentials: &TwitterCredentials,
    method: &str,
    url: &str,
    nonce: &str,
    timestamp: &str,
) -> String {
    let mut params = vec![
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let base = signature_base(method, url, &params);
    let signature = sign(
        &base,
        &credentials.consumer_secret,
        &credentials.access_token_secret,
    );
    params.push(("oauth_signature", signature.as_str()));

    let fields = params
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {}", fields)
}

/// `METHOD&url&params` with every part percent-encoded and params sorted by key.
fn signature_base(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded = params
        .iter()
        .map(|(key, value)| (encode(key), encode(value)))
        .collect::<Vec<_>>();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&param_string)
    )
}

fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));

    // HMAC accepts keys of any length, so this never fails.
    let mut mac = match HmacSha1::new_from_slice(key.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(base.as_bytes());

    STANDARD.encode(mac.finalize().into_bytes())
}

/// RFC 3986 encoding: everything except `A-Z a-z 0-9 - . _ ~`.
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> TwitterCredentials {
        TwitterCredentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
            access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
        }
    }

    #[test]
    fn request_body_carries_only_text() {
        let body = serde_json::to_value(CreateTweetRequest { text: "hello" }).unwrap();

        assert_eq!(body, serde_json::json!({ "text": "hello" }));
    }

    #[test]
    fn success_with_tweet_id() {
        let result = read_post_result(
            201,
            r#"{"data":{"id":"1445880548472328192","text":"hello","edit_history_tweet_ids":["1445880548472328192"]}}"#,
        );

        assert_eq!(
            result,
            TweetPostResult::Posted {
                tweet_id: Some("1445880548472328192".to_string())
            }
        );
    }

    #[test]
    fn success_with_unreadable_body_still_counts_as_posted() {
        assert_eq!(
            read_post_result(201, "<html>gateway</html>"),
            TweetPostResult::Posted { tweet_id: None }
        );
        assert_eq!(
            read_post_result(200, ""),
            TweetPostResult::Posted { tweet_id: None }
        );
    }

    #[test]
    fn non_success_status_is_rejected() {
        assert_eq!(
            read_post_result(403, r#"{"title":"Forbidden"}"#),
            TweetPostResult::Rejected { status: 403 }
        );
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode("Ladies + Gentlemen!"), "Ladies%20%2B%20Gentlemen%21");
        assert_eq!(encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(encode("https://x.com/2"), "https%3A%2F%2Fx.com%2F2");
    }

    #[test]
    fn signs_documented_example_request() {
        let creds = credentials();
        let params = [
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
            ("oauth_consumer_key", creds.consumer_key.as_str()),
            ("oauth_nonce", "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            ("oauth_token", creds.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let base = signature_base(
            "post",
            "https://api.twitter.com/1.1/statuses/update.json",
            &params,
        );

        assert!(base.starts_with(
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key%3D"
        ));
        assert!(base.ends_with(
            "status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        ));
        assert_eq!(
            sign(&base, &creds.consumer_secret, &creds.access_token_secret),
            "hCtSmYh+iHYCEqBWrE7C7hYmtUk="
        );
    }

    #[test]
    fn header_lists_sorted_oauth_fields() {
        let header = authorization_header(
            &credentials(),
            "POST",
            CREATE_TWEET_URL,
            "abc123",
            "1700000000",
        );

        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", oauth_nonce=\"abc123\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_timestamp=\"1700000000\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        assert!(header.contains("oauth_signature=\""));
    }
}
