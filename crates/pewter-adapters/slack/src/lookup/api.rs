//! [`Lookup`] over the Slack Web API.
//!
//! [`ApiLookup`] maps lookups onto Web API methods and decodes their
//! responses. How the request reaches Slack is delegated to an
//! [`ApiCaller`], so the lookup stays unaware of the transport in use.
//!
//! | Lookup | Method | Params |
//! |--------|--------|--------|
//! | `fetch_user` | `users.info` | `{"user": id}` |
//! | `fetch_conversation` | `conversations.info` | `{"channel": id}` |

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, trace};

use pewter_core::{LookupError, LookupResult};

use super::Lookup;
use crate::model::types::{Conversation, User};

/// Error code Slack returns for an unknown conversation.
const CHANNEL_NOT_FOUND: &str = "channel_not_found";

/// Transport-specific Web API call mechanism.
#[async_trait]
pub trait ApiCaller: Send + Sync {
    /// Calls a Web API method and returns the raw response body.
    ///
    /// # Errors
    /// Returns a [`LookupError`] if the request could not be completed.
    /// A response with `"ok": false` is **not** an error at this level.
    async fn call(&self, method: &str, params: Value) -> LookupResult<Value>;
}

/// [`Lookup`] backed by the Slack Web API.
pub struct ApiLookup<C> {
    caller: C,
}

impl<C: ApiCaller> ApiLookup<C> {
    /// Creates a lookup that issues calls through `caller`.
    pub fn new(caller: C) -> Self {
        Self { caller }
    }

    /// Calls `method` and fails unless the response is `ok`.
    async fn call_checked(&self, method: &str, params: Value) -> LookupResult<Value> {
        debug!(method = %method, "Calling Slack Web API");
        let response = self.caller.call(method, params).await?;
        trace!(response = %response, "Web API response");

        if response.get("ok").and_then(Value::as_bool) == Some(true) {
            Ok(response)
        } else {
            let error = response
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown_error");
            Err(LookupError::api(error))
        }
    }
}

#[async_trait]
impl<C: ApiCaller> Lookup for ApiLookup<C> {
    async fn fetch_user(&self, id: &str) -> LookupResult<User> {
        let mut response = self.call_checked("users.info", json!({ "user": id })).await?;
        let user = response
            .get_mut("user")
            .map(Value::take)
            .ok_or_else(|| LookupError::Serialization("missing `user` field".into()))?;
        Ok(serde_json::from_value(user)?)
    }

    async fn fetch_conversation(&self, id: &str) -> LookupResult<Option<Conversation>> {
        let mut response = match self
            .call_checked("conversations.info", json!({ "channel": id }))
            .await
        {
            Ok(response) => response,
            Err(LookupError::Api { error }) if error == CHANNEL_NOT_FOUND => return Ok(None),
            Err(e) => return Err(e),
        };
        let channel = response
            .get_mut("channel")
            .map(Value::take)
            .ok_or_else(|| LookupError::Serialization("missing `channel` field".into()))?;
        Ok(Some(serde_json::from_value(channel)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays canned responses and records the calls it received.
    struct CannedCaller {
        response: LookupResult<Value>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl CannedCaller {
        fn new(response: LookupResult<Value>) -> Self {
            Self {
                response,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ApiCaller for CannedCaller {
        async fn call(&self, method: &str, params: Value) -> LookupResult<Value> {
            self.calls.lock().unwrap().push((method.to_string(), params));
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_fetch_user() {
        let lookup = ApiLookup::new(CannedCaller::new(Ok(json!({
            "ok": true,
            "user": { "id": "U1", "name": "bob", "real_name": "Bob B", "tz": "Europe/Berlin" }
        }))));

        let user = lookup.fetch_user("U1").await.unwrap();
        assert_eq!(user.name, "bob");
        assert_eq!(user.real_name.as_deref(), Some("Bob B"));

        let calls = lookup.caller.calls.lock().unwrap();
        assert_eq!(calls[0].0, "users.info");
        assert_eq!(calls[0].1, json!({ "user": "U1" }));
    }

    #[tokio::test]
    async fn test_fetch_user_api_error() {
        let lookup = ApiLookup::new(CannedCaller::new(Ok(json!({
            "ok": false,
            "error": "user_not_found"
        }))));

        let err = lookup.fetch_user("U404").await.unwrap_err();
        assert!(matches!(err, LookupError::Api { ref error } if error == "user_not_found"));
    }

    #[tokio::test]
    async fn test_fetch_conversation_not_found_is_none() {
        let lookup = ApiLookup::new(CannedCaller::new(Ok(json!({
            "ok": false,
            "error": "channel_not_found"
        }))));

        assert_eq!(lookup.fetch_conversation("C404").await.unwrap(), None);
        // An unknown conversation cannot be classified.
        assert!(lookup.is_direct_message("C404").await.is_err());
    }

    #[tokio::test]
    async fn test_is_direct_message() {
        let lookup = ApiLookup::new(CannedCaller::new(Ok(json!({
            "ok": true,
            "channel": { "id": "D1", "is_im": true, "user": "U1" }
        }))));

        assert!(lookup.is_direct_message("D1").await.unwrap());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let lookup = ApiLookup::new(CannedCaller::new(Err(LookupError::NotConnected)));
        assert!(matches!(
            lookup.fetch_conversation("C1").await,
            Err(LookupError::NotConnected)
        ));
    }
}
