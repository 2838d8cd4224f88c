//! DynamoDB-backed session store.
//!
//! Items have the shape `{ token: S, ttl: N }` where `ttl` is the expiry as a
//! Unix timestamp, so the table's native TTL attribute can sweep them. Until
//! the sweep runs, items past their `ttl` are treated as missing.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use oneway_core::types::Timestamp;

use crate::auth::session::{Session, SessionStore, SessionStoreError};

const TOKEN_ATTR: &str = "token";
const TTL_ATTR: &str = "ttl";

pub struct DynamoSessionStore {
    client: Client,
    table: String,
}

impl DynamoSessionStore {
    /// Load AWS credentials from the environment and bind to `table` in `region`.
    pub async fn connect(table: String, region: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .load()
            .await;
        tracing::info!(%table, %region, "DynamoDB session store configured");
        Self::with_client(Client::new(&config), table)
    }

    pub fn with_client(client: Client, table: String) -> Self {
        Self { client, table }
    }
}

#[async_trait]
impl SessionStore for DynamoSessionStore {
    async fn put(&self, token: &str, expires_at: Timestamp) -> Result<(), SessionStoreError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .item(TOKEN_ATTR, AttributeValue::S(token.to_string()))
            .item(TTL_ATTR, AttributeValue::N(expires_at.timestamp().to_string()))
            .send()
            .await
            .map_err(|e| SessionStoreError::Unavailable(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, SessionStoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(TOKEN_ATTR, AttributeValue::S(token.to_string()))
            .send()
            .await
            .map_err(|e| SessionStoreError::Unavailable(DisplayErrorContext(&e).to_string()))?;

        let Some(item) = output.item() else {
            return Ok(None);
        };

        let ttl = item
            .get(TTL_ATTR)
            .and_then(|value| value.as_n().ok())
            .ok_or_else(|| SessionStoreError::Malformed(format!("missing numeric `{TTL_ATTR}`")))?;
        let expires_at = parse_ttl(ttl)?;

        if expires_at <= Utc::now() {
            return Ok(None);
        }

        Ok(Some(Session {
            token: token.to_string(),
            expires_at,
        }))
    }
}

fn parse_ttl(raw: &str) -> Result<Timestamp, SessionStoreError> {
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| SessionStoreError::Malformed(format!("invalid `{TTL_ATTR}` value {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use aws_sdk_dynamodb::operation::get_item::{GetItemError, GetItemOutput};
    use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
    use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
    use aws_smithy_mocks::{mock, mock_client};
    use chrono::Duration;

    const TABLE: &str = "sessions";
    const TOKEN: &str = "abc.def.ghi";

    fn item(ttl: Option<AttributeValue>) -> GetItemOutput {
        let builder = GetItemOutput::builder().item(TOKEN_ATTR, AttributeValue::S(TOKEN.into()));
        match ttl {
            Some(ttl) => builder.item(TTL_ATTR, ttl).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn ttl_is_unix_seconds() {
        let parsed = parse_ttl("1700000000").unwrap();
        assert_eq!(parsed.timestamp(), 1_700_000_000);
    }

    #[test]
    fn bad_ttl_is_malformed() {
        assert_matches!(parse_ttl("soon"), Err(SessionStoreError::Malformed(_)));
    }

    #[tokio::test]
    async fn put_writes_token_and_ttl() {
        let expires_at = DateTime::<Utc>::from_timestamp(1_700_000_600, 0).unwrap();
        let rule = mock!(Client::put_item)
            .match_requests(|req| {
                let Some(item) = req.item() else {
                    return false;
                };
                req.table_name() == Some(TABLE)
                    && item.get(TOKEN_ATTR) == Some(&AttributeValue::S(TOKEN.into()))
                    && item.get(TTL_ATTR) == Some(&AttributeValue::N("1700000600".into()))
            })
            .then_output(|| PutItemOutput::builder().build());
        let store = DynamoSessionStore::with_client(mock_client!(aws_sdk_dynamodb, [&rule]), TABLE.into());

        store.put(TOKEN, expires_at).await.unwrap();
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn put_failure_is_unavailable() {
        let rule = mock!(Client::put_item).then_error(|| {
            PutItemError::ResourceNotFoundException(ResourceNotFoundException::builder().build())
        });
        let store = DynamoSessionStore::with_client(mock_client!(aws_sdk_dynamodb, [&rule]), TABLE.into());

        assert_matches!(
            store.put(TOKEN, Utc::now()).await,
            Err(SessionStoreError::Unavailable(_))
        );
    }

    #[tokio::test]
    async fn live_item_is_a_session() {
        let ttl = (Utc::now() + Duration::minutes(10)).timestamp();
        let rule = mock!(Client::get_item)
            .match_requests(|req| {
                req.table_name() == Some(TABLE)
                    && req
                        .key()
                        .and_then(|key| key.get(TOKEN_ATTR))
                        == Some(&AttributeValue::S(TOKEN.into()))
            })
            .then_output(move || item(Some(AttributeValue::N(ttl.to_string()))));
        let store = DynamoSessionStore::with_client(mock_client!(aws_sdk_dynamodb, [&rule]), TABLE.into());

        let session = store.get(TOKEN).await.unwrap().unwrap();
        assert_eq!(session.token, TOKEN);
        assert_eq!(session.expires_at.timestamp(), ttl);
    }

    #[tokio::test]
    async fn missing_item_is_none() {
        let rule = mock!(Client::get_item).then_output(|| GetItemOutput::builder().build());
        let store = DynamoSessionStore::with_client(mock_client!(aws_sdk_dynamodb, [&rule]), TABLE.into());

        assert_matches!(store.get(TOKEN).await, Ok(None));
    }

    #[tokio::test]
    async fn past_ttl_is_none() {
        let ttl = (Utc::now() - Duration::minutes(1)).timestamp();
        let rule = mock!(Client::get_item)
            .then_output(move || item(Some(AttributeValue::N(ttl.to_string()))));
        let store = DynamoSessionStore::with_client(mock_client!(aws_sdk_dynamodb, [&rule]), TABLE.into());

        assert_matches!(store.get(TOKEN).await, Ok(None));
    }

    #[tokio::test]
    async fn missing_ttl_is_malformed() {
        let rule = mock!(Client::get_item).then_output(|| item(None));
        let store = DynamoSessionStore::with_client(mock_client!(aws_sdk_dynamodb, [&rule]), TABLE.into());

        assert_matches!(store.get(TOKEN).await, Err(SessionStoreError::Malformed(_)));
    }

    #[tokio::test]
    async fn non_numeric_ttl_is_malformed() {
        let rule = mock!(Client::get_item)
            .then_output(|| item(Some(AttributeValue::S("tomorrow".into()))));
        let store = DynamoSessionStore::with_client(mock_client!(aws_sdk_dynamodb, [&rule]), TABLE.into());

        assert_matches!(store.get(TOKEN).await, Err(SessionStoreError::Malformed(_)));
    }

    #[tokio::test]
    async fn get_failure_is_unavailable() {
        let rule = mock!(Client::get_item).then_error(|| {
            GetItemError::ResourceNotFoundException(ResourceNotFoundException::builder().build())
        });
        let store = DynamoSessionStore::with_client(mock_client!(aws_sdk_dynamodb, [&rule]), TABLE.into());

        assert_matches!(store.get(TOKEN).await, Err(SessionStoreError::Unavailable(_)));
    }
}
