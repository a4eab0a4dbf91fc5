//! Redis-backed voter storage.
//!
//! Each voter lives under its own key (`voter:{id}`) as a JSON string. Adds and
//! updates are single `SET NX` / `SET XX` commands, so the existence check and
//! the write cannot interleave with another client.

use redis::{aio::ConnectionManager, AsyncCommands, Client};
use shared::models::Voter;
use tracing::{debug, info};
use crate::store::{StoreError, VoterStore};

pub const DEFAULT_REDIS_URL: &str = "redis://0.0.0.0:6379";
pub const KEY_PREFIX: &str = "voter:";

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Codec(e.to_string())
    }
}

pub fn voter_key(id: u64) -> String {
    format!("{KEY_PREFIX}{id}")
}

fn key_pattern() -> String {
    format!("{KEY_PREFIX}*")
}

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url)?;
        let mut connection = client.get_connection_manager().await?;

        let pong: String = redis::cmd("PING").query_async(&mut connection).await?;
        info!("Connected to redis at {} ({})", url, pong);

        Ok(Self { connection })
    }

    async fn write(&self, voter: &Voter, condition: &str) -> Result<bool, StoreError> {
        let payload = serde_json::to_string(voter)?;
        let mut conn = self.connection.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(voter_key(voter.id))
            .arg(payload)
            .arg(condition)
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connection.clone();
        let keys: Vec<String> = conn.keys(key_pattern()).await?;
        Ok(keys)
    }
}

#[rocket::async_trait]
impl VoterStore for RedisStore {
    async fn add(&self, voter: Voter) -> Result<(), StoreError> {
        if self.write(&voter, "NX").await? {
            Ok(())
        } else {
            Err(StoreError::AlreadyExists(voter.id))
        }
    }

    async fn get(&self, id: u64) -> Result<Voter, StoreError> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(voter_key(id)).await?;
        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn update(&self, voter: Voter) -> Result<(), StoreError> {
        if self.write(&voter, "XX").await? {
            Ok(())
        } else {
            Err(StoreError::NotFound(voter.id))
        }
    }

    async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let removed: u64 = conn.del(voter_key(id)).await?;
        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Voter>, StoreError> {
        let keys = self.keys().await?;
        let mut conn = self.connection.clone();
        let mut voters = Vec::with_capacity(keys.len());
        for key in keys {
            let raw: Option<String> = conn.get(&key).await?;
            match raw {
                Some(json) => voters.push(serde_json::from_str::<Voter>(&json)?),
                // removed between KEYS and GET
                None => debug!("Key {} vanished while listing", key),
            }
        }
        voters.sort_by_key(|v| v.id);
        Ok(voters)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let keys = self.keys().await?;
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection.clone();
        let removed: u64 = conn.del(&keys).await?;
        debug!("Cleared {} voter keys", removed);
        Ok(())
    }
}
