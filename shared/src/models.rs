use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voter {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub history: Vec<PollRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PollRecord {
    pub poll_id: u64,
    pub vote_id: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub vote_date: OffsetDateTime,
}

/// Body of a voter creation request. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVoterRequest {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub history: Vec<PollRecord>,
}

/// Partial voter update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoterPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<PollRecord>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PollPatch {
    #[serde(default)]
    pub poll_id: Option<u64>,
    #[serde(default)]
    pub vote_id: Option<u64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub vote_date: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime: u64,
    pub users_processed: u64,
    pub errors_encountered: u64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Body id {body} does not match path id {path}")]
pub struct IdMismatch {
    pub path: u64,
    pub body: u64,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CreateVoterRequest {
    pub fn into_voter(self, path_id: u64) -> Result<Voter, IdMismatch> {
        match self.id {
            Some(body) if body != path_id => Err(IdMismatch { path: path_id, body }),
            _ => Ok(Voter {
                id: path_id,
                name: self.name,
                email: self.email,
                history: self.history,
            }),
        }
    }
}

impl Voter {
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            history: Vec::new(),
        }
    }

    pub fn apply(&mut self, patch: VoterPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(history) = patch.history {
            self.history = history;
        }
    }

    /// Records a vote cast now in `poll_id`, using the voter's own id as the vote id.
    pub fn record_poll(&mut self, poll_id: u64) -> &PollRecord {
        self.history.push(PollRecord {
            poll_id,
            vote_id: self.id,
            vote_date: OffsetDateTime::now_utc(),
        });
        &self.history[self.history.len() - 1]
    }

    // First match wins; histories may repeat a poll id.
    pub fn poll(&self, poll_id: u64) -> Option<&PollRecord> {
        self.history.iter().find(|p| p.poll_id == poll_id)
    }

    pub fn poll_mut(&mut self, poll_id: u64) -> Option<&mut PollRecord> {
        self.history.iter_mut().find(|p| p.poll_id == poll_id)
    }

    pub fn total_polls(&self) -> usize {
        self.history.len()
    }
}

impl PollRecord {
    pub fn apply(&mut self, patch: PollPatch) {
        if let Some(poll_id) = patch.poll_id {
            self.poll_id = poll_id;
        }
        if let Some(vote_id) = patch.vote_id {
            self.vote_id = vote_id;
        }
        if let Some(vote_date) = patch.vote_date {
            self.vote_date = vote_date;
        }
    }
}
