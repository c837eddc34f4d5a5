use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub commit: CommitDetails,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetails {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    /// Author date, the authoritative timestamp for bucketing. The committer
    /// date can differ after rebases.
    pub date: DateTime<Utc>,
}

impl CommitSummary {
    pub fn authored_at(&self) -> DateTime<Utc> {
        self.commit.author.date
    }
}
