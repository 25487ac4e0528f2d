//! Entries embedded in a session: submissions, votes and playlists.
//!
//! None of these carry a back-reference to their session; they belong to
//! it by containment only.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlaylistId, SubmissionId, UserId, VoteId};

/// A track nominated into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub user_id: UserId,
    pub track_id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

impl Submission {
    /// Assigns an identifier to a draft.
    pub fn from_draft(id: SubmissionId, draft: NewSubmission) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            track_id: draft.track_id,
            title: draft.title,
            artist: draft.artist,
            album: draft.album,
        }
    }

    /// Everything except the identifier, for comparisons that ignore it.
    pub fn to_draft(&self) -> NewSubmission {
        NewSubmission {
            user_id: self.user_id,
            track_id: self.track_id.clone(),
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
        }
    }
}

/// A submission before the service has given it an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub user_id: UserId,
    pub track_id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
}

impl NewSubmission {
    /// Minimal draft with only a title and the nominating user.
    pub fn titled(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            user_id,
            track_id: String::new(),
            title: title.into(),
            artist: String::new(),
            album: None,
        }
    }
}

/// A vote cast on a submission.
///
/// Unlike submissions the identifier is chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub submission_id: SubmissionId,
    pub user_id: UserId,
}

/// A user's materialized playlist in the external music service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_draft_keeps_every_field() {
        let draft = NewSubmission {
            user_id: UserId::new(3),
            track_id: "trk-1".to_string(),
            title: "Song".to_string(),
            artist: "Band".to_string(),
            album: Some("Record".to_string()),
        };
        let submission = Submission::from_draft(SubmissionId::generate(), draft.clone());
        assert_eq!(submission.to_draft(), draft);
    }

    #[test]
    fn submission_without_album_omits_field() {
        let submission = Submission::from_draft(
            SubmissionId::new("s1").unwrap(),
            NewSubmission::titled(UserId::new(1), "X"),
        );
        let json = serde_json::to_value(&submission).unwrap();
        assert!(json.get("album").is_none());
        assert_eq!(json["id"], "s1");
    }
}
