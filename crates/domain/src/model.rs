//! Pitchside API payload models
//!
//! Wire types exchanged with the backend. Field names follow the
//! backend's camelCase JSON convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend user id.
    pub id: i64,
    /// Display nickname.
    pub nickname: String,
    /// University the user belongs to.
    pub university: String,
    /// Preferred playing position, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Free-form self introduction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
}

/// A university soccer team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Backend team id.
    pub id: i64,
    /// Team name.
    pub name: String,
    /// University the team belongs to.
    pub university: String,
    /// Team description.
    #[serde(default)]
    pub description: String,
    /// Current member count.
    pub member_count: u32,
    /// When the team was created.
    pub created_at: DateTime<Utc>,
}

/// A feed post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Backend post id.
    pub id: i64,
    /// Author nickname.
    pub author: String,
    /// Post content.
    pub content: String,
    /// When the post was published.
    pub created_at: DateTime<Utc>,
}

/// A gift received by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    /// Backend gift id.
    pub id: i64,
    /// Nickname of the sender.
    pub sender: String,
    /// Message attached to the gift.
    #[serde(default)]
    pub message: String,
    /// When the gift was sent.
    pub sent_at: DateTime<Utc>,
}

/// Token pair issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    /// Access token attached to authorized requests.
    pub access_token: String,
    /// Refresh token used to obtain a new access token.
    pub refresh_token: String,
}

/// Session record persisted under the `userInfo` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Access token for the session; empty means signed out.
    #[serde(default)]
    pub token: String,
    /// Nickname cached for display.
    #[serde(default)]
    pub nickname: String,
}

impl UserSession {
    /// Returns the token if the session holds one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }
}

/// Login request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Team creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeam {
    /// Team name.
    pub name: String,
    /// Team description.
    #[serde(default)]
    pub description: String,
}

/// Profile update payload; unset fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    /// New nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// New playing position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// New introduction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
}

/// Gift sending payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendGift {
    /// Recipient user id.
    pub recipient_id: i64,
    /// Message attached to the gift.
    #[serde(default)]
    pub message: String,
}
