use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// A persisted song row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Song {
    pub id: i64,
    pub song: String,
    #[serde(rename = "nameGroup")]
    #[sqlx(rename = "nameGroup")]
    pub group: String,
    pub text: String,
    pub release_date: Option<NaiveDate>,
    pub link: String,
}

/// Every mutable column of a song. Used for inserts and full-row updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongFields {
    pub song: String,
    pub group: String,
    pub text: String,
    pub release_date: Option<NaiveDate>,
    pub link: String,
}

impl SongFields {
    pub fn into_song(self, id: i64) -> Song {
        Song {
            id,
            song: self.song,
            group: self.group,
            text: self.text,
            release_date: self.release_date,
            link: self.link,
        }
    }
}

/// Optional exact-match filters for listing songs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongFilter {
    pub group: Option<String>,
    pub song: Option<String>,
}

impl SongFilter {
    pub fn matches(&self, song: &Song) -> bool {
        self.group.as_deref().map_or(true, |g| g == song.group)
            && self.song.as_deref().map_or(true, |s| s == song.song)
    }
}

// Request / response DTOs

/// Treats an explicit JSON `null` like an absent string field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveSongRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub song: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub group: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text_song: String,
    #[serde(default)]
    pub date_song: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link_song: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSongRequest {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub song: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub group: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text_song: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date_song: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link_song: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListSongsQuery {
    pub group: Option<String>,
    pub song: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSong {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedSong {
    pub song: String,
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (time of day is dropped).
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
