//! Read-only projections returned to callers
//!
//! Distinct from the stored entities; the `Display` impls produce the exact
//! console blocks the command handlers print.

use jukebox_library::models::{Playlist, Song, User};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity summary of a newly created user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone().unwrap_or_default(),
            name: user.name.clone(),
        }
    }
}

impl fmt::Display for UserSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}

/// Snapshot of a playlist's identity and membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub song_ids: Vec<String>,
}

impl From<&Playlist> for PlaylistSummary {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.clone().unwrap_or_default(),
            name: playlist.name.clone(),
            song_ids: playlist.song_ids.clone(),
        }
    }
}

impl fmt::Display for PlaylistSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Playlist ID - {}", self.id)?;
        writeln!(f, "Playlist Name - {}", self.name)?;
        write!(f, "Song IDs - {}", self.song_ids.join(" "))
    }
}

/// Display projection of the song a user is currently playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub song_name: String,
    pub album: String,
    pub artists: Vec<String>,
}

impl From<&Song> for NowPlaying {
    fn from(song: &Song) -> Self {
        Self {
            song_name: song.name.clone(),
            album: song.album.clone(),
            artists: song.featured_artists.clone(),
        }
    }
}

impl fmt::Display for NowPlaying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Song Playing")?;
        writeln!(f, "Song - {}", self.song_name)?;
        writeln!(f, "Album - {}", self.album)?;
        write!(f, "Artists - {}", self.artists.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_summary_renders_space_joined_song_ids() {
        let summary = PlaylistSummary {
            id: "1".to_string(),
            name: "Mix".to_string(),
            song_ids: vec!["1".to_string(), "4".to_string(), "5".to_string()],
        };
        assert_eq!(
            summary.to_string(),
            "Playlist ID - 1\nPlaylist Name - Mix\nSong IDs - 1 4 5"
        );
    }

    #[test]
    fn projections_serialize_for_structured_consumers() {
        let summary = UserSummary {
            id: "1".to_string(),
            name: "Alice".to_string(),
        };
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json, serde_json::json!({"id": "1", "name": "Alice"}));
    }

    #[test]
    fn now_playing_renders_comma_joined_artists() {
        let projection = NowPlaying {
            song_name: "South of the Border".to_string(),
            album: "No.6 Collaborations Project".to_string(),
            artists: vec!["Camilla Cabello".to_string(), "Cardi.B".to_string()],
        };
        assert_eq!(
            projection.to_string(),
            "Current Song Playing\n\
             Song - South of the Border\n\
             Album - No.6 Collaborations Project\n\
             Artists - Camilla Cabello,Cardi.B"
        );
    }
}
