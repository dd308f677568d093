//! Cross-service flows: playlist mutation and deletion interacting with
//! the per-user playback state.

use jukebox_library::models::{Entity, Playlist, Song};
use jukebox_library::repositories::{
    InMemoryPlaylistRepository, InMemorySongRepository, InMemoryUserRepository, SongRepository,
    UserRepository,
};
use jukebox_service::{
    PlaybackControl, PlaylistService, ServiceError, SongSelection, UserService,
};
use std::sync::Arc;

struct World {
    users: Arc<InMemoryUserRepository>,
    songs: Arc<InMemorySongRepository>,
    playlist_service: PlaylistService,
    user_service: UserService,
}

fn world() -> World {
    let users = Arc::new(InMemoryUserRepository::new());
    let playlists = Arc::new(InMemoryPlaylistRepository::new());
    let songs = Arc::new(InMemorySongRepository::new());

    let playlist_service =
        PlaylistService::new(playlists, users.clone(), songs.clone());
    let user_service = UserService::new(users.clone(), songs.clone());

    World {
        users,
        songs,
        playlist_service,
        user_service,
    }
}

fn seed_songs(world: &World, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| {
            world
                .songs
                .save(Song::new(
                    name.to_string(),
                    "Pop".to_string(),
                    "Album".to_string(),
                    "Artist".to_string(),
                    vec![name.to_string()],
                ))
                .id
        })
        .collect()
}

#[test]
fn deleting_the_active_playlist_clears_playback_state() {
    let world = world();
    let song_ids = seed_songs(&world, &["A", "B"]);
    let user = world.user_service.create_user("Alice").expect("user");
    let playlist = world
        .playlist_service
        .create_playlist(&user.id, "Mix", &song_ids)
        .expect("playlist");

    world
        .user_service
        .play_playlist(&user.id, &playlist.id)
        .expect("play");

    world
        .playlist_service
        .delete_playlist(&user.id, &playlist.id)
        .expect("delete");

    let stored = world.users.find_by_id(&user.id).expect("user");
    assert!(stored.active_playlist.is_none());
    assert!(stored.active_song.is_none());

    // Navigation now has no starting point.
    let err = world
        .user_service
        .play_song(&user.id, SongSelection::Control(PlaybackControl::Next))
        .expect_err("cleared state");
    assert!(matches!(err, ServiceError::NoActivePlaylist { .. }));
}

#[test]
fn deleting_an_inactive_playlist_keeps_playback_state() {
    let world = world();
    let song_ids = seed_songs(&world, &["A", "B"]);
    let user = world.user_service.create_user("Alice").expect("user");
    let active = world
        .playlist_service
        .create_playlist(&user.id, "Mix", &song_ids)
        .expect("active playlist");
    let other = world
        .playlist_service
        .create_playlist(&user.id, "Other", &song_ids[..1])
        .expect("other playlist");

    world
        .user_service
        .play_playlist(&user.id, &active.id)
        .expect("play");
    world
        .playlist_service
        .delete_playlist(&user.id, &other.id)
        .expect("delete other");

    let stored = world.users.find_by_id(&user.id).expect("user");
    assert_eq!(
        stored.active_playlist.and_then(|p| p.id),
        Some(active.id.clone())
    );
    assert!(stored.active_song.is_some());
}

#[test]
fn membership_changes_are_visible_to_navigation() {
    let world = world();
    let song_ids = seed_songs(&world, &["A", "B", "C"]);
    let user = world.user_service.create_user("Alice").expect("user");
    let playlist = world
        .playlist_service
        .create_playlist(&user.id, "Mix", &song_ids[..2])
        .expect("playlist");

    world
        .user_service
        .play_playlist(&user.id, &playlist.id)
        .expect("play");

    // Grow the active playlist, then navigate into the new tail.
    world
        .playlist_service
        .add_songs(&user.id, &playlist.id, &song_ids[2..])
        .expect("add");

    let playing = world
        .user_service
        .play_song(&user.id, SongSelection::Control(PlaybackControl::Previous))
        .expect("previous wraps into the appended song");
    assert_eq!(playing.song_name, "C");
}

#[test]
fn removing_the_active_song_from_the_active_playlist_drops_the_pointer() {
    let world = world();
    let song_ids = seed_songs(&world, &["A", "B"]);
    let user = world.user_service.create_user("Alice").expect("user");
    let playlist = world
        .playlist_service
        .create_playlist(&user.id, "Mix", &song_ids)
        .expect("playlist");

    world
        .user_service
        .play_playlist(&user.id, &playlist.id)
        .expect("play");

    world
        .playlist_service
        .remove_songs(&user.id, &playlist.id, &song_ids[..1])
        .expect("remove active song");

    let stored = world.users.find_by_id(&user.id).expect("user");
    assert!(stored.active_song.is_none());
    assert!(stored.active_playlist.is_some());

    let err = world
        .user_service
        .play_song(&user.id, SongSelection::Control(PlaybackControl::Next))
        .expect_err("no starting point");
    assert!(matches!(err, ServiceError::NoActiveSong { .. }));
}

#[test]
fn catalog_inconsistency_surfaces_song_not_found() {
    let world = world();
    let user = world.user_service.create_user("Alice").expect("user");

    // A playlist referencing a song the catalog never held, planted
    // directly on the stored user to simulate an inconsistent catalog.
    let mut stored = world.users.find_by_id(&user.id).expect("user");
    let mut playlist = Playlist::new("Ghost".to_string(), user.id.clone());
    playlist.add_song("404".to_string());
    stored.add_playlist(playlist.assign_id("1".to_string()));
    world.users.save(stored);

    let err = world
        .user_service
        .play_playlist(&user.id, "1")
        .expect_err("missing song");
    assert!(matches!(err, ServiceError::SongNotFound { id } if id == "404"));
}

#[test]
fn wrap_around_scenario_from_the_middle() {
    let world = world();
    let song_ids = seed_songs(&world, &["A", "B", "C"]);
    let user = world.user_service.create_user("Alice").expect("user");
    let playlist = world
        .playlist_service
        .create_playlist(&user.id, "Mix", &song_ids)
        .expect("playlist");

    world
        .user_service
        .play_playlist(&user.id, &playlist.id)
        .expect("play");
    world
        .user_service
        .play_song(&user.id, SongSelection::ById(song_ids[1].clone()))
        .expect("select B");

    let playing = world
        .user_service
        .play_song(&user.id, SongSelection::Control(PlaybackControl::Next))
        .expect("next");
    assert_eq!(playing.song_name, "C");

    let playing = world
        .user_service
        .play_song(&user.id, SongSelection::Control(PlaybackControl::Next))
        .expect("next wraps");
    assert_eq!(playing.song_name, "A");
}
