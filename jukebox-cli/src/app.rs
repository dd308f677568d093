//! Application wiring and the interpreter loop

use crate::command::{CommandError, CommandRegistry};
use crate::handlers::{
    CreatePlaylistCommand, CreateUserCommand, DeletePlaylistCommand, LoadDataCommand,
    ModifyPlaylistCommand, PlayPlaylistCommand, PlaySongCommand,
};
use jukebox_library::repositories::{
    InMemoryPlaylistRepository, InMemorySongRepository, InMemoryUserRepository, PlaylistRepository,
    SongRepository, UserRepository,
};
use jukebox_service::{PlaylistService, UserService};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::debug;

/// The wired interpreter: repositories, services, and the command
/// registry with every keyword registered.
pub struct App {
    registry: CommandRegistry,
}

impl App {
    pub fn new() -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let playlists: Arc<dyn PlaylistRepository> = Arc::new(InMemoryPlaylistRepository::new());
        let songs: Arc<dyn SongRepository> = Arc::new(InMemorySongRepository::new());

        let playlist_service = Arc::new(PlaylistService::new(
            playlists,
            users.clone(),
            songs.clone(),
        ));
        let user_service = Arc::new(UserService::new(users, songs.clone()));

        let mut registry = CommandRegistry::new();
        registry.register(
            "CREATE-USER",
            Box::new(CreateUserCommand::new(user_service.clone())),
        );
        registry.register(
            "CREATE-PLAYLIST",
            Box::new(CreatePlaylistCommand::new(playlist_service.clone())),
        );
        registry.register(
            "DELETE-PLAYLIST",
            Box::new(DeletePlaylistCommand::new(playlist_service.clone())),
        );
        registry.register(
            "MODIFY-PLAYLIST",
            Box::new(ModifyPlaylistCommand::new(playlist_service)),
        );
        registry.register(
            "PLAY-PLAYLIST",
            Box::new(PlayPlaylistCommand::new(user_service.clone())),
        );
        registry.register("PLAY-SONG", Box::new(PlaySongCommand::new(user_service)));
        registry.register("LOAD-DATA", Box::new(LoadDataCommand::new(songs)));

        Self { registry }
    }

    /// Reads commands line by line and dispatches each one. A bad line —
    /// unknown keyword, missing tokens, rejected operation — is reported
    /// on its own output line and the loop continues; only I/O failure on
    /// the input or output stream ends the run.
    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> std::io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            let Some(keyword) = tokens.first() else {
                continue;
            };
            debug!(command = %keyword, "dispatching");

            if let Err(err) = self.registry.execute(keyword, &tokens, out) {
                match err {
                    CommandError::Io(io_err) => return Err(io_err),
                    other => writeln!(out, "{other}")?,
                }
            }
        }
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
