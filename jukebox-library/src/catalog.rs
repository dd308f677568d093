//! Catalog bootstrap from CSV
//!
//! One song per row: `name,genre,album,artist,featured1#featured2#...`.
//! The final field is a `#`-joined list of featured artist names. Blank
//! lines are skipped; a row with fewer than five fields aborts the load.

use crate::error::{LibraryError, Result};
use crate::models::Song;
use crate::repositories::SongRepository;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Loads every song row from `path` into the song repository.
///
/// Returns the number of songs loaded.
pub fn load_catalog(path: &Path, songs: &dyn SongRepository) -> Result<usize> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut loaded = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let song = parse_row(&line).ok_or(LibraryError::MalformedRow { line: index + 1 })?;
        songs.save(song);
        loaded += 1;
    }

    tracing::info!(count = loaded, path = %path.display(), "catalog loaded");
    Ok(loaded)
}

fn parse_row(line: &str) -> Option<Song> {
    let mut fields = line.splitn(5, ',');
    let name = fields.next()?;
    let genre = fields.next()?;
    let album = fields.next()?;
    let artist = fields.next()?;
    let featured = fields.next()?;

    let featured_artists = featured
        .split('#')
        .map(str::trim)
        .filter(|artist| !artist.is_empty())
        .map(str::to_string)
        .collect();

    Some(Song::new(
        name.trim().to_string(),
        genre.trim().to_string(),
        album.trim().to_string(),
        artist.trim().to_string(),
        featured_artists,
    ))
}
