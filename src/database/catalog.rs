//! Song catalog built by scanning the songs directory.
//!
//! Every sub-folder holding at least one readable `.osu` chart is one
//! beatmap set. The first chart that parses provides the set's metadata,
//! audio file and timing points.

use crate::error::CatalogError;
use crate::models::{TimingPoint, Track};
use crate::services::Catalog;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

pub struct SongCatalog {
    sets: Vec<Track>,
    map_count: usize,
    rng: StdRng,
}

impl SongCatalog {
    pub fn from_tracks(sets: Vec<Track>, map_count: usize, rng: StdRng) -> Self {
        Self {
            sets,
            map_count,
            rng,
        }
    }

    pub fn empty() -> Self {
        Self::from_tracks(Vec::new(), 0, StdRng::from_rng(&mut rand::rng()))
    }

    /// Scans `songs_path`, one beatmap set per sub-folder.
    pub fn scan(songs_path: &Path) -> Result<Self, CatalogError> {
        if !songs_path.is_dir() {
            return Err(CatalogError::MissingDirectory(songs_path.to_path_buf()));
        }
        let entries = fs::read_dir(songs_path).map_err(|source| CatalogError::Io {
            path: songs_path.to_path_buf(),
            source,
        })?;

        let mut folders: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        // Stable indices between runs.
        folders.sort();

        let mut sets = Vec::new();
        let mut map_count = 0;
        for folder in folders {
            let osu_files = collect_osu_files(&folder);
            if osu_files.is_empty() {
                continue;
            }
            match read_set(&folder, &osu_files, sets.len()) {
                Some(track) => {
                    map_count += osu_files.len();
                    sets.push(track);
                }
                None => log::warn!("CATALOG: No readable chart in {:?}", folder),
            }
        }

        log::info!(
            "CATALOG: Loaded {} sets and {} beatmaps from {:?}",
            sets.len(),
            map_count,
            songs_path
        );
        Ok(Self::from_tracks(
            sets,
            map_count,
            StdRng::from_rng(&mut rand::rng()),
        ))
    }
}

fn collect_osu_files(path: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(path) else {
        return Vec::new();
    };
    let mut files = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("osu"))
        .collect::<Vec<_>>();
    files.sort();
    files
}

fn read_set(folder: &Path, osu_files: &[PathBuf], index: usize) -> Option<Track> {
    for osu_file in osu_files {
        let map = match rosu_map::Beatmap::from_path(osu_file) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("CATALOG: Error parsing {:?}: {}", osu_file, e);
                continue;
            }
        };
        if map.audio_file.is_empty() {
            continue;
        }
        let timing_points = map
            .control_points
            .timing_points
            .iter()
            .map(|tp| TimingPoint {
                time_ms: tp.time,
                beat_length_ms: tp.beat_len,
                inherited: false,
            })
            .collect();
        return Some(Track {
            index: Some(index),
            audio: folder.join(&map.audio_file),
            artist: map.artist,
            title: map.title,
            timing_points,
        });
    }
    None
}

impl Catalog for SongCatalog {
    fn set_count(&self) -> usize {
        self.sets.len()
    }

    fn map_count(&self) -> usize {
        self.map_count
    }

    fn random_entry(&mut self) -> Option<Track> {
        if self.sets.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..self.sets.len());
        self.sets.get(index).cloned()
    }

    fn entry(&self, index: usize) -> Option<Track> {
        self.sets.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const CHART: &str = "osu file format v14

[General]
AudioFilename: audio.mp3

[Metadata]
Title:Night Drive
Artist:Someone

[TimingPoints]
1000,500,4,2,0,100,1,0
";

    #[test]
    fn scan_reads_one_set_per_folder() {
        let songs = tempfile::tempdir().unwrap();
        let dir = songs.path();
        let set = dir.join("1 Someone - Night Drive");
        fs::create_dir_all(&set).unwrap();
        fs::write(set.join("easy.osu"), CHART).unwrap();
        fs::write(set.join("hard.osu"), CHART).unwrap();
        fs::create_dir_all(dir.join("no charts")).unwrap();

        let catalog = SongCatalog::scan(dir).unwrap();
        assert_eq!(catalog.set_count(), 1);
        assert_eq!(catalog.map_count(), 2);

        let track = catalog.entry(0).unwrap();
        assert_eq!(track.index, Some(0));
        assert_eq!(track.title, "Night Drive");
        assert_eq!(track.artist, "Someone");
        assert_eq!(track.audio, set.join("audio.mp3"));
        assert_eq!(track.timing_points.len(), 1);
        assert_eq!(track.timing_points[0].beat_length_ms, 500.0);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let songs = tempfile::tempdir().unwrap();
        let dir = songs.path().join("does-not-exist");
        assert!(matches!(
            SongCatalog::scan(&dir),
            Err(CatalogError::MissingDirectory(_))
        ));
    }

    #[test]
    fn random_entry_draws_from_loaded_sets() {
        let sets = (0..4)
            .map(|i| Track {
                index: Some(i),
                audio: PathBuf::from(format!("{i}.mp3")),
                artist: String::new(),
                title: String::new(),
                timing_points: Vec::new(),
            })
            .collect();
        let mut catalog = SongCatalog::from_tracks(sets, 4, StdRng::seed_from_u64(7));
        for _ in 0..20 {
            let track = catalog.random_entry().unwrap();
            assert!(track.index.unwrap() < 4);
        }
        assert!(catalog.entry(4).is_none());
    }

    #[test]
    fn empty_catalog_has_no_random_entry() {
        let mut catalog = SongCatalog::empty();
        assert!(catalog.random_entry().is_none());
        assert_eq!(catalog.set_count(), 0);
    }
}
