use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::game::SPAWN_CHOICES;

/// Persistent player records, stored as a small JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub highscore: u64,
    pub tile_highscore: u64,
}

impl Default for SaveData {
    fn default() -> Self {
        SaveData {
            highscore: 0,
            tile_highscore: SPAWN_CHOICES[0],
        }
    }
}

impl SaveData {
    /// Load the save file, or initialize it with defaults when absent.
    /// Unreadable for any other reason is an error.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("parsing save file {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no save file at {}, writing defaults", path.display());
                let data = SaveData::default();
                data.store(path)?;
                Ok(data)
            }
            Err(e) => {
                Err(e).with_context(|| format!("reading save file {}", path.display()))
            }
        }
    }

    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let raw = serde_json::to_string(self).context("serializing save data")?;
        std::fs::write(path, raw)
            .with_context(|| format!("writing save file {}", path.display()))
    }

    /// Fold the current score and highest tile into the records, rewriting
    /// the file only when a record was actually beaten.
    pub fn update_records<P: AsRef<Path>>(
        &mut self,
        path: P,
        score: u64,
        highest_tile: u64,
    ) -> Result<()> {
        let mut beaten = false;
        if score > self.highscore {
            self.highscore = score;
            beaten = true;
        }
        if highest_tile > self.tile_highscore {
            self.tile_highscore = highest_tile;
            beaten = true;
        }
        if beaten {
            self.store(path)?;
        }
        Ok(())
    }
}
