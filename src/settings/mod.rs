// src/settings/mod.rs

pub mod io;

use crate::assessment::notes::NoteRules;
use crate::error::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_DOCUMENT: &str = "ASSESSDB_DOCUMENT";
pub const ENV_DATA_DIR: &str = "ASSESSDB_DATA_DIR";
pub const ENV_TIME_ZONE: &str = "ASSESSDB_TIME_ZONE";

const PROPERTIES_FILE: &str = "properties.json";

/// A configured time zone. Named zones follow daylight saving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Named(Tz),
    Fixed(FixedOffset),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// Path of the document to open. Blank or absent means the ambient document.
    pub document: Option<String>,
    pub data_dir: Option<PathBuf>,
    /// IANA zone (`Australia/Sydney`) or fixed UTC offset (`+10:00`) used for
    /// identifiers and timestamps.
    pub time_zone: String,
    pub photos_folder: String,
    pub note_rules: NoteRules,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            document: None,
            data_dir: None,
            time_zone: "+00:00".to_string(),
            photos_folder: "Photos".to_string(),
            note_rules: NoteRules::default(),
        }
    }
}

impl AppSettings {
    pub fn default_data_dir() -> Option<PathBuf> {
        directories_next::UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
            .map(|documents| documents.join("ConservatorAssessments"))
    }

    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(Self::default_data_dir)
    }

    pub fn properties_path(&self) -> AppResult<PathBuf> {
        self.resolve_data_dir()
            .map(|dir| dir.join(PROPERTIES_FILE))
            .ok_or_else(|| AppError::Configuration("No data directory could be determined".into()))
    }

    pub fn photos_root(&self) -> AppResult<PathBuf> {
        self.resolve_data_dir()
            .map(|dir| dir.join(&self.photos_folder))
            .ok_or_else(|| AppError::Configuration("No data directory could be determined".into()))
    }

    pub fn zone(&self) -> AppResult<Zone> {
        let raw = self.time_zone.trim();
        if let Ok(tz) = raw.parse::<Tz>() {
            return Ok(Zone::Named(tz));
        }
        parse_utc_offset(raw).map(Zone::Fixed).ok_or_else(|| {
            AppError::Configuration(format!(
                "Invalid time zone '{}', expected a zone name like Australia/Sydney or an offset like +10:00",
                self.time_zone
            ))
        })
    }

    /// Wall-clock time in the configured zone at the instant `utc`.
    pub fn local_time(&self, utc: DateTime<Utc>) -> AppResult<DateTime<FixedOffset>> {
        Ok(match self.zone()? {
            Zone::Named(tz) => utc.with_timezone(&tz).fixed_offset(),
            Zone::Fixed(offset) => utc.with_timezone(&offset),
        })
    }

    /// Environment variables take precedence over the settings file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(document) = std::env::var(ENV_DOCUMENT) {
            self.document = Some(document);
        }
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(tz) = std::env::var(ENV_TIME_ZONE) {
            if !tz.trim().is_empty() {
                self.time_zone = tz;
            }
        }
    }
}

/// Parses `Z`, `UTC`, `+HH:MM`, `-HH:MM` or `+HHMM`.
fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match raw.chars().next()? {
        '+' => (1, &raw[1..]),
        '-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
