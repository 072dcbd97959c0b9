//! Free-text thought dump with release and plain-text export.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::Result;
use crate::events::Event;

/// `thought-YYYY-MM-DD.txt`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("thought-{}.txt", date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThoughtDump {
    text: String,
}

impl ThoughtDump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Release and save are only offered for non-blank text.
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Let the thought go: clears the buffer. No-op on blank text.
    pub fn release(&mut self) -> Option<Event> {
        if !self.can_submit() {
            return None;
        }
        let chars = self.text.chars().count();
        self.text.clear();
        info!(chars, "thought released");
        Some(Event::ThoughtReleased {
            chars,
            at: Utc::now(),
        })
    }

    /// Write the raw buffer, unmodified, to `dir/thought-<date>.txt`.
    ///
    /// Returns `Ok(None)` without touching the filesystem for blank text.
    /// The buffer is kept so the user can still release it afterwards.
    pub fn save_to(&self, dir: &Path, date: NaiveDate) -> Result<Option<(PathBuf, Event)>> {
        if !self.can_submit() {
            return Ok(None);
        }
        let file_name = export_file_name(date);
        let path = dir.join(&file_name);
        std::fs::write(&path, self.text.as_bytes())?;
        info!(path = %path.display(), "thought saved");
        let event = Event::ThoughtSaved {
            file_name,
            bytes: self.text.len(),
            at: Utc::now(),
        };
        Ok(Some((path, event)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn file_name_uses_iso_date() {
        assert_eq!(export_file_name(date()), "thought-2024-03-07.txt");
    }

    #[test]
    fn blank_text_cannot_be_submitted() {
        let mut dump = ThoughtDump::new();
        assert!(!dump.can_submit());
        dump.set_text("   \n\t");
        assert!(!dump.can_submit());
        assert!(dump.release().is_none());
        assert_eq!(dump.text(), "   \n\t");
    }

    #[test]
    fn release_clears_buffer() {
        let mut dump = ThoughtDump::new();
        dump.set_text("too much email");
        assert!(matches!(
            dump.release(),
            Some(Event::ThoughtReleased { chars: 14, .. })
        ));
        assert_eq!(dump.text(), "");
    }

    #[test]
    fn save_writes_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut dump = ThoughtDump::new();
        let raw = "  first line\nsecond line  \n";
        dump.set_text(raw);

        let (path, _) = dump.save_to(dir.path(), date()).unwrap().unwrap();
        assert_eq!(path, dir.path().join("thought-2024-03-07.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);
        assert_eq!(dump.text(), raw);
    }

    #[test]
    fn save_of_blank_text_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dump = ThoughtDump::new();
        assert!(dump.save_to(dir.path(), date()).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
