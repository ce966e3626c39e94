//! INI text codec for the ledger file.
//!
//! # File Format
//!
//! ```ini
//! [ALL]
//! object = 1290.5
//! all = 1290.5
//!
//! [2024-03-15]
//! sculpt = 600.0
//! all = 600.0
//!
//! [/home/me/robot.blend]
//! sculpt = 600.0
//! all = 600.0
//! ```
//!
//! Layout matches existing ledger files: a blank line after each section,
//! `key = value`, keys lowercased. Values are kept as text so unknown keys
//! survive a rewrite untouched. Section and key order is preserved.
//!
//! # Defensive Design
//!
//! - Comment lines (`#`, `;`) and blank lines are skipped
//! - Options before the first section are dropped with a warning
//! - Unparseable lines are dropped with a warning
//! - Repeated sections merge; a repeated key keeps the last value

use crate::patterns::{RE_INI_COMMENT, RE_INI_OPTION, RE_INI_SECTION};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl IniSection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive key lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Inserts or replaces `key`. Keys are stored lowercase.
    pub fn set(&mut self, key: &str, value: String) {
        let key = key.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(content: &str) -> Self {
        let mut document = IniDocument::new();
        let mut current: Option<usize> = None;

        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        for (line_no, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || RE_INI_COMMENT.is_match(line) {
                continue;
            }

            if let Some(caps) = RE_INI_SECTION.captures(line) {
                current = Some(document.section_index(&caps["name"]));
                continue;
            }

            if let Some(caps) = RE_INI_OPTION.captures(line) {
                match current {
                    Some(index) => {
                        document.sections[index].set(&caps["key"], caps["value"].trim().to_string())
                    }
                    None => tracing::warn!(
                        line = line_no + 1,
                        "Ledger option outside any section, skipping"
                    ),
                }
                continue;
            }

            tracing::warn!(line = line_no + 1, "Unparseable ledger line, skipping");
        }

        document
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
            for (key, value) in section.entries() {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(value);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Returns the section named `name`, creating an empty one at the end if needed.
    pub fn section_mut(&mut self, name: &str) -> &mut IniSection {
        let index = self.section_index(name);
        &mut self.sections[index]
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    pub fn set(&mut self, section: &str, key: &str, value: String) {
        self.section_mut(section).set(key, value);
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    fn section_index(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(IniSection::new(name));
                self.sections.len() - 1
            }
        }
    }
}

/// Shortest round-trip text, always with a fractional part (`10.0`, `12.25`).
///
/// Magnitudes below `1e-4` or from `1e16` up switch to exponent form with a
/// signed, two-digit exponent (`1e-05`, `1.5e+16`), as existing files have them.
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() {
        return format!("{seconds}");
    }
    let magnitude = seconds.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_exponent(seconds);
    }
    if seconds.fract() == 0.0 {
        format!("{seconds:.1}")
    } else {
        format!("{seconds}")
    }
}

fn format_exponent(seconds: f64) -> String {
    let text = format!("{seconds:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[ALL]\nobject = 10.0\nall = 10.0\n\n[NoFile]\nobject = 10.0\nall = 10.0\n\n";

    #[test]
    fn parse_then_render_is_identity_for_canonical_text() {
        let document = IniDocument::parse(SAMPLE);
        assert_eq!(document.render(), SAMPLE);
    }

    #[test]
    fn keys_are_case_insensitive_and_stored_lowercase() {
        let document = IniDocument::parse("[ALL]\nOBJECT = 4.0\n");
        assert_eq!(document.get("ALL", "object"), Some("4.0"));
        assert_eq!(document.get("ALL", "Object"), Some("4.0"));
        assert_eq!(document.render(), "[ALL]\nobject = 4.0\n\n");
    }

    #[test]
    fn sections_are_case_sensitive() {
        let document = IniDocument::parse("[ALL]\nall = 1.0\n");
        assert!(document.get("all", "all").is_none());
    }

    #[test]
    fn unknown_keys_survive_rewrite() {
        let mut document = IniDocument::parse("[ALL]\nlegacy_field = keep me\nall = 1.0\n");
        document.set("ALL", "all", "2.0".to_string());
        assert_eq!(
            document.render(),
            "[ALL]\nlegacy_field = keep me\nall = 2.0\n\n"
        );
    }

    #[test]
    fn skips_comments_and_garbage() {
        let document = IniDocument::parse(
            "# comment\norphan = 1.0\n[ALL]\n; note\nnot an option\nall = 3.5\n",
        );
        assert_eq!(document.section_names().collect::<Vec<_>>(), vec!["ALL"]);
        assert_eq!(document.get("ALL", "all"), Some("3.5"));
        assert!(document.get("ALL", "orphan").is_none());
    }

    #[test]
    fn colon_delimiter_and_windows_paths() {
        let document = IniDocument::parse("[C:\\work\\robot.blend]\nsculpt: 2.0\n");
        assert_eq!(document.get("C:\\work\\robot.blend", "sculpt"), Some("2.0"));
    }

    #[test]
    fn repeated_sections_merge() {
        let document = IniDocument::parse("[ALL]\nobject = 1.0\n[ALL]\npose = 2.0\nobject = 5.0\n");
        let section = document.section("ALL").unwrap();
        assert_eq!(section.get("object"), Some("5.0"));
        assert_eq!(section.get("pose"), Some("2.0"));
        assert_eq!(document.section_names().count(), 1);
    }

    #[test]
    fn format_seconds_keeps_fractional_part() {
        assert_eq!(format_seconds(10.0), "10.0");
        assert_eq!(format_seconds(0.0), "0.0");
        assert_eq!(format_seconds(12.25), "12.25");
        assert_eq!(format_seconds(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_seconds(0.0001), "0.0001");
    }

    #[test]
    fn format_seconds_uses_exponent_outside_plain_range() {
        assert_eq!(format_seconds(0.00001), "1e-05");
        assert_eq!(format_seconds(0.000015), "1.5e-05");
        assert_eq!(format_seconds(1e16), "1e+16");
        assert_eq!(format_seconds(1.5e16), "1.5e+16");
        assert_eq!(format_seconds(1e100), "1e+100");
        assert_eq!(format_seconds(9999999999999998.0), "9999999999999998.0");
    }
}
