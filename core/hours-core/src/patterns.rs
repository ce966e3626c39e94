//! Compiled regex patterns for reading the INI ledger.
//!
//! Compiled once on first use. The shapes match existing ledger files: greedy section names (so `[C:\a[1].blend]`
//! keeps its brackets) and the first `=` or `:` splitting key from value.

use once_cell::sync::Lazy;
use regex::Regex;

pub static RE_INI_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(?P<name>.+)\]$").unwrap());
pub static RE_INI_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<key>[^=:\[\s][^=:]*?)\s*[=:]\s*(?P<value>.*)$").unwrap());
pub static RE_INI_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[#;]").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_keeps_inner_brackets() {
        let caps = RE_INI_SECTION.captures("[/tmp/a[1].blend]").unwrap();
        assert_eq!(&caps["name"], "/tmp/a[1].blend");
    }

    #[test]
    fn option_splits_on_first_delimiter() {
        let caps = RE_INI_OPTION.captures("object = 12.5").unwrap();
        assert_eq!(&caps["key"], "object");
        assert_eq!(&caps["value"], "12.5");

        let caps = RE_INI_OPTION.captures("all: 3.0").unwrap();
        assert_eq!(&caps["key"], "all");
        assert_eq!(&caps["value"], "3.0");
    }

    #[test]
    fn comments_are_recognised() {
        assert!(RE_INI_COMMENT.is_match("# note"));
        assert!(RE_INI_COMMENT.is_match("; note"));
        assert!(!RE_INI_COMMENT.is_match("object = 1.0"));
    }
}
