//! Search query construction.
//!
//! A [`TrackRecord`] becomes a catalog search query in one of two modes.
//! Exact mode emits quoted, field-tagged terms (`track:"..." artist:"..."`)
//! the way the Spotify search syntax expects; loose mode strips everything
//! but alphanumerics and apostrophes and joins the values unquoted. The
//! matcher walks from the most exact form to the loosest, dropping the
//! album along the way (see [`Matcher`](crate::Matcher)).

use crate::types::TrackRecord;
use regex::Regex;

/// Placeholder values never worth searching for, lowercased.
pub const DEFAULT_IGNORE_TAGS: [&str; 3] = ["unbekannt", "unknown", "none"];

/// The query fields a relaxation level may exclude.
///
/// `duration` is not listed: it is never a query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Artist,
    Album,
}

impl Field {
    /// Spotify search syntax tag for this field.
    fn catalog_tag(self) -> &'static str {
        match self {
            Field::Title => "track",
            Field::Artist => "artist",
            Field::Album => "album",
        }
    }
}

/// Builds search queries from scraped track records.
///
/// Holds the lowercased ignore list and the compiled loose-mode
/// sanitizer; construction is deterministic and side-effect free.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    ignore_tags: Vec<String>,
    loose_chars: Regex,
}

impl QueryBuilder {
    /// Create a builder with the given ignore list.
    ///
    /// Values are compared case-insensitively; a field whose entire value
    /// is on the list is dropped from the query as if it were empty.
    pub fn new<S: AsRef<str>>(ignore_tags: &[S]) -> Self {
        Self {
            ignore_tags: ignore_tags
                .iter()
                .map(|tag| tag.as_ref().to_lowercase())
                .collect(),
            // U+2019, the typographic apostrophe, survives alongside '
            loose_chars: Regex::new(r"[^0-9A-Za-z'\u{2019}]+").expect("valid pattern"),
        }
    }

    /// Build a query string from `track`, skipping `excluded` fields.
    ///
    /// Fields are emitted in title, artist, album order. Empty and
    /// ignore-listed values are dropped. In exact mode, `\` and `"`
    /// inside values are escaped and each term is quoted and tagged; in
    /// loose mode values are sanitized down to `[0-9A-Za-z'’ ]` and
    /// joined bare. Returns an empty string when nothing survives —
    /// callers must treat that as "no candidates" without issuing it.
    pub fn build(&self, track: &TrackRecord, excluded: &[Field], exact: bool) -> String {
        let mut terms = Vec::new();
        for (field, value) in [
            (Field::Title, &track.title),
            (Field::Artist, &track.artist),
            (Field::Album, &track.album),
        ] {
            if excluded.contains(&field) {
                continue;
            }
            if value.is_empty() || self.ignore_tags.contains(&value.to_lowercase()) {
                continue;
            }
            if exact {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                terms.push(format!("{}:\"{escaped}\"", field.catalog_tag()));
            } else {
                terms.push(self.loose_chars.replace_all(value, " ").into_owned());
            }
        }
        terms.join(" ")
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(&DEFAULT_IGNORE_TAGS)
    }
}
