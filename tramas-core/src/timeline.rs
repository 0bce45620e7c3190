use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::record::TimelineEvent;

/// The three timeline sections the archive serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Panceri,
    Pompeia,
    Scavino,
}

impl Section {
    /// Display order of the sections.
    pub const ALL: [Section; 3] = [Section::Panceri, Section::Pompeia, Section::Scavino];

    /// Path segment used by the timeline endpoint.
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Panceri => "panceri",
            Self::Pompeia => "pompeia",
            Self::Scavino => "scavino",
        }
    }

    /// Human-readable section title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Panceri => "Panceri",
            Self::Pompeia => "Pompeia",
            Self::Scavino => "Scavino & Bertuzzi",
        }
    }

    pub fn from_api_name(name: &str) -> crate::Result<Self> {
        match name.to_lowercase().as_str() {
            "panceri" => Ok(Self::Panceri),
            "pompeia" => Ok(Self::Pompeia),
            "scavino" => Ok(Self::Scavino),
            other => Err(CoreError::UnknownSection(other.to_string())),
        }
    }
}

/// Whether an event matches a search term: case-insensitive substring over
/// year, title, and body text.
pub fn event_matches(event: &TimelineEvent, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    let haystack = format!(
        "{} {} {}",
        event.year.map(|y| y.to_string()).unwrap_or_default(),
        event.title,
        event.text
    )
    .to_lowercase();
    haystack.contains(&term)
}

/// Byte ranges of every case-insensitive occurrence of `needle` in
/// `haystack`, for highlight rendering. Non-overlapping, left to right.
pub fn highlight_ranges(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle = needle.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    let folded_needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    // Byte index of the source character, repeated for multi-char foldings.
    let folded_haystack: Vec<(usize, char)> = haystack
        .char_indices()
        .flat_map(|(i, c)| c.to_lowercase().map(move |lc| (i, lc)))
        .collect();

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + folded_needle.len() <= folded_haystack.len() {
        let window = &folded_haystack[i..i + folded_needle.len()];
        if window.iter().map(|&(_, c)| c).eq(folded_needle.iter().copied()) {
            let start = window[0].0;
            let end = folded_haystack
                .get(i + folded_needle.len())
                .map(|&(b, _)| b)
                .unwrap_or(haystack.len());
            ranges.push((start, end));
            i += folded_needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(year: Option<i32>, title: &str, text: &str) -> TimelineEvent {
        TimelineEvent {
            id: 1,
            section: "panceri".into(),
            sub_section: None,
            year,
            title: title.into(),
            text: text.into(),
            images: Vec::new(),
            corroboration: None,
        }
    }

    #[test]
    fn section_api_names_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_api_name(section.api_name()).unwrap(), section);
        }
        assert!(Section::from_api_name("bertuzzi").is_err());
    }

    #[test]
    fn event_matches_year_title_and_text() {
        let e = event(Some(1899), "Primeira Tecelagem", "teares a pedal");
        assert!(event_matches(&e, "1899"));
        assert!(event_matches(&e, "TECELAGEM"));
        assert!(event_matches(&e, "pedal"));
        assert!(!event_matches(&e, "pompeia"));
    }

    #[test]
    fn empty_term_matches_everything() {
        let e = event(None, "t", "x");
        assert!(event_matches(&e, ""));
        assert!(event_matches(&e, "   "));
    }

    #[test]
    fn highlight_ranges_finds_all_occurrences() {
        let ranges = highlight_ranges("seda e mais Seda", "seda");
        assert_eq!(ranges, vec![(0, 4), (12, 16)]);
    }

    #[test]
    fn highlight_ranges_slice_the_original_text() {
        let text = "Fábrica de Seda";
        let ranges = highlight_ranges(text, "SEDA");
        assert_eq!(ranges.len(), 1);
        let (start, end) = ranges[0];
        assert_eq!(&text[start..end], "Seda");
    }

    #[test]
    fn highlight_ranges_handle_accented_text() {
        let text = "a FÁBRICA da família";
        let ranges = highlight_ranges(text, "fábrica");
        assert_eq!(ranges.len(), 1);
        let (start, end) = ranges[0];
        assert_eq!(&text[start..end], "FÁBRICA");
    }

    #[test]
    fn highlight_ranges_empty_needle_yields_nothing() {
        assert!(highlight_ranges("texto", "").is_empty());
        assert!(highlight_ranges("texto", "  ").is_empty());
    }
}
