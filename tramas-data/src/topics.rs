//! Topic detection for records that arrive without `detected_topics`.
//!
//! The rules mirror the archive's cataloguing convention: family names are
//! matched as whole words in the record's text fields, and the curator's
//! assigned section acts as a fallback.

use lazy_static::lazy_static;
use regex::Regex;

use tramas_core::{ImageRecord, Topic};

lazy_static! {
    static ref PANCERI: Regex = Regex::new(r"\bpanceri\b").unwrap();
    static ref POMPEIA: Regex = Regex::new(r"\bpompeia\b|\bpizzamiglio\b").unwrap();
    static ref SCAVINO: Regex = Regex::new(r"\bscavino\b|\bbertuzzi\b").unwrap();
}

/// Section label meaning "no specific topic".
const GENERIC_SECTION: &str = "Geral";

/// Derive topic labels from a record's text fields.
///
/// Scans the lowercased concatenation of title, corroboration, file-name stem
/// (underscores and hyphens read as spaces), and the assigned section (unless
/// it is the generic one). When nothing matches but the assigned section
/// names a topic, that section wins; otherwise the record is generic.
pub fn detect_topics(record: &ImageRecord) -> Vec<String> {
    let mut scan = Vec::new();
    if let Some(title) = record.title.as_deref() {
        scan.push(title.to_lowercase());
    }
    if let Some(text) = record.corroboration.as_deref() {
        scan.push(text.to_lowercase());
    }
    if !record.file_name.is_empty() {
        let stem = record
            .file_name
            .rsplit_once('.')
            .map(|(stem, _ext)| stem)
            .unwrap_or(&record.file_name);
        scan.push(stem.to_lowercase().replace(['_', '-'], " "));
    }
    let section = record.admin_assigned_section.as_deref();
    if let Some(section) = section.filter(|s| *s != GENERIC_SECTION) {
        scan.push(section.to_lowercase());
    }
    let text = scan.join(" ");

    let mut detected = Vec::new();
    if PANCERI.is_match(&text) {
        detected.push(Topic::Panceri.label().to_string());
    }
    if POMPEIA.is_match(&text) {
        detected.push(Topic::Pompeia.label().to_string());
    }
    if SCAVINO.is_match(&text) {
        detected.push(Topic::ScavinoBertuzzi.label().to_string());
    }

    if detected.is_empty() {
        if let Some(section) = section {
            if Topic::ALL.iter().any(|t| t.label() == section) {
                detected.push(section.to_string());
            }
        }
    }
    if detected.is_empty() {
        detected.push(GENERIC_SECTION.to_string());
    }
    detected
}

/// Fill in `detected_topics` for records the server left blank.
pub fn normalize_topics(records: &mut [ImageRecord]) {
    for record in records {
        if record.detected_topics.is_empty() {
            record.detected_topics = detect_topics(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file: &str, title: Option<&str>, section: Option<&str>) -> ImageRecord {
        ImageRecord {
            id: 1,
            file_name: file.to_string(),
            title: title.map(str::to_string),
            corroboration: None,
            tags: Vec::new(),
            detected_topics: Vec::new(),
            admin_assigned_section: section.map(str::to_string),
            chronological_order: 0,
        }
    }

    #[test]
    fn detects_from_file_name_stem() {
        let r = record("Historia_familia_Panceri.jpg", None, None);
        assert_eq!(detect_topics(&r), vec!["Panceri"]);
    }

    #[test]
    fn pizzamiglio_counts_as_pompeia() {
        let r = record("x.jpg", Some("Falecimento Luiz Pizzamiglio"), None);
        assert_eq!(detect_topics(&r), vec!["Pompeia"]);
    }

    #[test]
    fn bertuzzi_counts_as_scavino() {
        let r = record("x.jpg", Some("fichários da Bertuzzi"), None);
        assert_eq!(detect_topics(&r), vec!["Scavino & Bertuzzi"]);
    }

    #[test]
    fn whole_words_only() {
        let r = record("x.jpg", Some("pompeiano"), None);
        assert_eq!(detect_topics(&r), vec!["Geral"]);
    }

    #[test]
    fn multiple_topics_detected_together() {
        let r = record("x.jpg", Some("A ligação entre Panceri e Scavino"), None);
        assert_eq!(detect_topics(&r), vec!["Panceri", "Scavino & Bertuzzi"]);
    }

    #[test]
    fn assigned_section_names_the_topic() {
        let r = record("retrato.jpg", Some("Retrato de família"), Some("Pompeia"));
        assert_eq!(detect_topics(&r), vec!["Pompeia"]);
    }

    #[test]
    fn generic_section_stays_generic() {
        let r = record("retrato.jpg", None, Some("Geral"));
        assert_eq!(detect_topics(&r), vec!["Geral"]);
    }

    #[test]
    fn normalize_fills_only_missing_topics() {
        let mut records = vec![
            record("Historia_Panceri.jpg", None, None),
            {
                let mut r = record("x.jpg", None, None);
                r.detected_topics = vec!["Pompeia".into()];
                r
            },
        ];
        normalize_topics(&mut records);
        assert_eq!(records[0].detected_topics, vec!["Panceri"]);
        assert_eq!(records[1].detected_topics, vec!["Pompeia"]);
    }
}
