use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::record::ImageRecord;
use crate::topic::{Topic, CATCH_ALL_LABEL};

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Why a computed view came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// Filters or a search term were active and nothing matched.
    NoMatches,
    /// The source collection itself had no records.
    EmptyCollection,
}

/// One topic bucket of the grouped gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicBucket {
    pub label: &'static str,
    /// Images in this bucket, chronologically sorted (stable).
    pub images: Vec<ImageRecord>,
    /// Whether the bucket's grid starts visually expanded.
    pub start_expanded: bool,
}

/// The renderable grouping produced by [`compute_view`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalleryView {
    /// Non-empty buckets in display order; the catch-all bucket comes last.
    pub buckets: Vec<TopicBucket>,
    /// Set when no record survived filtering.
    pub empty: Option<EmptyReason>,
    /// Whether a tag filter or search term was active when computing.
    pub filter_active: bool,
}

// ---------------------------------------------------------------------------
// Filtering and grouping
// ---------------------------------------------------------------------------

/// Compute the grouped, filtered gallery view.
///
/// Filtering is conjunctive over `active_tags` (a record must carry ALL of
/// them) and, independently, a non-empty `search_term` matches
/// case-insensitively as a substring across title, file name, corroboration,
/// assigned section, detected topics, and tags (OR across fields).
///
/// Survivors are partitioned into the fixed topic buckets: each named topic
/// holds the records whose `detected_topics` carry its label (de-duplicated
/// by id within the topic), and the catch-all bucket holds every survivor.
/// Each bucket is chronologically sorted; ties keep their original order.
pub fn compute_view(
    master: &[ImageRecord],
    active_tags: &BTreeSet<String>,
    search_term: &str,
) -> GalleryView {
    let term = search_term.trim().to_lowercase();
    let filter_active = !term.is_empty() || !active_tags.is_empty();

    let survivors: Vec<&ImageRecord> = master
        .iter()
        .filter(|img| passes_tags(img, active_tags))
        .filter(|img| term.is_empty() || matches_search(img, &term))
        .collect();

    if survivors.is_empty() {
        let reason = if filter_active {
            EmptyReason::NoMatches
        } else {
            EmptyReason::EmptyCollection
        };
        return GalleryView {
            buckets: Vec::new(),
            empty: Some(reason),
            filter_active,
        };
    }

    let mut buckets = Vec::with_capacity(Topic::ALL.len() + 1);
    for topic in Topic::ALL {
        let label = topic.label();
        let mut seen = HashSet::new();
        let mut images: Vec<ImageRecord> = survivors
            .iter()
            .filter(|img| img.detected_topics.iter().any(|t| t == label))
            .filter(|img| seen.insert(img.id))
            .map(|img| (*img).clone())
            .collect();
        if images.is_empty() {
            continue;
        }
        sort_chronological(&mut images);
        buckets.push(TopicBucket {
            label,
            start_expanded: filter_active,
            images,
        });
    }

    // The catch-all bucket holds every survivor, regardless of topics.
    let mut all: Vec<ImageRecord> = survivors.iter().map(|img| (*img).clone()).collect();
    sort_chronological(&mut all);
    buckets.push(TopicBucket {
        label: CATCH_ALL_LABEL,
        // Expanded under active filters, or as the default landing bucket.
        start_expanded: true,
        images: all,
    });

    debug!(
        survivors = survivors.len(),
        buckets = buckets.len(),
        filter_active,
        "computed gallery view"
    );

    GalleryView {
        buckets,
        empty: None,
        filter_active,
    }
}

/// Stable chronological sort; equal keys keep their relative payload order.
fn sort_chronological(images: &mut [ImageRecord]) {
    images.sort_by_key(|img| img.chronological_order);
}

/// Conjunctive tag check: every active tag must appear on the record.
fn passes_tags(img: &ImageRecord, active_tags: &BTreeSet<String>) -> bool {
    if active_tags.is_empty() {
        return true;
    }
    let image_tags: HashSet<&str> = img.tags.iter().map(|t| t.trim()).collect();
    active_tags.iter().all(|tag| image_tags.contains(tag.as_str()))
}

/// Case-insensitive substring search across the record's text fields.
/// `term` must already be lowercased.
fn matches_search(img: &ImageRecord, term: &str) -> bool {
    let field_contains = |field: Option<&str>| {
        field
            .map(|f| f.to_lowercase().contains(term))
            .unwrap_or(false)
    };
    field_contains(Some(&img.file_name))
        || field_contains(img.title.as_deref())
        || field_contains(img.corroboration.as_deref())
        || field_contains(img.admin_assigned_section.as_deref())
        || img.detected_topics.join(" ").to_lowercase().contains(term)
        || img.tags.join(" ").to_lowercase().contains(term)
}

/// All distinct (trimmed) tag names in the collection, sorted for display.
pub fn unique_tags(master: &[ImageRecord]) -> Vec<String> {
    let set: BTreeSet<String> = master
        .iter()
        .flat_map(|img| img.tags.iter())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, file: &str, tags: &[&str], topics: &[&str], order: i64) -> ImageRecord {
        ImageRecord {
            id,
            file_name: file.to_string(),
            title: None,
            corroboration: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            detected_topics: topics.iter().map(|t| t.to_string()).collect(),
            admin_assigned_section: None,
            chronological_order: order,
        }
    }

    fn tag_set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn bucket<'a>(view: &'a GalleryView, label: &str) -> Option<&'a TopicBucket> {
        view.buckets.iter().find(|b| b.label == label)
    }

    #[test]
    fn tag_filter_is_conjunctive() {
        let master = vec![
            record(1, "a.jpg", &["A"], &[], 0),
            record(2, "ab.jpg", &["A", "B"], &[], 0),
            record(3, "b.jpg", &["B"], &[], 0),
        ];
        let view = compute_view(&master, &tag_set(&["A", "B"]), "");
        let geral = bucket(&view, CATCH_ALL_LABEL).unwrap();
        assert_eq!(geral.images.len(), 1);
        assert_eq!(geral.images[0].id, 2);
    }

    #[test]
    fn tags_are_trimmed_before_comparison() {
        let master = vec![record(1, "a.jpg", &[" doc "], &[], 0)];
        let view = compute_view(&master, &tag_set(&["doc"]), "");
        assert!(view.empty.is_none());
    }

    #[test]
    fn catch_all_holds_exactly_the_filtered_set() {
        let master = vec![
            record(1, "a.jpg", &[], &["Panceri"], 2),
            record(2, "b.jpg", &[], &["Panceri", "Pompeia"], 1),
            record(3, "c.jpg", &[], &[], 3),
        ];
        let view = compute_view(&master, &BTreeSet::new(), "");
        let geral = bucket(&view, CATCH_ALL_LABEL).unwrap();
        assert_eq!(geral.images.len(), 3);
        for b in &view.buckets {
            assert!(
                b.images.len() <= geral.images.len(),
                "catch-all must be the largest bucket"
            );
        }
        let ids: Vec<i64> = geral.images.iter().map(|img| img.id).collect();
        assert_eq!(ids, vec![2, 1, 3]); // chronological
    }

    #[test]
    fn named_topics_cross_reference_without_removal() {
        let master = vec![record(1, "a.jpg", &[], &["Panceri", "Pompeia"], 0)];
        let view = compute_view(&master, &BTreeSet::new(), "");
        assert_eq!(bucket(&view, "Panceri").unwrap().images.len(), 1);
        assert_eq!(bucket(&view, "Pompeia").unwrap().images.len(), 1);
        assert_eq!(bucket(&view, CATCH_ALL_LABEL).unwrap().images.len(), 1);
    }

    #[test]
    fn duplicate_ids_appear_once_per_topic() {
        let mut dup = record(7, "dup.jpg", &[], &["Panceri"], 0);
        dup.detected_topics = vec!["Panceri".into(), "Panceri".into()];
        let master = vec![dup];
        let view = compute_view(&master, &BTreeSet::new(), "");
        assert_eq!(bucket(&view, "Panceri").unwrap().images.len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut r = record(1, "ponte.jpg", &[], &[], 0);
        r.title = Some("Old Bridge".into());
        let master = vec![r];

        for term in ["bridge", "BRIDGE"] {
            let view = compute_view(&master, &BTreeSet::new(), term);
            assert!(view.empty.is_none(), "term {term:?} should match");
        }
        let view = compute_view(&master, &BTreeSet::new(), "bridges");
        assert_eq!(view.empty, Some(EmptyReason::NoMatches));
    }

    #[test]
    fn search_spans_all_fields() {
        let mut by_corroboration = record(1, "a.jpg", &[], &[], 0);
        by_corroboration.corroboration = Some("ver o jornal O Pioneiro".into());
        let mut by_section = record(2, "b.jpg", &[], &[], 0);
        by_section.admin_assigned_section = Some("Pompeia".into());
        let by_tag = record(3, "c.jpg", &["fábrica"], &[], 0);
        let by_topic = record(4, "d.jpg", &[], &["Scavino & Bertuzzi"], 0);
        let master = vec![by_corroboration, by_section, by_tag, by_topic];

        let hits = |term: &str| {
            compute_view(&master, &BTreeSet::new(), term)
                .buckets
                .iter()
                .find(|b| b.label == CATCH_ALL_LABEL)
                .map(|b| b.images.iter().map(|img| img.id).collect::<Vec<_>>())
                .unwrap_or_default()
        };
        assert_eq!(hits("pioneiro"), vec![1]);
        assert_eq!(hits("pompeia"), vec![2]);
        assert_eq!(hits("fábrica"), vec![3]);
        assert_eq!(hits("bertuzzi"), vec![4]);
        assert_eq!(hits("b.jpg"), vec![2]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let master = vec![
            record(1, "first.jpg", &[], &[], 5),
            record(2, "second.jpg", &[], &[], 5),
            record(3, "earlier.jpg", &[], &[], 1),
        ];
        let view = compute_view(&master, &BTreeSet::new(), "");
        let ids: Vec<i64> = bucket(&view, CATCH_ALL_LABEL)
            .unwrap()
            .images
            .iter()
            .map(|img| img.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn empty_reasons_are_distinguished() {
        let view = compute_view(&[], &BTreeSet::new(), "");
        assert_eq!(view.empty, Some(EmptyReason::EmptyCollection));

        let master = vec![record(1, "a.jpg", &[], &[], 0)];
        let view = compute_view(&master, &BTreeSet::new(), "nada disso");
        assert_eq!(view.empty, Some(EmptyReason::NoMatches));

        let view = compute_view(&master, &tag_set(&["inexistente"]), "");
        assert_eq!(view.empty, Some(EmptyReason::NoMatches));
    }

    #[test]
    fn expansion_policy_follows_filters() {
        let master = vec![
            record(1, "a.jpg", &["doc"], &["Panceri"], 0),
            record(2, "b.jpg", &[], &[], 0),
        ];

        // No filter: only the catch-all starts expanded.
        let view = compute_view(&master, &BTreeSet::new(), "");
        assert!(!bucket(&view, "Panceri").unwrap().start_expanded);
        assert!(bucket(&view, CATCH_ALL_LABEL).unwrap().start_expanded);

        // Active tag filter: surviving buckets start expanded.
        let view = compute_view(&master, &tag_set(&["doc"]), "");
        assert!(view.filter_active);
        assert!(bucket(&view, "Panceri").unwrap().start_expanded);
        assert!(bucket(&view, CATCH_ALL_LABEL).unwrap().start_expanded);
    }

    #[test]
    fn empty_buckets_are_omitted() {
        let master = vec![record(1, "a.jpg", &[], &["Panceri"], 0)];
        let view = compute_view(&master, &BTreeSet::new(), "");
        assert!(bucket(&view, "Pompeia").is_none());
        assert!(bucket(&view, "Scavino & Bertuzzi").is_none());
        assert_eq!(view.buckets.len(), 2);
    }

    #[test]
    fn unique_tags_are_trimmed_sorted_and_deduplicated() {
        let master = vec![
            record(1, "a.jpg", &["fábrica", "doc "], &[], 0),
            record(2, "b.jpg", &["doc", "família"], &[], 0),
        ];
        assert_eq!(unique_tags(&master), vec!["doc", "fábrica", "família"]);
    }
}
