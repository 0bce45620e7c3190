/// The named research topics the gallery groups by.
///
/// The set is fixed: the three families the archive documents. Every view
/// additionally carries a catch-all bucket ([`CATCH_ALL_LABEL`]) holding all
/// images that pass the current filters, so membership in a named topic never
/// removes an image from the general listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Panceri,
    Pompeia,
    ScavinoBertuzzi,
}

/// Label of the catch-all bucket rendered after the named topics.
pub const CATCH_ALL_LABEL: &str = "GERAL";

impl Topic {
    /// Display order of the named topic buckets.
    pub const ALL: [Topic; 3] = [Topic::Panceri, Topic::Pompeia, Topic::ScavinoBertuzzi];

    /// The label as it appears in `detected_topics` and in bucket headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Panceri => "Panceri",
            Self::Pompeia => "Pompeia",
            Self::ScavinoBertuzzi => "Scavino & Bertuzzi",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_order_is_stable() {
        let labels: Vec<&str> = Topic::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["Panceri", "Pompeia", "Scavino & Bertuzzi"]);
    }
}
