use serde::{Deserialize, Serialize};

/// One gallery image as delivered by the content server.
///
/// All fields beyond `fileName` are optional on the wire; missing values
/// deserialize to their defaults so a partially filled catalog entry never
/// rejects the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub id: i64,

    /// File name of the image asset, resolved against the static asset prefix.
    #[serde(rename = "fileName")]
    pub file_name: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Free-text sourcing notes backing the image.
    #[serde(default)]
    pub corroboration: Option<String>,

    /// Tag names assigned by the curator, e.g. "doc", "fábrica".
    #[serde(default)]
    pub tags: Vec<String>,

    /// Topic labels detected from the record's text, e.g. "Panceri".
    #[serde(default)]
    pub detected_topics: Vec<String>,

    #[serde(default)]
    pub admin_assigned_section: Option<String>,

    /// Sort key establishing the display sequence. Ties keep payload order.
    #[serde(default)]
    pub chronological_order: i64,
}

impl ImageRecord {
    /// The asset file name with surrounding whitespace removed.
    pub fn trimmed_file_name(&self) -> &str {
        self.file_name.trim()
    }

    /// Caption shown under a thumbnail: the title when present, otherwise the
    /// file name stem with underscores turned into spaces.
    pub fn display_name(&self) -> String {
        if let Some(title) = self.title.as_deref() {
            if !title.is_empty() {
                return title.to_string();
            }
        }
        let stem = self
            .file_name
            .split('.')
            .next()
            .unwrap_or(&self.file_name);
        stem.replace('_', " ")
    }
}

/// One timeline event as delivered by the content server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub section: String,

    #[serde(default)]
    pub sub_section: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub text: String,

    /// Associated image file names; array order is display order and becomes
    /// the navigation order when a thumbnail is opened.
    #[serde(default)]
    pub images: Vec<String>,

    /// Sourcing notes for the event. The wire name keeps the original
    /// Portuguese spelling.
    #[serde(default, rename = "corroboracao")]
    pub corroboration: Option<String>,
}

impl TimelineEvent {
    /// Title line for the event, prefixed with the year when known.
    pub fn heading(&self) -> String {
        let title = if self.title.is_empty() {
            "Evento Sem Título"
        } else {
            &self.title
        };
        match self.year {
            Some(year) => format!("({year}) {title}"),
            None => title.to_string(),
        }
    }

    /// The event's images as viewer items, skipping blank file names.
    ///
    /// Every item carries the event's title and corroboration so the viewer
    /// caption stays meaningful while navigating within the event.
    pub fn viewer_items(&self) -> Vec<ViewerItem> {
        self.images
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| ViewerItem {
                file_name: name.trim().to_string(),
                title: Some(self.title.clone()).filter(|t| !t.is_empty()),
                corroboration: self.corroboration.clone(),
            })
            .collect()
    }
}

/// What the image viewer actually navigates: a file name plus caption text.
///
/// Built from either a gallery record or a timeline event, so the viewer does
/// not care where its scoped list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerItem {
    pub file_name: String,
    pub title: Option<String>,
    pub corroboration: Option<String>,
}

impl ViewerItem {
    /// Caption line: the title when present, otherwise "Fonte: <file>".
    pub fn caption(&self) -> String {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!("Fonte: {}", self.file_name),
        }
    }
}

impl From<&ImageRecord> for ViewerItem {
    fn from(record: &ImageRecord) -> Self {
        Self {
            file_name: record.trimmed_file_name().to_string(),
            title: record.title.clone().filter(|t| !t.is_empty()),
            corroboration: record.corroboration.clone(),
        }
    }
}
