use crate::application::data::TimestampZone;
use crate::ext::SystemTimeExt;
use crate::filesystem::{Entry, Note, Topic};

pub const DEFAULT_TITLE: &str = "Notes";

/// Depth of the first level of sub-topic headings
const ROOT_DEPTH: usize = 2;
const HEADING_MARKER: &str = "#";
const LINK_SEPARATOR: &str = "/";

/// Turns a note tree into a markdown index.
#[derive(Debug, Clone)]
pub struct Renderer {
    suffix: String,
    title: String,
    zone: TimestampZone,
}

impl Renderer {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            title: DEFAULT_TITLE.to_string(),
            zone: TimestampZone::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_zone(mut self, zone: TimestampZone) -> Self {
        self.zone = zone;
        self
    }

    /// Renders the whole document: the title line followed by the tree.
    pub fn render(&self, root: &Entry) -> String {
        let mut document = format!("{HEADING_MARKER} {}\n", self.title);
        document.push_str(&self.emit(root, "", ROOT_DEPTH));
        document
    }

    /// Renders the notes of `entry`, then one heading and sub-tree per
    /// sub-topic, with sub-topics one level deeper than `depth`.
    fn emit(&self, entry: &Entry, path_prefix: &str, depth: usize) -> String {
        let indent = " ".repeat(depth);
        let mut fragment = String::new();

        let mut notes: Vec<&Note> = entry.notes().iter().collect();
        notes.sort_by(|a, b| a.name().cmp(b.name()));
        for note in notes {
            fragment.push_str(&format!(
                "{indent}- [{}]({}) [{}]\n",
                self.display_name(note),
                join_link(path_prefix, note.name()),
                note.timestamp().format_date(self.zone)
            ));
        }

        let mut sub_topics: Vec<(&Topic, &Entry)> = entry.sub_topics_iter().collect();
        sub_topics.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (topic, sub_entry) in sub_topics {
            let sub_prefix = join_link(path_prefix, topic.as_ref());
            fragment.push_str(&format!(
                "\n{indent}{} {topic}\n",
                HEADING_MARKER.repeat(depth)
            ));
            fragment.push_str(&self.emit(sub_entry, &sub_prefix, depth + 1));
        }

        fragment
    }

    fn display_name<'a>(&self, note: &'a Note) -> &'a str {
        note.name()
            .strip_suffix(self.suffix.as_str())
            .unwrap_or(note.name())
    }
}

/// Joins link segments with `/`, regardless of the host platform.
fn join_link(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{LINK_SEPARATOR}{name}")
    }
}
