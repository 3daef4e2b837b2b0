use std::collections::HashMap;
use std::time::SystemTime;

use derive_more::{AsRef, Display, From};

/// A matched note file inside a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    name: String,
    timestamp: SystemTime,
}

impl Note {
    pub fn new(name: impl Into<String>, timestamp: SystemTime) -> Self {
        Self {
            name: name.into(),
            timestamp,
        }
    }

    /// File name including the extension, relative to the containing topic
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

/// Directory name identifying a sub-tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, AsRef)]
#[as_ref(str)]
pub struct Topic(String);

impl From<&str> for Topic {
    fn from(name: &str) -> Self {
        Topic(name.to_string())
    }
}

/// One directory level of the index. Each entry owns its sub-topics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    notes: Vec<Note>,
    sub_topics: HashMap<Topic, Entry>,
}

impl Entry {
    pub fn push_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Returns the sub-topic for `topic`, creating an empty one on first use.
    pub fn sub_topic_mut(&mut self, topic: Topic) -> &mut Entry {
        self.sub_topics.entry(topic).or_default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[cfg(test)]
    pub fn sub_topic(&self, topic: &str) -> Option<&Entry> {
        self.sub_topics.get(&Topic::from(topic))
    }

    pub fn sub_topics_iter(&self) -> impl Iterator<Item = (&Topic, &Entry)> {
        self.sub_topics.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.sub_topics.is_empty()
    }

    /// Number of notes in this entry and every descendant
    pub fn note_count(&self) -> usize {
        self.notes.len()
            + self
                .sub_topics
                .values()
                .map(Entry::note_count)
                .sum::<usize>()
    }

    /// Number of descendant topics, not counting this entry
    pub fn topic_count(&self) -> usize {
        self.sub_topics.len()
            + self
                .sub_topics
                .values()
                .map(Entry::topic_count)
                .sum::<usize>()
    }
}
