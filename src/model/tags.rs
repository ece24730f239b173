//! Bounded, ordered, deduplicated tag list and the keyboard model that edits it.

pub const DEFAULT_MAX_TAGS: usize = 10;

/// Keys the tag editor reacts to. Everything else types into the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Enter,
    Comma,
    Backspace,
    Other,
}

/// Whether the component must suppress the key's default behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    Suppress,
    PassThrough,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagSet {
    tags: Vec<String>,
    max_tags: usize,
}

impl TagSet {
    pub fn new(max_tags: usize) -> Self {
        Self {
            tags: Vec::new(),
            max_tags,
        }
    }

    /// Wrap a list handed down by the host. Blank and repeated entries are dropped
    /// and the list is truncated to `max_tags`.
    pub fn from_tags(tags: impl IntoIterator<Item = String>, max_tags: usize) -> Self {
        let mut set = Self::new(max_tags);
        for tag in tags {
            set.add(&tag);
        }
        set
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn max_tags(&self) -> usize {
        self.max_tags
    }

    pub fn is_full(&self) -> bool {
        self.tags.len() >= self.max_tags
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    /// Append the trimmed text. Returns `false` for blank, duplicate or over-capacity input.
    pub fn add(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.contains(trimmed) || self.is_full() {
            return false;
        }
        self.tags.push(trimmed.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|existing| existing == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_last(&mut self) -> Option<String> {
        self.tags.pop()
    }

    /// Commit the draft as a tag. The draft is always cleared, accepted or not.
    pub fn commit_draft(&mut self, draft: &mut String) -> bool {
        let added = self.add(draft);
        draft.clear();
        added
    }

    /// Commit on focus leaving the editor. Blank drafts are left untouched.
    pub fn commit_on_blur(&mut self, draft: &mut String) -> bool {
        if draft.trim().is_empty() {
            return false;
        }
        self.commit_draft(draft)
    }

    pub fn handle_key(&mut self, draft: &mut String, key: TagKey) -> KeyEffect {
        match key {
            TagKey::Enter | TagKey::Comma => {
                self.commit_draft(draft);
                KeyEffect::Suppress
            }
            TagKey::Backspace if draft.is_empty() && !self.is_empty() => {
                self.remove_last();
                KeyEffect::PassThrough
            }
            TagKey::Backspace | TagKey::Other => KeyEffect::PassThrough,
        }
    }
}

impl Default for TagSet {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TAGS)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyEffect, TagKey, TagSet, DEFAULT_MAX_TAGS};

    fn set_of(tags: &[&str], max: usize) -> TagSet {
        TagSet::from_tags(tags.iter().map(|t| t.to_string()), max)
    }

    #[test]
    fn default_capacity_is_ten() {
        assert_eq!(TagSet::default().max_tags(), DEFAULT_MAX_TAGS);
        assert_eq!(DEFAULT_MAX_TAGS, 10);
    }

    #[test]
    fn same_trimmed_text_is_never_duplicated() {
        let mut set = TagSet::new(5);
        assert!(set.add("khushu"));
        assert!(!set.add("  khushu "));
        assert!(!set.add("khushu"));
        assert_eq!(set.tags(), ["khushu"]);
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut set = TagSet::new(5);
        assert!(!set.add(""));
        assert!(!set.add("   \t"));
        assert!(set.is_empty());
    }

    #[test]
    fn capacity_blocks_commits_until_removal() {
        let mut set = set_of(&["a", "b", "c"], 3);
        assert!(set.is_full());
        let mut draft = "d".to_string();
        assert!(!set.commit_draft(&mut draft));
        assert!(draft.is_empty());
        assert_eq!(set.len(), 3);

        assert!(set.remove("b"));
        assert!(!set.is_full());
        let mut draft = "d".to_string();
        assert!(set.commit_draft(&mut draft));
        assert_eq!(set.tags(), ["a", "c", "d"]);
    }

    #[test]
    fn remove_missing_tag_is_noop() {
        let mut set = set_of(&["a"], 3);
        assert!(!set.remove("z"));
        assert_eq!(set.tags(), ["a"]);
    }

    #[test]
    fn enter_and_comma_commit_and_suppress() {
        let mut set = TagSet::new(5);
        let mut draft = " tajweed ".to_string();
        assert_eq!(set.handle_key(&mut draft, TagKey::Enter), KeyEffect::Suppress);
        assert!(draft.is_empty());

        let mut draft = "tarteel".to_string();
        assert_eq!(set.handle_key(&mut draft, TagKey::Comma), KeyEffect::Suppress);
        assert_eq!(set.tags(), ["tajweed", "tarteel"]);
    }

    #[test]
    fn whitespace_draft_is_cleared_without_commit() {
        let mut set = TagSet::new(5);
        let mut draft = "   ".to_string();
        assert_eq!(set.handle_key(&mut draft, TagKey::Enter), KeyEffect::Suppress);
        assert!(draft.is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn backspace_on_empty_draft_removes_last_tag() {
        let mut set = set_of(&["first", "second", "third"], 5);
        let mut draft = String::new();
        assert_eq!(
            set.handle_key(&mut draft, TagKey::Backspace),
            KeyEffect::PassThrough
        );
        assert_eq!(set.tags(), ["first", "second"]);
    }

    #[test]
    fn backspace_with_draft_edits_text_only() {
        let mut set = set_of(&["first"], 5);
        let mut draft = "x".to_string();
        set.handle_key(&mut draft, TagKey::Backspace);
        assert_eq!(set.tags(), ["first"]);
        assert_eq!(draft, "x");
    }

    #[test]
    fn backspace_on_empty_set_does_nothing() {
        let mut set = TagSet::new(5);
        let mut draft = String::new();
        set.handle_key(&mut draft, TagKey::Backspace);
        assert!(set.is_empty());
    }

    #[test]
    fn blur_commits_pending_text() {
        let mut set = TagSet::new(5);
        let mut draft = "murattal".to_string();
        assert!(set.commit_on_blur(&mut draft));
        assert_eq!(set.tags(), ["murattal"]);

        let mut blank = "  ".to_string();
        assert!(!set.commit_on_blur(&mut blank));
        assert_eq!(blank, "  ");
    }

    #[test]
    fn leaving_twice_commits_once() {
        let mut set = set_of(&["tajweed"], 5);
        let mut draft = " khushoo ".to_string();
        assert!(set.commit_on_blur(&mut draft));
        assert!(draft.is_empty());
        assert!(!set.commit_on_blur(&mut draft));
        assert_eq!(set.tags(), ["tajweed", "khushoo"]);
    }

    #[test]
    fn from_tags_normalises_host_input() {
        let set = set_of(&["a", " a ", "", "b", "c"], 2);
        assert_eq!(set.tags(), ["a", "b"]);
    }
}
