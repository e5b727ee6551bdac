//! Tag resolution across feature, rule, scenario and examples levels.

/// An ordered set of tags without duplicates.
///
/// Iteration follows first insertion. Tags are stored without their `@`
/// sigil.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag unless it is already present. Returns whether it was added.
    ///
    /// The leading sigil is stripped first; tags that are empty afterwards
    /// are ignored.
    pub fn insert(&mut self, raw: &str) -> bool {
        let tag = normalize_tag(raw);
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Add every tag from `raw`, in order.
    pub fn extend<I, S>(&mut self, raw: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in raw {
            self.insert(tag.as_ref());
        }
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Strip surrounding whitespace and one leading `@`.
///
/// # Examples
/// ```
/// use gherkin_junit::tags::normalize_tag;
///
/// assert_eq!(normalize_tag("@smoke"), "smoke");
/// assert_eq!(normalize_tag("smoke"), "smoke");
/// ```
#[must_use]
pub fn normalize_tag(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}

/// Tags declared at each nesting level of one generated test case.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagSources<'a> {
    pub feature: &'a [String],
    pub rule: &'a [String],
    pub scenario: &'a [String],
    pub examples: &'a [String],
    pub extra: Option<&'a str>,
}

/// Union the tags of every level into one ordered set.
///
/// Order: feature, rule, scenario or outline, examples block, then the
/// configured extra tag. A tag seen at an outer level keeps its position.
///
/// # Examples
/// ```
/// use gherkin_junit::tags::{resolve_tags, TagSources};
///
/// let feature = vec!["@auth".to_string()];
/// let scenario = vec!["@smoke".to_string(), "@auth".to_string()];
/// let tags = resolve_tags(TagSources {
///     feature: &feature,
///     scenario: &scenario,
///     extra: Some("nightly"),
///     ..TagSources::default()
/// });
/// assert_eq!(tags.iter().collect::<Vec<_>>(), ["auth", "smoke", "nightly"]);
/// ```
#[must_use]
pub fn resolve_tags(sources: TagSources<'_>) -> TagSet {
    let mut tags = TagSet::new();
    tags.extend(sources.feature);
    tags.extend(sources.rule);
    tags.extend(sources.scenario);
    tags.extend(sources.examples);
    if let Some(extra) = sources.extra {
        tags.insert(extra);
    }
    tags
}
