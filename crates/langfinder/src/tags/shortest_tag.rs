//! Shortest tag resolution
//!
//! Maps any known variant of a language tag (`uz-Latn-UZ`, `uzn-Latn`, ...) to
//! the canonical shortest tag of its group.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, info};

use crate::models::{RawRegistryEntry, TagGroup};

/// Builds tag groups from the raw registry.
///
/// One group per row carrying a `tag`: the row's `tag` is the shortest form and
/// `tags ∪ {full} ∪ {tag}` are its members. Metadata rows (`_`-prefixed tags)
/// are skipped.
pub fn build_tag_groups(entries: &[RawRegistryEntry]) -> Vec<TagGroup> {
  entries
    .iter()
    .filter_map(|entry| {
      let shortest = entry.tag.as_deref().filter(|t| !t.is_empty() && !t.starts_with('_'))?;
      let all_tags = entry
        .tags
        .iter()
        .chain(&entry.full)
        .map(String::as_str)
        .chain(std::iter::once(shortest))
        .filter(|t| !t.is_empty());
      Some(TagGroup::new(shortest, all_tags))
    })
    .collect()
}

/// Immutable tag → shortest tag lookup.
///
/// Lookups are ASCII case-insensitive. Unknown tags resolve to themselves.
#[derive(Debug, Clone, Default)]
pub struct ShortestTagResolver {
  /// Lowercased tag → shortest tag
  shortest_by_tag: HashMap<String, String>,
}

impl ShortestTagResolver {
  /// Flattens the groups into a lookup table.
  ///
  /// A tag claimed by several groups keeps the shortest tag of the first one.
  pub fn new(groups: &[TagGroup]) -> Self {
    let mut shortest_by_tag: HashMap<String, String> = HashMap::new();

    for group in groups {
      let members = group.all_tags.iter().chain(std::iter::once(&group.shortest));
      for tag in members {
        match shortest_by_tag.entry(tag.to_ascii_lowercase()) {
          Entry::Vacant(slot) => {
            slot.insert(group.shortest.clone());
          }
          Entry::Occupied(slot) if *slot.get() != group.shortest => {
            debug!(
              tag = %tag,
              kept = %slot.get(),
              ignored = %group.shortest,
              "Tag claimed by several groups"
            );
          }
          Entry::Occupied(_) => {}
        }
      }
    }

    info!(groups = groups.len(), tags = shortest_by_tag.len(), "Tag resolver built");
    Self { shortest_by_tag }
  }

  /// Shortest tag of the group containing `tag`, or `tag` itself.
  pub fn resolve<'a>(&'a self, tag: &'a str) -> &'a str {
    self
      .shortest_by_tag
      .get(&tag.to_ascii_lowercase())
      .map(String::as_str)
      .unwrap_or(tag)
  }

  /// Number of known tags
  pub fn len(&self) -> usize {
    self.shortest_by_tag.len()
  }

  /// Whether no tag is known
  pub fn is_empty(&self) -> bool {
    self.shortest_by_tag.is_empty()
  }
}
