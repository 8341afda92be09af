//! Grouping of extracted entities by category.

use std::collections::HashMap;

use crate::models::{Entity, EntityGroup};

/// Partition entities into groups keyed by category.
///
/// Groups appear in the order each category is first seen; members keep
/// their original relative order. Single pass, O(n).
pub fn group(entities: &[Entity]) -> Vec<EntityGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<EntityGroup> = Vec::new();

    for entity in entities {
        let slot = *index.entry(entity.category.as_str()).or_insert_with(|| {
            groups.push(EntityGroup {
                category: entity.category.clone(),
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(entity.text.clone());
    }

    groups
}
