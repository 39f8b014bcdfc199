//! Cluster grouping
//!
//! Partitions classified resources by category. Declaration order is kept
//! within each category; a category without members is absent rather than
//! present-and-empty.

use std::collections::BTreeMap;

use super::classifier::{classify, Category};
use super::extractor::ResourceDeclaration;

/// Resources partitioned by [`Category`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterGroup {
    groups: BTreeMap<Category, Vec<ResourceDeclaration>>,
}

impl ClusterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and group resources in one pass
    pub fn from_resources<'a, I>(resources: I) -> Self
    where
        I: IntoIterator<Item = &'a ResourceDeclaration>,
    {
        let mut group = Self::new();
        for resource in resources {
            group.insert(resource.clone());
        }
        group
    }

    /// Classify one resource and append it to its category
    pub fn insert(&mut self, resource: ResourceDeclaration) -> Category {
        let category = classify(&resource.resource_type);
        self.groups.entry(category).or_default().push(resource);
        category
    }

    /// Members of a category; `None` when the category has no members
    pub fn get(&self, category: Category) -> Option<&[ResourceDeclaration]> {
        self.groups.get(&category).map(Vec::as_slice)
    }

    /// Non-empty categories in traversal order with their members
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ResourceDeclaration])> {
        self.groups
            .iter()
            .map(|(category, members)| (*category, members.as_slice()))
    }

    /// Categories that have at least one member, in traversal order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.groups.keys().copied()
    }

    /// Total number of grouped resources
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
