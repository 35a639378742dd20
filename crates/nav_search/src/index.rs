//! Annotated link groups and the link-group filter

use catalog_store::{Link, LinkGroup};
use tracing::debug;

use crate::phonetic::{PhoneticCache, PhoneticKey};
use crate::query::SearchQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedLink {
    pub link: Link,
    pub phonetic: PhoneticKey,
}

impl IndexedLink {
    /// Name (raw, pinyin or initials) or url match
    pub fn matches(&self, query: &SearchQuery) -> bool {
        query.matches_text(&self.link.name, &self.phonetic)
            || query.matches_tokens(&self.link.url)
            || query.matches_url(&self.link.url)
    }
}

/// A link group with phonetic annotations for its name and every link name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedGroup {
    pub group: LinkGroup,
    pub phonetic: PhoneticKey,
    pub links: Vec<IndexedLink>,
}

impl IndexedGroup {
    pub fn category_matches(&self, query: &SearchQuery) -> bool {
        query.matches_text(&self.group.category, &self.phonetic)
    }
}

/// One group in a result set; `group.links` holds only the retained links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHit {
    pub group: LinkGroup,
    /// The group name itself matched, so every link was kept
    pub category_matched: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub query: SearchQuery,
    pub hits: Vec<GroupHit>,
}

impl SearchResults {
    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }

    /// Number of links across all hits
    pub fn total_links(&self) -> usize {
        self.hits.iter().map(|h| h.group.links.len()).sum()
    }

    pub fn groups(&self) -> impl Iterator<Item = &LinkGroup> {
        self.hits.iter().map(|h| &h.group)
    }

    pub fn in_category<'a>(&'a self, main_category_id: &'a str) -> impl Iterator<Item = &'a LinkGroup> {
        self.groups()
            .filter(move |g| g.main_category == main_category_id)
    }
}

/// Filter annotated groups by a query. A matching group name keeps all of
/// its links; otherwise only matching links survive and groups left empty
/// are dropped. Input order is preserved.
pub fn filter_link_groups(query: &SearchQuery, groups: &[IndexedGroup]) -> Vec<GroupHit> {
    if query.is_empty() {
        return groups
            .iter()
            .map(|g| GroupHit {
                group: g.group.clone(),
                category_matched: false,
            })
            .collect();
    }

    groups
        .iter()
        .filter_map(|indexed| {
            if indexed.category_matches(query) {
                return Some(GroupHit {
                    group: indexed.group.clone(),
                    category_matched: true,
                });
            }

            let links: Vec<Link> = indexed
                .links
                .iter()
                .filter(|l| l.matches(query))
                .map(|l| l.link.clone())
                .collect();
            if links.is_empty() {
                return None;
            }

            Some(GroupHit {
                group: LinkGroup {
                    links,
                    ..indexed.group.clone()
                },
                category_matched: false,
            })
        })
        .collect()
}

/// Annotated copy of the catalog's link groups, rebuilt on data change
#[derive(Debug, Default)]
pub struct SearchIndex {
    groups: Vec<IndexedGroup>,
    cache: PhoneticCache,
}

impl SearchIndex {
    pub fn new(groups: &[LinkGroup]) -> Self {
        let mut index = Self::default();
        index.rebuild(groups);
        index
    }

    /// Re-annotate after a catalog change. Texts seen before reuse their
    /// cached annotation; texts no longer present are evicted.
    pub fn rebuild(&mut self, groups: &[LinkGroup]) {
        let cache = &mut self.cache;
        self.groups = groups
            .iter()
            .map(|group| IndexedGroup {
                phonetic: cache.key_for(&group.category),
                links: group
                    .links
                    .iter()
                    .map(|link| IndexedLink {
                        phonetic: cache.key_for(&link.name),
                        link: link.clone(),
                    })
                    .collect(),
                group: group.clone(),
            })
            .collect();

        cache.retain_texts(groups.iter().flat_map(|g| {
            std::iter::once(g.category.as_str()).chain(g.links.iter().map(|l| l.name.as_str()))
        }));
        debug!(
            "Search index rebuilt: {} groups, {} cached annotations",
            self.groups.len(),
            cache.len()
        );
    }

    pub fn groups(&self) -> &[IndexedGroup] {
        &self.groups
    }

    pub fn cache(&self) -> &PhoneticCache {
        &self.cache
    }

    pub fn search(&self, raw_query: &str) -> SearchResults {
        let query = SearchQuery::parse(raw_query);
        let hits = filter_link_groups(&query, &self.groups);
        SearchResults { query, hits }
    }
}
