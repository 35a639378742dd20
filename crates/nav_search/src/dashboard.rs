//! Dashboard view: main categories with their (filtered) link groups

use std::collections::HashSet;

use catalog_store::{LinkGroup, MainCategory};

use crate::index::SearchResults;

/// Which main categories the user has expanded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a category; returns whether it is expanded afterwards
    pub fn toggle(&mut self, category_id: &str) -> bool {
        if self.expanded.remove(category_id) {
            false
        } else {
            self.expanded.insert(category_id.to_string());
            true
        }
    }

    pub fn expand(&mut self, category_id: impl Into<String>) {
        self.expanded.insert(category_id.into());
    }

    pub fn is_expanded(&self, category_id: &str) -> bool {
        self.expanded.contains(category_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSection {
    pub category: MainCategory,
    pub groups: Vec<LinkGroup>,
    pub expanded: bool,
    /// Groups reference this id but no such category exists; the
    /// category name is the raw id
    pub dangling: bool,
}

/// Lay out search results under their main categories.
///
/// Without a query, categories with no groups are hidden and expansion
/// follows `expansion`. While searching every category is listed and
/// expanded. Groups whose main category is missing are collected into
/// trailing sections named after the raw id.
pub fn build_dashboard(
    categories: &[MainCategory],
    results: &SearchResults,
    expansion: &ExpansionState,
) -> Vec<DashboardSection> {
    let searching = results.is_filtered();

    let mut sections: Vec<DashboardSection> = categories
        .iter()
        .map(|category| DashboardSection {
            groups: results.in_category(&category.id).cloned().collect(),
            expanded: searching || expansion.is_expanded(&category.id),
            category: category.clone(),
            dangling: false,
        })
        .filter(|section| searching || !section.groups.is_empty())
        .collect();

    let known: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();
    for group in results.groups() {
        if known.contains(group.main_category.as_str()) {
            continue;
        }
        match sections
            .iter_mut()
            .find(|s| s.dangling && s.category.id == group.main_category)
        {
            Some(section) => section.groups.push(group.clone()),
            None => sections.push(DashboardSection {
                category: MainCategory::new(
                    group.main_category.clone(),
                    group.main_category.clone(),
                ),
                groups: vec![group.clone()],
                expanded: searching || expansion.is_expanded(&group.main_category),
                dangling: true,
            }),
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SearchIndex;

    fn catalog() -> (Vec<MainCategory>, Vec<LinkGroup>) {
        let categories = vec![
            MainCategory::new("dev-tools", "开发工具"),
            MainCategory::new("empty", "空分类"),
        ];
        let groups = vec![
            LinkGroup::new("开发环境", "dev-tools").with_link("本地开发地址", "http://localhost:3000"),
            LinkGroup::new("旧链接", "removed").with_link("归档", "https://archive.example.com"),
        ];
        (categories, groups)
    }

    #[test]
    fn test_toggle_expansion() {
        let mut expansion = ExpansionState::new();
        assert!(expansion.toggle("dev-tools"));
        assert!(expansion.is_expanded("dev-tools"));
        assert!(!expansion.toggle("dev-tools"));
        assert!(!expansion.is_expanded("dev-tools"));
    }

    #[test]
    fn test_browse_hides_empty_categories() {
        let (categories, groups) = catalog();
        let index = SearchIndex::new(&groups);
        let mut expansion = ExpansionState::new();
        expansion.expand("dev-tools");

        let sections = build_dashboard(&categories, &index.search(""), &expansion);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].category.id, "dev-tools");
        assert!(sections[0].expanded);
        assert!(sections[1].dangling);
        assert_eq!(sections[1].category.name, "removed");
        assert!(!sections[1].expanded);
    }

    #[test]
    fn test_search_shows_and_expands_everything() {
        let (categories, groups) = catalog();
        let index = SearchIndex::new(&groups);

        let sections = build_dashboard(&categories, &index.search("本地"), &ExpansionState::new());

        assert_eq!(sections.len(), 2);
        assert!(sections.iter().all(|s| s.expanded));
        assert_eq!(sections[0].groups.len(), 1);
        assert!(sections[1].groups.is_empty());
        assert_eq!(sections[1].category.id, "empty");
    }
}
