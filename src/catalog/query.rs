//! Catalog listing filters
//!
//! Turns the optional `tag` / `q` / `limit` query parameters of
//! `GET /models` into a [`CatalogFilter`] that every store understands.

use serde::Deserialize;

use super::models::CatalogItem;

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIMIT: u32 = 50;

/// Raw query string of `GET /models`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub tag: Option<String>,
    pub q: Option<String>,
    pub limit: Option<u32>,
}

/// Store-independent listing filter.
///
/// `tag` must be contained in the item's tags, `text` must occur
/// case-insensitively in the name or the description, and both apply when
/// both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    pub tag: Option<String>,
    pub text: Option<String>,
    pub limit: u32,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            tag: None,
            text: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<ListQuery> for CatalogFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            tag: query.tag.filter(|t| !t.is_empty()),
            text: query.q.filter(|q| !q.is_empty()),
            limit: query.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }
}

impl CatalogFilter {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Evaluates the filter against a single item.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(tag) = &self.tag {
            if !item.has_tag(tag) {
                return false;
            }
        }

        match &self.text {
            Some(text) => {
                let needle = text.to_lowercase();
                let contains = |field: &str| field.to_lowercase().contains(&needle);
                contains(&item.name) || item.description.as_deref().is_some_and(contains)
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::NewCatalogItem;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn item(name: &str, description: Option<&str>, tags: &[&str]) -> CatalogItem {
        let mut draft = NewCatalogItem::new(name, Decimal::TEN);
        draft.description = description.map(str::to_string);
        draft.tags = tags.iter().map(|t| t.to_string()).collect();
        draft.into_item(name.to_lowercase(), Utc::now())
    }

    #[test]
    fn test_query_defaults_and_blank_params() {
        let filter = CatalogFilter::from(ListQuery {
            tag: Some(String::new()),
            q: Some(String::new()),
            limit: Some(0),
        });
        assert_eq!(filter, CatalogFilter::default());
        assert_eq!(filter.limit, 50);
    }

    #[test]
    fn test_no_filters_match_everything() {
        let filter = CatalogFilter::default();
        assert!(filter.matches(&item("Anything", None, &[])));
    }

    #[test]
    fn test_tag_membership_is_exact() {
        let filter = CatalogFilter::default().with_tag("fantasy");
        assert!(filter.matches(&item("Forest Guardian", None, &["fantasy", "archer"])));
        assert!(!filter.matches(&item("Dark Knight", None, &["Fantasy"])));
        assert!(!filter.matches(&item("Elf", None, &["fantasy-lite"])));
    }

    #[test]
    fn test_text_matches_name_or_description_case_insensitively() {
        let filter = CatalogFilter::default().with_text("neon");
        assert!(filter.matches(&item("Neon Runner", None, &[])));
        assert!(filter.matches(&item("Runner", Some("Glowing NEON accents"), &[])));
        assert!(!filter.matches(&item("Mech Scout", Some("Compact sci-fi mech"), &[])));
    }

    #[test]
    fn test_tag_and_text_combine() {
        let filter = CatalogFilter::default().with_tag("mech").with_text("scout");
        assert!(filter.matches(&item("Mech Scout", None, &["mech"])));
        assert!(!filter.matches(&item("Mech Scout", None, &["sci-fi"])));
        assert!(!filter.matches(&item("Mech Tank", None, &["mech"])));
    }
}
