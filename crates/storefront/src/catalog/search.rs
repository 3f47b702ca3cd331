//! Client-side product search filter.

use shopfront_core::Product;

/// Free-text query plus an optional category restriction.
///
/// The query matches case-insensitively as a substring of the name,
/// description, category, brand, color or any tag. A blank query matches
/// everything. The category, when set, must equal the product's category
/// exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: String,
    category: Option<String>,
}

impl SearchFilter {
    #[must_use]
    pub fn new(query: &str, category: Option<&str>) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && &product.category != category
        {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        product
            .searchable_text()
            .any(|text| text.to_lowercase().contains(&self.query))
    }

    /// Matching products, in input order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use shopfront_core::ProductId;

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.search(&SearchFilter::new("  ", None)).len(), catalog.len());
    }

    #[test]
    fn test_query_is_case_insensitive_across_fields() {
        let catalog = Catalog::builtin().unwrap();

        // name
        assert_eq!(ids(&catalog.search(&SearchFilter::new("DENIM", None))), vec![2]);
        // brand
        assert_eq!(ids(&catalog.search(&SearchFilter::new("stride", None))), vec![3]);
        // tag
        assert_eq!(
            ids(&catalog.search(&SearchFilter::new("sport", None))),
            vec![3, 8, 12]
        );
        // color
        assert_eq!(ids(&catalog.search(&SearchFilter::new("olive", None))), vec![5]);
        // description
        assert_eq!(ids(&catalog.search(&SearchFilter::new("sapphire", None))), vec![6]);
    }

    #[test]
    fn test_category_filter_is_exact_and_intersects() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(
            ids(&catalog.search(&SearchFilter::new("", Some("shoes")))),
            vec![3, 4]
        );
        assert_eq!(
            ids(&catalog.search(&SearchFilter::new("winter", Some("accessories")))),
            vec![11]
        );
        assert!(catalog.search(&SearchFilter::new("", Some("Shoes"))).is_empty());
    }

    #[test]
    fn test_blank_category_means_no_filter() {
        let filter = SearchFilter::new("mug", Some("   "));
        assert_eq!(filter, SearchFilter::new("mug", None));
    }

    #[test]
    fn test_no_match() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.search(&SearchFilter::new("spaceship", None)).is_empty());
        assert!(catalog.get(ProductId::new(999)).is_none());
    }
}
