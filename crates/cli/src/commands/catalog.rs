//! Local catalog commands.

use shopfront_storefront::catalog::SearchFilter;

use super::{Context, product_row};

/// Print the products matching `query` and `category`.
pub fn products(ctx: &Context, query: &str, category: Option<&str>) {
    let filter = SearchFilter::new(query, category);
    let matches = ctx.catalog.search(&filter);

    for product in &matches {
        println!("{}", product_row(product));
    }
    println!(
        "{} of {} product(s). Categories: {}",
        matches.len(),
        ctx.catalog.len(),
        ctx.catalog.categories().join(", ")
    );
}
