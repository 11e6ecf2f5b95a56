//! Catalog browsing.

use anyhow::{anyhow, Result};
use grocer_core::catalog::{CatalogItem, Category};

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;

    if args.featured {
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({
                "smart_list": catalog.smart_list(),
                "express": catalog.express(),
            }));
            return Ok(());
        }
        ctx.output.header("Smart List");
        print_items(ctx, catalog.smart_list().iter());
        ctx.output.header("Express");
        print_items(ctx, catalog.express().iter());
        return Ok(());
    }

    let category = args
        .category
        .as_deref()
        .map(|c| {
            Category::parse(c).ok_or_else(|| {
                let known: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
                anyhow!("Unknown category: {}. Available: {}", c, known.join(", "))
            })
        })
        .transpose()?;

    let query = args.search.as_deref().unwrap_or("");
    let items: Vec<&CatalogItem> = catalog
        .search(query)
        .filter(|i| category.map_or(true, |c| i.category == c))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output
        .header(&format!("Catalog ({} of {} items)", items.len(), catalog.len()));
    if items.is_empty() {
        ctx.output.info("No items match");
        return Ok(());
    }
    print_items(ctx, items.into_iter());

    Ok(())
}

fn print_items<'a>(ctx: &Context, items: impl Iterator<Item = &'a CatalogItem>) {
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &[14, 28, 10, 12, 5]);
    for item in items {
        ctx.output.catalog_item(item);
    }
}
