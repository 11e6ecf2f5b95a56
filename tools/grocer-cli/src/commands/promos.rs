//! Promotion code listing.

use anyhow::{bail, Result};

use super::PromosArgs;
use crate::context::Context;

/// Run the promos command.
pub async fn run(args: PromosArgs, ctx: &Context) -> Result<()> {
    let table = ctx.config.promotion_table()?;

    if let Some(code) = args.check {
        let Some(promo) = table.lookup(&code) else {
            bail!("Promo code not recognized: {}", code);
        };
        if ctx.output.is_json() {
            ctx.output.json(promo);
        } else {
            ctx.output
                .success(&format!("{} - {}% off ({})", promo.code, promo.percent, promo.description));
        }
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(&table);
        return Ok(());
    }

    ctx.output.header("Promotion codes");
    for promo in table.iter() {
        let percent = format!("{}%", promo.percent);
        ctx.output.table_row(
            &[promo.code.as_str(), percent.as_str(), promo.description.as_str()],
            &[10, 5, 30],
        );
    }

    Ok(())
}
