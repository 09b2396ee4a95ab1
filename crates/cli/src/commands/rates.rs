use std::path::Path;

use anyhow::{Context as _, Result};

use lapis_infra::json_store::read_json;
use lapis_infra::save_rates;
use lapis_pricing::RateCatalog;

use crate::context::Context;
use crate::render;

pub fn show(ctx: &Context, json: bool) -> Result<()> {
    let catalog = ctx.rates()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        render::catalog(&catalog);
    }
    Ok(())
}

pub fn set(ctx: &Context, path: &str, value: f64) -> Result<()> {
    let mut catalog = ctx.rates()?;
    catalog.set_rate(path, value)?;
    save_rates(&ctx.config.rates_file, &catalog)?;
    println!("{path} = {value}");
    Ok(())
}

pub fn import(ctx: &Context, file: &Path) -> Result<()> {
    let catalog: RateCatalog = read_json(file)?
        .with_context(|| format!("{} is missing or empty", file.display()))?;
    save_rates(&ctx.config.rates_file, &catalog)
        .with_context(|| format!("rejected rate catalog from {}", file.display()))?;
    println!("Imported rates from {}", file.display());
    Ok(())
}

pub fn reset(ctx: &Context) -> Result<()> {
    save_rates(&ctx.config.rates_file, &RateCatalog::default())?;
    println!("Rates restored to built-in defaults");
    Ok(())
}
