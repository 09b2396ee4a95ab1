use anyhow::{Context as _, Result, bail};

use lapis_core::{CustomerId, QuoteId};
use lapis_customers::ProjectRecord;
use lapis_infra::RecordStore;
use lapis_quotes::{NewQuote, QuotePatch, QuoteStatus};

use crate::context::Context;
use crate::render;

pub fn calc(ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let (totals, items) = ctx.price(&session.draft)?;
    render::totals(&totals);
    println!();
    render::line_items(&items);
    Ok(())
}

pub fn save(ctx: &Context, project: Option<String>, customer: Option<CustomerId>) -> Result<QuoteId> {
    let session = ctx.session()?;
    let customer_id = customer
        .or_else(|| session.active_customer.clone())
        .context("no customer selected; pass --customer or run `lapis customer use <ID>`")?;
    if ctx.customers.get(&customer_id)?.is_none() {
        bail!("customer {customer_id} not found");
    }

    let (totals, line_items) = ctx.price(&session.draft)?;
    let quote = ctx.quotes.create(NewQuote {
        customer_id: customer_id.clone(),
        project_name: project.unwrap_or_default(),
        draft: session.draft.clone(),
        totals,
        line_items,
    })?;

    let record = ProjectRecord::new(quote.project_name.clone(), None)
        .with_quote(quote.quote_id.clone(), quote.recommended_quote);
    ctx.customers.add_project(&customer_id, record)?;

    println!("Saved {} for {} ({})", quote.quote_id, customer_id, quote.project_name);
    render::totals(&totals);
    Ok(quote.quote_id)
}

pub fn list(ctx: &Context, customer: Option<CustomerId>) -> Result<()> {
    let quotes = match customer {
        Some(id) => ctx.quotes.list_by_customer(&id)?,
        None => ctx.quotes.list()?,
    };
    render::quote_table(&quotes);
    Ok(())
}

pub fn show(ctx: &Context, id: &QuoteId, json: bool) -> Result<()> {
    let quote = ctx
        .quotes
        .get(id)?
        .with_context(|| format!("quote {id} not found"))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        render::quote(&quote);
    }
    Ok(())
}

pub fn status(ctx: &Context, id: &QuoteId, status: QuoteStatus) -> Result<()> {
    if !ctx.quotes.update_status(id, status)? {
        bail!("quote {id} not found");
    }
    println!("{id} is now {status}");
    Ok(())
}

/// Replace a saved quote's snapshot and totals with the working draft priced
/// under the current rates. Status and creation date are kept.
pub fn update(ctx: &Context, id: &QuoteId, project: Option<String>) -> Result<()> {
    if ctx.quotes.get(id)?.is_none() {
        bail!("quote {id} not found");
    }
    let session = ctx.session()?;
    let (totals, line_items) = ctx.price(&session.draft)?;
    let patch = QuotePatch {
        project_name: project,
        ..QuotePatch::repriced(session.draft, totals, line_items)
    };
    ctx.quotes.update(id, patch)?;
    println!("Re-priced {id}");
    render::totals(&totals);
    Ok(())
}
