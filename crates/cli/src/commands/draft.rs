use anyhow::{Context as _, Result};

use lapis_templates::load_template;

use crate::context::Context;
use crate::render;

pub fn show(ctx: &Context, json: bool) -> Result<()> {
    let session = ctx.session()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&session.draft)?);
        return Ok(());
    }
    match &session.active_customer {
        Some(id) => println!("Active customer: {id}"),
        None => println!("No active customer"),
    }
    println!();
    render::draft(&session.draft);
    Ok(())
}

pub fn set(ctx: &Context, field: &str, value: &str) -> Result<()> {
    let mut session = ctx.session()?;
    session
        .draft
        .set_field(field, value)
        .with_context(|| format!("cannot set {field}"))?;
    if field == "location" {
        session.draft.production_vars.check_against(&ctx.rates()?)?;
    }
    ctx.save_session(&session)?;
    println!("{field} updated");
    Ok(())
}

pub fn template(ctx: &Context, name: &str) -> Result<()> {
    let template = load_template(name)?;
    let mut session = ctx.session()?;
    template.apply_to(&mut session.draft);
    ctx.save_session(&session)?;
    tracing::info!(template = %template.kind, "template applied");
    println!("Applied the {} template", template.kind);
    Ok(())
}

pub fn reset(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    session.reset_draft();
    ctx.save_session(&session)?;
    println!("Draft reset to defaults");
    Ok(())
}
