use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod render;

use cli::{Commands, CustomerCommands, DraftCommands, ExportCommands, QuoteCommands, RatesCommands};
use commands::export::ExportFormat;
use context::Context;
use lapis_infra::AppConfig;
use lapis_observability::LogConfig;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    lapis_observability::init(&LogConfig {
        format: args.log_format.unwrap_or_default(),
        ..LogConfig::default()
    });

    let mut config = AppConfig::from_env(args.data_dir.clone());
    if let Some(format) = args.log_format {
        config.log_format = format;
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
    let ctx = Context::new(config);

    match args.command {
        Commands::Draft { action } => match action {
            DraftCommands::Show { json } => commands::draft::show(&ctx, json)?,
            DraftCommands::Set { field, value } => commands::draft::set(&ctx, &field, &value)?,
            DraftCommands::Template { name } => commands::draft::template(&ctx, &name)?,
            DraftCommands::Reset => commands::draft::reset(&ctx)?,
        },
        Commands::Quote { action } => match action {
            QuoteCommands::Calc => commands::quote::calc(&ctx)?,
            QuoteCommands::Save { project, customer } => {
                commands::quote::save(&ctx, project, customer)?;
            }
            QuoteCommands::List { customer } => commands::quote::list(&ctx, customer)?,
            QuoteCommands::Show { id, json } => commands::quote::show(&ctx, &id, json)?,
            QuoteCommands::Status { id, status } => commands::quote::status(&ctx, &id, status)?,
            QuoteCommands::Update { id, project } => commands::quote::update(&ctx, &id, project)?,
        },
        Commands::Rates { action } => match action {
            RatesCommands::Show { json } => commands::rates::show(&ctx, json)?,
            RatesCommands::Set { path, value } => commands::rates::set(&ctx, &path, value)?,
            RatesCommands::Import { file } => commands::rates::import(&ctx, &file)?,
            RatesCommands::Reset => commands::rates::reset(&ctx)?,
        },
        Commands::Customer { action } => match action {
            CustomerCommands::Add(new) => {
                commands::customer::add(&ctx, new)?;
            }
            CustomerCommands::List => commands::customer::list(&ctx)?,
            CustomerCommands::Show { id } => commands::customer::show(&ctx, &id)?,
            CustomerCommands::Search { query } => commands::customer::search(&ctx, &query)?,
            CustomerCommands::Edit(edit) => commands::customer::edit(&ctx, edit)?,
            CustomerCommands::Delete { id } => {
                commands::customer::delete(&ctx, &id)?;
            }
            CustomerCommands::Use { id, clear: _ } => commands::customer::use_customer(&ctx, id)?,
            CustomerCommands::History { id } => commands::customer::history(&ctx, &id)?,
        },
        Commands::Export { format } => match format {
            ExportCommands::Html(export) => commands::export::run(&ctx, ExportFormat::Html, export)?,
            ExportCommands::Csv(export) => commands::export::run(&ctx, ExportFormat::Csv, export)?,
        },
    }

    Ok(())
}
