use anyhow::Context;
use lode_config::LodeConfig;
use lode_core::entities::Query;
use lode_engine::Controller;

use crate::cli::{AskArgs, ClearCacheArgs, Commands, KbArgs, OutputFormat};
use crate::output;

/// Build the controller from config and run one command.
pub async fn dispatch(
    command: Commands,
    format: OutputFormat,
    config: &LodeConfig,
) -> anyhow::Result<()> {
    let controller = Controller::from_config(config)
        .await
        .context("failed to initialize the answering pipeline")?;

    match command {
        Commands::Ask(args) => ask(&controller, &args, format, config).await,
        Commands::ClearCache(args) => clear_cache(&controller, &args, format, config).await,
        Commands::Kb(args) => kb(&controller, &args, format).await,
        Commands::Status => output::print(&controller.system_status().await, format),
    }
}

async fn ask(
    controller: &Controller,
    args: &AskArgs,
    format: OutputFormat,
    config: &LodeConfig,
) -> anyhow::Result<()> {
    let mut query = Query::new(args.text())
        .with_submode(
            args.style
                .clone()
                .unwrap_or_else(|| config.pipeline.default_submode.clone()),
        )
        .with_format(args.format.unwrap_or(config.pipeline.default_format));
    if let Some(user) = &args.user {
        query = query.with_user(user.clone());
    }

    let response = controller.process_query(&query).await;
    tracing::debug!(
        status = %response.status,
        cache_hit = response.cache_hit,
        ms = response.processing_ms,
        "query answered"
    );

    match format {
        OutputFormat::Text => {
            println!("{}", output::answer_text(&response));
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output::print(&response, format),
    }
}

async fn clear_cache(
    controller: &Controller,
    args: &ClearCacheArgs,
    format: OutputFormat,
    config: &LodeConfig,
) -> anyhow::Result<()> {
    let days = args.days.unwrap_or(config.store.retention_days);
    let removed = controller.clear_cache(days).await?;
    match format {
        OutputFormat::Text => {
            println!("removed {removed} cached answer(s) older than {days} day(s)");
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => {
            output::print(&serde_json::json!({ "removed": removed, "days": days }), format)
        }
    }
}

async fn kb(controller: &Controller, args: &KbArgs, format: OutputFormat) -> anyhow::Result<()> {
    let concepts = controller.search_knowledge_base(&args.term, args.limit).await?;
    match format {
        OutputFormat::Text => {
            if concepts.is_empty() {
                println!("(no concepts)");
            }
            for concept in &concepts {
                println!(
                    "{:<30} {:>5.2}  {}",
                    concept.concept, concept.popularity, concept.definition
                );
            }
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output::print(&concepts, format),
    }
}
