//! Command-line attribute evaluator.
//!
//! Loads static data and effects from a data directory, builds the fit a
//! description file names, and prints the computed attributes of every item.
//!
//! ```bash
//! cargo run -p dogma-cli -- --data crates/dogma/content/data --fit proteus_skirmish.ron
//! RUST_LOG=dogma=debug cargo run -p dogma-cli -- --fit proteus_skirmish.ron --format json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dogma_content::ContentFactory;
use dogma_core::{AttributeId, AttributeOracle, DogmaEngine, DogmaEnv, ItemId};
use serde_json::json;

/// Evaluate the attributes of a ship fit
#[derive(Parser)]
#[command(name = "dogma")]
#[command(about = "Computes modified attributes of a ship fit", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding types.ron, attributes.ron, effects.ron and dogma.toml
    #[arg(short, long, value_name = "DIR", default_value = "crates/dogma/content/data")]
    data: PathBuf,

    /// Fit description (RON); relative names are looked up in DIR/fits first
    #[arg(short, long, value_name = "FILE")]
    fit: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per attribute
    Summary,
    /// Every modified attribute with the modifiers acting on it
    Breakdown,
    /// JSON document
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let factory = ContentFactory::new(&cli.data);

    let snapshot = factory.load_static()?;
    let registry = factory.load_registry()?;
    ContentFactory::check_effects(&snapshot.types, &registry)?;
    let config = factory.load_config()?;
    let description = factory.load_fit(&cli.fit)?;

    let mut engine =
        DogmaEngine::with_config(DogmaEnv::from_snapshot(&snapshot, &registry), config);
    let fitted = description.apply(&mut engine)?;
    tracing::info!(items = fitted.len(), "fit built");

    match cli.format {
        OutputFormat::Summary => print_summary(&mut engine, &fitted)?,
        OutputFormat::Breakdown => print_breakdown(&mut engine, &fitted)?,
        OutputFormat::Json => print_json(&mut engine, &fitted)?,
    }

    for cycle in engine.diagnostics().cycles() {
        tracing::warn!(length = cycle.path.len(), "attribute cycle: {:?}", cycle.path);
    }
    Ok(())
}

fn attribute_label(engine: &DogmaEngine<'_>, attribute: AttributeId) -> (String, &'static str) {
    match engine.env().attributes().attribute(attribute) {
        Some(definition) => (definition.name.clone(), definition.unit.suffix()),
        None => (attribute.to_string(), ""),
    }
}

fn print_summary(engine: &mut DogmaEngine<'_>, fitted: &[(String, ItemId)]) -> Result<()> {
    for (name, item) in fitted {
        println!("{} [{}]", name, item);
        for attribute in engine.attribute_ids(*item)? {
            let value = engine.get(*item, attribute)?;
            let base = engine.get_base(*item, attribute)?;
            let (label, suffix) = attribute_label(engine, attribute);
            if value == base {
                println!("  {:<36} {}{}", label, value, suffix);
            } else {
                println!("  {:<36} {}{} (base {})", label, value, suffix, base);
            }
        }
    }
    Ok(())
}

fn print_breakdown(engine: &mut DogmaEngine<'_>, fitted: &[(String, ItemId)]) -> Result<()> {
    for (name, item) in fitted {
        for attribute in engine.attribute_ids(*item)? {
            let breakdown = engine.breakdown(*item, attribute)?;
            if !breakdown.is_modified() {
                continue;
            }
            let (label, _) = attribute_label(engine, attribute);
            println!("{} / {}", name, label);
            print!("{}", breakdown);
        }
    }
    Ok(())
}

fn print_json(engine: &mut DogmaEngine<'_>, fitted: &[(String, ItemId)]) -> Result<()> {
    let mut items = Vec::with_capacity(fitted.len());
    for (name, item) in fitted {
        let mut attributes = serde_json::Map::new();
        for attribute in engine.attribute_ids(*item)? {
            let value = engine.get(*item, attribute)?;
            let (label, _) = attribute_label(engine, attribute);
            attributes.insert(label, json!(value));
        }
        items.push(json!({
            "id": item,
            "name": name,
            "attributes": attributes,
        }));
    }

    let cycles: Vec<_> = engine.diagnostics().cycles().collect();
    let document = json!({
        "items": items,
        "cycles": cycles,
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
