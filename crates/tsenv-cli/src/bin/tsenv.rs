#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use tsenv_cli::args::{CatalogArg, CliArgs};
use tsenv_cli::report::{SpecSummary, catalog_lines, describe, split_path};
use tsenv_reader::SpecReader;

fn main() -> Result<()> {
    // Only installs a subscriber when TSENV_LOG or RUST_LOG is set.
    tsenv_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let options = args.reader_options()?;
    debug!(?options, spec = %args.spec.display(), "tsenv");

    let spec = SpecReader::new(options)
        .read_path(&args.spec)
        .with_context(|| format!("failed to load spec {}", args.spec.display()))?;

    let summary = SpecSummary::of(&spec);
    if args.json {
        let text = serde_json::to_string_pretty(&summary)
            .context("failed to encode summary")?;
        println!("{text}");
    } else {
        print!("{}", summary.render_text());
    }

    if let Some(catalog) = args.list {
        let catalog = match catalog {
            CatalogArg::Globals => spec.globals(),
            CatalogArg::Types => spec.types(),
            CatalogArg::Ambient => spec.ambient(),
        };
        for line in catalog_lines(spec.graph(), catalog) {
            println!("{line}");
        }
    }

    for dotted in &args.lookup {
        match spec.lookup(&split_path(dotted)) {
            Some(type_id) => println!("{dotted}\t{}\t{type_id}", describe(spec.graph(), type_id)),
            None => println!("{dotted}\tnot found"),
        }
    }
    Ok(())
}
