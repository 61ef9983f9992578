use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tsenv_reader::{NullRecordPolicy, ReaderOptions};

/// CLI arguments for the tsenv binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsenv",
    version,
    about = "Load and inspect a serialized TypeScript environment spec"
)]
pub struct CliArgs {
    /// Path to the spec JSON file.
    pub spec: PathBuf,

    /// Reader options as a JSON file (`requireFlatGlobals`, `nullRecords`).
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Keep multi-segment global names instead of failing the load.
    #[arg(long = "allow-qualified-globals")]
    pub allow_qualified_globals: bool,

    /// Leave `null` records unregistered instead of failing the load.
    #[arg(long = "skip-null-records")]
    pub skip_null_records: bool,

    /// Print every entry of a catalog.
    #[arg(long, value_enum)]
    pub list: Option<CatalogArg>,

    /// Look up a named type by dotted path, e.g. `NodeJS.Process`.
    #[arg(long)]
    pub lookup: Vec<String>,

    /// Emit the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CatalogArg {
    Globals,
    Types,
    Ambient,
}

impl CliArgs {
    /// Options file first, then flags on top.
    pub fn reader_options(&self) -> Result<ReaderOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read options file {}", path.display()))?;
                ReaderOptions::from_json(&text)
                    .with_context(|| format!("invalid options file {}", path.display()))?
            }
            None => ReaderOptions::default(),
        };
        if self.allow_qualified_globals {
            options.require_flat_globals = false;
        }
        if self.skip_null_records {
            options.null_records = NullRecordPolicy::Skip;
        }
        Ok(options)
    }
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
