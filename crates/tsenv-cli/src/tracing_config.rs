//! Log output for `tsenv`.
//!
//! `TSENV_LOG` takes `EnvFilter` directives, so the resolver can be traced on
//! its own with `TSENV_LOG=tsenv_types::resolver=trace`. `TSENV_LOG_FORMAT`
//! picks `text`, `tree` (span nesting of a spec load) or `json`. Without
//! `TSENV_LOG` or `RUST_LOG` no subscriber is installed.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "TSENV_LOG";
const FORMAT_VAR: &str = "TSENV_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unrecognized values fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(FORMAT_VAR).unwrap_or_default())
    }
}

/// `TSENV_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_VAR) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Events go to stderr; stdout carries the summary and catalog listings.
pub fn init_tracing() {
    if std::env::var(LOG_VAR).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
