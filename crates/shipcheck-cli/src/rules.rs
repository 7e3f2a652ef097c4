//! # Rules Subcommand
//!
//! Lists the catalog in registration order with its fingerprint, so
//! operators can diff rule sets between releases.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use shipcheck_rules::{RuleCatalog, RuleDefinition};

use crate::engine::EngineArgs;
use crate::output::{write_json, OutputFormat};

/// Arguments for `shipcheck rules`.
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct Listing<'a> {
    fingerprint: &'a str,
    rules: Vec<&'a RuleDefinition>,
}

/// Execute `shipcheck rules`.
pub fn run_rules<W: Write>(args: &RulesArgs, out: &mut W) -> Result<u8> {
    let catalog = args.engine.catalog()?;
    match args.format {
        OutputFormat::Text => write_text(&catalog, out)?,
        OutputFormat::Json => write_json(
            out,
            &Listing {
                fingerprint: catalog.fingerprint(),
                rules: catalog.iter().collect(),
            },
        )?,
    }
    Ok(0)
}

fn write_text<W: Write>(catalog: &RuleCatalog, out: &mut W) -> Result<()> {
    let id_width = catalog.iter().map(|r| r.id().len()).max().unwrap_or(0);
    for rule in catalog.iter() {
        let fields: Vec<&str> = rule.field_refs().iter().map(|f| f.as_str()).collect();
        writeln!(
            out,
            "{:<10} {:<6} {:<id_width$}  {}",
            rule.severity().as_str(),
            rule.scope().as_str(),
            rule.id(),
            fields.join(", ")
        )?;
    }
    writeln!(out, "{} rules, fingerprint {}", catalog.len(), catalog.fingerprint())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(format: OutputFormat) -> String {
        let args = RulesArgs {
            engine: EngineArgs::default(),
            format,
        };
        let mut out = Vec::new();
        assert_eq!(run_rules(&args, &mut out).unwrap(), 0);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_listing_in_order() {
        let text = run(OutputFormat::Text);
        let first = text.lines().next().unwrap();
        assert!(first.contains("trade.mode.required"));
        assert!(first.starts_with("critical"));
        assert!(text.lines().last().unwrap().contains("fingerprint"));
    }

    #[test]
    fn test_json_listing() {
        let json: serde_json::Value = serde_json::from_str(&run(OutputFormat::Json)).unwrap();
        assert_eq!(json["fingerprint"].as_str().unwrap().len(), 64);
        let rules = json["rules"].as_array().unwrap();
        assert_eq!(rules[0]["id"], "trade.mode.required");
        assert_eq!(rules[0]["field_refs"][0], "shipment.trade_route.mode");
        assert!(rules.iter().all(|r| r.get("condition").is_none()));
    }
}
