//! # Classify Subcommand
//!
//! Runs the port/region classifier over location codes, for checking a
//! replacement code table before deploying it.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use shipcheck_classify::{Classification, PortClassifier};

use crate::engine::load_tables;
use crate::output::{write_json, OutputFormat};

/// Arguments for `shipcheck classify`.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Location codes (UN/LOCODE, IATA, or free text such as "CN SHA").
    #[arg(required = true, value_name = "CODE")]
    pub codes: Vec<String>,

    /// Replacement code tables (YAML). Defaults to the built-in tables.
    #[arg(long, value_name = "YAML")]
    pub tables: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct Classified<'a> {
    code: &'a str,
    #[serde(flatten)]
    classification: Classification,
}

/// Execute `shipcheck classify`.
pub fn run_classify<W: Write>(args: &ClassifyArgs, out: &mut W) -> Result<u8> {
    let classifier = PortClassifier::new(load_tables(args.tables.as_deref())?);
    let classified: Vec<Classified<'_>> = args
        .codes
        .iter()
        .map(|code| Classified {
            code,
            classification: classifier.classify(code),
        })
        .collect();

    match args.format {
        OutputFormat::Json => write_json(out, &classified)?,
        OutputFormat::Text => {
            let width = args.codes.iter().map(String::len).max().unwrap_or(0);
            for c in &classified {
                writeln!(out, "{:<width$}  {}", c.code, describe(&c.classification))?;
            }
        }
    }
    Ok(0)
}

fn describe(c: &Classification) -> String {
    let kind = match (c.is_seaport, c.is_airport) {
        (true, _) => "seaport",
        (false, true) => "airport",
        (false, false) => "unknown",
    };
    match &c.country {
        Some(country) => format!("{kind} {country}"),
        None => kind.to_string(),
    }
}
