//! # Check Subcommand
//!
//! Evaluates one shipment snapshot against the catalog and prints the
//! diagnostics that fired, in catalog order.
//!
//! ```bash
//! shipcheck check shipment.json
//! shipcheck check shipment.json --scope cargo --format json
//! shipcheck check shipment.json --field shipment.trade_route --fail-on warning
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use shipcheck_core::{FieldPath, Scope, Severity, ShipmentState, Timestamp};
use shipcheck_rules::{EvalContext, ResultSet, RuleCatalog, RuleResult, SeverityCounts};

use crate::engine::{load_state, EngineArgs};
use crate::output::{write_json, OutputFormat};

/// Exit status when `--fail-on` is met.
pub const EXIT_THRESHOLD_MET: u8 = 2;

/// Arguments for `shipcheck check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Shipment snapshot (JSON).
    #[arg(value_name = "STATE.json")]
    pub state: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Only report diagnostics in this scope (trade, cargo, seller, buyer, risk).
    #[arg(long)]
    pub scope: Option<Scope>,

    /// Only report diagnostics about this field or anything beneath it.
    #[arg(long, value_name = "PATH")]
    pub field: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 2 if any reported diagnostic is at least this severe.
    #[arg(long, value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,

    /// Evaluate as of this UTC instant (e.g. 2024-05-01T00:00:00Z) instead of now.
    #[arg(long, value_name = "TIMESTAMP")]
    pub at: Option<String>,
}

/// Which results to report.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub scope: Option<Scope>,
    pub field: Option<FieldPath>,
}

impl Selection {
    /// Apply the filters, keeping catalog order.
    pub fn apply<'a>(&self, results: &'a ResultSet) -> Vec<&'a RuleResult> {
        let mut selected = match self.scope {
            Some(scope) => results.by_scope(scope),
            None => results.all().iter().collect(),
        };
        if let Some(field) = &self.field {
            selected.retain(|r| r.field_refs().iter().any(|f| f.is_within(field)));
        }
        selected
    }
}

/// One reported diagnostic plus the current value of its primary field.
#[derive(Debug, Serialize)]
pub struct Entry<'a> {
    #[serde(flatten)]
    pub result: &'a RuleResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<Value>,
}

/// Everything `check` prints.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub catalog_fingerprint: &'a str,
    pub evaluated_at: Timestamp,
    /// Totals over the whole evaluation, before filtering.
    pub counts: SeverityCounts,
    pub blocking: bool,
    pub results: Vec<Entry<'a>>,
}

impl<'a> Report<'a> {
    pub fn new(
        catalog: &'a RuleCatalog,
        state: &ShipmentState,
        results: &'a ResultSet,
        ctx: &EvalContext,
        selection: &Selection,
    ) -> Self {
        let results_shown = selection
            .apply(results)
            .into_iter()
            .map(|result| Entry {
                result,
                current_value: result.primary_field().and_then(|p| state.lookup(p)),
            })
            .collect();
        Self {
            catalog_fingerprint: catalog.fingerprint(),
            evaluated_at: ctx.now,
            counts: results.counts(),
            blocking: results.has_blocking(),
            results: results_shown,
        }
    }

    /// True if any reported diagnostic meets `threshold`.
    pub fn meets(&self, threshold: Severity) -> bool {
        self.results.iter().any(|e| e.result.severity().meets(threshold))
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        let id_width = self.results.iter().map(|e| e.result.id().len()).max().unwrap_or(0);
        for entry in &self.results {
            let r = entry.result;
            let field = r.primary_field().map(FieldPath::as_str).unwrap_or("-");
            writeln!(
                out,
                "{:<10} {:<id_width$}  {}",
                r.severity().as_str().to_uppercase(),
                r.id(),
                r.message()
            )?;
            match &entry.current_value {
                Some(value) => writeln!(out, "{:<10} {:<id_width$}  at {field} = {value}", "", "")?,
                None => writeln!(out, "{:<10} {:<id_width$}  at {field}", "", "")?,
            }
        }
        if self.results.is_empty() {
            writeln!(out, "no diagnostics")?;
        }
        let c = self.counts;
        writeln!(
            out,
            "{} critical, {} warning, {} suggestion ({} shown){}",
            c.critical,
            c.warning,
            c.suggestion,
            self.results.len(),
            if self.blocking { "; submission blocked" } else { "" }
        )?;
        Ok(())
    }
}

/// Execute `shipcheck check`, writing the report to `out`.
///
/// Returns the process exit status: 0, or [`EXIT_THRESHOLD_MET`].
pub fn run_check<W: Write>(args: &CheckArgs, out: &mut W) -> Result<u8> {
    let catalog = args.engine.catalog()?;
    let state = load_state(&args.state)?;
    let ctx = match &args.at {
        Some(at) => EvalContext::at(Timestamp::parse(at).context("invalid --at timestamp")?),
        None => EvalContext::now(),
    };
    let selection = Selection {
        scope: args.scope,
        field: args
            .field
            .as_deref()
            .map(FieldPath::parse)
            .transpose()
            .context("invalid --field path")?,
    };

    let results = catalog.evaluate_at(&state, &ctx);
    let report = Report::new(&catalog, &state, &results, &ctx, &selection);
    tracing::info!(
        state = %args.state.display(),
        fired = results.len(),
        shown = report.results.len(),
        "evaluated shipment"
    );

    match args.format {
        OutputFormat::Text => report.write_text(out)?,
        OutputFormat::Json => write_json(out, &report)?,
    }

    Ok(match args.fail_on {
        Some(threshold) if report.meets(threshold) => EXIT_THRESHOLD_MET,
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const STATE: &str = r#"{
        "shipment": {
            "trade_route": {
                "mode": "sea", "origin": "CNSHA", "destination": "USLAX",
                "etd": "2024-05-10", "eta": "2024-05-05"
            },
            "cargo_packing": { "hs_code": "847130", "gross_weight_kg": 1000, "volume_cbm": 1 }
        },
        "seller": { "company": "Acme" },
        "buyer": { "company": "Globex" },
        "risk_modules": { "weather": true }
    }"#;

    fn args(dir: &tempfile::TempDir) -> CheckArgs {
        let path = dir.path().join("state.json");
        fs::write(&path, STATE).unwrap();
        CheckArgs {
            state: path,
            engine: EngineArgs::default(),
            scope: None,
            field: None,
            format: OutputFormat::Text,
            fail_on: None,
            at: Some("2024-04-01T00:00:00Z".into()),
        }
    }

    fn run(args: &CheckArgs) -> (u8, String) {
        let mut out = Vec::new();
        let code = run_check(args, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_text_report() {
        let dir = tempfile::tempdir().unwrap();
        let (code, text) = run(&args(&dir));
        assert_eq!(code, 0);
        assert!(text.contains("CRITICAL   trade.eta.before_etd"));
        assert!(text.contains("at shipment.trade_route.eta = \"2024-05-05\""));
        assert!(text.contains("cargo.density.implausible"));
        assert!(text.contains("submission blocked"));
    }

    #[test]
    fn test_scope_filter_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(&dir);
        a.scope = Some(Scope::Cargo);
        a.format = OutputFormat::Json;
        let (_, text) = run(&a);
        let json: Value = serde_json::from_str(&text).unwrap();
        let ids: Vec<&str> = json["results"].as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["cargo.density.implausible"]);
        assert_eq!(json["results"][0]["current_value"], 1000.0);
        assert_eq!(json["evaluated_at"], "2024-04-01T00:00:00Z");
        assert!(json["counts"]["critical"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn test_field_filter_is_section_level() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(&dir);
        a.field = Some("shipment.cargo_packing".into());
        let (_, text) = run(&a);
        assert!(text.contains("cargo.density.implausible"));
        assert!(!text.contains("trade.eta.before_etd"));
    }

    #[test]
    fn test_fail_on_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(&dir);
        a.fail_on = Some(Severity::Critical);
        assert_eq!(run(&a).0, EXIT_THRESHOLD_MET);
        a.scope = Some(Scope::Risk);
        assert_eq!(run(&a).0, 0);
    }

    #[test]
    fn test_bad_field_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(&dir);
        a.field = Some("shipment..cargo".into());
        assert!(run_check(&a, &mut Vec::new()).is_err());
    }
}
