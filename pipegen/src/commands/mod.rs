// pipegen/src/commands/mod.rs

pub mod check;
pub mod generate;

use anyhow::Context;
use pipegen_core::domain::policy::ExcludeRule;

/// Parse repeated `env:org:sinkDatabase:sourceDatabase` CLI specs.
pub(crate) fn parse_rules(specs: &[String]) -> anyhow::Result<Vec<ExcludeRule>> {
    specs
        .iter()
        .map(|spec| {
            ExcludeRule::parse(spec).with_context(|| format!("invalid rule spec '{spec}'"))
        })
        .collect()
}
