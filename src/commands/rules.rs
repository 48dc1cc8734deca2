use clap::Args;
use serde::Serialize;

use reroot::rules::{RewriteRule, RuleSet};

use super::CmdResult;

#[derive(Args, Debug, Default)]
pub struct RulesArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesOutput {
    pub command: &'static str,
    pub total: usize,
    pub rules: Vec<RewriteRule>,
}

pub fn run(_args: RulesArgs) -> CmdResult<RulesOutput> {
    let rules = RuleSet::builtin()?;
    let listed: Vec<RewriteRule> = rules.iter().cloned().collect();

    Ok((
        RulesOutput {
            command: "rules",
            total: listed.len(),
            rules: listed,
        },
        0,
    ))
}

/// One numbered line per rule, in application order.
pub fn run_console(args: RulesArgs) -> reroot::Result<(String, i32)> {
    let (output, exit_code) = run(args)?;

    let mut out = String::new();
    for (index, rule) in output.rules.iter().enumerate() {
        out.push_str(&format!(
            "{:2}. {} → {}\n",
            index + 1,
            rule.pattern,
            rule.replacement
        ));
    }

    Ok((out, exit_code))
}
