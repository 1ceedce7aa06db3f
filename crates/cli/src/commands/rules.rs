use cardio_ops::cardio_core::{Attribute, Verdict};
use cardio_ops::{OpsConfig, load_engine};
use clap::{Args, Subcommand};

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// List the loaded rules in evaluation order.
    List {
        /// Only show rules yielding this verdict (high, moderate, low).
        #[arg(long)]
        tier: Option<Verdict>,
    },
    /// Show a single rule.
    Show {
        /// Rule name.
        name: String,
    },
}

pub fn run(config: &OpsConfig, args: &RulesArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let engine = load_engine(config)?;

    match &args.command {
        RulesCommand::List { tier } => {
            let rules: Vec<_> = engine
                .rules()
                .iter()
                .filter(|r| tier.is_none_or(|t| r.verdict == t))
                .collect();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&rules)?);
                }
                OutputFormat::Text => {
                    println!(
                        "{} rules loaded (version {:016x}):",
                        rules.len(),
                        engine.rules_version()
                    );
                    for rule in &rules {
                        let desc = rule.description.as_deref().unwrap_or("");
                        println!(
                            "  [{verdict:<13}] {name:<6} {desc}",
                            verdict = rule.verdict.as_str(),
                            name = rule.name,
                        );
                    }
                }
            }
        }
        RulesCommand::Show { name } => {
            let rule = engine
                .rule_by_name(name)
                .ok_or_else(|| anyhow::anyhow!("no rule named '{name}'"))?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(rule)?);
                }
                OutputFormat::Text => {
                    println!("Name:       {}", rule.name);
                    println!("Verdict:    {}", rule.verdict);
                    println!("Source:     {}", rule.source.as_str());
                    if let Some(ref desc) = rule.description {
                        println!("Describes:  {desc}");
                    }
                    println!("Condition:  {}", rule.condition.to_source());
                    let attrs: Vec<&str> = rule
                        .condition
                        .attributes()
                        .into_iter()
                        .map(Attribute::name)
                        .collect();
                    println!("Attributes: {}", attrs.join(", "));
                }
            }
        }
    }
    Ok(())
}
