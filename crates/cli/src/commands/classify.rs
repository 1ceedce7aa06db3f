use std::path::PathBuf;

use cardio_ops::cardio_core::{Attribute, PatientRecord};
use cardio_ops::cardio_rules::RuleTraceResult;
use cardio_ops::{Classifier, OpsConfig};
use clap::Args;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// JSON file holding the record; flags below override its values.
    #[arg(long)]
    pub record: Option<PathBuf>,
    /// Young Adult, Middle-Aged Adult or Elderly.
    #[arg(long)]
    pub age_group: Option<String>,
    /// Male or Female.
    #[arg(long)]
    pub gender: Option<String>,
    /// None, Mild, Moderate or Severe.
    #[arg(long)]
    pub chest_pain: Option<String>,
    /// Yes or No.
    #[arg(long)]
    pub short_breath: Option<String>,
    /// Yes or No.
    #[arg(long)]
    pub fatigue: Option<String>,
    /// Yes or No.
    #[arg(long)]
    pub dizziness: Option<String>,
    /// Yes or No.
    #[arg(long)]
    pub cold_sweat: Option<String>,
    /// Smoker or Non-Smoker.
    #[arg(long)]
    pub smoker: Option<String>,
    /// Yes or No.
    #[arg(long)]
    pub diabetes: Option<String>,
    /// Normal, Elevated or High.
    #[arg(long)]
    pub blood_pressure: Option<String>,
    /// Yes or No.
    #[arg(long)]
    pub family_history: Option<String>,
    /// Active or Physically Inactive.
    #[arg(long)]
    pub inactive: Option<String>,
    /// Reject incomplete or out-of-range records.
    #[arg(long)]
    pub strict: bool,
    /// Print the outcome of every rule.
    #[arg(long)]
    pub trace: bool,
}

impl ClassifyArgs {
    fn flag(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::AgeGroup => self.age_group.as_deref(),
            Attribute::Gender => self.gender.as_deref(),
            Attribute::ChestPain => self.chest_pain.as_deref(),
            Attribute::ShortBreath => self.short_breath.as_deref(),
            Attribute::Fatigue => self.fatigue.as_deref(),
            Attribute::Dizziness => self.dizziness.as_deref(),
            Attribute::ColdSweat => self.cold_sweat.as_deref(),
            Attribute::Smoker => self.smoker.as_deref(),
            Attribute::Diabetes => self.diabetes.as_deref(),
            Attribute::BloodPressure => self.blood_pressure.as_deref(),
            Attribute::FamilyHistory => self.family_history.as_deref(),
            Attribute::Inactive => self.inactive.as_deref(),
        }
    }

    fn build_record(&self) -> anyhow::Result<PatientRecord> {
        let base = match &self.record {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            None => PatientRecord::new(),
        };
        Ok(Attribute::ALL.into_iter().fold(base, |record, attr| {
            match self.flag(attr) {
                Some(value) => record.with(attr, value),
                None => record,
            }
        }))
    }
}

pub fn run(config: OpsConfig, args: &ClassifyArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let strict = args.strict || config.engine.strict;
    let classifier = Classifier::from_config(&config.with_strict(strict))?;
    let record = args.build_record()?;

    if args.trace {
        let trace = classifier.trace(&record)?;
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&trace)?);
            }
            OutputFormat::Text => {
                for entry in &trace.trace {
                    if entry.result == RuleTraceResult::Skipped {
                        continue;
                    }
                    println!(
                        "  [{result:<11}] {name:<6} {condition}",
                        result = entry.result.as_str(),
                        name = entry.rule_name,
                        condition = entry.condition_display,
                    );
                }
                println!(
                    "{} evaluated, {} skipped in {}us",
                    trace.total_rules_evaluated,
                    trace.total_rules_skipped,
                    trace.evaluation_duration_us
                );
                if !trace.unrecognized_attributes.is_empty() {
                    let names: Vec<&str> = trace
                        .unrecognized_attributes
                        .iter()
                        .map(|a| a.name())
                        .collect();
                    println!("Unrecognized: {}", names.join(", "));
                }
                println!("Risk: {}", trace.verdict);
                println!("Advice: {}", trace.advice);
            }
        }
        return Ok(());
    }

    let diagnosis = classifier.diagnose(&record)?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&diagnosis)?);
        }
        OutputFormat::Text => {
            for (label, value) in record.labelled_inputs() {
                println!("{label}: {value}");
            }
            println!();
            println!("Risk: {}", diagnosis.verdict);
            println!("Advice: {}", diagnosis.advice);
            match diagnosis.matched_rule {
                Some(ref rule) => println!("Matched rule: {rule}"),
                None => println!("Matched rule: none (default)"),
            }
        }
    }

    Ok(())
}
