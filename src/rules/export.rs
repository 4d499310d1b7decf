//! Delimited-text rendering of itemsets and rules.
//!
//! Item-sets render as their labels in vocabulary order joined by `", "`.
//! Fields containing a delimiter, quote or line break are quoted.

use super::generator::RuleSet;
use super::metrics::Metric;
use crate::apriori::{FrequentItemsets, Itemset};
use crate::encode::TransactionContext;
use crate::error::Result;
use std::borrow::Cow;
use std::fmt::Display;
use std::io::Write;

pub const RULE_COLUMNS: [&str; 5] = [
    "antecedents",
    "consequents",
    "antecedent support",
    "consequent support",
    "support",
];

pub fn render_itemset<T>(itemset: &Itemset, context: &TransactionContext<T>) -> String
where
    T: Ord + Clone + Display,
{
    itemset
        .labels(context)
        .iter()
        .map(|label| label.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Full export: one row per rule with supports and every metric.
pub fn write_rules_csv<W, T>(
    mut out: W,
    rules: &RuleSet,
    context: &TransactionContext<T>,
) -> Result<()>
where
    W: Write,
    T: Ord + Clone + Display,
{
    let header: Vec<&str> = RULE_COLUMNS
        .iter()
        .copied()
        .chain(Metric::ALL.iter().filter(|&&m| m != Metric::Support).map(|m| m.name()))
        .collect();
    write_record(&mut out, header.iter().map(|&h| Cow::Borrowed(h)))?;

    for rule in rules {
        let mut fields: Vec<Cow<'_, str>> = vec![
            render_itemset(rule.antecedent(), context).into(),
            render_itemset(rule.consequent(), context).into(),
            format_value(Some(rule.antecedent().support())).into(),
            format_value(Some(rule.consequent().support())).into(),
        ];
        fields.extend(rule.metrics().iter().map(|(_, value)| format_value(value).into()));
        write_record(&mut out, fields.into_iter())?;
    }

    out.flush()?;
    Ok(())
}

/// Filtered view: antecedents, consequents and the selected metric only.
pub fn write_selected_csv<W, T>(
    mut out: W,
    rules: &RuleSet,
    context: &TransactionContext<T>,
) -> Result<()>
where
    W: Write,
    T: Ord + Clone + Display,
{
    let metric = rules.metric();
    write_record(
        &mut out,
        ["antecedents", "consequents", metric.name()]
            .into_iter()
            .map(Cow::Borrowed),
    )?;

    for (antecedent, consequent, value) in rules.selected() {
        write_record(
            &mut out,
            [
                render_itemset(antecedent, context),
                render_itemset(consequent, context),
                format_value(Some(value)),
            ]
            .into_iter()
            .map(Cow::Owned),
        )?;
    }

    out.flush()?;
    Ok(())
}

pub fn write_itemsets_csv<W, T>(
    mut out: W,
    itemsets: &FrequentItemsets,
    context: &TransactionContext<T>,
) -> Result<()>
where
    W: Write,
    T: Ord + Clone + Display,
{
    write_record(&mut out, ["support", "itemsets"].into_iter().map(Cow::Borrowed))?;

    for itemset in itemsets {
        write_record(
            &mut out,
            [
                format_value(Some(itemset.support())),
                render_itemset(itemset, context),
            ]
            .into_iter()
            .map(Cow::Owned),
        )?;
    }

    out.flush()?;
    Ok(())
}

/// Infinite values render as `inf`, undefined ones as an empty field.
fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v == f64::INFINITY => "inf".to_string(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_record<'a, W, I>(out: &mut W, fields: I) -> Result<()>
where
    W: Write,
    I: Iterator<Item = Cow<'a, str>>,
{
    let line = fields
        .map(|field| escape(&field).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{line}")?;
    Ok(())
}
