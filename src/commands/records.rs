//! @acp:module "Records Command"
//! @acp:summary "Filter dashboard records and print summary figures"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{bail, Result};
use console::style;
use serde_json::Value;

use crate::records::{expand_patterns, filter::field_text, load_records, RecordQuery, Summary};

/// Options for the records command
#[derive(Debug, Clone)]
pub struct RecordsOptions {
    /// Files or glob patterns
    pub files: Vec<String>,
    pub query: RecordQuery,
    /// Columns to show; all keys of the first match when empty
    pub columns: Vec<String>,
    /// Only print the summary
    pub summary_only: bool,
    pub json: bool,
}

/// Execute the records command
pub fn execute_records(options: RecordsOptions) -> Result<()> {
    let paths = expand_patterns(&options.files)?;
    if paths.is_empty() {
        bail!("No record files matched {}", options.files.join(", "));
    }
    let records = load_records(&paths)?;
    let (matched, summary) = options.query.run(&records);

    if options.json {
        let shown: Vec<&Value> = if options.summary_only {
            Vec::new()
        } else {
            matched
        };
        let output = serde_json::json!({
            "summary": summary,
            "records": shown,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !options.summary_only {
        print_table(&matched, &options.columns);
        println!();
    }
    print_summary(&summary);

    Ok(())
}

fn print_table(records: &[&Value], columns: &[String]) {
    if records.is_empty() {
        println!("{}", style("No matching records").dim());
        return;
    }

    let columns: Vec<String> = if columns.is_empty() {
        records[0]
            .as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    } else {
        columns.to_vec()
    };

    let cells: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            columns
                .iter()
                .map(|c| field_text(r, c).unwrap_or_else(|| "-".to_string()))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    println!("{}", style(header.join("  ")).bold());

    for row in cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect();
        println!("{}", line.join("  "));
    }
}

fn print_summary(summary: &Summary) {
    println!(
        "{} {} of {} records ({}%)",
        style("Matched:").bold(),
        summary.matched,
        summary.total,
        summary.matched_percentage
    );

    if let Some(ref total) = summary.sum {
        print!("{} {} = {}", style("Sum:").bold(), total.field, total.sum);
        match total.average {
            Some(avg) => println!(", average {}", avg),
            None => println!(),
        }
    }

    if !summary.groups.is_empty() {
        println!("{}", style("Breakdown:").bold());
        for group in &summary.groups {
            println!(
                "  {:<20} {:>5}  {:>6}%",
                group.value, group.count, group.percentage
            );
        }
    }
}
