use serde::Serialize;
use std::fmt::Write as _;
use urania::aspects::AspectResult;
use urania::cadence::AspectCadence;
use urania::western::{ChartAngles, Houses};
use urania::{Chart, TemporalEvent};

use crate::Format;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReport {
    pub chart: Chart,
    pub angles: Option<ChartAngles>,
    pub houses: Option<Houses>,
}

/// A detected aspect with its cadence when both points are bodies
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectEntry {
    #[serde(flatten)]
    pub aspect: AspectResult,
    pub cadence: Option<AspectCadence>,
}

impl From<AspectResult> for AspectEntry {
    fn from(aspect: AspectResult) -> Self {
        Self {
            cadence: AspectCadence::for_result(&aspect),
            aspect,
        }
    }
}

/// Degrees as `d°mm'ss"`, e.g. `3.4567` → ` 3°27'24"`
pub fn dms(degrees: f64) -> String {
    let total_seconds = (degrees * 3600.0).round() as i64;
    let d = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{d:>2}°{m:02}'{s:02}\"")
}

fn chart_text(report: &ChartReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "chart for {}", report.chart.instant);
    for p in report.chart.iter() {
        let house = report
            .houses
            .as_ref()
            .map(|h| format!("  house {:>2}", h.house_of(p.longitude)))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<11} {} {:<11}{}{}",
            p.body.to_string(),
            dms(p.degree_in_sign),
            p.sign.to_string(),
            if p.is_retrograde { " R" } else { "  " },
            house
        );
    }
    if let Some(angles) = &report.angles {
        let _ = writeln!(
            out,
            "asc {:.2}  mc {:.2}  dsc {:.2}  ic {:.2}",
            angles.ascendant, angles.midheaven, angles.descendant, angles.imum_coeli
        );
    }
    out
}

fn aspect_text(entries: &[AspectEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = write!(out, "{}", entry.aspect);
        if let Some(c) = &entry.cadence {
            let _ = write!(out, "  [{}, {}]", c.recurrence_text(), c.duration_text());
        }
        out.push('\n');
    }
    out
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_chart(format: Format, report: &ChartReport) -> anyhow::Result<()> {
    match format {
        Format::Json => print_json(report),
        Format::Text => {
            print!("{}", chart_text(report));
            Ok(())
        }
    }
}

pub fn print_aspects(format: Format, entries: &[AspectEntry]) -> anyhow::Result<()> {
    match format {
        Format::Json => print_json(&entries),
        Format::Text => {
            print!("{}", aspect_text(entries));
            Ok(())
        }
    }
}

pub fn print_events(format: Format, events: &[TemporalEvent]) -> anyhow::Result<()> {
    match format {
        Format::Json => print_json(&events),
        Format::Text => {
            for event in events {
                println!("{event}");
            }
            Ok(())
        }
    }
}

pub fn print_cadence(format: Format, cadence: &AspectCadence) -> anyhow::Result<()> {
    match format {
        Format::Json => print_json(cadence),
        Format::Text => {
            println!("{cadence}");
            Ok(())
        }
    }
}
