use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use usports_stats::DatasetReport;

pub fn generate_console_report(
    out: &mut dyn Write,
    reports: &[DatasetReport],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Scrape Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=================".cyan())?;

    let total = reports.len();
    let complete = reports.iter().filter(|r| r.complete).count();
    writeln!(out, "Datasets: {total}")?;
    writeln!(out, "Complete: {}", complete.to_string().green())?;
    writeln!(out, "Incomplete: {}", (total - complete).to_string().red())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for report in reports {
        let status = if report.complete {
            "✅ COMPLETE".green()
        } else {
            "❌ INCOMPLETE".red()
        };
        writeln!(out, "{status} {}", report.dataset.to_string().bold())?;
        writeln!(out, "   Entities: {}", report.entities)?;
        writeln!(
            out,
            "   Batches: {}/{}, groups: {}, standings segments: {}",
            report.batches_completed,
            report.batches_planned,
            report.groups_extracted,
            report.standings_segments
        )?;
        writeln!(
            out,
            "   Rows: {} read, {} skipped, {} missing cells",
            report.tally.rows_read, report.tally.rows_skipped, report.tally.missing_cells
        )?;
        if let Some(failure) = &report.failure {
            writeln!(out, "   Failure: {}", failure.red())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, reports: &[DatasetReport]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(reports)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use usports_stats::DatasetKind;

    fn sample_reports() -> Vec<DatasetReport> {
        let mut done = DatasetReport::new(DatasetKind::TEAM_MENS, 1);
        done.complete = true;
        done.entities = 48;
        let mut failed = DatasetReport::new(DatasetKind::PLAYER_WOMENS, 20);
        failed.failure = Some("segment 4 not found (4 segments on the current view)".to_string());
        vec![done, failed]
    }

    #[test]
    fn console_report_lists_each_dataset() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        generate_console_report(&mut buffer, &sample_reports(), Duration::from_secs(3)).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Complete: 1"));
        assert!(text.contains("COMPLETE team-mens"));
        assert!(text.contains("INCOMPLETE player-womens"));
        assert!(text.contains("Entities: 48"));
        assert!(text.contains("segment 4 not found"));
    }

    #[test]
    fn json_report_is_an_array_of_reports() {
        let mut buffer = Vec::new();
        generate_json_report(&mut buffer, &sample_reports()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["complete"], true);
        assert_eq!(value[1]["batches_planned"], 20);
    }
}
