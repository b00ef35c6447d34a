//! Human-readable check report printer

use std::io::{self, Write};

use super::CheckResult;

/// Print the check report to stdout
pub fn print_report(result: &CheckResult) {
    let stdout = io::stdout();
    // Nothing sensible to do if stdout is gone
    let _ = write_report(&mut stdout.lock(), result);
}

/// Write the check report to `out`
pub fn write_report<W: Write>(out: &mut W, result: &CheckResult) -> io::Result<()> {
    writeln!(out, "=== Report Check: {} ===", result.project_name)?;
    writeln!(out, "Parameter policy: {:?}", result.policy)?;
    writeln!(out)?;

    for outcome in &result.outcomes {
        let label = match &outcome.report {
            Some(report) => format!("{} ({})", report.name, outcome.path.display()),
            None => outcome.path.display().to_string(),
        };
        writeln!(out, "--- {} ---", label)?;

        if let Some(err) = &outcome.load_error {
            writeln!(out, "  error: {}", err)?;
        } else if outcome.issues.is_empty() {
            writeln!(out, "OK")?;
        } else {
            for issue in &outcome.issues {
                writeln!(out, "  {}", issue)?;
            }
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Summary: {} reports, {} errors, {} warnings",
        result.outcomes.len(),
        result.error_count(),
        result.warning_count()
    )?;
    Ok(())
}
