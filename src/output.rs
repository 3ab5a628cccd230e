use crate::theme::Theme;
use serde::Serialize;
use serde_json::Value;

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,   // Only errors
    Normal,  // Standard output
    Verbose, // More details
}

/// Result of one validator run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationCheck {
    /// Which field was checked (email, age, password, html)
    pub field: String,
    /// Input as shown to the user (passwords are masked before this point)
    pub input: String,
    pub passed: bool,
    /// Parse result, error text, or a caveat about the check itself
    pub detail: Option<String>,
}

/// Collected results of a `validate` run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    pub fn add(&mut self, field: &str, input: &str, passed: bool, detail: Option<String>) {
        self.checks.push(ValidationCheck {
            field: field.to_string(),
            input: input.to_string(),
            passed,
            detail,
        });
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Print a validation report as a human-readable table.
pub fn print_report_human(report: &ValidationReport, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }

    println!();
    println!("{}", Theme::header("Validation Results"));
    println!("{}", Theme::divider(50));

    for check in &report.checks {
        let status = if check.passed {
            Theme::success("OK")
        } else {
            Theme::error("FAIL")
        };
        println!("  {:<10} {:<20} {}", check.field, check.input, status);

        if let Some(ref detail) = check.detail {
            // Caveats on passing checks only show up with -v
            if check.passed && mode != OutputMode::Verbose {
                continue;
            }
            println!("             {}", Theme::muted(detail));
        }
    }

    println!("{}", Theme::divider(50));
    let summary = if report.all_passed() {
        Theme::success("All checks passed")
    } else {
        Theme::error("Some checks failed")
    };
    println!("  {summary}");
    println!();
}

/// Print a validation report as JSON for scripting.
pub fn print_report_json(report: &ValidationReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    user_id: &'a str,
    value: &'a Value,
}

/// Print one cache record.
pub fn print_record(
    user_id: &str,
    value: &Value,
    mode: OutputMode,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let record = JsonRecord { user_id, value };
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    if mode == OutputMode::Quiet {
        return Ok(());
    }

    println!(
        "{} {}",
        Theme::primary(user_id),
        serde_json::to_string_pretty(value)?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_all_passed() {
        let mut report = ValidationReport::default();
        report.add("email", "a@b.com", true, None);
        report.add("age", "25", true, Some("parsed as 25".to_string()));

        assert!(report.all_passed());
        assert!(!report.is_empty());
    }

    #[test]
    fn test_report_with_failure() {
        let mut report = ValidationReport::default();
        report.add("email", "abc", false, None);
        report.add("password", "*****", true, None);

        assert!(!report.all_passed());
    }

    #[test]
    fn test_empty_report() {
        let report = ValidationReport::default();
        assert!(report.is_empty());
        assert!(report.all_passed());
    }
}
