use aegis::{audit, AuditConfig, AuditReport, GateOutcome, GeminiClient};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

const SEPARATOR_WIDTH: usize = 60;

/// Options for a single audit invocation
#[derive(Debug, Clone)]
pub struct AuditArgs {
    pub file: PathBuf,
    pub api_key: String,
    pub threshold: i64,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub json: bool,
}

/// Run the audit and return the process exit code.
pub fn execute(args: AuditArgs) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&args, &mut out) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "audit failed");
            let _ = report_error(&mut out, &e, args.json);
            1
        }
    }
}

fn run(args: &AuditArgs, out: &mut impl Write) -> Result<i32> {
    let config = AuditConfig::with_overrides(args.model.clone(), args.endpoint.clone());

    if !args.json {
        writeln!(out, "🛡️  AEGIS agent analyzing {}...", args.file.display())?;
        writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        out.flush()?;
    }

    let client = GeminiClient::new(&config.endpoint, &args.api_key)?;
    let report = audit::run(&args.file, args.threshold, &config, &client)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report.to_json())
            .context("Failed to serialize report")?;
        writeln!(out, "{}", json)?;
    } else {
        render_report(out, &report)?;
    }

    Ok(report.exit_code())
}

fn report_error(out: &mut impl Write, error: &anyhow::Error, json: bool) -> io::Result<()> {
    if json {
        let body = serde_json::json!({ "error": error.to_string() });
        writeln!(out, "{:#}", body)
    } else {
        writeln!(out, "\n{} {}", "❌ Error:".red(), error)
    }
}

fn render_report(out: &mut impl Write, report: &AuditReport) -> io::Result<()> {
    writeln!(out, "{}", report.result.response)?;
    writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;

    let shown = report
        .result
        .score
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_default();

    match report.outcome {
        GateOutcome::Fail { threshold, .. } => {
            writeln!(out, "\n📊 Security Score: {}/100", shown)?;
            writeln!(
                out,
                "{}",
                format!("❌ FAIL: Score below threshold ({})", threshold).red()
            )?;
        }
        GateOutcome::Pass { threshold, .. } => {
            writeln!(out, "\n📊 Security Score: {}/100", shown)?;
            writeln!(
                out,
                "{}",
                format!("✅ PASS: Score >= threshold ({})", threshold).green()
            )?;
        }
        GateOutcome::NoScore => {
            writeln!(out, "\n✅ Analysis complete (no numeric score extracted)")?;
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis::{AnalysisResult, Score};

    fn report(response: &str, threshold: i64) -> AuditReport {
        let result = AnalysisResult::from_response(response.to_string());
        let outcome = GateOutcome::evaluate(result.score.as_ref().map(Score::value), threshold);
        AuditReport {
            file: PathBuf::from("model.py"),
            model: "gemini-3-pro-preview".to_string(),
            threshold,
            result,
            outcome,
        }
    }

    fn rendered(report: &AuditReport) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        render_report(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_render_fail() {
        let text = rendered(&report("Security score: 65/100", 70));
        assert!(text.starts_with("Security score: 65/100\n"));
        assert!(text.contains("📊 Security Score: 65/100"));
        assert!(text.contains("❌ FAIL: Score below threshold (70)"));
    }

    #[test]
    fn test_render_pass() {
        let text = rendered(&report("Security score: 80/100", 70));
        assert!(text.contains("✅ PASS: Score >= threshold (70)"));
        assert!(!text.contains("FAIL"));
    }

    #[test]
    fn test_render_overflowing_score_shows_digits() {
        let text = rendered(&report("Security score: 000123456789012345678901234567/100", 70));
        assert!(text.contains("📊 Security Score: 123456789012345678901234567/100"));
        assert!(text.contains("✅ PASS"));
    }

    #[test]
    fn test_render_unicode_digit_score() {
        let text = rendered(&report("Security score: \u{0668}\u{0665}/100", 70));
        assert!(text.contains("📊 Security Score: 85/100"));
    }

    #[test]
    fn test_json_error_is_parseable() {
        let mut buf = Vec::new();
        let error = anyhow::anyhow!("failed to read model.py: denied");
        report_error(&mut buf, &error, true).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed["error"], "failed to read model.py: denied");
    }

    #[test]
    fn test_render_no_score() {
        let text = rendered(&report("Looks fine.", 70));
        assert!(text.contains("no numeric score extracted"));
        assert!(!text.contains("Security Score:"));
    }
}
