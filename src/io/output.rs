use crate::core::{AnalysisReport, Finding, Severity};
use colored::*;
use std::io::Write;

/// How many findings per category the terminal report lists
const TOP_FINDINGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_categories(report)?;
        self.write_findings(report)?;
        self.write_run_notes(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let divider = "═".repeat(50);
        writeln!(self.writer, "{}", divider.blue())?;
        writeln!(self.writer, "{}", "           DEBTSCORE ANALYSIS REPORT".bold().blue())?;
        writeln!(self.writer, "{}", divider.blue())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Overall score: {}",
            format_score(report.score.overall).bold()
        )?;
        writeln!(
            self.writer,
            "Files: {} analyzed, {} parsed  ·  Findings: {}  ·  {} ms",
            report.metadata.files_analyzed,
            report.metadata.files_parsed,
            report.findings.len(),
            report.metadata.elapsed_ms
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_categories(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "CATEGORIES".bold())?;
        for category in &report.score.categories {
            writeln!(
                self.writer,
                "  {:<22} {:>7}  (weight {:.2})",
                category.name,
                format_score(category.score),
                category.weight
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_findings(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.findings.is_empty() {
            writeln!(self.writer, "{}", "✓ No findings".green())?;
            return Ok(());
        }

        for category in &report.score.categories {
            let mut findings: Vec<&Finding> = report.findings_for(&category.name).collect();
            if findings.is_empty() {
                continue;
            }
            findings.sort_by(|a, b| b.severity.cmp(&a.severity));

            writeln!(
                self.writer,
                "{} ({})",
                category.name.to_uppercase().bold(),
                findings.len()
            )?;
            for finding in findings.iter().take(TOP_FINDINGS) {
                writeln!(
                    self.writer,
                    "  {} {} {}",
                    severity_label(finding.severity),
                    location_label(finding).dimmed(),
                    finding.message
                )?;
                if let Some(suggestion) = &finding.suggestion {
                    writeln!(self.writer, "      → {}", suggestion.italic())?;
                }
            }
            if findings.len() > TOP_FINDINGS {
                writeln!(
                    self.writer,
                    "  … and {} more",
                    findings.len() - TOP_FINDINGS
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_run_notes(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        for warning in &report.metadata.warnings {
            writeln!(self.writer, "{} {}", "warning:".yellow().bold(), warning)?;
        }
        for note in &report.metadata.notes {
            writeln!(self.writer, "{} {}", "note:".cyan().bold(), note)?;
        }
        Ok(())
    }
}

fn format_score(score: f64) -> ColoredString {
    let text = format!("{:.2}", score);
    match score {
        s if s >= 80.0 => text.green(),
        s if s >= 50.0 => text.yellow(),
        _ => text.red(),
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    let text = format!("[{}]", severity.to_string().to_uppercase());
    match severity {
        Severity::High => text.red().bold(),
        Severity::Medium => text.yellow(),
        Severity::Low => text.normal(),
    }
}

fn location_label(finding: &Finding) -> String {
    match finding.line() {
        Some(line) => format!("{}:{}", finding.file_path.display(), line),
        None => finding.file_path.display().to_string(),
    }
}

pub fn create_writer<'a>(format: OutputFormat, sink: Box<dyn Write + 'a>) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    }
}
