//! Per-file outcome summary for batch conversions.
//!
//! One file failing never stops the batch; the report collects what happened
//! to each input so the caller can print it and pick an exit status.

use std::fmt;
use std::path::{Path, PathBuf};

#[cfg(feature = "colorized_output")]
use console::style;

/// What happened to one input file
#[derive(Debug, Clone)]
pub enum FileStatus {
    /// Output written
    Converted {
        /// Output path
        output: PathBuf,
        /// Number of data points written
        points: usize,
    },
    /// Input not processed, for a reason that is not an error
    Skipped(String),
    /// Decoding or export failed
    Failed(String),
}

/// Outcome for a single input
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Input path
    pub input: PathBuf,
    /// Result status
    pub status: FileStatus,
}

impl FileOutcome {
    /// Successful conversion.
    pub fn converted(input: impl Into<PathBuf>, output: impl Into<PathBuf>, points: usize) -> Self {
        Self {
            input: input.into(),
            status: FileStatus::Converted {
                output: output.into(),
                points,
            },
        }
    }

    /// Input skipped.
    pub fn skipped(input: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            status: FileStatus::Skipped(reason.into()),
        }
    }

    /// Input failed.
    pub fn failed(input: impl Into<PathBuf>, error: impl fmt::Display) -> Self {
        Self {
            input: input.into(),
            status: FileStatus::Failed(error.to_string()),
        }
    }

    fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed(_))
    }
}

/// Summary of a batch conversion
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Outcomes in input order
    pub outcomes: Vec<FileOutcome>,
}

impl ConversionReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome
    pub fn add(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcome for `input`, if recorded
    pub fn outcome(&self, input: &Path) -> Option<&FileOutcome> {
        self.outcomes.iter().find(|o| o.input == input)
    }

    /// True if any file failed
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(FileOutcome::is_failed)
    }

    /// Number of converted files
    pub fn converted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Converted { .. }))
            .count()
    }

    /// Number of skipped files
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Skipped(_)))
            .count()
    }

    /// Number of failed files
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static SKIP: Emoji<'_, '_> = Emoji("⚠", "[SKIP]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Conversion Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("=================").cyan()));

            for outcome in &self.outcomes {
                let input = outcome.input.display().to_string();
                match &outcome.status {
                    FileStatus::Converted { output: out, points } => {
                        output.push_str(&format!(
                            "[{}] {} -> {} ({} points)\n",
                            OK,
                            style(&input).green(),
                            out.display(),
                            points
                        ));
                    }
                    FileStatus::Skipped(reason) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            SKIP,
                            style(&input).yellow(),
                            style("SKIPPED").yellow().bold(),
                            reason
                        ));
                    }
                    FileStatus::Failed(error) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            FAIL,
                            style(&input).red(),
                            style("FAILED").red().bold(),
                            error
                        ));
                    }
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} converted, {} skipped, {} failed\n",
                style("Summary").bold(),
                style(self.converted_count()).green(),
                style(self.skipped_count()).yellow(),
                style(self.failure_count()).red()
            ));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion Report")?;
        writeln!(f, "=================")?;

        for outcome in &self.outcomes {
            let input = outcome.input.display();
            match &outcome.status {
                FileStatus::Converted { output, points } => {
                    writeln!(f, "[✓] {} -> {} ({} points)", input, output.display(), points)?
                }
                FileStatus::Skipped(reason) => writeln!(f, "[⚠] {} - SKIPPED: {}", input, reason)?,
                FileStatus::Failed(error) => writeln!(f, "[✗] {} - FAILED: {}", input, error)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} converted, {} skipped, {} failed",
            self.converted_count(),
            self.skipped_count(),
            self.failure_count()
        )
    }
}
