//! Move-count comparison across the report files written by the `solve` binary.
use crate::solver::Strategy;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Extracts the move count from a report.
///
/// The first line containing `Moves` is split on spaces and its leading token parsed.
/// Returns `None` when no such line exists or its first token is not a number.
///
/// # Examples
/// ```
/// use npuzzle_solver::statistics::moves_from_report;
///
/// assert_eq!(moves_from_report("Solution found!\n...\n14 Moves\nNodes expanded: 3\n"), Some(14));
/// assert_eq!(moves_from_report("No solution found\n"), None);
/// ```
pub fn moves_from_report(text: &str) -> Option<u32> {
    text.lines()
        .find(|line| line.contains("Moves"))
        .and_then(|line| line.split(' ').next())
        .and_then(|token| token.trim().parse().ok())
}

/// What was found for one strategy's report file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportStatus {
    /// The report has a `Moves` line.
    Moves(u32),
    /// The report exists but records no solution.
    NoSolution,
    /// The report could not be read.
    Unreadable(String),
}

/// Move counts of every strategy's report in one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveComparison {
    rows: Vec<(&'static str, ReportStatus)>,
}

impl MoveComparison {
    /// Reads each strategy's report file from `dir`. Missing or unreadable files are
    /// recorded as [`ReportStatus::Unreadable`] rather than failing the whole comparison.
    pub fn load(dir: &Path) -> Self {
        let rows = Strategy::ALL
            .iter()
            .map(|strategy| {
                let file = strategy.report_file_name();
                let status = match fs::read_to_string(dir.join(file)) {
                    Ok(text) => ReportStatus::from_report(&text),
                    Err(err) => {
                        tracing::warn!(file, %err, "could not read report");
                        ReportStatus::Unreadable(err.to_string())
                    }
                };
                (file, status)
            })
            .collect();
        MoveComparison { rows }
    }

    /// Builds a comparison from report texts already in memory.
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = (Strategy, &'a str)>,
    {
        let rows = reports
            .into_iter()
            .map(|(strategy, text)| (strategy.report_file_name(), ReportStatus::from_report(text)))
            .collect();
        MoveComparison { rows }
    }

    /// `(file name, status)` pairs in `Strategy::ALL` order.
    pub fn rows(&self) -> &[(&'static str, ReportStatus)] {
        &self.rows
    }

    /// Writes the comparison to `out`, one line per report.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl ReportStatus {
    fn from_report(text: &str) -> Self {
        // A zero count is what greedy reports, and it is indistinguishable from "no moves".
        match moves_from_report(text) {
            Some(moves) if moves > 0 => ReportStatus::Moves(moves),
            _ => ReportStatus::NoSolution,
        }
    }
}

impl fmt::Display for MoveComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (file, status) in &self.rows {
            match status {
                ReportStatus::Moves(moves) => writeln!(f, "Algorithm {} : {} Moves", file, moves)?,
                ReportStatus::NoSolution => writeln!(f, "Algorithm {} : No solution found", file)?,
                ReportStatus::Unreadable(_) => {
                    writeln!(f, "Algorithm {} : Could not analyse this file", file)?
                }
            }
        }
        Ok(())
    }
}
