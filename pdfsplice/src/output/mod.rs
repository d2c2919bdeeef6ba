//! Results and how they are shown to the user.
//!
//! [`OutputSet`] holds the named documents an operation produced and decides
//! whether they are delivered as one file or a zip archive. The display
//! helpers render inspection results and write statistics through an
//! [`OutputFormatter`].
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::output::OutputFormatter;
//! use pdfsplice::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Splitting report.pdf");
//! formatter.success("Wrote report_split.zip");
//! # }
//! ```

pub mod formatter;
pub mod set;

pub use formatter::{MessageLevel, OutputFormatter};
pub use set::{Deliverable, OutputSet};

use crate::io::WriteStatistics;
use crate::validation::DocumentInfo;

/// One-line summary of an inspected document.
pub fn describe_document(label: &str, info: &DocumentInfo) -> String {
    if !info.is_readable() {
        return format!("{label}: not a readable PDF");
    }

    let mut line = format!("{label}: {} page(s)", info.page_count);
    if let Some(version) = &info.version {
        line.push_str(&format!(", PDF {version}"));
    }
    if let Some(title) = &info.title {
        line.push_str(&format!(", \"{title}\""));
    }
    line
}

/// Show an inspection result.
pub fn display_document_info(formatter: &OutputFormatter, label: &str, info: &DocumentInfo) {
    let line = describe_document(label, info);
    if info.is_readable() {
        formatter.info(&line);
    } else {
        formatter.warning(&line);
    }
}

/// Show what was written to disk.
pub fn display_write_statistics(formatter: &OutputFormatter, stats: &[WriteStatistics]) {
    for stat in stats {
        formatter.success(&format!(
            "Wrote {} ({})",
            stat.output_path.display(),
            stat.format_file_size()
        ));
        formatter.detail("Write time", &format!("{:.2}s", stat.write_time.as_secs_f64()));
    }

    if stats.len() > 1 {
        let total: u64 = stats.iter().map(|s| s.file_size).sum();
        formatter.info(&format!(
            "{} file(s), {} in total",
            stats.len(),
            crate::utils::format_file_size(total)
        ));
    }
}
