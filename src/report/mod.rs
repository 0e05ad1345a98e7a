//! Stateless renderers for a query's result.
//!
//! Both renderers take a [`QueryView`] and produce a complete document:
//! - `terminal.rs`: plain-text dashboard for stdout
//! - `html.rs`: standalone HTML page with table, bar charts and a pie chart

pub mod html;
pub mod terminal;

use crate::model::ReportError;
use crate::pipeline::QueryView;
use crate::utils::to_kebab_case;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const PROMPT_MESSAGE: &str = "Enter a product to display data.";
pub const NO_RESULTS_MESSAGE: &str = "There are no results for this search.";

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub currency_symbol: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportOptions {
    pub fn new(currency_symbol: &str) -> Self {
        Self {
            currency_symbol: currency_symbol.to_string(),
            generated_at: Utc::now(),
        }
    }

    fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

/// Scales `value` against `max` into a bar of at most `width` cells.
pub(crate) fn bar_cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max).min(1.0) * width as f64).round() as usize
}

/// File name for the dashboard of the `index`-th query of a run. The index keeps
/// queries with the same slug (`TV` and `tv`, blank queries) from sharing a file.
pub fn html_report_name(index: usize, view: &QueryView) -> String {
    let slug = match view {
        QueryView::Prompt => String::from("prompt"),
        QueryView::Failed { query, .. }
        | QueryView::NoResults { query }
        | QueryView::Dashboard { query, .. } => to_kebab_case(query),
    };
    let slug = if slug.is_empty() { "query" } else { slug.as_str() };
    format!("dash-{}-{}.html", index + 1, slug)
}

/// Writes the HTML dashboard for the `index`-th query into `dir` and returns the file path.
pub fn write_html_report(
    dir: &Path,
    index: usize,
    view: &QueryView,
    opts: &ReportOptions,
) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(html_report_name(index, view));
    fs::write(&path, html::render(view, opts))?;
    info!("Saved HTML dashboard: {}", path.display());
    Ok(path)
}
