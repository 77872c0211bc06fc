//! Result rendering for text and JSON output.

use serde::Serialize;

use kjvs_core::SearchResult;

/// Where a set of printed results came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Cache,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    source: Source,
    count: usize,
    results: &'a [SearchResult],
}

/// Render results as a JSON document.
pub fn render_json(source: Source, results: &[SearchResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOutput { source, count: results.len(), results })
}

/// Render results as an aligned text listing, one hit per line.
pub fn render_text(source: Source, results: &[SearchResult]) -> String {
    let label = match source {
        Source::Remote => "remote",
        Source::Cache => "cache",
    };

    if results.is_empty() {
        return format!("No results ({})\n", label);
    }

    let width = results.iter().map(|r| r.external_id.chars().count()).max().unwrap_or(0);
    let mut out = format!("{} result(s) ({})\n", results.len(), label);
    for result in results {
        out.push_str(&format!(
            "{:<width$}  {:.4}  {}\n",
            result.external_id,
            result.distance,
            result.data,
            width = width
        ));
    }
    out
}
