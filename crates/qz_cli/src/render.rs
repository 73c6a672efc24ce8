// crates/qz_cli/src/render.rs
//
// Read-only views over a Resolution: pretty JSON or a plain text table.
// Nothing here recomputes; ordering is exactly the resolution's.

use std::fmt::Write as _;

use serde::Serialize;

use qz_io::settings::LinkTemplates;
use qz_pipeline::{Category, CategoryLabels, LabeledResult, Resolution};

use crate::args::Format;

pub struct RenderOptions<'a> {
    pub format: Format,
    pub show_scores: bool,
    pub labels: &'a CategoryLabels,
    pub links: &'a LinkTemplates,
}

#[derive(Serialize)]
struct TierView<'a> {
    score: u64,
    members: &'a [Category],
}

#[derive(Serialize)]
struct ResultView<'a> {
    #[serde(flatten)]
    result: &'a LabeledResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_2: Option<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    resolved_by: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<&'a [u64]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tiers: Option<Vec<TierView<'a>>>,
    results: Vec<ResultView<'a>>,
}

fn result_views<'a>(res: &'a Resolution, links: &LinkTemplates) -> Vec<ResultView<'a>> {
    res.results
        .iter()
        .map(|r| ResultView {
            result: r,
            link_1: links.code_1_link(&r.record.code_1),
            link_2: links.code_2_link(&r.record.code_2),
        })
        .collect()
}

pub fn render(res: &Resolution, opts: &RenderOptions<'_>) -> Result<String, serde_json::Error> {
    match opts.format {
        Format::Json => render_json(res, opts),
        Format::Text => Ok(render_text(res, opts)),
    }
}

fn render_json(res: &Resolution, opts: &RenderOptions<'_>) -> Result<String, serde_json::Error> {
    let report = Report {
        resolved_by: res.resolved_by.map(|c| c.as_str()),
        scores: opts.show_scores.then(|| res.scores.as_slice()),
        tiers: opts.show_scores.then(|| {
            res.tiers
                .iter()
                .map(|t| TierView { score: t.score, members: &t.members })
                .collect()
        }),
        results: result_views(res, opts.links),
    };
    let mut s = serde_json::to_string_pretty(&report)?;
    s.push('\n');
    Ok(s)
}

// `write!` into a String cannot fail; results are ignored below.
fn render_text(res: &Resolution, opts: &RenderOptions<'_>) -> String {
    let labels = opts.labels;
    let mut out = String::new();

    if opts.show_scores {
        let _ = write!(out, "scores:");
        for (c, s) in res.scores.iter() {
            let _ = write!(out, " {}={s}", labels.label(c));
        }
        out.push('\n');
        for (i, t) in res.tiers.iter().enumerate() {
            let members: Vec<_> = t.members.iter().map(|&c| labels.label(c)).collect();
            let _ = writeln!(out, "tier {}: {} ({})", i + 1, members.join(" "), t.score);
        }
    }

    match res.resolved_by {
        Some(case) => {
            let _ = writeln!(out, "resolved by {case}: {} result(s)", res.results.len());
        }
        None => {
            let _ = writeln!(out, "no results");
        }
    }

    let width = res.results.iter().map(|r| r.rank_label.len()).max().unwrap_or(0);
    for v in result_views(res, opts.links) {
        let r = v.result;
        let _ = writeln!(
            out,
            "{:<width$}  {}  {} | {}  {}",
            r.rank_label, r.record.code_1, r.record.title_1, r.record.code_2, r.record.title_2
        );
        for link in [v.link_1, v.link_2].into_iter().flatten() {
            let _ = writeln!(out, "{:<width$}  {link}", "");
        }
    }
    out
}
