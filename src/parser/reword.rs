//! Natural-language rewording of structured trends.
//!
//! Purely presentational. The random source is passed in so callers (and
//! tests) decide how templates are picked.

use crate::parser::trend::ParsedTrend;
use rand::Rng;

pub const TEMPLATE_COUNT: usize = 4;

/// Render template `index` (taken modulo [`TEMPLATE_COUNT`]).
pub fn render_template(trend: &ParsedTrend, index: usize) -> String {
    let ParsedTrend {
        team,
        stat,
        record,
        sample,
        ..
    } = trend;

    match index % TEMPLATE_COUNT {
        0 => format!(
            "The {team} games have leaned {stat} the total, hitting in {record} of their previous {sample}."
        ),
        1 => format!(
            "Recent {team} matchups show a strong tendency toward the {stat}, with a {record} mark over the last {sample}."
        ),
        2 => format!(
            "The {team} have produced {record} results toward the {stat} across their past {sample}."
        ),
        _ => format!(
            "Betting trends favor the {stat} for {team}, cashing in {record} during the last {sample}."
        ),
    }
}

/// Render a uniformly chosen template.
pub fn reword<R: Rng>(trend: &ParsedTrend, rng: &mut R) -> String {
    render_template(trend, rng.random_range(0..TEMPLATE_COUNT))
}
