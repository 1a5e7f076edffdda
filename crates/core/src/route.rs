//! Route templates: `/pets/{id}` becomes `` `/pets/${props.id}` ``.

use std::sync::LazyLock;

use regex::Regex;

use crate::ir::utils::format_member_access;
use crate::ir::{TemplatePart, TsExpr};

#[allow(clippy::expect_used)]
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}/]+)\}").expect("placeholder regex"));

/// An interpolated route plus its placeholder names in declared order.
#[derive(Debug, Clone)]
pub struct RouteTemplate {
    pub expr: TsExpr,
    /// Duplicates are kept.
    pub params: Vec<String>,
}

/// Rewrite `route` so each placeholder reads from the `record` object.
pub fn template(route: &str, record: &str) -> RouteTemplate {
    let mut parts = Vec::new();
    let mut params = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER_RE.captures_iter(route) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            parts.push(TemplatePart::Static(route[last..whole.start()].to_string()));
        }
        parts.push(TemplatePart::Dynamic(TsExpr::Raw(format_member_access(
            record,
            name.as_str(),
        ))));
        params.push(name.as_str().to_string());
        last = whole.end();
    }
    if last < route.len() {
        parts.push(TemplatePart::Static(route[last..].to_string()));
    }

    RouteTemplate {
        expr: TsExpr::Template(parts),
        params,
    }
}

/// Join a legacy `basePath` and a route without doubling the slash.
pub fn with_base_path(base_path: Option<&str>, route: &str) -> String {
    match base_path.map(|b| b.trim_end_matches('/')) {
        Some(base) if !base.is_empty() => {
            format!("{base}/{}", route.trim_start_matches('/'))
        }
        _ => route.to_string(),
    }
}
