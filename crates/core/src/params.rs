//! Parameter classification.
//!
//! Merges path-item and operation parameters, dereferences them against
//! `components.parameters` and sorts them into path, query and header
//! buckets.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{GenError, Result};
use crate::ir::utils::format_member_access;
use crate::ir::{BinOp, TsExpr, TsLiteral, TsProp, TsType};
use crate::resolve::{ComponentKind, TypeResolver, parse_reference};
use crate::spec::{Parameter, RefOr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParamLocation {
    fn parse(location: &str) -> Option<Self> {
        match location {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

/// A dereferenced parameter with its resolved type.
#[derive(Debug, Clone)]
pub struct ClassifiedParam {
    pub name: String,
    pub required: bool,
    pub ty: TsType,
    pub description: Option<String>,
}

impl ClassifiedParam {
    pub fn to_prop(&self) -> TsProp {
        TsProp {
            name: self.name.clone(),
            ty: self.ty.clone(),
            optional: !self.required,
            doc: self.description.clone(),
        }
    }
}

/// Parameters of one operation, grouped by location.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedParams {
    pub path: Vec<ClassifiedParam>,
    pub query: Vec<ClassifiedParam>,
    pub header: Vec<ClassifiedParam>,
}

impl ClassifiedParams {
    /// All buckets in path, query, header order.
    pub fn all(&self) -> impl Iterator<Item = &ClassifiedParam> {
        self.path.iter().chain(&self.query).chain(&self.header)
    }

    /// `params.a != null && params.b != null` over every required parameter,
    /// or `None` when nothing is required.
    pub fn enabled_predicate(&self, record: &str) -> Option<TsExpr> {
        self.all()
            .filter(|p| p.required)
            .map(|p| TsExpr::BinOp {
                left: Box::new(TsExpr::Raw(format_member_access(record, &p.name))),
                op: BinOp::NotEqual,
                right: Box::new(TsExpr::Literal(TsLiteral::Null)),
            })
            .reduce(|left, right| TsExpr::BinOp {
                left: Box::new(left),
                op: BinOp::And,
                right: Box::new(right),
            })
    }
}

/// Inputs of [`classify`] that come from the operation being generated.
#[derive(Debug, Clone, Copy)]
pub struct ParamSources<'a> {
    pub operation_id: &'a str,
    /// Parameters declared on the path item.
    pub inherited: &'a [RefOr<Parameter>],
    /// Parameters declared on the operation itself.
    pub own: &'a [RefOr<Parameter>],
    /// Placeholder names of the route, in order.
    pub route_params: &'a [String],
}

/// Classify an operation's parameters.
///
/// Operation parameters replace path-item parameters with the same name and
/// location. Headers listed in `header_filters` are dropped (case-insensitive),
/// as are cookie parameters. Every route placeholder must match a path
/// parameter.
pub fn classify(
    resolver: &TypeResolver<'_>,
    sources: ParamSources<'_>,
    header_filters: &[String],
) -> Result<ClassifiedParams> {
    let mut merged: Vec<Parameter> = Vec::new();
    for param in sources.inherited.iter().chain(sources.own) {
        let param = dereference(resolver, param)?;
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => merged.push(param),
        }
    }

    let mut classified = ClassifiedParams::default();
    for param in merged {
        let Some(location) = ParamLocation::parse(&param.location) else {
            debug!(
                operation_id = sources.operation_id,
                param = %param.name,
                location = %param.location,
                "Skipping parameter with unknown location"
            );
            continue;
        };
        if location == ParamLocation::Header
            && header_filters
                .iter()
                .any(|h| h.eq_ignore_ascii_case(&param.name))
        {
            continue;
        }
        if location == ParamLocation::Cookie {
            debug!(
                operation_id = sources.operation_id,
                param = %param.name,
                "Dropping cookie parameter"
            );
            continue;
        }

        let ty = match &param.schema {
            Some(schema) => resolver.resolve_named(schema, &param.name)?,
            None => TsType::any(),
        };
        let entry = ClassifiedParam {
            required: param.required || location == ParamLocation::Path,
            description: param
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            name: param.name,
            ty,
        };
        match location {
            ParamLocation::Path => classified.path.push(entry),
            ParamLocation::Query => classified.query.push(entry),
            ParamLocation::Header => classified.header.push(entry),
            ParamLocation::Cookie => {}
        }
    }

    for placeholder in sources.route_params {
        if !classified.path.iter().any(|p| &p.name == placeholder) {
            return Err(GenError::UnresolvedPathParameter {
                parameter: placeholder.clone(),
                operation_id: sources.operation_id.to_string(),
            });
        }
    }

    Ok(classified)
}

/// Follow parameter references until an inline parameter is reached.
fn dereference(resolver: &TypeResolver<'_>, param: &RefOr<Parameter>) -> Result<Parameter> {
    let mut seen = HashSet::new();
    let mut current = param;
    loop {
        match current {
            RefOr::Item(param) => return Ok(param.clone()),
            RefOr::Ref(r) => {
                let unresolvable = || GenError::UnsupportedReference {
                    reference: r.reference.clone(),
                };
                if !seen.insert(r.reference.as_str()) {
                    return Err(unresolvable());
                }
                let (kind, name) = parse_reference(&r.reference)?;
                if kind != ComponentKind::Parameter {
                    return Err(unresolvable());
                }
                current = resolver
                    .components()
                    .parameters
                    .get(&name)
                    .ok_or_else(unresolvable)?;
            }
        }
    }
}
