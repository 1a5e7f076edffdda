//! The schema module: one exported type alias per component.

use std::collections::HashSet;

use tracing::warn;

use crate::error::Result;
use crate::ir::utils::format_doc_block;
use crate::ir::{TsModule, TsType, TsTypeDef};
use crate::resolve::{ComponentKind, TypeResolver};
use crate::spec::RefOr;

/// Aliases for request bodies, responses, parameters and schemas, in that order.
pub fn schema_module(resolver: &TypeResolver<'_>) -> Result<TsModule> {
    let components = resolver.components();
    let mut defs: Vec<(ComponentKind, &str, TsType, Option<&str>)> = Vec::new();

    for (name, body) in &components.request_bodies {
        let ty = resolver.request_body_type(body)?.unwrap_or_else(TsType::void);
        let doc = match body {
            RefOr::Item(body) => body.description.as_deref(),
            RefOr::Ref(_) => None,
        };
        defs.push((ComponentKind::RequestBody, name.as_str(), ty, doc));
    }

    for (name, response) in &components.responses {
        let ty = resolver
            .response_payload(response, name)?
            .unwrap_or_else(TsType::void);
        let doc = match response {
            RefOr::Item(response) => response.description.as_deref(),
            RefOr::Ref(_) => None,
        };
        defs.push((ComponentKind::Response, name.as_str(), ty, doc));
    }

    for (name, param) in &components.parameters {
        let (ty, doc) = match param {
            RefOr::Ref(r) => (resolver.resolve_reference(&r.reference)?, None),
            RefOr::Item(param) => {
                let ty = match &param.schema {
                    Some(schema) => resolver.resolve_named(schema, name)?,
                    None => TsType::any(),
                };
                (ty, param.description.as_deref())
            }
        };
        defs.push((ComponentKind::Parameter, name.as_str(), ty, doc));
    }

    for (name, schema) in &components.schemas {
        let ty = resolver.resolve_named(schema, name)?;
        defs.push((ComponentKind::Schema, name.as_str(), ty, schema.description.as_deref()));
    }

    let mut seen = HashSet::new();
    let mut module = TsModule::default();
    for (kind, name, ty, doc) in defs {
        let type_name = kind.type_name(name);
        if !seen.insert(type_name.clone()) {
            warn!(component = name, type_name = %type_name, "Skipping component whose type name is already taken");
            continue;
        }
        module.types.push(TsTypeDef {
            name: type_name,
            ty,
            doc: format_doc_block(doc),
        });
    }
    Ok(module)
}
