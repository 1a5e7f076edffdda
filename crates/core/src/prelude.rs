//! Shared prelude of a hooks module: imports and helper types.

use crate::ir::{TsImport, TsModule, TsType, TsTypeDef};
use crate::options::{GeneratorOptions, HookKind};
use crate::registry::ImportAggregator;

const REACT_QUERY: &str = "@tanstack/react-query";

/// Value and type-only imports each hook kind pulls from react-query.
fn react_query_items(kind: HookKind) -> (&'static [&'static str], &'static [&'static str]) {
    match kind {
        HookKind::Query => (
            &["useQuery"],
            &["UseQueryOptions", "QueryKey", "SetDataOptions", "QueryFilters"],
        ),
        HookKind::InfiniteQuery => (
            &["useInfiniteQuery"],
            &["UseInfiniteQueryOptions", "InfiniteData", "QueryKey"],
        ),
        HookKind::Mutation => (&["useMutation"], &["UseMutationOptions"]),
    }
}

fn push_unique(items: &mut Vec<String>, new: &[&str]) {
    for item in new {
        if !items.iter().any(|i| i == item) {
            items.push((*item).to_string());
        }
    }
}

/// Build the prelude for a document. Empty when the document produced no hooks.
pub fn prelude(imports: &ImportAggregator, options: &GeneratorOptions, schema_import: &str) -> TsModule {
    let kinds: Vec<HookKind> = [HookKind::Query, HookKind::InfiniteQuery, HookKind::Mutation]
        .into_iter()
        .filter(|k| imports.uses(*k))
        .collect();
    if kinds.is_empty() {
        return TsModule::default();
    }

    let mut values = Vec::new();
    let mut types = Vec::new();
    for kind in &kinds {
        let (v, t) = react_query_items(*kind);
        push_unique(&mut values, v);
        push_unique(&mut types, t);
    }

    let mut module = TsModule::default();
    module.imports.push(TsImport {
        items: values,
        from: REACT_QUERY.to_string(),
        type_only: false,
    });
    module.imports.push(TsImport {
        items: types,
        from: REACT_QUERY.to_string(),
        type_only: true,
    });
    module.imports.push(TsImport {
        items: vec!["AxiosError".to_string()],
        from: "axios".to_string(),
        type_only: true,
    });
    module.imports.push(TsImport {
        items: vec!["api".to_string()],
        from: options.api_module.clone(),
        type_only: false,
    });

    let needs_cache = kinds.contains(&HookKind::Query);
    if needs_cache {
        module.imports.push(TsImport {
            items: vec!["queryClient".to_string()],
            from: options.query_client_module.clone(),
            type_only: false,
        });
    }

    let type_names: Vec<String> = imports.type_names().map(str::to_string).collect();
    if !type_names.is_empty() {
        module.imports.push(TsImport {
            items: type_names,
            from: schema_import.to_string(),
            type_only: true,
        });
    }

    if needs_cache {
        module.types.push(TsTypeDef {
            name: "Updater<TInput, TOutput>".to_string(),
            ty: TsType::Ref("TOutput | ((input: TInput) => TOutput)".to_string()),
            doc: None,
        });
    }

    module
}
