//! Document driver: walks every operation of a parsed document and assembles
//! the hooks module and the schema module.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::Result;
use crate::ir::Emit;
use crate::ir::utils::pascal_case;
use crate::options::GeneratorOptions;
use crate::prelude::prelude;
use crate::registry::DocumentContext;
use crate::resolve::TypeResolver;
use crate::route::with_base_path;
use crate::schemas::schema_module;
use crate::spec::OpenApiSpec;
use crate::synth::{HookSynthesizer, OperationInput, Unsupported};

/// Output file names for one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNames {
    /// Sub-directory of the export directory.
    pub directory: String,
    pub hooks_file: String,
    pub schema_file: String,
    /// Specifier the hooks module imports its types from.
    pub schema_import: String,
}

impl ModuleNames {
    /// Names for a document whose file stem is `stem` (`pets.yaml` -> `pets`).
    pub fn for_document(stem: &str) -> Self {
        let name = pascal_case(stem);
        Self {
            directory: stem.to_string(),
            hooks_file: format!("useQueries{name}.tsx"),
            schema_file: format!("useQueries{name}.schema.tsx"),
            schema_import: format!("./useQueries{name}.schema"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneratedDocument {
    pub hooks: String,
    pub schemas: String,
    /// Operations that produced output.
    pub operations: usize,
    /// Operations rendered as a marker, with their identifiers.
    pub unsupported: Vec<(String, Unsupported)>,
    /// Override keys that named no generated operation.
    pub unused_overrides: Vec<String>,
}

/// Generate both modules of one document.
///
/// Fails fast on anything but an OpenAPI 3 document. Paths are visited in
/// document order and verbs in `get, post, patch, put, delete` order;
/// deprecated operations are skipped.
pub fn generate_document(
    spec: &OpenApiSpec,
    options: &GeneratorOptions,
    names: &ModuleNames,
) -> Result<GeneratedDocument> {
    spec.ensure_openapi3()?;
    let resolver = TypeResolver::new(spec.components());
    let synthesizer = HookSynthesizer::new(resolver, options);
    let mut ctx = DocumentContext::default();
    let mut document = GeneratedDocument::default();
    let mut implementations = Vec::new();
    let mut generated_ids = HashSet::new();

    for (path, item) in &spec.paths {
        let route = with_base_path(spec.base_path.as_deref(), path);
        for (verb, operation) in item.operations() {
            if operation.deprecated {
                debug!(verb = %verb, route = %route, "Skipping deprecated operation");
                continue;
            }
            let mut hook = synthesizer.synthesize(
                &mut ctx.registry,
                &OperationInput {
                    verb,
                    route: &route,
                    operation,
                    inherited: &item.parameters,
                },
            )?;
            if hook.is_empty() {
                continue;
            }
            generated_ids.insert(pascal_case(&hook.operation_id));
            generated_ids.insert(hook.operation_id.clone());
            if let Some(unsupported) = hook.unsupported.take() {
                warn!(operation_id = %hook.operation_id, "{unsupported}");
                document
                    .unsupported
                    .push((hook.operation_id.clone(), unsupported));
            }
            ctx.imports.record(&hook);
            implementations.push(hook.implementation);
            document.operations += 1;
        }
    }

    document.unused_overrides = options
        .overrides
        .keys()
        .filter(|key| !generated_ids.contains(key.as_str()))
        .cloned()
        .collect();
    for key in &document.unused_overrides {
        warn!(operation_id = %key, "Override matches no generated operation, check the operation id");
    }

    let mut hooks = prelude(&ctx.imports, options, &names.schema_import).emit();
    for implementation in implementations {
        hooks.push_str(&implementation);
    }
    document.hooks = hooks;
    document.schemas = schema_module(&resolver)?.emit();

    debug!(
        operations = document.operations,
        unsupported = document.unsupported.len(),
        "Generated document"
    );
    Ok(document)
}
