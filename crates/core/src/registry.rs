//! Per-document bookkeeping: seen operation identifiers and the names and
//! hook kinds the prelude has to import.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::error::{GenError, Result};
use crate::options::HookKind;
use crate::synth::GeneratedHook;

/// Identifiers already generated in the current document.
#[derive(Debug, Default)]
pub struct OperationIdRegistry {
    seen: HashSet<String>,
}

impl OperationIdRegistry {
    /// Record `operation_id`, failing if it was seen before.
    pub fn try_register(&mut self, operation_id: &str) -> Result<()> {
        if self.seen.insert(operation_id.to_string()) {
            Ok(())
        } else {
            Err(GenError::DuplicateOperationId {
                operation_id: operation_id.to_string(),
            })
        }
    }
}

/// Distinct type names and hook kinds used across a document, in first-seen order.
#[derive(Debug, Default)]
pub struct ImportAggregator {
    type_names: IndexSet<String>,
    hook_kinds: IndexSet<HookKind>,
}

impl ImportAggregator {
    pub fn record(&mut self, hook: &GeneratedHook) {
        self.type_names.extend(hook.type_names.iter().cloned());
        self.hook_kinds.extend(hook.hook_kinds.iter().copied());
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.type_names.iter().map(String::as_str)
    }

    pub fn uses(&self, kind: HookKind) -> bool {
        self.hook_kinds.contains(&kind)
    }
}

/// Everything that lives for exactly one document.
#[derive(Debug, Default)]
pub struct DocumentContext {
    pub registry: OperationIdRegistry,
    pub imports: ImportAggregator,
}
