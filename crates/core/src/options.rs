//! Generator options shared by every document of a run.

use indexmap::IndexMap;
use serde::Deserialize;

/// Hook family generated for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookKind {
    Query,
    Mutation,
    InfiniteQuery,
}

impl HookKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::Query => "query",
            HookKind::Mutation => "mutation",
            HookKind::InfiniteQuery => "infiniteQuery",
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forces the hook family of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Override {
    pub kind: HookKind,
    /// Query parameter that carries the page cursor of an infinite query.
    #[serde(default)]
    pub page_param: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Module exporting the configured axios instance as `api`.
    pub api_module: String,
    /// Module exporting the shared `queryClient`.
    pub query_client_module: String,
    /// Header parameters left out of generated signatures.
    pub header_filters: Vec<String>,
    /// Keyed by operation identifier.
    pub overrides: IndexMap<String, Override>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            api_module: "../api".to_string(),
            query_client_module: "../queryClient".to_string(),
            header_filters: Vec::new(),
            overrides: IndexMap::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: GeneratorOptions = serde_json::from_str(
            r#"{
  "header_filters": ["Authorization"],
  "overrides": {
    "GetTimeline": { "kind": "infiniteQuery", "page_param": "Offset" },
    "searchPets": { "kind": "query" }
  }
}"#,
        )
        .unwrap();
        assert_eq!(options.api_module, "../api");
        assert_eq!(options.header_filters, vec!["Authorization"]);
        assert_eq!(
            options.overrides["GetTimeline"],
            Override {
                kind: HookKind::InfiniteQuery,
                page_param: Some("Offset".into()),
            }
        );
        assert_eq!(options.overrides["searchPets"].kind, HookKind::Query);
    }

    #[test]
    fn test_unknown_hook_kind_is_rejected() {
        let err = serde_json::from_str::<Override>(r#"{ "kind": "suspense" }"#).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }
}
