//! TypeScript code emission via the Emit trait.
//!
//! Each AST type implements `Emit`; resolution and synthesis only ever build
//! trees, and text appears here.

use super::types::{
    BinOp, ObjectEntry, TemplatePart, TsExpr, TsFunction, TsImport, TsItem, TsLiteral, TsModule,
    TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef,
};
use super::utils::{format_doc_inline, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

fn join<T: Emit>(items: &[T], sep: &str) -> String {
    items.iter().map(Emit::emit).collect::<Vec<_>>().join(sep)
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Void => "void",
            TsPrimitive::Any => "any",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => {
                let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
                format!("\"{escaped}\"")
            }
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                if inner.is_compound() {
                    format!("({})[]", inner.emit())
                } else {
                    format!("{}[]", inner.emit())
                }
            }
            TsType::Union(types) => join(types, " | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    if matches!(t, TsType::Union(_)) {
                        format!("({})", t.emit())
                    } else {
                        t.emit()
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", join(props, "; "))
                }
            }
            TsType::IndexSignature(value) => format!("{{ [key: string]: {} }}", value.emit()),
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let doc = self
            .doc
            .as_deref()
            .map(|d| format!("{} ", format_doc_inline(d)))
            .unwrap_or_default();
        let opt = if self.optional { "?" } else { "" };
        format!("{doc}{}{opt}: {}", quote_if_needed(&self.name), self.ty.emit())
    }
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        let doc = self
            .doc
            .as_ref()
            .map(|d| format!("{d}\n"))
            .unwrap_or_default();
        format!("{doc}export type {} = {};\n", self.name, self.ty.emit())
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for BinOp {
    fn emit(&self) -> String {
        match self {
            BinOp::NotEqual => "!=",
            BinOp::And => "&&",
        }
        .to_string()
    }
}

impl Emit for ObjectEntry {
    fn emit(&self) -> String {
        match self {
            ObjectEntry::Pair(key, value) => format!("{}: {}", quote_if_needed(key), value.emit()),
            ObjectEntry::Shorthand(key) => key.clone(),
            ObjectEntry::Spread(expr) => format!("...{}", expr.emit()),
        }
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                let type_args = if type_args.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", join(type_args, ", "))
                };
                format!("{}{type_args}({})", callee.emit(), join(args, ", "))
            }
            TsExpr::Object(entries) => {
                if entries.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", join(entries, ", "))
                }
            }
            TsExpr::Template(parts) => {
                let content: String = parts
                    .iter()
                    .map(|p| match p {
                        TemplatePart::Static(s) => s.replace('`', "\\`"),
                        TemplatePart::Dynamic(e) => format!("${{{}}}", e.emit()),
                    })
                    .collect();
                format!("`{content}`")
            }
            TsExpr::Await(expr) => format!("await {}", expr.emit()),
            TsExpr::BinOp { left, op, right } => {
                format!("{} {} {}", left.emit(), op.emit(), right.emit())
            }
            TsExpr::Array(items) => format!("[{}]", join(items, ", ")),
            TsExpr::AsConst(expr) => format!("{} as const", expr.emit()),
            TsExpr::Raw(code) => code.clone(),
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{opt}: {}", self.name, self.ty.emit())
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        match self {
            TsStmt::Const { name, init } => format!("{prefix}const {name} = {};\n", init.emit()),
            TsStmt::Return(expr) => format!("{prefix}return {};\n", expr.emit()),
            TsStmt::Raw(code) => code
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        "\n".to_string()
                    } else {
                        format!("{prefix}{line}\n")
                    }
                })
                .collect(),
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let type_params = if self.type_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_params.join(", "))
        };
        let params = join(&self.params, ", ");
        let async_str = if self.is_async { "async " } else { "" };

        let mut output = String::from("export ");
        if self.is_arrow {
            output.push_str(&format!(
                "const {} = {async_str}{type_params}({params}) => {{\n",
                self.name
            ));
        } else {
            output.push_str(&format!(
                "{async_str}function {}{type_params}({params}) {{\n",
                self.name
            ));
        }
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(1));
        }
        output.push_str(if self.is_arrow { "};\n" } else { "}\n" });
        output
    }
}

// =============================================================================
// Imports and modules
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        let type_keyword = if self.type_only { "type " } else { "" };
        format!(
            "import {type_keyword}{{ {} }} from \"{}\";\n",
            self.items.join(", "),
            self.from
        )
    }
}

impl Emit for TsItem {
    fn emit(&self) -> String {
        match self {
            TsItem::Doc(text) | TsItem::Comment(text) => format!("{text}\n"),
            TsItem::TypeDef(def) => def.emit(),
            TsItem::Function(func) => func.emit(),
        }
    }
}

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut output = String::new();

        for import in &self.imports {
            output.push_str(&import.emit());
        }
        if !self.imports.is_empty() {
            output.push('\n');
        }

        for type_def in &self.types {
            output.push_str(&type_def.emit());
            output.push('\n');
        }

        for item in &self.items {
            output.push_str(&item.emit());
            if !matches!(item, TsItem::Doc(_)) {
                output.push('\n');
            }
        }

        output
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str, ty: TsType, optional: bool) -> TsProp {
        TsProp {
            name: name.into(),
            ty,
            optional,
            doc: None,
        }
    }

    #[test]
    fn test_emit_literal() {
        assert_eq!(TsLiteral::String("hello".into()).emit(), "\"hello\"");
        assert_eq!(TsLiteral::String("say \"hi\"".into()).emit(), "\"say \\\"hi\\\"\"");
        assert_eq!(TsLiteral::Number(1.5).emit(), "1.5");
        assert_eq!(TsLiteral::Int(42).emit(), "42");
        assert_eq!(TsLiteral::Bool(true).emit(), "true");
    }

    #[test]
    fn test_emit_array_of_union_is_parenthesized() {
        let inner = TsType::Union(vec![
            TsType::Literal(TsLiteral::String("a".into())),
            TsType::Literal(TsLiteral::String("b".into())),
        ]);
        assert_eq!(TsType::Array(Box::new(inner)).emit(), "(\"a\" | \"b\")[]");
        assert_eq!(TsType::Array(Box::new(TsType::string())).emit(), "string[]");
    }

    #[test]
    fn test_emit_intersection_wraps_unions() {
        let ty = TsType::Intersection(vec![
            TsType::Ref("Base".into()),
            TsType::Union(vec![TsType::Ref("A".into()), TsType::Ref("B".into())]),
        ]);
        assert_eq!(ty.emit(), "Base & (A | B)");
    }

    #[test]
    fn test_emit_object_type() {
        let ty = TsType::Object(vec![
            prop("id", TsType::Primitive(TsPrimitive::Number), false),
            prop("pet-name", TsType::string(), true),
            TsProp {
                doc: Some("Tag list".into()),
                ..prop("tags", TsType::Array(Box::new(TsType::string())), true)
            },
        ]);
        assert_eq!(
            ty.emit(),
            "{ id: number; \"pet-name\"?: string; /** Tag list */ tags?: string[] }"
        );
        assert_eq!(TsType::Object(vec![]).emit(), "{}");
        assert_eq!(TsType::free_form().emit(), "{ [key: string]: any }");
    }

    #[test]
    fn test_emit_type_def_with_doc() {
        let def = TsTypeDef {
            name: "PetId".into(),
            ty: TsType::string(),
            doc: Some("/**\n * Identifier\n */".into()),
        };
        assert_eq!(def.emit(), "/**\n * Identifier\n */\nexport type PetId = string;\n");
    }

    #[test]
    fn test_emit_expressions() {
        let call = TsExpr::Call {
            callee: Box::new(TsExpr::Raw("api.get".into())),
            type_args: vec![TsType::Ref("Pet".into())],
            args: vec![TsExpr::Template(vec![
                TemplatePart::Static("/pets/".into()),
                TemplatePart::Dynamic(TsExpr::Raw("props.id".into())),
            ])],
        };
        assert_eq!(call.emit(), "api.get<Pet>(`/pets/${props.id}`)");

        let config = TsExpr::Object(vec![
            ObjectEntry::Pair("data".into(), TsExpr::Ident("body".into())),
            ObjectEntry::Shorthand("params".into()),
            ObjectEntry::Spread(TsExpr::Ident("options".into())),
        ]);
        assert_eq!(config.emit(), "{ data: body, params, ...options }");

        let key = TsExpr::AsConst(Box::new(TsExpr::Array(vec![TsExpr::Literal(
            TsLiteral::String("getpet".into()),
        )])));
        assert_eq!(key.emit(), "[\"getpet\"] as const");
    }

    #[test]
    fn test_emit_arrow_function() {
        let func = TsFunction {
            name: "getPet".into(),
            type_params: vec![],
            params: vec![TsParam::new("props", TsType::Ref("GetPetParams".into()))],
            body: vec![TsStmt::Return(TsExpr::Ident("result".into()))],
            is_async: true,
            is_arrow: true,
        };
        assert_eq!(
            func.emit(),
            "export const getPet = async (props: GetPetParams) => {\n  return result;\n};\n"
        );
    }

    #[test]
    fn test_emit_regular_function() {
        let func = TsFunction {
            name: "useGetPet".into(),
            type_params: vec!["TData = Pet".into()],
            params: vec![TsParam::optional("options", TsType::Ref("Options".into()))],
            body: vec![TsStmt::Raw("return useQuery(options);".into())],
            is_async: false,
            is_arrow: false,
        };
        assert_eq!(
            func.emit(),
            "export function useGetPet<TData = Pet>(options?: Options) {\n  return useQuery(options);\n}\n"
        );
    }

    #[test]
    fn test_emit_imports() {
        let import = TsImport {
            items: vec!["useQuery".into(), "useMutation".into()],
            from: "@tanstack/react-query".into(),
            type_only: false,
        };
        assert_eq!(
            import.emit(),
            "import { useQuery, useMutation } from \"@tanstack/react-query\";\n"
        );
        let import = TsImport {
            type_only: true,
            items: vec!["Pet".into()],
            from: "./useQueriesPets.schema".into(),
        };
        assert_eq!(
            import.emit(),
            "import type { Pet } from \"./useQueriesPets.schema\";\n"
        );
    }
}
