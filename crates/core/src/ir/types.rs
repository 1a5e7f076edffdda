//! TypeScript IR types for code generation.
//!
//! - TsType: type expressions (primitives, arrays, unions, objects, ...)
//! - TsExpr / TsStmt: just enough expression and statement structure for
//!   accessors and hooks
//! - TsItem / TsModule: top-level output units

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, void, any
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Object type: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// Open map: { [key: string]: T }
    IndexSignature(Box<TsType>),
    /// Literal type: "foo", 42, true
    Literal(TsLiteral),
    /// Named type reference
    Ref(String),
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Null,
    Void,
    Any,
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
    pub doc: Option<String>,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    String(String),
    Number(f64),
    Int(i64),
    Bool(bool),
    Null,
}

impl TsType {
    pub fn string() -> Self {
        TsType::Primitive(TsPrimitive::String)
    }

    pub fn any() -> Self {
        TsType::Primitive(TsPrimitive::Any)
    }

    pub fn void() -> Self {
        TsType::Primitive(TsPrimitive::Void)
    }

    /// `{ [key: string]: any }`
    pub fn free_form() -> Self {
        TsType::IndexSignature(Box::new(TsType::any()))
    }

    /// Union or intersection, which need parentheses inside an array suffix.
    pub fn is_compound(&self) -> bool {
        matches!(self, TsType::Union(_) | TsType::Intersection(_))
    }

    /// Add `| null` unless the type already admits null.
    pub fn nullable(self) -> Self {
        match self {
            TsType::Primitive(TsPrimitive::Null) => self,
            TsType::Union(mut members) => {
                if !members.contains(&TsType::Primitive(TsPrimitive::Null)) {
                    members.push(TsType::Primitive(TsPrimitive::Null));
                }
                TsType::Union(members)
            }
            other => TsType::Union(vec![other, TsType::Primitive(TsPrimitive::Null)]),
        }
    }

    /// Build a union, collapsing the single-member case.
    pub fn union_of(mut members: Vec<TsType>) -> Self {
        if members.len() == 1 {
            members.remove(0)
        } else {
            TsType::Union(members)
        }
    }

    /// Build an intersection, collapsing the single-member case.
    pub fn intersection_of(mut members: Vec<TsType>) -> Self {
        if members.len() == 1 {
            members.remove(0)
        } else {
            TsType::Intersection(members)
        }
    }

    /// Every named type this expression mentions, in first-seen order.
    pub fn referenced_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut Vec<String>) {
        match self {
            TsType::Ref(name) => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            TsType::Array(inner) | TsType::IndexSignature(inner) => inner.collect_names(names),
            TsType::Union(members) | TsType::Intersection(members) => {
                members.iter().for_each(|m| m.collect_names(names));
            }
            TsType::Object(props) => props.iter().for_each(|p| p.ty.collect_names(names)),
            TsType::Primitive(_) | TsType::Literal(_) => {}
        }
    }
}

/// TypeScript expression
#[derive(Debug, Clone)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: "bar", 42
    Literal(TsLiteral),
    /// Function call, optionally with explicit type arguments: foo<T>(a, b)
    Call {
        callee: Box<TsExpr>,
        type_args: Vec<TsType>,
        args: Vec<TsExpr>,
    },
    /// Object literal: { a: 1, b }
    Object(Vec<ObjectEntry>),
    /// Template literal: `${foo}/bar`
    Template(Vec<TemplatePart>),
    /// Await expression: await fetch()
    Await(Box<TsExpr>),
    /// Binary operation: a != null
    BinOp {
        left: Box<TsExpr>,
        op: BinOp,
        right: Box<TsExpr>,
    },
    /// Array literal: [a, b, c]
    Array(Vec<TsExpr>),
    /// `expr as const`
    AsConst(Box<TsExpr>),
    /// Raw code that doesn't fit the AST
    Raw(String),
}

/// Object literal entry
#[derive(Debug, Clone)]
pub enum ObjectEntry {
    /// key: value
    Pair(String, TsExpr),
    /// shorthand: { key }
    Shorthand(String),
    /// ...expr
    Spread(TsExpr),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    NotEqual,
    And,
}

/// Function parameter
#[derive(Debug, Clone)]
pub struct TsParam {
    /// Name or destructuring pattern (`props`, `{ body, ...props }`).
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

impl TsParam {
    pub fn new(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }
}

/// Template literal part
#[derive(Debug, Clone)]
pub enum TemplatePart {
    /// Static string part
    Static(String),
    /// Dynamic expression part: ${expr}
    Dynamic(TsExpr),
}

// =============================================================================
// Module-Level IR (for printer)
// =============================================================================

/// Import statement
#[derive(Debug, Clone)]
pub struct TsImport {
    pub items: Vec<String>,
    pub from: String,
    pub type_only: bool,
}

/// Type definition: `export type Foo = ...`
#[derive(Debug, Clone)]
pub struct TsTypeDef {
    pub name: String,
    pub ty: TsType,
    pub doc: Option<String>,
}

/// Statement in a function body
#[derive(Debug, Clone)]
pub enum TsStmt {
    /// const declaration
    Const { name: String, init: TsExpr },
    /// Return statement
    Return(TsExpr),
    /// Raw code block (for patterns that don't fit the AST)
    Raw(String),
}

/// Function definition
#[derive(Debug, Clone)]
pub struct TsFunction {
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<TsParam>,
    pub body: Vec<TsStmt>,
    pub is_async: bool,
    pub is_arrow: bool,
}

/// A top-level item of a generated module.
#[derive(Debug, Clone)]
pub enum TsItem {
    /// Block doc comment
    Doc(String),
    /// Line comment
    Comment(String),
    TypeDef(TsTypeDef),
    Function(TsFunction),
}

/// Complete TypeScript module
#[derive(Debug, Clone, Default)]
pub struct TsModule {
    pub imports: Vec<TsImport>,
    pub types: Vec<TsTypeDef>,
    pub items: Vec<TsItem>,
}
