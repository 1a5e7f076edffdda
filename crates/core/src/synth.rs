//! Hook synthesis.
//!
//! One operation goes in; out comes its doc comment, a parameter type, a
//! plain accessor calling the axios `api` instance, and a cache-aware hook
//! family. Which accessor convention applies is decided by the operation's
//! [`ParamShape`]; four shapes have no convention and are rendered as a
//! marker comment instead, as are parameters whose names collide across
//! locations.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{GenError, Result};
use crate::ir::utils::{camel_case, format_doc_block, format_member_access, pascal_case};
use crate::ir::{
    Emit, ObjectEntry, TsExpr, TsFunction, TsItem, TsLiteral, TsModule, TsParam, TsProp, TsStmt,
    TsType, TsTypeDef,
};
use crate::options::{GeneratorOptions, HookKind};
use crate::params::{ClassifiedParam, ClassifiedParams, ParamSources, classify};
use crate::registry::OperationIdRegistry;
use crate::resolve::TypeResolver;
use crate::route::{self, RouteTemplate};
use crate::spec::{Operation, Parameter, RefOr, Verb};

/// Which parameter categories (body, path, query, header) an operation has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamShape {
    Empty,
    Body,
    Path,
    Query,
    Header,
    BodyPath,
    BodyQuery,
    BodyHeader,
    PathQuery,
    PathHeader,
    QueryHeader,
    BodyPathQuery,
    BodyPathHeader,
    BodyQueryHeader,
    PathQueryHeader,
    BodyPathQueryHeader,
}

impl ParamShape {
    pub fn of(body: bool, path: bool, query: bool, header: bool) -> Self {
        match (body, path, query, header) {
            (false, false, false, false) => Self::Empty,
            (true, false, false, false) => Self::Body,
            (false, true, false, false) => Self::Path,
            (false, false, true, false) => Self::Query,
            (false, false, false, true) => Self::Header,
            (true, true, false, false) => Self::BodyPath,
            (true, false, true, false) => Self::BodyQuery,
            (true, false, false, true) => Self::BodyHeader,
            (false, true, true, false) => Self::PathQuery,
            (false, true, false, true) => Self::PathHeader,
            (false, false, true, true) => Self::QueryHeader,
            (true, true, true, false) => Self::BodyPathQuery,
            (true, true, false, true) => Self::BodyPathHeader,
            (true, false, true, true) => Self::BodyQueryHeader,
            (false, true, true, true) => Self::PathQueryHeader,
            (true, true, true, true) => Self::BodyPathQueryHeader,
        }
    }

    /// `(body, path, query, header)`
    pub fn flags(self) -> (bool, bool, bool, bool) {
        match self {
            Self::Empty => (false, false, false, false),
            Self::Body => (true, false, false, false),
            Self::Path => (false, true, false, false),
            Self::Query => (false, false, true, false),
            Self::Header => (false, false, false, true),
            Self::BodyPath => (true, true, false, false),
            Self::BodyQuery => (true, false, true, false),
            Self::BodyHeader => (true, false, false, true),
            Self::PathQuery => (false, true, true, false),
            Self::PathHeader => (false, true, false, true),
            Self::QueryHeader => (false, false, true, true),
            Self::BodyPathQuery => (true, true, true, false),
            Self::BodyPathHeader => (true, true, false, true),
            Self::BodyQueryHeader => (true, false, true, true),
            Self::PathQueryHeader => (false, true, true, true),
            Self::BodyPathQueryHeader => (true, true, true, true),
        }
    }

    /// Human-readable form, e.g. `body + path + query`.
    pub fn describe(self) -> String {
        let (body, path, query, header) = self.flags();
        let parts: Vec<&str> = [(body, "body"), (path, "path"), (query, "query"), (header, "header")]
            .into_iter()
            .filter_map(|(present, name)| present.then_some(name))
            .collect();
        if parts.is_empty() {
            "no parameters".to_string()
        } else {
            parts.join(" + ")
        }
    }

    fn accessor_plan(self) -> std::result::Result<AccessorPlan, Unsupported> {
        use BodyArg::{Merged, Whole};
        Ok(match self {
            Self::Empty => AccessorPlan::new(false, None, false, false),
            Self::Body => AccessorPlan::new(true, Some(Whole), false, false),
            Self::Path => AccessorPlan::new(true, None, false, false),
            Self::Query => AccessorPlan::new(true, None, true, false),
            Self::Header => AccessorPlan::new(true, None, false, true),
            Self::BodyPath => AccessorPlan::new(true, Some(Merged), false, false),
            Self::BodyQuery => AccessorPlan::new(true, Some(Merged), true, false),
            Self::BodyHeader => AccessorPlan::new(true, Some(Merged), false, true),
            Self::PathQuery => AccessorPlan::new(true, None, true, false),
            Self::PathHeader => AccessorPlan::new(true, None, false, true),
            Self::QueryHeader => AccessorPlan::new(true, None, true, true),
            Self::BodyQueryHeader => AccessorPlan::new(true, Some(Merged), true, true),
            Self::BodyPathQuery
            | Self::BodyPathHeader
            | Self::PathQueryHeader
            | Self::BodyPathQueryHeader => return Err(Unsupported::Shape(self)),
        })
    }
}

/// An operation no accessor can be generated for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unsupported {
    /// No accessor convention exists for the parameter shape.
    #[error("NOT SUPPORTED ({})", .0.describe())]
    Shape(ParamShape),
    /// Two parameters would land on the same key of the flat record.
    #[error("NOT SUPPORTED (parameter name `{0}` is declared more than once)")]
    DuplicateParameter(String),
}

impl Unsupported {
    fn reason(&self) -> String {
        match self {
            Unsupported::Shape(shape) => shape.describe(),
            Unsupported::DuplicateParameter(name) => format!("duplicate parameter name `{name}`"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyArg {
    /// The body is the only input and is sent as given.
    Whole,
    /// The body shares the parameter record with path, query or header values.
    Merged,
}

#[derive(Debug, Clone, Copy)]
struct AccessorPlan {
    takes_props: bool,
    body: Option<BodyArg>,
    query: bool,
    header: bool,
}

impl AccessorPlan {
    fn new(takes_props: bool, body: Option<BodyArg>, query: bool, header: bool) -> Self {
        Self {
            takes_props,
            body,
            query,
            header,
        }
    }
}

/// How the accessor gets hold of the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BodyForm {
    None,
    /// `props` is the body.
    Whole,
    /// Fields are picked out of the flat record.
    Picked(Vec<String>),
    /// `{ body, ...props }`
    Wrapped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HookFamily {
    Query,
    Mutation,
    InfiniteQuery { page_param: String },
}

impl HookFamily {
    fn kind(&self) -> HookKind {
        match self {
            HookFamily::Query => HookKind::Query,
            HookFamily::Mutation => HookKind::Mutation,
            HookFamily::InfiniteQuery { .. } => HookKind::InfiniteQuery,
        }
    }
}

/// Generated output for one operation.
#[derive(Debug, Clone, Default)]
pub struct GeneratedHook {
    pub operation_id: String,
    pub implementation: String,
    /// Schema-module names the implementation refers to.
    pub type_names: Vec<String>,
    pub hook_kinds: Vec<HookKind>,
    pub unsupported: Option<Unsupported>,
}

impl GeneratedHook {
    pub fn is_empty(&self) -> bool {
        self.implementation.is_empty()
    }
}

/// One operation as seen by the synthesizer.
#[derive(Debug, Clone, Copy)]
pub struct OperationInput<'a> {
    pub verb: Verb,
    /// Route with any base path already applied.
    pub route: &'a str,
    pub operation: &'a Operation,
    /// Parameters declared on the path item.
    pub inherited: &'a [RefOr<Parameter>],
}

struct BodyInfo {
    ty: TsType,
    fields: Option<Vec<String>>,
}

struct Names {
    component: String,
    fetch: String,
    params_type: String,
    key_fn: String,
    base_key: String,
}

impl Names {
    fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            fetch: camel_case(component),
            params_type: format!("{component}Params"),
            key_fn: format!("get{component}QueryKey"),
            base_key: component.to_lowercase(),
        }
    }
}

#[derive(Debug)]
pub struct HookSynthesizer<'a> {
    resolver: TypeResolver<'a>,
    options: &'a GeneratorOptions,
}

impl<'a> HookSynthesizer<'a> {
    pub fn new(resolver: TypeResolver<'a>, options: &'a GeneratorOptions) -> Self {
        Self { resolver, options }
    }

    /// Generate the hooks of one operation.
    ///
    /// A repeated identifier yields an empty [`GeneratedHook`]. An
    /// unsupported parameter shape, or parameters sharing a name across
    /// locations, yields the doc comment and a marker.
    pub fn synthesize(
        &self,
        registry: &mut OperationIdRegistry,
        input: &OperationInput<'_>,
    ) -> Result<GeneratedHook> {
        let operation_id = operation_identifier(input)?;
        let names = Names::new(&pascal_case(&operation_id));
        if let Err(err) = registry.try_register(&names.component) {
            debug!(
                operation_id = %operation_id,
                verb = %input.verb,
                route = input.route,
                "{err}, skipping"
            );
            return Ok(GeneratedHook::default());
        }

        let route = route::template(input.route, "props");
        let params = classify(
            &self.resolver,
            ParamSources {
                operation_id: &operation_id,
                inherited: input.inherited,
                own: &input.operation.parameters,
                route_params: &route.params,
            },
            &self.options.header_filters,
        )?;
        let body = match &input.operation.request_body {
            Some(body) => self.resolver.request_body_type(body)?.map(|ty| BodyInfo {
                ty,
                fields: self.resolver.body_fields(body),
            }),
            None => None,
        };
        let response = self.resolver.response_type(input.operation)?;

        let shape = ParamShape::of(
            body.is_some(),
            !params.path.is_empty(),
            !params.query.is_empty(),
            !params.header.is_empty(),
        );
        let mut items = vec![TsItem::Doc(operation_doc(input, &operation_id))];

        let checked = shape.accessor_plan().and_then(|plan| match duplicate_name(&params) {
            Some(name) => Err(Unsupported::DuplicateParameter(name)),
            None => Ok(plan),
        });
        let plan = match checked {
            Ok(plan) => plan,
            Err(unsupported) => {
                debug!(operation_id = %operation_id, shape = %shape.describe(), "{unsupported}");
                items.push(TsItem::Comment(format!(
                    "// NOT SUPPORTED: {operation_id} ({})",
                    unsupported.reason()
                )));
                return Ok(GeneratedHook {
                    operation_id,
                    implementation: render(items),
                    unsupported: Some(unsupported),
                    ..GeneratedHook::default()
                });
            }
        };
        let family = self.hook_family(&operation_id, &names.component, input.verb, &params)?;

        let (params_type, form) = params_type(plan, &params, body.as_ref());
        if let Some(ty) = &params_type {
            items.push(TsItem::TypeDef(TsTypeDef {
                name: names.params_type.clone(),
                ty: ty.clone(),
                doc: None,
            }));
        }
        items.push(TsItem::Function(accessor(
            &names,
            input.verb,
            &route,
            plan,
            &form,
            &params,
            &response,
        )));
        let record = plan.takes_props.then(|| TsType::Ref(names.params_type.clone()));
        items.extend(
            hook_family_items(&names, &family, record.as_ref(), &params, &response)
                .into_iter()
                .map(TsItem::Function),
        );

        let mut type_names = response.referenced_names();
        let mentioned = body
            .iter()
            .map(|b| &b.ty)
            .chain(params.all().map(|p| &p.ty))
            .flat_map(TsType::referenced_names);
        for name in mentioned {
            if !type_names.contains(&name) {
                type_names.push(name);
            }
        }

        debug!(
            operation_id = %operation_id,
            shape = %shape.describe(),
            kind = %family.kind(),
            "Generated hooks"
        );
        Ok(GeneratedHook {
            operation_id,
            implementation: render(items),
            type_names,
            hook_kinds: vec![family.kind()],
            unsupported: None,
        })
    }

    fn hook_family(
        &self,
        operation_id: &str,
        component: &str,
        verb: Verb,
        params: &ClassifiedParams,
    ) -> Result<HookFamily> {
        let overrides = &self.options.overrides;
        let Some(over) = overrides
            .get(operation_id)
            .or_else(|| overrides.get(component))
        else {
            return Ok(if verb == Verb::Get {
                HookFamily::Query
            } else {
                HookFamily::Mutation
            });
        };

        let family = match over.kind {
            HookKind::Query => HookFamily::Query,
            HookKind::Mutation => HookFamily::Mutation,
            HookKind::InfiniteQuery => {
                let invalid = |reason: String| GenError::InvalidOverride {
                    operation_id: operation_id.to_string(),
                    reason,
                };
                let page_param = over
                    .page_param
                    .as_deref()
                    .ok_or_else(|| invalid("an infinite query needs a `page_param`".to_string()))?;
                if !params.query.iter().any(|p| p.name == page_param) {
                    return Err(invalid(format!(
                        "page parameter `{page_param}` is not a query parameter"
                    )));
                }
                HookFamily::InfiniteQuery {
                    page_param: page_param.to_string(),
                }
            }
        };
        info!(operation_id, kind = %over.kind, "Applying hook override");
        Ok(family)
    }
}

/// Explicit identifier, or `"<verb> <route>"` when the operation has none.
fn operation_identifier(input: &OperationInput<'_>) -> Result<String> {
    let invalid = |operation_id: &str| GenError::InvalidOperationId {
        operation_id: operation_id.to_string(),
        verb: input.verb.to_string(),
        route: input.route.to_string(),
    };
    let id = match input.operation.operation_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ if input.route.trim_matches('/') == "*" => return Err(invalid("")),
        _ => format!("{} {}", input.verb, input.route),
    };
    if id == "*" || pascal_case(&id).is_empty() {
        return Err(invalid(&id));
    }
    Ok(id)
}

fn operation_doc(input: &OperationInput<'_>, operation_id: &str) -> String {
    let mut text = format!(
        "type: {}\noperationId: {operation_id}\nurl: {}",
        input.verb, input.route
    );
    let mut extras: Vec<&str> = Vec::new();
    for extra in [&input.operation.summary, &input.operation.description]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
    {
        if !extra.is_empty() && !extras.contains(&extra) {
            extras.push(extra);
        }
    }
    for extra in extras {
        text.push_str("\n\n");
        text.push_str(extra);
    }
    format_doc_block(Some(&text)).unwrap_or_default()
}

fn render(items: Vec<TsItem>) -> String {
    TsModule {
        items,
        ..TsModule::default()
    }
    .emit()
}

/// Parameter record type and the way the accessor extracts the body from it.
fn params_type(
    plan: AccessorPlan,
    params: &ClassifiedParams,
    body: Option<&BodyInfo>,
) -> (Option<TsType>, BodyForm) {
    if !plan.takes_props {
        return (None, BodyForm::None);
    }
    let fields = TsType::Object(params.all().map(ClassifiedParam::to_prop).collect());
    match (plan.body, body) {
        (Some(BodyArg::Whole), Some(body)) => (Some(body.ty.clone()), BodyForm::Whole),
        (Some(BodyArg::Merged), Some(body)) => match spreadable_fields(body, params) {
            Some(picked) => (
                Some(TsType::Intersection(vec![body.ty.clone(), fields])),
                BodyForm::Picked(picked),
            ),
            None => {
                let wrapper = TsType::Object(vec![TsProp {
                    name: "body".to_string(),
                    ty: body.ty.clone(),
                    optional: false,
                    doc: None,
                }]);
                (
                    Some(TsType::Intersection(vec![wrapper, fields])),
                    BodyForm::Wrapped,
                )
            }
        },
        _ => (Some(fields), BodyForm::None),
    }
}

/// First name shared by two parameters, which the flat record can't hold twice.
fn duplicate_name(params: &ClassifiedParams) -> Option<String> {
    let mut seen = HashSet::new();
    params
        .all()
        .find(|p| !seen.insert(p.name.as_str()))
        .map(|p| p.name.clone())
}

/// Body fields, when they can share one flat record with the parameters.
fn spreadable_fields(body: &BodyInfo, params: &ClassifiedParams) -> Option<Vec<String>> {
    let fields = body.fields.as_ref()?;
    if fields.iter().any(|f| params.all().any(|p| &p.name == f)) {
        return None;
    }
    Some(fields.clone())
}

fn pick(record: &str, names: impl IntoIterator<Item = String>) -> TsExpr {
    TsExpr::Object(
        names
            .into_iter()
            .map(|name| {
                let value = TsExpr::Raw(format_member_access(record, &name));
                ObjectEntry::Pair(name, value)
            })
            .collect(),
    )
}

fn names_of(params: &[ClassifiedParam]) -> Vec<String> {
    params.iter().map(|p| p.name.clone()).collect()
}

fn accessor(
    names: &Names,
    verb: Verb,
    route: &RouteTemplate,
    plan: AccessorPlan,
    form: &BodyForm,
    params: &ClassifiedParams,
    response: &TsType,
) -> TsFunction {
    let params_ty = TsType::Ref(names.params_type.clone());
    let param = match form {
        _ if !plan.takes_props => None,
        BodyForm::Wrapped => Some(TsParam::new("{ body, ...props }", params_ty)),
        _ => Some(TsParam::new("props", params_ty)),
    };

    let mut body = Vec::new();
    let body_expr = match form {
        BodyForm::None => None,
        BodyForm::Whole => Some(TsExpr::Ident("props".into())),
        BodyForm::Picked(fields) => {
            body.push(TsStmt::Const {
                name: "body".into(),
                init: pick("props", fields.iter().cloned()),
            });
            Some(TsExpr::Ident("body".into()))
        }
        BodyForm::Wrapped => Some(TsExpr::Ident("body".into())),
    };

    let mut config = Vec::new();
    if plan.query {
        body.push(TsStmt::Const {
            name: "params".into(),
            init: pick("props", names_of(&params.query)),
        });
        config.push(ObjectEntry::Shorthand("params".into()));
    }
    if plan.header {
        body.push(TsStmt::Const {
            name: "headers".into(),
            init: pick("props", names_of(&params.header)),
        });
        config.push(ObjectEntry::Shorthand("headers".into()));
    }

    let mut args = vec![route.expr.clone()];
    if verb.is_update() {
        args.push(body_expr.unwrap_or_else(|| TsExpr::Ident("undefined".into())));
    } else if let Some(data) = body_expr {
        config.insert(0, ObjectEntry::Pair("data".into(), data));
    }
    if !config.is_empty() {
        args.push(TsExpr::Object(config));
    }

    body.push(TsStmt::Const {
        name: "result".into(),
        init: TsExpr::Await(Box::new(TsExpr::Call {
            callee: Box::new(TsExpr::Raw(format!("api.{verb}"))),
            type_args: vec![response.clone()],
            args,
        })),
    });
    body.push(TsStmt::Return(TsExpr::Raw("result.data".into())));

    TsFunction {
        name: names.fetch.clone(),
        type_params: vec![],
        params: param.into_iter().collect(),
        body,
        is_async: true,
        is_arrow: true,
    }
}

fn hook_family_items(
    names: &Names,
    family: &HookFamily,
    params_ty: Option<&TsType>,
    params: &ClassifiedParams,
    response: &TsType,
) -> Vec<TsFunction> {
    match family {
        HookFamily::Query => {
            let mut items = vec![
                query_key_fn(names, params_ty),
                query_hook(names, params_ty, params, response),
            ];
            items.extend(cache_helpers(names, params_ty, response));
            items
        }
        HookFamily::Mutation => vec![mutation_hook(names, params_ty, response)],
        HookFamily::InfiniteQuery { page_param } => {
            let hook_params = params_ty.map(|ty| {
                TsType::Ref(format!("Omit<{}, \"{}\">", ty.emit(), page_param))
            });
            vec![
                query_key_fn(names, hook_params.as_ref()),
                infinite_query_hook(names, hook_params.as_ref(), page_param, params, response),
            ]
        }
    }
}

fn export_fn(name: String, params: Vec<TsParam>, body: String) -> TsFunction {
    TsFunction {
        name,
        type_params: vec![],
        params,
        body: vec![TsStmt::Raw(body)],
        is_async: false,
        is_arrow: true,
    }
}

/// `(params)` / `()` argument lists matching whether the accessor takes a record.
fn call_args(params_ty: Option<&TsType>) -> (Vec<TsParam>, &'static str) {
    match params_ty {
        Some(ty) => (vec![TsParam::new("params", ty.clone())], "params"),
        None => (vec![], ""),
    }
}

fn query_key_fn(names: &Names, params_ty: Option<&TsType>) -> TsFunction {
    let mut key = vec![TsExpr::Literal(TsLiteral::String(names.base_key.clone()))];
    let (params, arg) = call_args(params_ty);
    if !arg.is_empty() {
        key.push(TsExpr::Ident(arg.into()));
    }
    TsFunction {
        name: names.key_fn.clone(),
        type_params: vec![],
        params,
        body: vec![TsStmt::Return(TsExpr::AsConst(Box::new(TsExpr::Array(key))))],
        is_async: false,
        is_arrow: true,
    }
}

fn enabled_line(params: &ClassifiedParams) -> String {
    params
        .enabled_predicate("params")
        .map(|p| format!("  enabled: {},\n", p.emit()))
        .unwrap_or_default()
}

fn query_hook(
    names: &Names,
    params_ty: Option<&TsType>,
    params: &ClassifiedParams,
    response: &TsType,
) -> TsFunction {
    let response = response.emit();
    let (mut fn_params, arg) = call_args(params_ty);
    fn_params.push(TsParam::optional(
        "options",
        TsType::Ref(format!(
            "Omit<UseQueryOptions<{response}, AxiosError, TData, QueryKey>, \"queryKey\" | \"queryFn\">"
        )),
    ));
    let body = format!(
        "return useQuery({{\n  queryKey: {key}({arg}),\n  queryFn: () => {fetch}({arg}),\n{enabled}  ...options,\n}});",
        key = names.key_fn,
        fetch = names.fetch,
        enabled = enabled_line(params),
    );
    TsFunction {
        name: format!("use{}", names.component),
        type_params: vec![format!("TData = {response}")],
        params: fn_params,
        body: vec![TsStmt::Raw(body)],
        is_async: false,
        is_arrow: false,
    }
}

fn cache_helpers(names: &Names, params_ty: Option<&TsType>, response: &TsType) -> Vec<TsFunction> {
    let response = response.emit();
    let (params, arg) = call_args(params_ty);
    let key = format!("{}({arg})", names.key_fn);
    let base_key = TsExpr::Array(vec![TsExpr::Literal(TsLiteral::String(names.base_key.clone()))]).emit();
    let component = &names.component;
    let fetch = &names.fetch;

    let mut set_params = params.clone();
    set_params.push(TsParam::new(
        "updater",
        TsType::Ref(format!("Updater<{response} | undefined, {response} | undefined>")),
    ));
    set_params.push(TsParam::optional("options", TsType::Ref("SetDataOptions".into())));
    let filters = || vec![TsParam::optional("filters", TsType::Ref("QueryFilters".into()))];

    vec![
        export_fn(
            format!("get{component}QueryData"),
            params.clone(),
            format!("return queryClient.getQueryData<{response}>({key});"),
        ),
        export_fn(
            format!("set{component}QueryData"),
            set_params,
            format!("return queryClient.setQueryData<{response}>({key}, updater, options);"),
        ),
        export_fn(
            format!("prefetch{component}"),
            params.clone(),
            format!("return queryClient.prefetchQuery({{ queryKey: {key}, queryFn: () => {fetch}({arg}) }});"),
        ),
        export_fn(
            format!("cancel{component}Queries"),
            filters(),
            format!("return queryClient.cancelQueries({{ queryKey: {base_key}, ...filters }});"),
        ),
        export_fn(
            format!("invalidate{component}Queries"),
            filters(),
            format!("return queryClient.invalidateQueries({{ queryKey: {base_key}, ...filters }});"),
        ),
        export_fn(
            format!("refetch{component}IfStale"),
            params,
            format!("return queryClient.refetchQueries({{ queryKey: {key}, stale: true }});"),
        ),
    ]
}

fn mutation_hook(names: &Names, params_ty: Option<&TsType>, response: &TsType) -> TsFunction {
    let response = response.emit();
    let (variables, mutation_fn) = match params_ty {
        Some(ty) => {
            let ty = ty.emit();
            let mutation_fn = format!("(params: {ty}) => {}(params)", names.fetch);
            (ty, mutation_fn)
        }
        None => ("void".to_string(), format!("() => {}()", names.fetch)),
    };
    TsFunction {
        name: format!("use{}", names.component),
        type_params: vec![],
        params: vec![TsParam::optional(
            "options",
            TsType::Ref(format!(
                "Omit<UseMutationOptions<{response}, AxiosError, {variables}>, \"mutationFn\">"
            )),
        )],
        body: vec![TsStmt::Raw(format!(
            "return useMutation({{\n  mutationFn: {mutation_fn},\n  ...options,\n}});"
        ))],
        is_async: false,
        is_arrow: false,
    }
}

fn infinite_query_hook(
    names: &Names,
    params_ty: Option<&TsType>,
    page_param: &str,
    params: &ClassifiedParams,
    response: &TsType,
) -> TsFunction {
    let response = response.emit();
    let (mut fn_params, arg) = call_args(params_ty);
    fn_params.push(TsParam::new(
        "options",
        TsType::Ref(format!(
            "Omit<UseInfiniteQueryOptions<{response}, AxiosError, InfiniteData<{response}>, {response}, QueryKey, number>, \"queryKey\" | \"queryFn\" | \"initialPageParam\">"
        )),
    ));

    let mut rest = params.clone();
    rest.query.retain(|p| p.name != page_param);
    let page_arg = TsExpr::Object(vec![
        ObjectEntry::Spread(TsExpr::Ident("params".into())),
        ObjectEntry::Pair(page_param.to_string(), TsExpr::Ident("pageParam".into())),
    ]);
    let body = format!(
        "return useInfiniteQuery({{\n  queryKey: {key}({arg}),\n  queryFn: ({{ pageParam }}) => {fetch}({page}),\n  initialPageParam: 0,\n{enabled}  ...options,\n}});",
        key = names.key_fn,
        fetch = names.fetch,
        page = page_arg.emit(),
        enabled = enabled_line(&rest),
    );
    TsFunction {
        name: format!("use{}", names.component),
        type_params: vec![],
        params: fn_params,
        body: vec![TsStmt::Raw(body)],
        is_async: false,
        is_arrow: false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::options::Override;
    use crate::spec::OpenApiSpec;

    const ALL_SHAPES: [ParamShape; 16] = [
        ParamShape::Empty,
        ParamShape::Body,
        ParamShape::Path,
        ParamShape::Query,
        ParamShape::Header,
        ParamShape::BodyPath,
        ParamShape::BodyQuery,
        ParamShape::BodyHeader,
        ParamShape::PathQuery,
        ParamShape::PathHeader,
        ParamShape::QueryHeader,
        ParamShape::BodyPathQuery,
        ParamShape::BodyPathHeader,
        ParamShape::BodyQueryHeader,
        ParamShape::PathQueryHeader,
        ParamShape::BodyPathQueryHeader,
    ];

    const PETSTORE: &str = r##"{
  "openapi": "3.0.3",
  "paths": {
    "/pets": {
      "get": {
        "operationId": "listPets",
        "summary": "List all pets",
        "parameters": [
          { "name": "limit", "in": "query", "schema": { "type": "integer" } },
          { "name": "Offset", "in": "query", "schema": { "type": "integer" } }
        ],
        "responses": { "200": { "description": "ok", "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } } } } } }
      },
      "post": {
        "operationId": "createPet",
        "requestBody": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } } },
        "responses": { "201": { "description": "created", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } } } }
      }
    },
    "/pets/{id}": {
      "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
      "get": {
        "operationId": "getPet",
        "responses": { "200": { "description": "ok", "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } } } }
      },
      "put": {
        "operationId": "touchPet",
        "responses": { "204": { "description": "touched" } }
      },
      "patch": {
        "operationId": "updatePet",
        "parameters": [{ "name": "dryRun", "in": "query", "schema": { "type": "boolean" } }],
        "requestBody": { "$ref": "#/components/requestBodies/PetBody" },
        "responses": { "200": { "description": "ok" } }
      },
      "delete": {
        "operationId": "deletePet",
        "parameters": [{ "name": "X-Reason", "in": "header", "schema": { "type": "string" } }],
        "responses": { "204": { "description": "gone" } }
      }
    },
    "/pets/{id}/tags": {
      "post": {
        "operationId": "tagPet",
        "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
        "requestBody": { "content": { "application/json": { "schema": { "type": "array", "items": { "type": "string" } } } } },
        "responses": { "200": { "description": "ok" } }
      }
    }
  },
  "components": {
    "schemas": {
      "Pet": {
        "type": "object",
        "required": ["name"],
        "properties": { "name": { "type": "string" }, "tag": { "type": "string" } }
      }
    },
    "requestBodies": {
      "PetBody": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } } }
    }
  }
}"##;

    fn generate_with(
        spec: &OpenApiSpec,
        options: &GeneratorOptions,
        registry: &mut OperationIdRegistry,
        route: &str,
        verb: Verb,
    ) -> Result<GeneratedHook> {
        let item = &spec.paths[route];
        let operation = item
            .operations()
            .find(|(v, _)| *v == verb)
            .map(|(_, op)| op)
            .unwrap();
        let synthesizer = HookSynthesizer::new(TypeResolver::new(spec.components()), options);
        synthesizer.synthesize(
            registry,
            &OperationInput {
                verb,
                route,
                operation,
                inherited: &item.parameters,
            },
        )
    }

    fn generate(route: &str, verb: Verb) -> GeneratedHook {
        let spec = OpenApiSpec::from_json(PETSTORE).unwrap();
        generate_with(
            &spec,
            &GeneratorOptions::default(),
            &mut OperationIdRegistry::default(),
            route,
            verb,
        )
        .unwrap()
    }

    #[test]
    fn test_get_with_path_param_is_a_query() {
        let hook = generate("/pets/{id}", Verb::Get);
        let out = &hook.implementation;
        assert!(out.contains("export type GetPetParams = { id: string };"));
        assert!(out.contains("export const getPet = async (props: GetPetParams) => {"));
        assert!(out.contains("const result = await api.get<Pet>(`/pets/${props.id}`);"));
        assert!(out.contains("return result.data;"));
        assert!(out.contains("export function useGetPet<TData = Pet>(params: GetPetParams, options?:"));
        assert!(out.contains("queryKey: getGetPetQueryKey(params),"));
        assert!(out.contains("enabled: params.id != null,"));
        assert!(out.contains("return [\"getpet\", params] as const;"));
        assert!(!out.contains("useMutation"));
        assert_eq!(hook.hook_kinds, vec![HookKind::Query]);
        assert_eq!(hook.type_names, vec!["Pet"]);
    }

    #[test]
    fn test_query_family_emits_cache_helpers() {
        let out = generate("/pets/{id}", Verb::Get).implementation;
        for name in [
            "export const getGetPetQueryData = (params: GetPetParams) =>",
            "export const setGetPetQueryData = (params: GetPetParams, updater: Updater<Pet | undefined, Pet | undefined>, options?: SetDataOptions) =>",
            "export const prefetchGetPet = (params: GetPetParams) =>",
            "export const cancelGetPetQueries = (filters?: QueryFilters) =>",
            "export const invalidateGetPetQueries = (filters?: QueryFilters) =>",
            "export const refetchGetPetIfStale = (params: GetPetParams) =>",
        ] {
            assert!(out.contains(name), "missing `{name}` in\n{out}");
        }
        assert!(out.contains("queryClient.cancelQueries({ queryKey: [\"getpet\"], ...filters })"));
    }

    #[test]
    fn test_post_with_body_posts_it_verbatim() {
        let hook = generate("/pets", Verb::Post);
        let out = &hook.implementation;
        assert!(out.contains("export type CreatePetParams = Pet;"));
        assert!(out.contains("api.post<Pet>(`/pets`, props)"));
        assert!(out.contains("export function useCreatePet(options?: Omit<UseMutationOptions<Pet, AxiosError, CreatePetParams>, \"mutationFn\">)"));
        assert!(out.contains("mutationFn: (params: CreatePetParams) => createPet(params),"));
        assert!(!out.contains("useQuery"));
        assert_eq!(hook.hook_kinds, vec![HookKind::Mutation]);
    }

    #[test]
    fn test_optional_query_params_leave_query_always_enabled() {
        let out = generate("/pets", Verb::Get).implementation;
        assert!(out.contains("export type ListPetsParams = { limit?: number; Offset?: number };"));
        assert!(out.contains("const params = { limit: props.limit, Offset: props.Offset };"));
        assert!(out.contains("api.get<Pet[]>(`/pets`, { params })"));
        assert!(!out.contains("enabled:"));
        assert!(out.contains("type: get\n * operationId: listPets\n * url: /pets\n *\n * List all pets"));
    }

    #[test]
    fn test_update_verb_without_body_sends_undefined() {
        let out = generate("/pets/{id}", Verb::Put).implementation;
        assert!(out.contains("api.put<void>(`/pets/${props.id}`, undefined)"));
        assert!(out.contains("UseMutationOptions<void, AxiosError, TouchPetParams>"));
    }

    #[test]
    fn test_json_patch_body_is_sent() {
        let spec = OpenApiSpec::from_json(
            r#"{
  "openapi": "3.0.0",
  "paths": { "/a": { "post": {
    "operationId": "patchA",
    "requestBody": { "content": { "application/json-patch+json": { "schema": { "type": "array", "items": { "type": "string" } } } } },
    "responses": { "204": { "description": "done" } }
  } } }
}"#,
        )
        .unwrap();
        let out = generate_with(
            &spec,
            &GeneratorOptions::default(),
            &mut OperationIdRegistry::default(),
            "/a",
            Verb::Post,
        )
        .unwrap()
        .implementation;
        assert!(out.contains("export type PatchAParams = string[];"), "{out}");
        assert!(out.contains("api.post<void>(`/a`, props)"), "{out}");
        assert!(!out.contains("undefined)"));
    }

    #[test]
    fn test_body_path_query_renders_marker_only() {
        let hook = generate("/pets/{id}", Verb::Patch);
        assert_eq!(hook.unsupported, Some(Unsupported::Shape(ParamShape::BodyPathQuery)));
        assert!(hook.implementation.contains("// NOT SUPPORTED: updatePet (body + path + query)"));
        assert!(!hook.implementation.contains("export"));
        assert!(hook.hook_kinds.is_empty());
    }

    #[test]
    fn test_array_body_is_wrapped() {
        let out = generate("/pets/{id}/tags", Verb::Post).implementation;
        assert!(out.contains("export type TagPetParams = { body: string[] } & { id: string };"));
        assert!(out.contains("export const tagPet = async ({ body, ...props }: TagPetParams) => {"));
        assert!(out.contains("api.post<void>(`/pets/${props.id}/tags`, body)"));
    }

    #[test]
    fn test_non_update_verb_sends_headers_in_config() {
        let out = generate("/pets/{id}", Verb::Delete).implementation;
        assert!(out.contains("export type DeletePetParams = { id: string; \"X-Reason\"?: string };"));
        assert!(out.contains("const headers = { \"X-Reason\": props[\"X-Reason\"] };"));
        assert!(out.contains("api.delete<void>(`/pets/${props.id}`, { headers })"));
    }

    #[test]
    fn test_query_and_header_sharing_a_name_render_marker() {
        let spec = OpenApiSpec::from_json(
            r#"{
  "openapi": "3.0.0",
  "paths": { "/a": { "get": {
    "operationId": "getA",
    "parameters": [
      { "name": "lang", "in": "query", "schema": { "type": "string" } },
      { "name": "lang", "in": "header", "schema": { "type": "string" } }
    ],
    "responses": {}
  } } }
}"#,
        )
        .unwrap();
        let hook = generate_with(
            &spec,
            &GeneratorOptions::default(),
            &mut OperationIdRegistry::default(),
            "/a",
            Verb::Get,
        )
        .unwrap();
        assert_eq!(hook.unsupported, Some(Unsupported::DuplicateParameter("lang".into())));
        assert!(hook
            .implementation
            .contains("// NOT SUPPORTED: getA (duplicate parameter name `lang`)"));
        assert!(!hook.implementation.contains("GetAParams"));
    }

    #[test]
    fn test_reserved_word_operation_id_gets_a_valid_accessor_name() {
        let spec = OpenApiSpec::from_json(
            r#"{
  "openapi": "3.0.0",
  "paths": { "/session": { "delete": { "operationId": "delete", "responses": {} } } }
}"#,
        )
        .unwrap();
        let out = generate_with(
            &spec,
            &GeneratorOptions::default(),
            &mut OperationIdRegistry::default(),
            "/session",
            Verb::Delete,
        )
        .unwrap()
        .implementation;
        assert!(out.contains("export const _delete = async () => {"), "{out}");
        assert!(out.contains("mutationFn: () => _delete(),"), "{out}");
        assert!(out.contains("export function useDelete("));
        assert!(!out.contains("const delete "));
    }

    #[test]
    fn test_header_filters_change_the_shape() {
        let spec = OpenApiSpec::from_json(PETSTORE).unwrap();
        let options = GeneratorOptions {
            header_filters: vec!["x-reason".into()],
            ..GeneratorOptions::default()
        };
        let hook = generate_with(
            &spec,
            &options,
            &mut OperationIdRegistry::default(),
            "/pets/{id}",
            Verb::Delete,
        )
        .unwrap();
        assert!(hook.implementation.contains("export type DeletePetParams = { id: string };"));
        assert!(!hook.implementation.contains("headers"));
    }

    #[test]
    fn test_duplicate_operation_id_is_skipped() {
        let spec = OpenApiSpec::from_json(PETSTORE).unwrap();
        let options = GeneratorOptions::default();
        let mut registry = OperationIdRegistry::default();
        let first = generate_with(&spec, &options, &mut registry, "/pets/{id}", Verb::Get).unwrap();
        let second = generate_with(&spec, &options, &mut registry, "/pets/{id}", Verb::Get).unwrap();
        assert!(!first.is_empty());
        assert!(second.is_empty());
        assert!(second.type_names.is_empty());
        assert!(second.hook_kinds.is_empty());
    }

    #[test]
    fn test_wildcard_operation_id_is_invalid() {
        let spec = OpenApiSpec::from_json(
            r#"{ "openapi": "3.0.0", "paths": { "/any": { "get": { "operationId": "*", "responses": {} } } } }"#,
        )
        .unwrap();
        let err = generate_with(
            &spec,
            &GeneratorOptions::default(),
            &mut OperationIdRegistry::default(),
            "/any",
            Verb::Get,
        )
        .unwrap_err();
        assert!(matches!(err, GenError::InvalidOperationId { operation_id, .. } if operation_id == "*"));
    }

    #[test]
    fn test_missing_operation_id_falls_back_to_verb_and_route() {
        let spec = OpenApiSpec::from_json(
            r#"{ "openapi": "3.0.0", "paths": { "/health": { "get": { "responses": {} } } } }"#,
        )
        .unwrap();
        let hook = generate_with(
            &spec,
            &GeneratorOptions::default(),
            &mut OperationIdRegistry::default(),
            "/health",
            Verb::Get,
        )
        .unwrap();
        assert_eq!(hook.operation_id, "get /health");
        assert!(hook.implementation.contains("export const getHealth = async () => {"));
        assert!(hook.implementation.contains("export const getGetHealthQueryKey = () => {"));
        assert!(hook.implementation.contains("export function useGetHealth<TData = void>(options?:"));
    }

    #[test]
    fn test_infinite_query_override_threads_page_param() {
        let spec = OpenApiSpec::from_json(PETSTORE).unwrap();
        let mut options = GeneratorOptions::default();
        options.overrides.insert(
            "listPets".into(),
            Override {
                kind: HookKind::InfiniteQuery,
                page_param: Some("Offset".into()),
            },
        );
        let hook = generate_with(
            &spec,
            &options,
            &mut OperationIdRegistry::default(),
            "/pets",
            Verb::Get,
        )
        .unwrap();
        let out = &hook.implementation;
        assert!(out.contains("export function useListPets(params: Omit<ListPetsParams, \"Offset\">, options:"));
        assert!(out.contains("queryFn: ({ pageParam }) => listPets({ ...params, Offset: pageParam }),"));
        assert!(out.contains("initialPageParam: 0,"));
        assert!(!out.contains("useQuery("));
        assert_eq!(hook.hook_kinds, vec![HookKind::InfiniteQuery]);
    }

    #[test]
    fn test_infinite_query_override_needs_a_query_page_param() {
        let spec = OpenApiSpec::from_json(PETSTORE).unwrap();
        for page_param in [None, Some("cursor".to_string())] {
            let mut options = GeneratorOptions::default();
            options.overrides.insert(
                "listPets".into(),
                Override {
                    kind: HookKind::InfiniteQuery,
                    page_param,
                },
            );
            let err = generate_with(
                &spec,
                &options,
                &mut OperationIdRegistry::default(),
                "/pets",
                Verb::Get,
            )
            .unwrap_err();
            assert!(matches!(err, GenError::InvalidOverride { .. }));
        }
    }

    #[test]
    fn test_query_override_on_post() {
        let spec = OpenApiSpec::from_json(PETSTORE).unwrap();
        let mut options = GeneratorOptions::default();
        options.overrides.insert(
            "createPet".into(),
            Override {
                kind: HookKind::Query,
                page_param: None,
            },
        );
        let hook = generate_with(
            &spec,
            &options,
            &mut OperationIdRegistry::default(),
            "/pets",
            Verb::Post,
        )
        .unwrap();
        assert!(hook.implementation.contains("useQuery({"));
        assert!(!hook.implementation.contains("useMutation"));
    }

    /// Builds an operation for every combination of body, path, query and
    /// header parameters.
    fn shape_spec(shape: ParamShape, verb: Verb) -> String {
        let (body, path, query, header) = shape.flags();
        let route = if path { "/things/{id}" } else { "/things" };
        let mut params = Vec::new();
        if path {
            params.push(r#"{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }"#);
        }
        if query {
            params.push(r#"{ "name": "q", "in": "query", "schema": { "type": "string" } }"#);
        }
        if header {
            params.push(r#"{ "name": "X-Tenant", "in": "header", "required": true, "schema": { "type": "string" } }"#);
        }
        let body = if body {
            r##", "requestBody": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Thing" } } } }"##
        } else {
            ""
        };
        format!(
            r##"{{
  "openapi": "3.0.0",
  "paths": {{ "{route}": {{ "{verb}": {{ "operationId": "op", "parameters": [{params}]{body}, "responses": {{}} }} }} }},
  "components": {{ "schemas": {{ "Thing": {{ "type": "object", "properties": {{ "label": {{ "type": "string" }} }} }} }} }}
}}"##,
            params = params.join(", ")
        )
    }

    #[test]
    fn test_every_shape_yields_an_accessor_or_a_marker() {
        let unsupported = [
            ParamShape::BodyPathQuery,
            ParamShape::BodyPathQueryHeader,
            ParamShape::PathQueryHeader,
            ParamShape::BodyPathHeader,
        ];
        for verb in [Verb::Get, Verb::Post, Verb::Delete] {
            for shape in ALL_SHAPES {
                let (body, path, query, header) = shape.flags();
                assert_eq!(ParamShape::of(body, path, query, header), shape);

                let spec = OpenApiSpec::from_json(&shape_spec(shape, verb)).unwrap();
                let route = if path { "/things/{id}" } else { "/things" };
                let hook = generate_with(
                    &spec,
                    &GeneratorOptions::default(),
                    &mut OperationIdRegistry::default(),
                    route,
                    verb,
                )
                .map_err(|e| format!("{shape:?} {verb}: {e}"))
                .unwrap();
                let out = &hook.implementation;

                if unsupported.contains(&shape) {
                    assert!(out.contains("NOT SUPPORTED"), "{shape:?}");
                    assert!(!out.contains("export"), "{shape:?}");
                    continue;
                }
                assert!(out.contains("export const op = async ("), "{shape:?} {verb}\n{out}");
                assert_eq!(out.contains("export type OpParams"), shape != ParamShape::Empty);
                assert_eq!(out.contains("const params = {"), query, "{shape:?}");
                assert_eq!(out.contains("const headers = {"), header, "{shape:?}");
                if body && shape != ParamShape::Body {
                    assert!(out.contains("const body = { label: props.label };"), "{shape:?}\n{out}");
                }
                if path {
                    assert!(out.contains("`/things/${props.id}`"), "{shape:?}");
                }
                if verb == Verb::Post && !body {
                    assert!(out.contains("`, undefined"), "{shape:?}\n{out}");
                }
                if verb != Verb::Post && body {
                    assert!(out.contains("{ data: "), "{shape:?}\n{out}");
                }
            }
        }
    }

    #[test]
    fn test_unresolved_path_param_is_fatal() {
        let spec = OpenApiSpec::from_json(
            r#"{ "openapi": "3.0.0", "paths": { "/pets/{petId}": { "get": { "operationId": "getPet", "responses": {} } } } }"#,
        )
        .unwrap();
        let err = generate_with(
            &spec,
            &GeneratorOptions::default(),
            &mut OperationIdRegistry::default(),
            "/pets/{petId}",
            Verb::Get,
        )
        .unwrap_err();
        assert!(matches!(err, GenError::UnresolvedPathParameter { .. }));
    }
}
