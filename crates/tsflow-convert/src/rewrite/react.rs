//! Rewrites for `@types/react`.
//!
//! `React.Component` and `React.ReactElement` become Flow's built-in React
//! types through macros. Other types with no Flow counterpart are substituted
//! by the compatibility definitions in `tsflower/subst/react`.

use super::{ImportSubstitution, RewriteLibrary, RewriteRule, RewriteTable};
use crate::convert::{ConversionResult, ConvertError, Converter};
use crate::input::InputNode;
use crate::ir::{FlowType, ObjectType, QualifiedName};

/// Local-name prefix for substituted React types.
pub const SUBST_PREFIX: &str = "$tsflower_subst$React$";
/// Module exporting the substitute definitions.
pub const SUBST_MODULE: &str = "tsflower/subst/react";

const SUBSTITUTED: &[&str] = &[
    "JSXElementConstructor",
    "RefObject",
    "RefCallback",
    "Ref",
    "LegacyRef",
    "ComponentState",
    "RefAttributes",
    "CElement",
    "ComponentElement",
    "ReactNode",
    "ProviderProps",
    "ConsumerProps",
    "NamedExoticComponent",
    "Provider",
    "Consumer",
    "Context",
    "FunctionComponent",
    "ForwardRefExoticComponent",
    "PropsWithoutRef",
    "PropsWithChildren",
    "ComponentProps",
    "MemoExoticComponent",
    "MutableRefObject",
    "MouseEvent",
];

pub fn library() -> RewriteLibrary {
    let mut table = RewriteTable::new()
        .with_rule("Component", RewriteRule::Macro(convert_component))
        .with_rule("ReactElement", RewriteRule::Macro(convert_element));
    for name in SUBSTITUTED {
        table = table.with_rule(*name, substitute(name, name));
    }
    table = table.with_namespace("JSX", jsx_table());

    RewriteLibrary {
        name: "react".into(),
        modules: vec!["react".into()],
        namespaces: vec!["React".into()],
        table,
        globals: RewriteTable::new().with_namespace("JSX", jsx_table()),
    }
}

fn jsx_table() -> RewriteTable {
    RewriteTable::new().with_rule("Element", substitute("JSX$Element", "JSX$Element"))
}

fn substitute(import_name: &str, local_suffix: &str) -> RewriteRule {
    RewriteRule::ImportSubstitution(ImportSubstitution::new(
        import_name,
        format!("{SUBST_PREFIX}{local_suffix}"),
        SUBST_MODULE,
    ))
}

/// `React.Component<P, S>` → `React.Component<P, S>`, with `P` defaulting to `{...}`.
fn convert_component(
    converter: &mut Converter<'_>,
    name: &QualifiedName,
    type_args: Option<&[InputNode<'_>]>,
) -> ConversionResult<FlowType> {
    let args = type_args.unwrap_or_default();
    if args.len() > 2 {
        return Err(ConvertError::Invalid(format!(
            "bad React.Component: {} arguments (expected 0-2)",
            args.len()
        )));
    }

    let props = match args.first() {
        Some(props) => converter.convert_type(*props),
        None => FlowType::Object(ObjectType {
            properties: Vec::new(),
            exact: false,
            inexact: true,
        }),
    };
    let mut converted = vec![props];
    if let Some(state) = args.get(1) {
        converted.push(converter.convert_type(*state));
    }

    Ok(FlowType::reference(name.clone(), Some(converted)))
}

/// `React.ReactElement<P, T>` → `React$Element<…>`.
///
/// Flow's element type is parameterized by the element *type*, not its props,
/// so: no arguments → `React$ElementType`; props only →
/// `React$ComponentType<P>`; props and type → the type, props dropped.
fn convert_element(
    converter: &mut Converter<'_>,
    _name: &QualifiedName,
    type_args: Option<&[InputNode<'_>]>,
) -> ConversionResult<FlowType> {
    let element_type = match type_args.unwrap_or_default() {
        [] => FlowType::named("React$ElementType"),
        [props] => FlowType::reference(
            QualifiedName::bare("React$ComponentType"),
            Some(vec![converter.convert_type(*props)]),
        ),
        [_, element_type] => converter.convert_type(*element_type),
        args => {
            return Err(ConvertError::Invalid(format!(
                "bad React.Element: {} arguments (expected 0-2)",
                args.len()
            )));
        }
    };

    Ok(FlowType::reference(
        QualifiedName::bare("React$Element"),
        Some(vec![element_type]),
    ))
}
