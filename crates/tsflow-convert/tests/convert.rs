//! End-to-end conversion tests: TypeScript declarations in, Flow text out.

use tsflow_convert::ir::{FlowType, Statement};
use tsflow_convert::output::FlowWriter;
use tsflow_convert::{ConvertedFile, RewriteConfig, convert_str};

fn convert(source: &str) -> ConvertedFile {
    convert_str("input.d.ts", source, RewriteConfig::builtin()).expect("parse")
}

/// The converted statements, printed, one per line; header and imports left out.
fn body(source: &str) -> String {
    convert(source)
        .file
        .body
        .iter()
        .map(FlowWriter::emit_statement)
        .collect::<Vec<_>>()
        .join("\n")
}

fn full(source: &str) -> String {
    FlowWriter::emit(&convert(source).file)
}

#[test]
fn test_declarations() {
    assert_eq!(
        body(
            "export type Props = { a: string; b?: number; 'data-x': boolean };\n\
             declare const n: -5 | \"ok\" | null;\n\
             export declare let flag: true;\n\
             export declare function f<T>(x: T, y?: string[], ...rest: number[]): T;\n\
             declare function g(x, ...rest);"
        ),
        "export type Props = {| a: string, b?: number, 'data-x': boolean |};\n\
         declare var n: -5 | \"ok\" | null;\n\
         declare export var flag: true;\n\
         declare export function f<T>(x: T, y?: Array<string>, ...rest: Array<number>): T;\n\
         declare function g(x: any, ...rest: Array<any>): any;"
    );
}

#[test]
fn test_type_alias_params_with_bound_and_default() {
    assert_eq!(
        body("type Box<T extends object = {}, U = string> = [T, U];"),
        "type Box<T: $FlowFixMe /* object */ /* tsflow-unimplemented: ObjectKeyword */ = {||}, U = string> = [T, U];"
    );
}

#[test]
fn test_header_and_layout() {
    insta::assert_snapshot!(full("export type Id = string | number;\nexport default Id;"), @r###"
    /* @flow
     * @generated by TsFlow
     */

    export type Id = string | number;
    export default Id;
    "###);
}

#[test]
fn test_one_output_per_input_statement() {
    let source = "type A = string;\n\
                  interface I { x: A }\n\
                  export = A;\n\
                  declare var v: A;\n\
                  enum E { X }\n";
    let converted = convert(source);
    let body = &converted.file.body;
    assert_eq!(body.len(), 5);
    assert!(body[0].is_declaration());
    assert!(body[1].is_placeholder());
    assert!(body[2].is_placeholder());
    assert!(body[3].is_declaration());
    assert!(body[4].is_placeholder());
    assert_eq!(converted.placeholder_count(), 3);
}

#[test]
fn test_placeholder_quotes_source_verbatim() {
    let interface = "export interface I {\n  x: string; // trailing\n  y?: number;\n}";
    let converted = convert(&format!("type A = string;\n{interface}\ntype B = A;"));
    let placeholder = &converted.file.body[1];
    assert_eq!(placeholder.comments()[0].text, "tsflow-unimplemented: InterfaceDeclaration");
    assert_eq!(placeholder.comments()[1].text, interface);
}

#[test]
fn test_statement_placeholder_printed() {
    assert_eq!(
        body("interface I {\n  x: string;\n}"),
        "/* tsflow-unimplemented: InterfaceDeclaration */\n; /* interface I {\n  x: string;\n} */"
    );
}

#[test]
fn test_unexpected_statement_kind() {
    let converted = convert("#!/usr/bin/env node\ntype A = string;");
    assert_eq!(converted.file.body.len(), 2);
    assert_eq!(
        converted.file.body[0].comments()[0].text,
        "tsflow-error: unexpected statement kind: hash_bang_line"
    );
    assert!(converted.file.body[1].is_declaration());
}

#[test]
fn test_type_placeholder_contained() {
    assert_eq!(
        body("declare var x: Map<string, keyof T>;"),
        "declare var x: Map<string, $FlowFixMe /* keyof T */ /* tsflow-unimplemented: TypeOperator */>;"
    );
}

#[test]
fn test_type_literal_failure_contained_and_warned() {
    let converted = convert("type A = { a: string; (x: number): void };\ntype B = string;");
    let printed: Vec<_> = converted.file.body.iter().map(FlowWriter::emit_statement).collect();
    assert_eq!(
        printed[0],
        "type A = $FlowFixMe /* { a: string; (x: number): void } */ \
         /* tsflow-error: unimplemented TypeElement kind: CallSignature */;"
    );
    assert_eq!(printed[1], "type B = string;");
    assert_eq!(converted.diagnostics.len(), 1);
}

#[test]
fn test_literals() {
    let converted = convert("type T = [-5, 'ok', \"two\\nlines\", 1e3, false];");
    let Statement::Declaration(tsflow_convert::ir::Declaration::TypeAlias(alias)) = &converted.file.body[0]
    else {
        panic!("not a type alias");
    };
    let FlowType::Tuple(elements) = &alias.right else {
        panic!("not a tuple");
    };
    assert_eq!(
        elements,
        &vec![
            FlowType::NumberLiteral { value: -5.0, raw: "-5".into() },
            FlowType::StringLiteral { value: "ok".into(), raw: "'ok'".into() },
            FlowType::StringLiteral {
                value: "two\nlines".into(),
                raw: "\"two\\nlines\"".into()
            },
            FlowType::NumberLiteral { value: 1000.0, raw: "1e3".into() },
            FlowType::BooleanLiteral { value: false, raw: "false".into() },
        ]
    );
}

#[test]
fn test_react_component_macro() {
    assert_eq!(
        body(
            "type A = React.Component;\n\
             type B = React.Component<Props>;\n\
             type C = React.Component<Props, State>;\n\
             type D = React.Component<P, S, X>;"
        ),
        "type A = React.Component<{...}>;\n\
         type B = React.Component<Props>;\n\
         type C = React.Component<Props, State>;\n\
         type D = $FlowFixMe /* React.Component<P, S, X> */ \
         /* tsflow-error: bad React.Component: 3 arguments (expected 0-2) */;"
    );
}

#[test]
fn test_react_element_macro() {
    assert_eq!(
        body(
            "type A = React.ReactElement;\n\
             type B = React.ReactElement<Props>;\n\
             type C = React.ReactElement<Props, 'div'>;\n\
             type D = React.ReactElement<A, B, C>;"
        ),
        "type A = React$Element<React$ElementType>;\n\
         type B = React$Element<React$ComponentType<Props>>;\n\
         type C = React$Element<'div'>;\n\
         type D = $FlowFixMe /* React.ReactElement<A, B, C> */ \
         /* tsflow-error: bad React.Element: 3 arguments (expected 0-2) */;"
    );
}

#[test]
fn test_macro_via_imports() {
    assert_eq!(
        body(
            "import * as R from 'react';\n\
             import { Component as Base, ReactElement } from 'react';\n\
             type A = R.Component<P>;\n\
             type B = Base<P>;\n\
             type C = ReactElement;"
        ),
        "import * as R from 'react';\n\
         import { Component as Base, ReactElement } from 'react';\n\
         type A = R.Component<P>;\n\
         type B = Base<P>;\n\
         type C = React$Element<React$ElementType>;"
    );
}

#[test]
fn test_unbound_names_not_rewritten() {
    assert_eq!(
        body("type A = Component<P, S, X>;\ntype B = ViewStyle;\ntype C = React.Unknown;"),
        "type A = Component<P, S, X>;\ntype B = ViewStyle;\ntype C = React.Unknown;"
    );
}

#[test]
fn test_library_nested_names_need_one_hop() {
    let converted = convert(
        "import * as R from 'react';\n\
         type A = React.JSX.Element;\n\
         type B = R.JSX.Element;\n\
         type C = JSX.Element;",
    );
    let printed: Vec<_> = converted.file.body.iter().map(FlowWriter::emit_statement).collect();
    assert_eq!(
        printed[1..].to_vec(),
        vec![
            "type A = React.JSX.Element;",
            "type B = R.JSX.Element;",
            "type C = $tsflower_subst$React$JSX$Element;",
        ]
    );
    assert_eq!(converted.file.imports.len(), 1);
}

#[test]
fn test_import_substitutions_recorded_once() {
    insta::assert_snapshot!(full(
        "import React from 'react';\n\
         export type N = React.ReactNode;\n\
         export type M = React.ReactNode | JSX.Element;\n\
         declare function render(node: React.ReactNode): JSX.Element;"
    ), @r###"
    /* @flow
     * @generated by TsFlow
     */

    import type { ReactNode as $tsflower_subst$React$ReactNode } from 'tsflower/subst/react';
    import type { JSX$Element as $tsflower_subst$React$JSX$Element } from 'tsflower/subst/react';

    import React from 'react';
    export type N = $tsflower_subst$React$ReactNode;
    export type M = $tsflower_subst$React$ReactNode | $tsflower_subst$React$JSX$Element;
    declare function render(node: $tsflower_subst$React$ReactNode): $tsflower_subst$React$JSX$Element;
    "###);
}

#[test]
fn test_react_native_substitutions() {
    let converted = convert(
        "import { View, ViewStyle, StyleProp, Animated } from 'react-native';\n\
         declare var style: StyleProp<ViewStyle>;\n\
         declare var view: View;\n\
         declare var value: Animated.AnimatedInterpolation;",
    );
    let imports: Vec<_> = converted
        .file
        .imports
        .iter()
        .map(|import| FlowWriter::emit_statement(&Statement::Import(import.clone())))
        .collect();
    assert_eq!(
        imports,
        vec![
            "import type { StyleProp as $tsflower_subst$RN$StyleProp } from 'tsflower/subst/react-native';",
            "import type { ViewStyle as $tsflower_subst$RN$ViewStyle } from 'tsflower/subst/react-native';",
            "import type { View as $tsflower_subst$RN$View } from 'tsflower/subst/react-native';",
            "import type { AnimatedInterpolation as $tsflower_subst$RN$Animated$AnimatedInterpolation } from 'tsflower/subst/react-native';",
        ]
    );
    let printed: Vec<_> = converted.file.body.iter().map(FlowWriter::emit_statement).collect();
    assert_eq!(
        printed[1],
        "declare var style: $tsflower_subst$RN$StyleProp<$tsflower_subst$RN$ViewStyle>;"
    );
    assert_eq!(
        printed[3],
        "declare var value: $tsflower_subst$RN$Animated$AnimatedInterpolation;"
    );
}

#[test]
fn test_without_rewrites() {
    let converted = convert_str(
        "input.d.ts",
        "type A = React.Component<P, S, X>;\ntype B = JSX.Element;",
        &RewriteConfig::empty(),
    )
    .unwrap();
    assert!(converted.file.imports.is_empty());
    let printed: Vec<_> = converted.file.body.iter().map(FlowWriter::emit_statement).collect();
    assert_eq!(printed, vec!["type A = React.Component<P, S, X>;", "type B = JSX.Element;"]);
}

#[test]
fn test_export_default_forms() {
    assert_eq!(
        body("export default Foo;\nexport default function make(): Foo;"),
        "export default Foo;\ndeclare export default function make(): Foo;"
    );
}

#[test]
fn test_implicit_any() {
    assert_eq!(
        body("type F = (a, b?) => void;\ntype O = { x };\ndeclare function h();"),
        "type F = (a: any, b?: any) => void;\ntype O = {| x: any |};\ndeclare function h(): any;"
    );
}
