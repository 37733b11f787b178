use super::{ConversionResult, ConvertError, Converter, describe, placeholder};
use crate::input::literal::{decode_string, parse_number};
use crate::input::{InputNode, SyntaxKind};
use crate::ir::{
    FlowType, FunctionParam, FunctionType, ObjectProperty, ObjectType, PropertyKey, QualifiedName,
    TypeParameter,
};
use crate::rewrite::{PendingImport, RewriteRule};

impl Converter<'_> {
    /// Translate a type node. Total: anything untranslatable becomes a
    /// `$FlowFixMe` placeholder in place.
    pub fn convert_type(&mut self, node: InputNode<'_>) -> FlowType {
        match node.kind() {
            SyntaxKind::AnyKeyword => FlowType::Any,
            SyntaxKind::UnknownKeyword => FlowType::Mixed,
            SyntaxKind::NeverKeyword => FlowType::Empty,
            SyntaxKind::UndefinedKeyword | SyntaxKind::VoidKeyword => FlowType::Void,
            SyntaxKind::BooleanKeyword => FlowType::Boolean,
            SyntaxKind::NumberKeyword => FlowType::Number,
            SyntaxKind::StringKeyword => FlowType::String,

            SyntaxKind::LiteralType => self.convert_literal_type(node),
            SyntaxKind::TypeReference => self.convert_type_reference(node),
            SyntaxKind::UnionType => {
                let mut members = Vec::new();
                union_members(node, &mut members);
                FlowType::Union(members.into_iter().map(|m| self.convert_type(m)).collect())
            }
            SyntaxKind::ArrayType => match node.first_named_child() {
                Some(element) => FlowType::array(self.convert_type(element)),
                None => placeholder::error_type(node, "array type without element type"),
            },
            SyntaxKind::TupleType => FlowType::Tuple(
                node.named_children()
                    .into_iter()
                    .map(|element| self.convert_type(element))
                    .collect(),
            ),
            SyntaxKind::FunctionType => FlowType::Function(self.convert_function_type(node)),
            SyntaxKind::TypeLiteral => match self.convert_type_literal(node) {
                Ok(object) => object,
                Err(err) => {
                    self.warn(format!("type literal: {err}"), Some(node.span()));
                    placeholder::error_type(node, &err.to_string())
                }
            },

            SyntaxKind::SymbolKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::IntersectionType
            | SyntaxKind::ConstructorType
            | SyntaxKind::MappedType
            | SyntaxKind::TypePredicate
            | SyntaxKind::TypeQuery
            | SyntaxKind::TypeOperator
            | SyntaxKind::IndexedAccessType
            | SyntaxKind::ConditionalType
            | SyntaxKind::InferType
            | SyntaxKind::ParenthesizedType
            | SyntaxKind::ThisType
            | SyntaxKind::OptionalType
            | SyntaxKind::RestType
            | SyntaxKind::NamedTupleMember
            | SyntaxKind::TemplateLiteralType
            | SyntaxKind::ImportType => placeholder::unimplemented_type(node),

            _ => placeholder::error_type(node, &format!("unexpected type kind: {}", describe(node))),
        }
    }

    /// Translate a type annotation (`: T`), or a bare type where the grammar
    /// puts one directly (function type return types).
    pub(crate) fn convert_annotation(&mut self, node: InputNode<'_>) -> FlowType {
        match node.raw_kind() {
            "type_annotation"
            | "type_predicate_annotation"
            | "asserts_annotation"
            | "opting_type_annotation"
            | "omitting_type_annotation" => match node.first_named_child() {
                Some(inner) => self.convert_type(inner),
                None => placeholder::error_type(node, "empty type annotation"),
            },
            _ => self.convert_type(node),
        }
    }

    fn convert_literal_type(&mut self, node: InputNode<'_>) -> FlowType {
        let Some(literal) = node.first_named_child() else {
            return placeholder::error_type(node, "literal type without literal");
        };

        match literal.kind() {
            SyntaxKind::NullKeyword => FlowType::Null,
            SyntaxKind::TrueKeyword => FlowType::BooleanLiteral {
                value: true,
                raw: "true".into(),
            },
            SyntaxKind::FalseKeyword => FlowType::BooleanLiteral {
                value: false,
                raw: "false".into(),
            },
            SyntaxKind::NumericLiteral => match literal.first_named_child() {
                // Signed form surfaced as `number` wrapping the digits.
                Some(digits) if literal.has_token("-") => {
                    number_literal(node, digits.text(), Some(literal.text()))
                }
                _ => number_literal(node, literal.text(), None),
            },
            SyntaxKind::PrefixUnaryExpression => {
                let operator = literal
                    .field("operator")
                    .map(|op| op.text() == "-")
                    .unwrap_or_else(|| literal.has_token("-"));
                match literal.field("argument").or_else(|| literal.first_named_child()) {
                    Some(argument) if operator && argument.kind() == SyntaxKind::NumericLiteral => {
                        number_literal(node, argument.text(), Some(literal.text()))
                    }
                    _ => placeholder::error_type(
                        node,
                        &format!("unexpected prefix-unary literal type: {}", literal.text()),
                    ),
                }
            }
            SyntaxKind::StringLiteral => match decode_string(literal.text()) {
                Some(value) => FlowType::StringLiteral {
                    value,
                    raw: literal.text().to_string(),
                },
                None => placeholder::error_type(node, "malformed string literal"),
            },
            _ => placeholder::error_type(
                node,
                &format!("unexpected literal-type kind: {}", describe(literal)),
            ),
        }
    }

    fn convert_type_reference(&mut self, node: InputNode<'_>) -> FlowType {
        let (name_node, args_node) = match node.raw_kind() {
            "generic_type" => (node.field("name"), node.field("type_arguments")),
            _ => (Some(node), None),
        };
        let Some(name_node) = name_node else {
            return placeholder::error_type(node, "type reference without name");
        };

        let name = qualified_name(name_node);
        let args = args_node
            .map(|args| args.named_children())
            .filter(|args| !args.is_empty());

        let rewrites = self.rewrites;
        if let Some(rule) = rewrites.resolve(&self.bindings, &name) {
            return self.apply_rewrite(node, rule, &name, args.as_deref());
        }

        let type_args = args.map(|args| args.into_iter().map(|arg| self.convert_type(arg)).collect());
        FlowType::reference(name, type_args)
    }

    fn apply_rewrite(
        &mut self,
        node: InputNode<'_>,
        rule: &RewriteRule,
        name: &QualifiedName,
        args: Option<&[InputNode<'_>]>,
    ) -> FlowType {
        match rule {
            RewriteRule::Macro(expand) => match expand(self, name, args) {
                Ok(flow_type) => flow_type,
                Err(err) => placeholder::error_type(node, &err.to_string()),
            },
            RewriteRule::ImportSubstitution(subst) => {
                self.record_import(PendingImport::from(subst));
                let type_args = args.map(|args| args.iter().map(|arg| self.convert_type(*arg)).collect());
                FlowType::reference(QualifiedName::bare(subst.local_name.clone()), type_args)
            }
        }
    }

    pub(crate) fn convert_function_type(&mut self, node: InputNode<'_>) -> FunctionType {
        let type_params = node
            .field("type_parameters")
            .map(|params| self.convert_type_parameters(params));

        let mut params = Vec::new();
        let mut rest = None;
        if let Some(parameters) = node.field("parameters") {
            for param in parameters.named_children() {
                let pattern = param.field("pattern");
                let declared = param.field("type");

                if let Some(rest_pattern) = pattern.filter(|p| p.raw_kind() == "rest_pattern") {
                    let type_annotation = match declared {
                        Some(annotation) => self.convert_annotation(annotation),
                        None => FlowType::array(FlowType::Any),
                    };
                    rest = Some(Box::new(FunctionParam {
                        name: rest_pattern.first_named_child().and_then(binding_name),
                        type_annotation,
                        optional: false,
                    }));
                    break;
                }

                let type_annotation = declared
                    .map(|annotation| self.convert_annotation(annotation))
                    .unwrap_or(FlowType::Any);
                params.push(FunctionParam {
                    name: pattern.and_then(binding_name),
                    type_annotation,
                    optional: param.raw_kind() == "optional_parameter",
                });
            }
        }

        let return_type = node
            .field("return_type")
            .map(|ret| self.convert_annotation(ret))
            .unwrap_or(FlowType::Any);

        FunctionType {
            type_params,
            params,
            rest,
            return_type: Box::new(return_type),
        }
    }

    pub(crate) fn convert_type_parameters(&mut self, node: InputNode<'_>) -> Vec<TypeParameter> {
        node.named_children()
            .into_iter()
            .filter(|param| param.raw_kind() == "type_parameter")
            .map(|param| TypeParameter {
                name: param
                    .field("name")
                    .map(|name| name.text().to_string())
                    .unwrap_or_default(),
                bound: param
                    .field("constraint")
                    .and_then(|constraint| constraint.first_named_child())
                    .map(|bound| self.convert_type(bound)),
                default: param
                    .field("value")
                    .and_then(|value| value.first_named_child())
                    .map(|default| self.convert_type(default)),
            })
            .collect()
    }

    /// `{ a: T; b?: U }` → `{| a: T, b?: U |}`. Only property signatures
    /// translate; any other member fails the whole literal.
    fn convert_type_literal(&mut self, node: InputNode<'_>) -> ConversionResult<FlowType> {
        let mut properties = Vec::new();
        for member in node.named_children() {
            match member.kind() {
                SyntaxKind::PropertySignature => {
                    properties.push(self.convert_property_signature(member)?)
                }
                kind @ (SyntaxKind::CallSignature
                | SyntaxKind::ConstructSignature
                | SyntaxKind::MethodSignature
                | SyntaxKind::GetAccessor
                | SyntaxKind::SetAccessor
                | SyntaxKind::IndexSignature) => {
                    return Err(ConvertError::UnimplementedMember(kind));
                }
                _ => {
                    return Err(ConvertError::Invalid(format!(
                        "unexpected TypeElement kind: {}",
                        describe(member)
                    )));
                }
            }
        }

        Ok(FlowType::Object(ObjectType {
            properties,
            exact: true,
            inexact: false,
        }))
    }

    fn convert_property_signature(&mut self, member: InputNode<'_>) -> ConversionResult<ObjectProperty> {
        let name = member
            .field("name")
            .ok_or_else(|| ConvertError::Invalid("property signature without name".into()))?;
        let key = match name.kind() {
            SyntaxKind::Identifier => PropertyKey::Identifier(name.text().to_string()),
            SyntaxKind::StringLiteral => PropertyKey::String {
                value: decode_string(name.text())
                    .ok_or_else(|| ConvertError::Invalid("malformed property name".into()))?,
                raw: name.text().to_string(),
            },
            _ => {
                return Err(ConvertError::Unimplemented(format!(
                    "property name kind: {}",
                    name.raw_kind()
                )));
            }
        };

        let value = member
            .field("type")
            .map(|annotation| self.convert_annotation(annotation))
            .unwrap_or(FlowType::Any);

        Ok(ObjectProperty {
            key,
            value,
            optional: member.has_token("?"),
        })
    }
}

/// tree-sitter nests `A | B | C` as `(A | B) | C`; collect the written members.
fn union_members<'a>(node: InputNode<'a>, out: &mut Vec<InputNode<'a>>) {
    for child in node.named_children() {
        if child.raw_kind() == "union_type" {
            union_members(child, out);
        } else {
            out.push(child);
        }
    }
}

/// `negated` is the source text of the enclosing `-` expression, if any.
fn number_literal(node: InputNode<'_>, digits: &str, negated: Option<&str>) -> FlowType {
    match (parse_number(digits), negated) {
        (Some(value), Some(raw)) => FlowType::NumberLiteral {
            value: -value,
            raw: raw.to_string(),
        },
        (Some(value), None) => FlowType::NumberLiteral {
            value,
            raw: digits.to_string(),
        },
        (None, _) => placeholder::error_type(node, "malformed numeric literal"),
    }
}

/// Name segments of `A`, `A.B`, `A.B.C`.
fn qualified_name(node: InputNode<'_>) -> QualifiedName {
    fn collect(node: InputNode<'_>, out: &mut Vec<String>) {
        let nested = node.kind() == SyntaxKind::QualifiedName
            || matches!(node.raw_kind(), "nested_type_identifier" | "member_expression");
        if nested {
            for child in node.named_children() {
                collect(child, out);
            }
        } else {
            out.push(node.text().to_string());
        }
    }

    let mut segments = Vec::new();
    collect(node, &mut segments);
    QualifiedName(segments)
}

fn binding_name(pattern: InputNode<'_>) -> Option<String> {
    match pattern.raw_kind() {
        "identifier" | "this" => Some(pattern.text().to_string()),
        _ => None,
    }
}
