//! Model builder, parse pass.
//!
//! Turns a deserialized [`StructureDoc`] into the initial [`Model`]: one
//! [`TypeRecord`] per class/interface entry, populated with its *directly
//! declared* members only. Inheritance is applied afterwards by
//! [`crate::expand`].
//!
//! All display strings (signatures, cleaned descriptions) are assembled
//! here, once, so the renderer never has to re-derive them.

use indexmap::IndexMap;

use crate::docblock::{
    autolink_urls, clean_param_description, clean_return_description, escape_pipes, nl_to_br,
    strip_markup, unescape_pipes,
};
use crate::input::{ConstantEntry, MethodEntry, PropertyEntry, StructureDoc, TypeEntry};
use crate::model::{
    Argument, ConstantRecord, DeprecationNote, MethodRecord, Model, PropertyRecord, ReturnSpec,
    TypeKind, TypeRecord,
};

/// Property type used when no `@var` tag documents a property.
const UNTYPED: &str = "mixed";

// ============================================================================
// Entry Point
// ============================================================================

/// Build the initial model from a structure document.
///
/// Missing optional metadata (no docblock, no tags, no inheritance lists)
/// yields empty defaults; this pass itself cannot fail. Well-formedness of
/// the document is the deserializer's problem, upstream of this call.
pub fn build_model(doc: &StructureDoc) -> Model {
    let mut model = Model::new();
    for file in &doc.files {
        for entry in &file.classes {
            model.insert(parse_type(entry, TypeKind::Class));
        }
        for entry in &file.interfaces {
            model.insert(parse_type(entry, TypeKind::Interface));
        }
    }
    model
}

// ============================================================================
// Per-Type Extraction
// ============================================================================

fn parse_type(entry: &TypeEntry, kind: TypeKind) -> TypeRecord {
    let full_name = strip_leading_separator(&entry.full_name);
    let deprecated = entry.docblock.has_tag("deprecated");

    let extends: Vec<String> = entry
        .extends
        .iter()
        .map(|name| strip_leading_separator(name))
        .collect();
    let implements: Vec<String> = entry
        .implements
        .iter()
        .map(|name| strip_leading_separator(name))
        .collect();

    TypeRecord {
        kind,
        is_abstract: entry.is_abstract,
        short_name: entry.name.clone(),
        namespace: entry.namespace.clone(),
        output_file_name: output_file_name(&entry.name),
        extends,
        implements,
        deprecated,
        description: entry.docblock.description.clone(),
        long_description: entry.docblock.long_description.clone(),
        constants: parse_constants(entry, &full_name, deprecated),
        properties: parse_properties(entry, &full_name, deprecated),
        methods: parse_methods(entry, &full_name),
        full_name,
    }
}

fn strip_leading_separator(name: &str) -> String {
    name.trim_start_matches('\\').to_string()
}

/// Page file name for a declared type name: namespace separators dashed,
/// `.md` appended. The link formatter applies the same short-name rule.
fn output_file_name(declared_name: &str) -> String {
    format!("{}.md", declared_name.replace('\\', "-"))
}

// ============================================================================
// Methods
// ============================================================================

fn parse_methods(entry: &TypeEntry, full_name: &str) -> IndexMap<String, MethodRecord> {
    let mut methods = IndexMap::new();
    for method in &entry.methods {
        methods.insert(method.name.clone(), parse_method(method, full_name));
    }
    methods
}

fn parse_method(method: &MethodEntry, full_name: &str) -> MethodRecord {
    let ret = method.docblock.tag("return").map(|tag| ReturnSpec {
        ty: escape_pipes(&tag.ty),
        description: clean_return_description(&tag.description),
    });

    let arguments: Vec<Argument> = method
        .arguments
        .iter()
        .map(|arg| {
            let mut argument = Argument {
                name: arg.name.clone(),
                ty: arg.ty.clone(),
                description: String::new(),
            };
            // A @param tag matched by variable name overrides the declared
            // type and, when it carries one, the variable name itself.
            if let Some(tag) = method.docblock.param_tag(&arg.name) {
                if !tag.ty.is_empty() {
                    argument.ty = escape_pipes(&tag.ty);
                }
                if !tag.description.is_empty() {
                    argument.description = clean_param_description(&tag.description);
                }
                if !tag.variable.is_empty() {
                    argument.name = tag.variable.clone();
                }
            }
            argument
        })
        .collect();

    let signature = method_signature(full_name, &method.name, ret.as_ref(), &arguments);

    let mut description = format!(
        "{}\n{}",
        method.docblock.description, method.docblock.long_description
    )
    .trim()
    .to_string();
    description = autolink_urls(&description);

    // A @deprecated tag replaces the description outright with its own text.
    let deprecated = method.docblock.tag("deprecated").map(|tag| {
        description = strip_markup(&tag.description);
        DeprecationNote {
            description: description.clone(),
        }
    });

    MethodRecord {
        name: method.name.clone(),
        signature,
        description: nl_to_br(&description),
        defined_by: full_name.to_string(),
        deprecated,
        arguments,
        ret,
    }
}

/// Assemble the display signature:
/// `<returnType> <fullName>::<name>(<type> <arg>, ...)`.
///
/// Pipes are un-escaped here — signatures render as code blocks, not table
/// cells.
fn method_signature(
    full_name: &str,
    name: &str,
    ret: Option<&ReturnSpec>,
    arguments: &[Argument],
) -> String {
    let argument_str = arguments
        .iter()
        .map(|arg| {
            if arg.ty.is_empty() {
                arg.name.clone()
            } else {
                format!("{} {}", arg.ty, arg.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let argument_str = unescape_pipes(&argument_str);

    match ret {
        Some(ret) if !ret.ty.is_empty() => format!(
            "{} {}::{}({})",
            unescape_pipes(&ret.ty),
            full_name,
            name,
            argument_str
        ),
        _ => format!("{}::{}({})", full_name, name, argument_str),
    }
}

// ============================================================================
// Properties
// ============================================================================

fn parse_properties(
    entry: &TypeEntry,
    full_name: &str,
    class_deprecated: bool,
) -> IndexMap<String, PropertyRecord> {
    let mut properties = IndexMap::new();
    for property in &entry.properties {
        properties.insert(
            property.name.clone(),
            parse_property(property, full_name, class_deprecated),
        );
    }
    properties
}

fn parse_property(
    property: &PropertyEntry,
    full_name: &str,
    class_deprecated: bool,
) -> PropertyRecord {
    let ty = property
        .docblock
        .tag("var")
        .map(|tag| tag.ty.clone())
        .unwrap_or_else(|| UNTYPED.to_string());

    let mut signature = format!("{} {} {}", property.visibility.as_str(), ty, property.name);
    if !property.default.is_empty() {
        signature.push_str(" = ");
        signature.push_str(&property.default);
    }

    PropertyRecord {
        name: property.name.clone(),
        signature,
        description: joined_description(&property.docblock.description, &property.docblock.long_description),
        defined_by: full_name.to_string(),
        // Property deprecation mirrors the class-level flag; there is no
        // per-property tag in the input convention.
        deprecated: class_deprecated,
        visibility: property.visibility,
        is_static: property.is_static,
        ty,
        default: property.default.clone(),
    }
}

// ============================================================================
// Constants
// ============================================================================

fn parse_constants(
    entry: &TypeEntry,
    full_name: &str,
    class_deprecated: bool,
) -> IndexMap<String, ConstantRecord> {
    let mut constants = IndexMap::new();
    for constant in &entry.constants {
        constants.insert(
            constant.name.clone(),
            parse_constant(constant, full_name, class_deprecated),
        );
    }
    constants
}

fn parse_constant(
    constant: &ConstantEntry,
    full_name: &str,
    class_deprecated: bool,
) -> ConstantRecord {
    ConstantRecord {
        name: constant.name.clone(),
        signature: format!("const {} = {}", constant.name, constant.value),
        description: joined_description(&constant.docblock.description, &constant.docblock.long_description),
        defined_by: full_name.to_string(),
        deprecated: class_deprecated,
        value: constant.value.clone(),
    }
}

fn joined_description(description: &str, long_description: &str) -> String {
    format!("{}\n\n{}", description, long_description)
        .trim()
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Visibility;

    fn doc_from_json(json: &str) -> StructureDoc {
        serde_json::from_str(json).expect("test document")
    }

    fn single_class(json: &str) -> TypeRecord {
        let doc = doc_from_json(json);
        let model = build_model(&doc);
        let names = model.names();
        assert_eq!(names.len(), 1, "expected exactly one type");
        model.get(&names[0]).unwrap().clone()
    }

    mod type_extraction {
        use super::*;

        #[test]
        fn leading_separator_is_stripped_everywhere() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Bag","full_name":"\\Acme\\Bag","namespace":"Acme",
                    "extends":["\\Acme\\AbstractBag"],
                    "implements":["\\Acme\\Countable"]
                }]}]}"#,
            );
            assert_eq!(record.full_name, "Acme\\Bag");
            assert_eq!(record.extends, vec!["Acme\\AbstractBag"]);
            assert_eq!(record.implements, vec!["Acme\\Countable"]);
        }

        #[test]
        fn output_file_name_uses_short_name() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Bag","full_name":"Acme\\Bag","namespace":"Acme"
                }]}]}"#,
            );
            assert_eq!(record.output_file_name, "Bag.md");
        }

        #[test]
        fn interface_entries_get_interface_kind() {
            let record = single_class(
                r#"{"files":[{"path":"f","interfaces":[{
                    "name":"Countable","full_name":"Acme\\Countable"
                }]}]}"#,
            );
            assert_eq!(record.kind, TypeKind::Interface);
        }

        #[test]
        fn class_deprecation_comes_from_own_docblock_tag() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Old","full_name":"Old",
                    "docblock":{"description":"d","tags":[{"name":"deprecated","description":"use New"}]}
                }]}]}"#,
            );
            assert!(record.deprecated);
        }
    }

    mod methods {
        use super::*;

        #[test]
        fn param_tag_overrides_declared_type_and_adds_description() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Bag","full_name":"Acme\\Bag",
                    "methods":[{
                        "name":"add",
                        "arguments":[{"name":"item","type":"mixed"}],
                        "docblock":{"description":"Adds an item.","tags":[
                            {"name":"param","type":"int|string","variable":"item","description":"the item"},
                            {"name":"return","type":"void","description":""}
                        ]}
                    }]
                }]}]}"#,
            );
            let method = &record.methods["add"];
            assert_eq!(method.arguments[0].ty, "int\\|string");
            assert_eq!(method.arguments[0].description, "the item");
            assert_eq!(method.defined_by, "Acme\\Bag");
            // Signature un-escapes the pipes again.
            assert_eq!(method.signature, "void Acme\\Bag::add(int|string item)");
        }

        #[test]
        fn signature_without_return_tag_has_no_leading_space() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Bag","full_name":"Acme\\Bag",
                    "methods":[{"name":"clear"}]
                }]}]}"#,
            );
            assert_eq!(record.methods["clear"].signature, "Acme\\Bag::clear()");
        }

        #[test]
        fn deprecated_tag_replaces_description_and_attaches_note() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Bag","full_name":"Bag",
                    "methods":[{
                        "name":"old",
                        "docblock":{"description":"original text","tags":[
                            {"name":"deprecated","description":"use <b>new</b> instead"}
                        ]}
                    }]
                }]}]}"#,
            );
            let method = &record.methods["old"];
            let note = method.deprecated.as_ref().unwrap();
            assert_eq!(note.description, "use new instead");
            assert_eq!(method.description, "use new instead");
        }

        #[test]
        fn description_joins_long_description_and_autolinks() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Bag","full_name":"Bag",
                    "methods":[{
                        "name":"info",
                        "docblock":{"description":"Summary.","long_description":"See https://example.org/x for details."}
                    }]
                }]}]}"#,
            );
            let description = &record.methods["info"].description;
            assert!(description.contains("Summary.<br>"));
            assert!(description.contains("[https://example.org/x](https://example.org/x)"));
        }

        #[test]
        fn declaration_order_is_preserved() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Bag","full_name":"Bag",
                    "methods":[{"name":"zulu"},{"name":"alpha"},{"name":"mike"}]
                }]}]}"#,
            );
            let names: Vec<&String> = record.methods.keys().collect();
            assert_eq!(names, vec!["zulu", "alpha", "mike"]);
        }
    }

    mod properties_and_constants {
        use super::*;

        #[test]
        fn var_tag_types_the_property() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Bag","full_name":"Bag",
                    "properties":[
                        {"name":"items","visibility":"protected","default":"[]",
                         "docblock":{"tags":[{"name":"var","type":"array"}]}},
                        {"name":"loose"}
                    ]
                }]}]}"#,
            );
            let items = &record.properties["items"];
            assert_eq!(items.ty, "array");
            assert_eq!(items.signature, "protected array items = []");
            assert_eq!(items.visibility, Visibility::Protected);
            // No @var tag falls back to the untyped marker.
            let loose = &record.properties["loose"];
            assert_eq!(loose.ty, "mixed");
            assert_eq!(loose.signature, "public mixed loose");
        }

        #[test]
        fn constant_signature_includes_value() {
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Bag","full_name":"Bag",
                    "constants":[{"name":"VERSION","value":"'1.0'"}]
                }]}]}"#,
            );
            assert_eq!(
                record.constants["VERSION"].signature,
                "const VERSION = '1.0'"
            );
        }

        #[test]
        fn property_and_constant_deprecation_follow_class_flag() {
            // Known quirk, preserved: methods are deprecated per-tag, but
            // properties and constants inherit the class-level flag.
            let record = single_class(
                r#"{"files":[{"path":"f","classes":[{
                    "name":"Old","full_name":"Old",
                    "docblock":{"tags":[{"name":"deprecated","description":""}]},
                    "properties":[{"name":"p"}],
                    "constants":[{"name":"C","value":"1"}],
                    "methods":[{"name":"m"}]
                }]}]}"#,
            );
            assert!(record.properties["p"].deprecated);
            assert!(record.constants["C"].deprecated);
            assert!(record.methods["m"].deprecated.is_none());
        }
    }
}
