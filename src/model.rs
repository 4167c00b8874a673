//! Documentation data model.
//!
//! These types represent the resolved reference documentation for a project:
//! one [`TypeRecord`] per class or interface, keyed by fully-qualified name,
//! with member maps that preserve declaration order. The model is built by
//! the parse pass ([`crate::parse`]), completed by the inheritance-expansion
//! pass ([`crate::expand`]), and treated as read-only by everything
//! downstream (rendering, link formatting).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Kind and Visibility
// ============================================================================

/// Whether a record documents a class or an interface.
///
/// Decided once at parse time; use sites match on the variant instead of
/// re-deriving it from strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TypeKind::Class => "Class",
            TypeKind::Interface => "Interface",
        }
    }
}

/// Member visibility.
///
/// `private` properties are never propagated to descendants during
/// inheritance expansion; methods carry no visibility in the input document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

// ============================================================================
// Member Records
// ============================================================================

/// A structured deprecation note attached to a method.
///
/// Properties and constants do not carry per-member notes; their
/// `deprecated` flag mirrors the class-level flag (a quirk of the input
/// convention that is preserved deliberately).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeprecationNote {
    pub description: String,
}

/// One documented method argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    /// Display type, pipe-escaped for table embedding.
    #[serde(rename = "type")]
    pub ty: String,
    /// Cleaned `@param` description; empty when the tag supplied none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Documented return type and description from a `@return` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSpec {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A documented method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub name: String,
    /// Pre-rendered display signature, e.g. `void Acme\Bag::add(mixed item)`.
    pub signature: String,
    pub description: String,
    /// Fully-qualified name of the type that originally declared this
    /// method; survives inheritance expansion unchanged.
    pub defined_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<DeprecationNote>,
    pub arguments: Vec<Argument>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub ret: Option<ReturnSpec>,
}

/// A documented property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub name: String,
    /// Pre-rendered display signature, e.g. `protected string name = 'x'`.
    pub signature: String,
    pub description: String,
    pub defined_by: String,
    pub deprecated: bool,
    pub visibility: Visibility,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "type")]
    pub ty: String,
    /// Declared default value; empty when absent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default: String,
}

/// A documented class constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantRecord {
    pub name: String,
    /// Pre-rendered display signature, e.g. `const VERSION = '1.0'`.
    pub signature: String,
    pub description: String,
    pub defined_by: String,
    pub deprecated: bool,
    pub value: String,
}

// ============================================================================
// Type Record
// ============================================================================

/// The resolved documentation for one class or interface.
///
/// After inheritance expansion the member maps contain every directly
/// declared member plus every non-overridden member inherited from any
/// ancestor reachable via `extends`/`implements`. Declared members always
/// precede inherited ones in map order; the renderer relies on this for
/// stable signature blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub kind: TypeKind,
    pub is_abstract: bool,
    pub short_name: String,
    pub namespace: String,
    /// Unique identity key: namespace + short name, no leading separator.
    pub full_name: String,
    /// Direct supertypes, declaration order. More than one entry is only
    /// meaningful for interfaces.
    pub extends: Vec<String>,
    /// Directly implemented interfaces, declaration order.
    pub implements: Vec<String>,
    /// Page file name, derived from the declared short name (namespace
    /// separators dashed). The link formatter derives link targets from the
    /// same rule so pages and links cannot diverge.
    pub output_file_name: String,
    pub deprecated: bool,
    pub description: String,
    pub long_description: String,
    pub constants: IndexMap<String, ConstantRecord>,
    pub properties: IndexMap<String, PropertyRecord>,
    pub methods: IndexMap<String, MethodRecord>,
}

// ============================================================================
// Model
// ============================================================================

/// The completed documentation model: fully-qualified name → [`TypeRecord`],
/// insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model {
    types: IndexMap<String, TypeRecord>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its `full_name`.
    ///
    /// A duplicate full name replaces the earlier record at its original
    /// position (last declaration wins).
    pub fn insert(&mut self, record: TypeRecord) {
        self.types.insert(record.full_name.clone(), record);
    }

    pub fn get(&self, full_name: &str) -> Option<&TypeRecord> {
        self.types.get(full_name)
    }

    pub fn get_mut(&mut self, full_name: &str) -> Option<&mut TypeRecord> {
        self.types.get_mut(full_name)
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.types.contains_key(full_name)
    }

    /// All fully-qualified names, in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeRecord)> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
