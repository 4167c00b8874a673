//! Structure document input types.
//!
//! The static-analysis tool exports one JSON document describing every class
//! and interface it found: qualifiers, inheritance lists, and nested member
//! definitions with their documentation blocks. These types mirror that
//! export one-to-one; nothing here interprets the data, it only gives it a
//! typed shape for the parse pass.
//!
//! Every optional element defaults to empty via `#[serde(default)]` —
//! missing docblocks, tags or inheritance lists are never an error. A
//! document that fails to deserialize at all is a fatal input error reported
//! by the caller.

use serde::{Deserialize, Serialize};

use crate::model::Visibility;

/// The whole analyzer export: one entry per scanned source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureDoc {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// One scanned source file and the types declared in it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub classes: Vec<TypeEntry>,
    #[serde(default)]
    pub interfaces: Vec<TypeEntry>,
}

/// One class or interface declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Short (unqualified) name.
    pub name: String,
    /// Declared full name; may carry a leading namespace separator.
    pub full_name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub docblock: DocBlock,
    #[serde(default)]
    pub constants: Vec<ConstantEntry>,
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

/// A documentation block: free text plus typed tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocBlock {
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "long-description")]
    pub long_description: String,
    #[serde(default)]
    pub tags: Vec<DocTag>,
}

impl DocBlock {
    /// First tag with the given name, if any.
    pub fn tag(&self, name: &str) -> Option<&DocTag> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }

    /// The `@param` tag documenting the given variable, if any.
    pub fn param_tag(&self, variable: &str) -> Option<&DocTag> {
        self.tags
            .iter()
            .find(|t| t.name == "param" && t.variable == variable)
    }
}

/// One docblock tag, e.g. `@param`, `@return`, `@var`, `@deprecated`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocTag {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: String,
    /// Variable name a `@param` tag refers to; empty for other tags.
    #[serde(default)]
    pub variable: String,
    #[serde(default)]
    pub description: String,
}

/// One class constant declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstantEntry {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub docblock: DocBlock,
}

/// One property declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyEntry {
    pub name: String,
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub docblock: DocBlock,
}

/// One method declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodEntry {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<ArgumentEntry>,
    #[serde(default)]
    pub docblock: DocBlock,
}

/// One declared method parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgumentEntry {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_deserializes_with_defaults() {
        let doc: StructureDoc = serde_json::from_str(
            r#"{"files":[{"path":"src/Foo.php","classes":[{"name":"Foo","full_name":"\\Foo"}]}]}"#,
        )
        .unwrap();
        let class = &doc.files[0].classes[0];
        assert_eq!(class.name, "Foo");
        assert!(!class.is_abstract);
        assert!(class.extends.is_empty());
        assert!(class.docblock.tags.is_empty());
        assert!(class.methods.is_empty());
    }

    #[test]
    fn docblock_tag_lookup_finds_first_match() {
        let block: DocBlock = serde_json::from_str(
            r#"{"description":"d","tags":[
                {"name":"param","type":"int","variable":"x","description":"first"},
                {"name":"param","type":"string","variable":"y","description":"second"},
                {"name":"deprecated","description":"gone"}
            ]}"#,
        )
        .unwrap();
        assert!(block.has_tag("deprecated"));
        assert_eq!(block.param_tag("y").unwrap().ty, "string");
        assert!(block.param_tag("z").is_none());
        assert_eq!(block.tag("param").unwrap().variable, "x");
    }

    #[test]
    fn long_description_accepts_dashed_alias() {
        let block: DocBlock =
            serde_json::from_str(r#"{"description":"d","long-description":"ld"}"#).unwrap();
        assert_eq!(block.long_description, "ld");
    }

    #[test]
    fn visibility_defaults_to_public() {
        let prop: PropertyEntry = serde_json::from_str(r#"{"name":"items"}"#).unwrap();
        assert_eq!(prop.visibility, Visibility::Public);
        assert!(!prop.is_static);
    }
}
