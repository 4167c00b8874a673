//! Markdown page rendering.
//!
//! Builds one reference page per type record plus a namespace-tree index
//! page. Pure string construction over the completed model; every
//! cross-type reference goes through the [`LinkFormatter`].
//!
//! Member sections render in map order, which after expansion means
//! declared members first, inherited members after — the model guarantees
//! it, the renderer just relies on it.

use crate::docblock::unescape_pipes;
use crate::links::LinkFormatter;
use crate::model::{MethodRecord, Model, TypeKind, TypeRecord};

/// File name of the namespace-tree index page.
pub const INDEX_FILE_NAME: &str = "ApiIndex.md";

// ============================================================================
// Type Pages
// ============================================================================

/// Render the reference page for one type.
pub fn render_type_page(record: &TypeRecord, links: &LinkFormatter) -> String {
    let mut page = String::new();

    page.push_str(&format!("# {}\n\n", record.short_name));

    if record.deprecated {
        page.push_str(&format!(
            "**This {} is deprecated.**\n\n",
            record.kind.as_str()
        ));
    }
    if !record.description.is_empty() {
        page.push_str(&format!("{}\n\n", record.description.trim()));
    }
    if !record.long_description.is_empty() {
        page.push_str(&format!("{}\n\n", record.long_description.trim()));
    }

    render_facts(&mut page, record, links);
    render_constants(&mut page, record);
    render_properties(&mut page, record, links);
    render_methods(&mut page, record, links);

    page
}

/// The bullet list of type facts under the page title.
fn render_facts(page: &mut String, record: &TypeRecord, links: &LinkFormatter) {
    page.push_str(&format!("* Full name: `{}`\n", record.full_name));

    if record.is_abstract {
        page.push_str("* This class is **abstract**\n");
    }
    if !record.extends.is_empty() {
        let label = match record.kind {
            TypeKind::Class => "Parent class",
            TypeKind::Interface => "Parent interfaces",
        };
        page.push_str(&format!(
            "* {}: {}\n",
            label,
            linked_name_list(&record.extends, links)
        ));
    }
    if !record.implements.is_empty() {
        page.push_str(&format!(
            "* This class implements: {}\n",
            linked_name_list(&record.implements, links)
        ));
    }
    page.push('\n');
}

/// Comma-joined links for a list of type names; names the model does not
/// know degrade to inline code.
fn linked_name_list(names: &[String], links: &LinkFormatter) -> String {
    names
        .iter()
        .map(|name| {
            let link = links.class_link(name, None);
            if link.is_empty() {
                format!("`{}`", name)
            } else {
                link
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_constants(page: &mut String, record: &TypeRecord) {
    if record.constants.is_empty() {
        return;
    }
    page.push_str("## Constants\n\n");
    for constant in record.constants.values() {
        page.push_str(&format!("### {}\n\n", constant.name));
        page.push_str(&format!("```\n{}\n```\n\n", constant.signature));
        if constant.deprecated {
            page.push_str("**This constant is deprecated.**\n\n");
        }
        if !constant.description.is_empty() {
            page.push_str(&format!("{}\n\n", constant.description));
        }
    }
}

fn render_properties(page: &mut String, record: &TypeRecord, links: &LinkFormatter) {
    if record.properties.is_empty() {
        return;
    }
    page.push_str("## Properties\n\n");
    for property in record.properties.values() {
        page.push_str(&format!("### {}\n\n", property.name));
        page.push_str(&format!("```\n{}\n```\n\n", property.signature));
        if property.deprecated {
            page.push_str("**This property is deprecated.**\n\n");
        }
        if !property.description.is_empty() {
            page.push_str(&format!("{}\n\n", property.description));
        }

        page.push_str(&format!("* Visibility: {}\n", property.visibility.as_str()));
        if property.is_static {
            page.push_str("* This property is **static**\n");
        }
        if property.defined_by != record.full_name {
            page.push_str(&format!(
                "* Defined by: {}\n",
                defined_by_link(&property.defined_by, links)
            ));
        }
        page.push('\n');
    }
}

fn render_methods(page: &mut String, record: &TypeRecord, links: &LinkFormatter) {
    if record.methods.is_empty() {
        return;
    }
    page.push_str("## Methods\n\n");
    for method in record.methods.values() {
        render_method(page, method, record, links);
    }
}

fn render_method(
    page: &mut String,
    method: &MethodRecord,
    record: &TypeRecord,
    links: &LinkFormatter,
) {
    page.push_str(&format!("### {}\n\n", method.name));
    page.push_str(&format!("```\n{}\n```\n\n", method.signature));

    if let Some(note) = &method.deprecated {
        if note.description.is_empty() {
            page.push_str("**This method is deprecated.**\n\n");
        } else {
            page.push_str(&format!("**This method is deprecated:** {}\n\n", note.description));
        }
    } else if !method.description.is_empty() {
        page.push_str(&format!("{}\n\n", method.description));
    }

    if !method.arguments.is_empty() {
        page.push_str("**Parameters:**\n\n");
        page.push_str("| Parameter | Type | Description |\n");
        page.push_str("|-----------|------|-------------|\n");
        for argument in &method.arguments {
            page.push_str(&format!(
                "| {} | {} | {} |\n",
                argument.name,
                typed_link(&argument.ty, links),
                argument.description
            ));
        }
        page.push('\n');
    }

    if let Some(ret) = &method.ret {
        page.push_str(&format!("**Return value:** {}", typed_link(&ret.ty, links)));
        if !ret.description.is_empty() {
            page.push_str(&format!(" - {}", ret.description));
        }
        page.push_str("\n\n");
    }

    if method.defined_by != record.full_name {
        page.push_str(&format!(
            "* Defined by: {}\n\n",
            defined_by_link(&method.defined_by, links)
        ));
    }
}

/// Link a (possibly union) type expression, falling back to the escaped
/// text when no member of the union is known.
fn typed_link(ty: &str, links: &LinkFormatter) -> String {
    if ty.is_empty() {
        return String::new();
    }
    let link = links.class_link(&unescape_pipes(ty), None);
    if link.is_empty() {
        format!("**{}**", ty)
    } else {
        link
    }
}

fn defined_by_link(defined_by: &str, links: &LinkFormatter) -> String {
    let link = links.class_link(defined_by, None);
    if link.is_empty() {
        format!("`{}`", defined_by)
    } else {
        link
    }
}

// ============================================================================
// Namespace Index
// ============================================================================

/// One node of the namespace tree: a name, ordered child namespaces, and
/// the types declared directly in the namespace.
struct NamespaceNode {
    name: String,
    children: Vec<NamespaceNode>,
    entries: Vec<IndexEntry>,
}

struct IndexEntry {
    short_name: String,
    full_name: String,
}

impl NamespaceNode {
    fn new(name: impl Into<String>) -> Self {
        NamespaceNode {
            name: name.into(),
            children: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Insert a type under the given namespace path, creating intermediate
    /// nodes as needed.
    fn insert(&mut self, path: &[&str], entry: IndexEntry) {
        match path.split_first() {
            None => self.entries.push(entry),
            Some((head, rest)) => self.child_mut(head).insert(rest, entry),
        }
    }

    fn child_mut(&mut self, name: &str) -> &mut NamespaceNode {
        let position = match self.children.iter().position(|child| child.name == name) {
            Some(position) => position,
            None => {
                self.children.push(NamespaceNode::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[position]
    }
}

/// Render the `ApiIndex.md` namespace-tree page.
pub fn render_index(model: &Model, links: &LinkFormatter) -> String {
    let mut root = NamespaceNode::new("");
    for (full_name, record) in model.iter() {
        let path: Vec<&str> = if record.namespace.is_empty() {
            Vec::new()
        } else {
            record.namespace.split('\\').collect()
        };
        root.insert(
            &path,
            IndexEntry {
                short_name: record.short_name.clone(),
                full_name: full_name.clone(),
            },
        );
    }

    let mut page = String::from("# API Index\n\n");
    render_node(&mut page, &root, 0, links);
    page
}

fn render_node(page: &mut String, node: &NamespaceNode, depth: usize, links: &LinkFormatter) {
    let indent = "    ".repeat(depth);
    for entry in &node.entries {
        let link = links.class_link(&entry.full_name, Some(&entry.short_name));
        // Unlinkable entries are omitted entirely.
        if link.is_empty() {
            continue;
        }
        page.push_str(&format!("{}* {}\n", indent, link));
    }
    for child in &node.children {
        page.push_str(&format!("{}* {}\n", indent, child.name));
        render_node(page, child, depth + 1, links);
    }
}

// ============================================================================
// Tests
// ============================================================================
