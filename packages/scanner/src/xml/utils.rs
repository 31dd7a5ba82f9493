//! XML utility functions for navigating and extracting data from DOM trees.
//!
//! Element lookups take an optional namespace URI: `None` matches only
//! elements without a namespace, `Some(uri)` matches only elements in that
//! namespace. Local names are compared exactly.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use findingaid_scanner::xml::get_tag_name;
///
/// let xml = r#"<ead:ead xmlns:ead="urn:isbn:1-931666-22-9"><ead:archdesc/></ead:ead>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "ead");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with the given namespace and local name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use findingaid_scanner::xml::has_name;
///
/// let xml = r#"<ead xmlns="urn:isbn:1-931666-22-9"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(has_name(root, Some("urn:isbn:1-931666-22-9"), "ead"));
/// assert!(!has_name(root, None, "ead"));
/// ```
pub fn has_name(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> bool {
    node.is_element() && get_tag_name(node) == local && node.tag_name().namespace() == namespace
}

/// Find all direct child elements with the given name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: Option<&'a str>,
    local: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| has_name(*child, namespace, local))
}

/// Find all descendant elements with the given name, in document order.
///
/// The starting node itself is never matched.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use findingaid_scanner::xml::find_descendants;
///
/// let xml = r#"<p><p>nested</p><list><p/></list></p>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert_eq!(find_descendants(doc.root_element(), None, "p").count(), 2);
/// ```
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: Option<&'a str>,
    local: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .filter(move |n| has_name(*n, namespace, local))
}

/// Find the first descendant element with the given name.
pub fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: Option<&'a str>,
    local: &'a str,
) -> Option<Node<'a, 'input>> {
    find_descendants(node, namespace, local).next()
}

/// Get the text directly inside an element, before its first child element.
///
/// Text nested in child elements is not included and nothing is trimmed.
/// Returns `None` when the element starts with a child element or is empty.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use findingaid_scanner::xml::direct_text;
///
/// let xml = r#"<subject>Mining <emph>industry</emph></subject>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(direct_text(doc.root_element()), Some("Mining "));
/// ```
pub fn direct_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text()
}

/// Concatenate all descendant text in document order.
///
/// Child markup is stripped; comments and processing instructions do not
/// contribute. Whitespace is kept as written.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use findingaid_scanner::xml::flatten_text;
///
/// let xml = r#"<p>Papers of <persname>Dean C. Worcester</persname>, zoologist.</p>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(flatten_text(doc.root_element()), "Papers of Dean C. Worcester, zoologist.");
/// ```
pub fn flatten_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Get all element children of a node.
///
/// # Returns
/// Iterator over element children (excludes text nodes, comments, etc.)
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}
