//! Removal of artwork wrapper groups.
//!
//! Source artwork nests every fragment inside an `<svg>` root, a logo group
//! (`g#emblem-logo`) and, for decorative elements, an `elements` group:
//!
//! ```text
//! <svg><g id="emblem-logo"><g id="base">...</g></g></svg>                 -> <g id="base">...</g>
//! <svg><g id="emblem-logo"><path id="quadrant-tl"/></g></svg>             -> <g id="quadrant-tl"><path id="quadrant-tl"/></g>
//! <svg><g id="emblem-logo"><g id="elements"><g id="leaf">...</g></g></g></svg> -> <g id="leaf">...</g>
//! ```

use crate::constants::{ELEMENTS_GROUP_ID, LOGO_GROUP_ID};
use crate::parser::{parse_fragment, MarkupElement};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Id given to a synthesized element group when no child carries an id.
pub const FALLBACK_ELEMENT_ID: &str = "element";

/// Id given to a synthesized group when no child carries an id.
pub const FALLBACK_GROUP_ID: &str = "unwrapped";

/// Attributes and children of a group element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupContent {
    /// Group `id`, if any
    pub id: Option<String>,
    /// Every attribute except `xmlns`
    pub attributes: BTreeMap<String, String>,
    /// Serialized child elements
    pub inner: String,
}

/// Strips the logo and elements wrappers and returns the innermost group.
///
/// Returns the input unchanged when it cannot be parsed or has no `<svg>` root.
/// Without a logo group, the serialized children of the `<svg>` root are returned.
#[must_use]
pub fn unwrap_fragment(markup: &str) -> String {
    match try_unwrap(markup) {
        Ok(Some(unwrapped)) => unwrapped,
        Ok(None) => markup.to_string(),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "Markup parsing error, returning fragment unchanged");
            markup.to_string()
        }
    }
}

fn has_id(el: &MarkupElement, id: &str) -> bool {
    el.attribute("id") == Some(id)
}

fn try_unwrap(markup: &str) -> Result<Option<String>> {
    let root = parse_fragment(markup)?;

    let Some(svg) = root.find(|el| el.is("svg")) else {
        warn!("No <svg> root found");
        return Ok(None);
    };

    let Some(outer) = svg.find_descendant(|el| el.is("g") && has_id(el, LOGO_GROUP_ID)) else {
        debug!("No logo wrapper, extracting content as-is");
        return svg.inner_element_markup().map(Some);
    };

    if let Some(elements) =
        outer.find_descendant(|el| el.is("g") && has_id(el, ELEMENTS_GROUP_ID))
    {
        debug!("Found elements wrapper");
        if let Some(inner) = elements.find_descendant(|el| el.is("g")) {
            debug!(id = ?inner.attribute("id"), "Using nested element group");
            return inner.to_markup().map(Some);
        }
        return wrap_children(elements, FALLBACK_ELEMENT_ID).map(Some);
    }

    if let Some(inner) = outer.find_descendant(|el| el.is("g")) {
        debug!(id = ?inner.attribute("id"), "Using nested group");
        return inner.to_markup().map(Some);
    }

    wrap_children(outer, FALLBACK_GROUP_ID).map(Some)
}

/// Moves a wrapper's child elements into a new `<g>` named after the first child with an id.
fn wrap_children(wrapper: &MarkupElement, fallback_id: &str) -> Result<String> {
    let id = wrapper
        .child_elements()
        .find_map(|child| child.attribute("id"))
        .unwrap_or(fallback_id);
    debug!(id, "No nested group, creating wrapper for direct children");

    let mut group = MarkupElement::new("g");
    group.set_attribute("id", id);
    for child in wrapper.child_elements() {
        group.add_child_element(child.clone());
    }
    group.to_markup()
}

/// Serialized child elements of the first `<svg>` element, or an empty string.
#[must_use]
pub fn extract_svg_content(markup: &str) -> String {
    parse_fragment(markup)
        .ok()
        .and_then(|root| {
            root.find(|el| el.is("svg"))
                .and_then(|svg| svg.inner_element_markup().ok())
        })
        .unwrap_or_default()
}

/// Splits the first `<g>` element into its id, attributes and inner markup.
///
/// Returns `None` for unparsable markup or when there is no group.
#[must_use]
pub fn extract_group_content(markup: &str) -> Option<GroupContent> {
    let root = match parse_fragment(markup) {
        Ok(root) => root,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "Markup parsing error while extracting group");
            return None;
        }
    };

    let Some(group) = root.find(|el| el.is("g")) else {
        warn!("No <g> element found");
        return None;
    };

    let attributes = group
        .attributes()
        .filter(|(name, _)| *name != "xmlns")
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let inner = match group.inner_element_markup() {
        Ok(inner) => inner,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "Failed to serialize group content");
            return None;
        }
    };

    Some(GroupContent {
        id: group.attribute("id").map(str::to_string),
        attributes,
        inner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_nested_group() {
        let input = r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="emblem-logo"><g id="base"><path d="M0 0"/></g></g></svg>"#;
        assert_eq!(unwrap_fragment(input), r#"<g id="base"><path d="M0 0"/></g>"#);
    }

    #[test]
    fn test_unwrap_direct_children() {
        let input = r#"<svg><g id="emblem-logo"><path id="quadrant-tl" d="M0 0"/></g></svg>"#;
        assert_eq!(
            unwrap_fragment(input),
            r#"<g id="quadrant-tl"><path id="quadrant-tl" d="M0 0"/></g>"#
        );
    }

    #[test]
    fn test_unwrap_direct_children_without_ids() {
        let input = r#"<svg><g id="emblem-logo"><path d="M0 0"/><circle r="1"/></g></svg>"#;
        assert_eq!(
            unwrap_fragment(input),
            r#"<g id="unwrapped"><path d="M0 0"/><circle r="1"/></g>"#
        );
    }

    #[test]
    fn test_unwrap_elements_wrapper_with_group() {
        let input = r#"<svg><g id="emblem-logo"><g id="elements"><g id="dollar"><text>$</text></g></g></g></svg>"#;
        assert_eq!(unwrap_fragment(input), r#"<g id="dollar"><text>$</text></g>"#);
    }

    #[test]
    fn test_unwrap_elements_wrapper_with_paths() {
        let input = r#"<svg><g id="emblem-logo"><g id="elements"><path d="M1 1"/><path id="briefcase" d="M2 2"/></g></g></svg>"#;
        assert_eq!(
            unwrap_fragment(input),
            r#"<g id="briefcase"><path d="M1 1"/><path id="briefcase" d="M2 2"/></g>"#
        );

        let input = r#"<svg><g id="emblem-logo"><g id="elements"><path d="M1 1"/></g></g></svg>"#;
        assert_eq!(unwrap_fragment(input), r#"<g id="element"><path d="M1 1"/></g>"#);
    }

    #[test]
    fn test_unwrap_without_logo_wrapper() {
        let input = "<svg>\n<g id=\"a\"/>\n<path/></svg>";
        assert_eq!(unwrap_fragment(input), r#"<g id="a"/><path/>"#);
        assert_eq!(extract_svg_content(input), r#"<g id="a"/><path/>"#);
    }

    #[test]
    fn test_unwrap_without_svg_or_malformed_is_unchanged() {
        let input = r#"<g id="emblem-logo"><g id="base"/></g>"#;
        assert_eq!(unwrap_fragment(input), input);

        let input = "<svg><g></svg>";
        assert_eq!(unwrap_fragment(input), input);
        assert_eq!(extract_svg_content(input), "");
    }

    #[test]
    fn test_extract_group_content() {
        let input = r#"<g xmlns="http://www.w3.org/2000/svg" id="leaf" transform="scale(2)">
<path d="M0 0"/><path d="M1 1"/></g>"#;
        let content = extract_group_content(input).unwrap();
        assert_eq!(content.id.as_deref(), Some("leaf"));
        assert_eq!(content.attributes.len(), 2);
        assert_eq!(content.attributes["transform"], "scale(2)");
        assert!(!content.attributes.contains_key("xmlns"));
        assert_eq!(content.inner, r#"<path d="M0 0"/><path d="M1 1"/>"#);
    }

    #[test]
    fn test_extract_group_content_none() {
        assert_eq!(extract_group_content("<path/>"), None);
        assert_eq!(extract_group_content("<g>"), None);
    }
}
