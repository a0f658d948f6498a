//! DOM access capability.
//!
//! SYSTEM CONTEXT
//! ==============
//! Managers never reach for a global document. The composition root owns one
//! `Dom` implementation and lends it to every manager call: the browser build
//! wraps `web_sys::Document`, unit tests use an in-memory fake.
//!
//! All methods take `&self`; the real DOM is interior-mutable and the fake
//! mirrors that. Operations on a detached or missing node are silent no-ops.

/// Read/write access to the page.
pub trait Dom {
    /// Handle to one element. Cheap to clone; equality is node identity.
    type Node: Clone + PartialEq + std::fmt::Debug;

    // --- Lookup ---

    fn by_id(&self, id: &str) -> Option<Self::Node>;
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// All matches in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn query_within(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;
    fn document_element(&self) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;

    // --- Classes ---

    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Returns whether the class is present afterwards.
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool;
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn set_class_name(&self, node: &Self::Node, value: &str);

    // --- Attributes, inline style, content ---

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    /// Inline style value, empty when unset.
    fn style(&self, node: &Self::Node, property: &str) -> String;
    /// Setting an empty value clears the property.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn set_inner_html(&self, node: &Self::Node, html: &str);

    // --- Forms ---

    fn set_disabled(&self, node: &Self::Node, disabled: bool);
    fn reset_form(&self, node: &Self::Node);

    // --- Layout and viewport ---

    fn offset_top(&self, node: &Self::Node) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;
    fn scroll_y(&self) -> f64;
    /// Smooth-scroll the window to `top`.
    fn scroll_to(&self, top: f64);

    /// Append `<link rel="preload" as={kind} href={href}>` to `<head>`.
    fn preload(&self, href: &str, kind: &str);
}
