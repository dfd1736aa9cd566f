//! # Render Trees
//!
//! A [`View`] is the output of a component's view function: a small tree of
//! elements and text. It is plain data, so tests can inspect it directly and
//! the demo binary can print it as markup.
//!
//! Layout components leave an [`View::Outlet`] where the matched child route
//! renders. The router fills it with [`View::fill_outlet`].

use std::fmt;

/// A node in a render tree.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Element(Element),
    Text(String),
    /// Placeholder for a nested route's output.
    Outlet,
    /// Siblings with no wrapping element.
    Fragment(Vec<View>),
}

/// A tagged element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<View>,
}

impl View {
    /// Starts building an element with the given tag.
    pub fn element(tag: impl Into<String>) -> Self {
        View::Element(Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        View::Text(text.into())
    }

    pub fn empty() -> Self {
        View::Fragment(Vec::new())
    }

    /// Adds an attribute. No-op on anything but an element.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let View::Element(el) = &mut self {
            el.attrs.push((key.into(), value.into()));
        }
        self
    }

    /// Appends a child. On a fragment the child becomes a sibling; on text or
    /// an outlet it is ignored.
    pub fn child(mut self, child: View) -> Self {
        match &mut self {
            View::Element(el) => el.children.push(child),
            View::Fragment(items) => items.push(child),
            View::Text(_) | View::Outlet => {}
        }
        self
    }

    /// Shorthand for `.child(View::text(..))`.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(View::text(text))
    }

    pub fn has_outlet(&self) -> bool {
        match self {
            View::Outlet => true,
            View::Element(el) => el.children.iter().any(View::has_outlet),
            View::Fragment(items) => items.iter().any(View::has_outlet),
            View::Text(_) => false,
        }
    }

    /// Replaces the first outlet (depth-first) with `child`.
    ///
    /// Returns the tree unchanged when there is no outlet.
    pub fn fill_outlet(self, child: View) -> View {
        let mut slot = Some(child);
        self.fill_with(&mut slot)
    }

    fn fill_with(self, slot: &mut Option<View>) -> View {
        match self {
            View::Outlet => match slot.take() {
                Some(child) => child,
                None => View::Outlet,
            },
            View::Element(mut el) => {
                el.children = el
                    .children
                    .into_iter()
                    .map(|c| c.fill_with(slot))
                    .collect();
                View::Element(el)
            }
            View::Fragment(items) => {
                View::Fragment(items.into_iter().map(|c| c.fill_with(slot)).collect())
            }
            text @ View::Text(_) => text,
        }
    }

    /// Concatenated text of the whole tree, ignoring markup.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            View::Text(t) => out.push_str(t),
            View::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
            View::Fragment(items) => items.iter().for_each(|c| c.collect_text(out)),
            View::Outlet => {}
        }
    }

    /// Finds the first element with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        match self {
            View::Element(el) if el.tag == tag => Some(el),
            View::Element(el) => el.children.iter().find_map(|c| c.find(tag)),
            View::Fragment(items) => items.iter().find_map(|c| c.find(tag)),
            View::Text(_) | View::Outlet => None,
        }
    }
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn escape(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in s.chars() {
        match c {
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '&' => f.write_str("&amp;")?,
            '"' => f.write_str("&quot;")?,
            c => write!(f, "{c}")?,
        }
    }
    Ok(())
}

/// Renders the tree as markup. Unfilled outlets render as nothing.
impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Text(t) => escape(t, f),
            View::Outlet => Ok(()),
            View::Fragment(items) => items.iter().try_for_each(|c| write!(f, "{c}")),
            View::Element(el) => {
                write!(f, "<{}", el.tag)?;
                for (k, v) in &el.attrs {
                    write!(f, " {k}=\"")?;
                    escape(v, f)?;
                    f.write_str("\"")?;
                }
                f.write_str(">")?;
                for c in &el.children {
                    write!(f, "{c}")?;
                }
                write!(f, "</{}>", el.tag)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_outlet_replaces_first_outlet_only() {
        let layout = View::element("div")
            .child(View::element("nav"))
            .child(View::Outlet)
            .child(View::Outlet);

        let filled = layout.fill_outlet(View::element("h1").with_text("About"));

        let View::Element(root) = &filled else {
            panic!("expected element");
        };
        assert_eq!(root.children[1], View::element("h1").with_text("About"));
        assert_eq!(root.children[2], View::Outlet);
    }

    #[test]
    fn test_fill_outlet_without_outlet_is_identity() {
        let view = View::element("p").with_text("no slot");
        assert_eq!(view.clone().fill_outlet(View::text("x")), view);
    }

    #[test]
    fn test_display_escapes_and_skips_outlet() {
        let view = View::element("div")
            .attr("title", "a \"b\"")
            .with_text("1 < 2")
            .child(View::Outlet);
        assert_eq!(
            view.to_string(),
            "<div title=\"a &quot;b&quot;\">1 &lt; 2</div>"
        );
    }

    #[test]
    fn test_find_and_text_content() {
        let view = View::element("div")
            .child(View::element("img").attr("src", "x.png"))
            .child(View::element("h1").with_text("Anakin"));
        assert_eq!(view.find("img").and_then(|e| e.attr("src")), Some("x.png"));
        assert_eq!(view.text_content(), "Anakin");
    }
}
