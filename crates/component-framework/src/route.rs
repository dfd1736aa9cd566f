//! # Route Table
//!
//! A static tree of [`RouteEntry`] values mapping navigation paths to view
//! producers. The table is built once, validated, and then shared immutably
//! (usually as `Arc<RouteTable>`) with a [`Router`](crate::router::Router).
//!
//! Matching is exact string equality. The root entry answers for `"/"` and
//! hands every other path down to its children; there are no wildcards and
//! no path parameters.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::component::{short_type_name, Component};
use crate::error::{RouteError, RouteTableError};
use crate::host::{ComponentHost, HostSettings, Instance};

/// Creates a fresh, not yet activated instance for a route.
pub type ViewProducer = Arc<dyn Fn(&HostSettings) -> Box<dyn Instance> + Send + Sync>;

/// One node of the route tree.
#[derive(Clone)]
pub struct RouteEntry {
    path: String,
    name: &'static str,
    view: ViewProducer,
    children: Vec<RouteEntry>,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, name: &'static str, view: ViewProducer) -> Self {
        Self {
            path: path.into(),
            name,
            view,
            children: Vec::new(),
        }
    }

    /// Route whose view is a component built by `factory` for every
    /// navigation that enters the path. The entry is named after `C`;
    /// nothing is built until a navigation enters the path.
    pub fn component<C, F>(path: impl Into<String>, factory: F) -> Self
    where
        C: Component,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let view: ViewProducer = Arc::new(move |settings: &HostSettings| {
            Box::new(ComponentHost::spawn_with(factory(), settings)) as Box<dyn Instance>
        });
        Self::new(path, short_type_name::<C>(), view)
    }

    /// Adds a nested route. Paths without a leading `/` are relative to this
    /// entry.
    pub fn child(mut self, child: RouteEntry) -> Self {
        self.children.push(child);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn children(&self) -> &[RouteEntry] {
        &self.children
    }

    pub(crate) fn produce(&self, settings: &HostSettings) -> Box<dyn Instance> {
        (self.view)(settings)
    }

    fn normalize(&mut self) -> Result<(), RouteTableError> {
        let mut seen = HashSet::new();
        for child in &mut self.children {
            if !child.path.starts_with('/') {
                child.path = join(&self.path, &child.path);
            }
            if !seen.insert(child.path.clone()) {
                return Err(RouteTableError::DuplicatePath(child.path.clone()));
            }
            child.normalize()?;
        }
        Ok(())
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("children", &self.children)
            .finish()
    }
}

fn join(parent: &str, child: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}

/// Validated, immutable route tree.
#[derive(Debug, Clone)]
pub struct RouteTable {
    root: RouteEntry,
}

impl RouteTable {
    /// Validates `root` and resolves relative child paths.
    ///
    /// # Errors
    /// - [`RouteTableError::InvalidRoot`] if the root path is not `"/"`.
    /// - [`RouteTableError::DuplicatePath`] if two siblings share a path.
    pub fn new(mut root: RouteEntry) -> Result<Self, RouteTableError> {
        if root.path != "/" {
            return Err(RouteTableError::InvalidRoot(root.path));
        }
        root.normalize()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &RouteEntry {
        &self.root
    }

    /// Returns the chain of entries from the root down to the one matching
    /// `path`.
    pub fn resolve(&self, path: &str) -> Result<Vec<&RouteEntry>, RouteError> {
        let mut chain = Vec::new();
        if find_chain(&self.root, path, &mut chain) {
            Ok(chain)
        } else {
            Err(RouteError::NotFound(path.to_string()))
        }
    }

    /// Every routable path, depth-first.
    pub fn paths(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_paths(&self.root, &mut out);
        out
    }
}

fn find_chain<'a>(entry: &'a RouteEntry, path: &str, chain: &mut Vec<&'a RouteEntry>) -> bool {
    chain.push(entry);
    if entry.path == path {
        return true;
    }
    for child in &entry.children {
        if find_chain(child, path, chain) {
            return true;
        }
    }
    chain.pop();
    false
}

fn collect_paths<'a>(entry: &'a RouteEntry, out: &mut Vec<&'a str>) {
    out.push(&entry.path);
    for child in &entry.children {
        collect_paths(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Page(&'static str);

    impl Component for Page {
        type State = ();
        type Event = ();
        type Error = Infallible;

        fn name(&self) -> &'static str {
            self.0
        }

        fn view(&self, _state: &()) -> View {
            View::element("h1").with_text(self.0)
        }
    }

    fn page(path: &str, name: &'static str) -> RouteEntry {
        let view: ViewProducer = Arc::new(move |settings: &HostSettings| {
            Box::new(ComponentHost::spawn_with(Page(name), settings)) as Box<dyn Instance>
        });
        RouteEntry::new(path, name, view)
    }

    fn table() -> RouteTable {
        RouteTable::new(
            page("/", "Layout")
                .child(page("/about", "About"))
                .child(page("docs", "Docs").child(page("intro", "Intro"))),
        )
        .unwrap()
    }

    fn names(chain: Vec<&RouteEntry>) -> Vec<&'static str> {
        chain.into_iter().map(RouteEntry::name).collect()
    }

    #[test]
    fn test_root_resolves_to_itself() {
        assert_eq!(names(table().resolve("/").unwrap()), vec!["Layout"]);
    }

    #[test]
    fn test_child_resolves_through_layout() {
        assert_eq!(
            names(table().resolve("/about").unwrap()),
            vec!["Layout", "About"]
        );
    }

    #[test]
    fn test_relative_paths_are_joined() {
        let table = table();
        assert_eq!(table.paths(), vec!["/", "/about", "/docs", "/docs/intro"]);
        assert_eq!(
            names(table.resolve("/docs/intro").unwrap()),
            vec!["Layout", "Docs", "Intro"]
        );
    }

    #[test]
    fn test_match_is_exact() {
        let table = table();
        for path in ["/about/", "/About", "about", "/missing", ""] {
            assert_eq!(
                table.resolve(path).unwrap_err(),
                RouteError::NotFound(path.to_string())
            );
        }
    }

    #[test]
    fn test_root_must_be_slash() {
        let err = RouteTable::new(page("/home", "Home")).unwrap_err();
        assert_eq!(err, RouteTableError::InvalidRoot("/home".into()));
    }

    #[test]
    fn test_duplicate_siblings_rejected() {
        let err = RouteTable::new(
            page("/", "Layout")
                .child(page("/a", "A1"))
                .child(page("a", "A2")),
        )
        .unwrap_err();
        assert_eq!(err, RouteTableError::DuplicatePath("/a".into()));
    }

    #[test]
    fn test_component_entry_is_named_without_building() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        let entry = RouteEntry::component("/", || {
            BUILT.fetch_add(1, Ordering::SeqCst);
            Page("Layout")
        });

        assert_eq!(entry.name(), "Page");
        assert_eq!(BUILT.load(Ordering::SeqCst), 0);
    }
}
