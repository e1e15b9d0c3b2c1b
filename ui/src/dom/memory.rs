//! In-memory document used by the test-suite.
//!
//! Nodes live in an arena and are addressed by [`MemoryNode`]. Geometry is
//! stored in document coordinates and converted to viewport coordinates on
//! read, so moving `scroll_y` moves every element the way a real page does.
//! Inner HTML assigned through [`Dom::set_inner_html`] is kept as an opaque
//! string; it is not parsed back into nodes.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use super::selector::{Selector, Subject};
use super::{Dom, Rect, Viewport};
use crate::core::error::{SiteError, SiteResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryNode(usize);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    raw_html: Option<String>,
    value: String,
    doc_rect: Rect,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Subject for NodeData {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<NodeData>,
    root: usize,
    body: usize,
    scroll_y: f64,
    viewport: Viewport,
    title: String,
    notices: Vec<String>,
    failing: HashSet<usize>,
}

impl Tree {
    fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: 0,
            body: 0,
            scroll_y: 0.0,
            viewport: Viewport::default(),
            title: String::new(),
            notices: Vec::new(),
            failing: HashSet::new(),
        };
        tree.root = tree.alloc("html");
        let head = tree.alloc("head");
        tree.attach(tree.root, head);
        tree.body = tree.alloc("body");
        tree.attach(tree.root, tree.body);
        tree
    }

    fn alloc(&mut self, tag: &str) -> usize {
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        self.nodes.len() - 1
    }

    fn detach(&mut self, node: usize) {
        if let Some(parent) = self.nodes[node].parent.take() {
            self.nodes[parent].children.retain(|child| *child != node);
        }
    }

    fn attach(&mut self, parent: usize, child: usize) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn is_attached(&self, node: usize) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            cursor = self.nodes[current].parent;
        }
        false
    }

    /// Pre-order walk of the subtree under `scope`, excluding `scope` itself.
    fn descendants(&self, scope: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[scope].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node].children.iter().rev().copied());
        }
        out
    }

    fn path(&self, node: usize) -> Vec<&NodeData> {
        let mut path = vec![&self.nodes[node]];
        let mut cursor = self.nodes[node].parent;
        while let Some(parent) = cursor {
            path.push(&self.nodes[parent]);
            cursor = self.nodes[parent].parent;
        }
        path
    }

    fn matches(&self, selector: &Selector, node: usize) -> bool {
        selector.matches_path(&self.path(node))
    }

    fn writable(&self, node: usize, op: &'static str) -> SiteResult {
        if self.failing.contains(&node) {
            Err(SiteError::dom(op, format!("node {node} rejects writes")))
        } else {
            Ok(())
        }
    }

    fn text_content(&self, node: usize) -> String {
        let data = &self.nodes[node];
        let mut out = data.text.clone();
        for child in &data.children {
            out.push_str(&self.text_content(*child));
        }
        out
    }

    fn serialize(&self, node: usize) -> String {
        let data = &self.nodes[node];
        let mut out = format!("<{}", data.tag);
        if !data.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", data.classes.join(" ")));
        }
        for (name, value) in &data.attrs {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        out.push('>');
        out.push_str(&self.inner(node));
        out.push_str(&format!("</{}>", data.tag));
        out
    }

    fn inner(&self, node: usize) -> String {
        let data = &self.nodes[node];
        if let Some(raw) = &data.raw_html {
            return raw.clone();
        }
        let mut out = data.text.clone();
        for child in &data.children {
            out.push_str(&self.serialize(*child));
        }
        out
    }
}

fn parse(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(%err, "unsupported selector");
            None
        }
    }
}

#[derive(Debug)]
pub struct MemoryDom {
    tree: RefCell<Tree>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            tree: RefCell::new(Tree::new()),
        }
    }

    /// Start building a new element appended to `parent`.
    pub fn el(&self, parent: MemoryNode, tag: &str) -> ElementBuilder<'_> {
        let node = {
            let mut tree = self.tree.borrow_mut();
            let node = tree.alloc(tag);
            tree.attach(parent.0, node);
            node
        };
        ElementBuilder {
            dom: self,
            node: MemoryNode(node),
        }
    }

    pub fn body_node(&self) -> MemoryNode {
        MemoryNode(self.tree.borrow().body)
    }

    pub fn head_node(&self) -> MemoryNode {
        let tree = self.tree.borrow();
        MemoryNode(tree.nodes[tree.root].children[0])
    }

    pub fn set_value(&self, node: &MemoryNode, value: &str) {
        self.tree.borrow_mut().nodes[node.0].value = value.to_string();
    }

    /// Place `node` in document coordinates.
    pub fn set_rect(&self, node: &MemoryNode, rect: Rect) {
        self.tree.borrow_mut().nodes[node.0].doc_rect = rect;
    }

    pub fn scroll_to(&self, y: f64) {
        self.tree.borrow_mut().scroll_y = y.max(0.0);
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.tree.borrow_mut().viewport = viewport;
    }

    /// Every later write to `node` fails, to exercise fault boundaries.
    pub fn fail_writes(&self, node: &MemoryNode) {
        self.tree.borrow_mut().failing.insert(node.0);
    }

    pub fn notifications(&self) -> Vec<String> {
        self.tree.borrow().notices.clone()
    }

    pub fn is_attached(&self, node: &MemoryNode) -> bool {
        self.tree.borrow().is_attached(node.0)
    }
}

pub struct ElementBuilder<'a> {
    dom: &'a MemoryDom,
    node: MemoryNode,
}

impl ElementBuilder<'_> {
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, classes: &str) -> Self {
        {
            let mut tree = self.dom.tree.borrow_mut();
            let data = &mut tree.nodes[self.node.0];
            for class in classes.split_whitespace() {
                if !data.classes.iter().any(|c| c == class) {
                    data.classes.push(class.to_string());
                }
            }
        }
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.dom.tree.borrow_mut().nodes[self.node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.dom.tree.borrow_mut().nodes[self.node.0].text = text.to_string();
        self
    }

    pub fn rect(self, rect: Rect) -> Self {
        self.dom.set_rect(&self.node, rect);
        self
    }

    pub fn node(self) -> MemoryNode {
        self.node
    }
}

impl Dom for MemoryDom {
    type Node = MemoryNode;

    fn by_id(&self, id: &str) -> Option<MemoryNode> {
        let tree = self.tree.borrow();
        tree.descendants(tree.root)
            .into_iter()
            .find(|node| tree.nodes[*node].attr("id") == Some(id))
            .map(MemoryNode)
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryNode> {
        let root = MemoryNode(self.tree.borrow().root);
        self.query_all_in(&root, selector)
    }

    fn query_all_in(&self, scope: &MemoryNode, selector: &str) -> Vec<MemoryNode> {
        let Some(selector) = parse(selector) else {
            return Vec::new();
        };
        let tree = self.tree.borrow();
        tree.descendants(scope.0)
            .into_iter()
            .filter(|node| tree.matches(&selector, *node))
            .map(MemoryNode)
            .collect()
    }

    fn closest(&self, node: &MemoryNode, selector: &str) -> Option<MemoryNode> {
        let selector = parse(selector)?;
        let tree = self.tree.borrow();
        let mut cursor = Some(node.0);
        while let Some(current) = cursor {
            if tree.matches(&selector, current) {
                return Some(MemoryNode(current));
            }
            cursor = tree.nodes[current].parent;
        }
        None
    }

    fn contains(&self, ancestor: &MemoryNode, node: &MemoryNode) -> bool {
        let tree = self.tree.borrow();
        let mut cursor = Some(node.0);
        while let Some(current) = cursor {
            if current == ancestor.0 {
                return true;
            }
            cursor = tree.nodes[current].parent;
        }
        false
    }

    fn body(&self) -> Option<MemoryNode> {
        Some(self.body_node())
    }

    fn root(&self) -> Option<MemoryNode> {
        Some(MemoryNode(self.tree.borrow().root))
    }

    fn has_class(&self, node: &MemoryNode, class: &str) -> bool {
        self.tree.borrow().nodes[node.0].has_class(class)
    }

    fn add_class(&self, node: &MemoryNode, class: &str) -> SiteResult {
        let mut tree = self.tree.borrow_mut();
        tree.writable(node.0, "add_class")?;
        let data = &mut tree.nodes[node.0];
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, node: &MemoryNode, class: &str) -> SiteResult {
        let mut tree = self.tree.borrow_mut();
        tree.writable(node.0, "remove_class")?;
        tree.nodes[node.0].classes.retain(|c| c != class);
        Ok(())
    }

    fn attr(&self, node: &MemoryNode, name: &str) -> Option<String> {
        self.tree.borrow().nodes[node.0].attrs.get(name).cloned()
    }

    fn set_attr(&self, node: &MemoryNode, name: &str, value: &str) -> SiteResult {
        let mut tree = self.tree.borrow_mut();
        tree.writable(node.0, "set_attr")?;
        tree.nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn text(&self, node: &MemoryNode) -> String {
        self.tree.borrow().text_content(node.0)
    }

    fn set_text(&self, node: &MemoryNode, text: &str) -> SiteResult {
        let mut tree = self.tree.borrow_mut();
        tree.writable(node.0, "set_text")?;
        for child in tree.nodes[node.0].children.clone() {
            tree.detach(child);
        }
        let data = &mut tree.nodes[node.0];
        data.raw_html = None;
        data.text = text.to_string();
        Ok(())
    }

    fn inner_html(&self, node: &MemoryNode) -> String {
        self.tree.borrow().inner(node.0)
    }

    fn set_inner_html(&self, node: &MemoryNode, html: &str) -> SiteResult {
        let mut tree = self.tree.borrow_mut();
        tree.writable(node.0, "set_inner_html")?;
        for child in tree.nodes[node.0].children.clone() {
            tree.detach(child);
        }
        let data = &mut tree.nodes[node.0];
        data.text.clear();
        data.raw_html = Some(html.to_string());
        Ok(())
    }

    fn style(&self, node: &MemoryNode, prop: &str) -> Option<String> {
        self.tree.borrow().nodes[node.0].styles.get(prop).cloned()
    }

    fn set_style(&self, node: &MemoryNode, prop: &str, value: &str) -> SiteResult {
        let mut tree = self.tree.borrow_mut();
        tree.writable(node.0, "set_style")?;
        tree.nodes[node.0]
            .styles
            .insert(prop.to_string(), value.to_string());
        Ok(())
    }

    fn clear_style(&self, node: &MemoryNode, prop: &str) -> SiteResult {
        let mut tree = self.tree.borrow_mut();
        tree.writable(node.0, "clear_style")?;
        tree.nodes[node.0].styles.remove(prop);
        Ok(())
    }

    fn value(&self, node: &MemoryNode) -> String {
        self.tree.borrow().nodes[node.0].value.clone()
    }

    fn reset_form(&self, form: &MemoryNode) -> SiteResult {
        let mut tree = self.tree.borrow_mut();
        tree.writable(form.0, "reset_form")?;
        for node in tree.descendants(form.0) {
            let data = &mut tree.nodes[node];
            if matches!(data.tag.as_str(), "input" | "select" | "textarea") {
                data.value = data.attrs.get("value").cloned().unwrap_or_default();
            }
        }
        Ok(())
    }

    fn create_element(&self, tag: &str) -> SiteResult<MemoryNode> {
        Ok(MemoryNode(self.tree.borrow_mut().alloc(tag)))
    }

    fn append(&self, parent: &MemoryNode, child: &MemoryNode) -> SiteResult {
        let mut tree = self.tree.borrow_mut();
        tree.writable(parent.0, "append")?;
        tree.attach(parent.0, child.0);
        Ok(())
    }

    fn remove(&self, node: &MemoryNode) -> SiteResult {
        self.tree.borrow_mut().detach(node.0);
        Ok(())
    }

    fn rect(&self, node: &MemoryNode) -> Rect {
        let tree = self.tree.borrow();
        let doc = tree.nodes[node.0].doc_rect;
        Rect {
            top: doc.top - tree.scroll_y,
            ..doc
        }
    }

    fn viewport(&self) -> Viewport {
        self.tree.borrow().viewport
    }

    fn scroll_y(&self) -> f64 {
        self.tree.borrow().scroll_y
    }

    fn scroll_to_top(&self) {
        self.tree.borrow_mut().scroll_y = 0.0;
    }

    fn scroll_into_view(&self, node: &MemoryNode) {
        let mut tree = self.tree.borrow_mut();
        tree.scroll_y = tree.nodes[node.0].doc_rect.top.max(0.0);
    }

    fn title(&self) -> String {
        self.tree.borrow().title.clone()
    }

    fn set_title(&self, title: &str) {
        self.tree.borrow_mut().title = title.to_string();
    }

    fn notify(&self, message: &str) {
        self.tree.borrow_mut().notices.push(message.to_string());
    }
}
