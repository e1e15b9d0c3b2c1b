//! Browser backend for [`Dom`], built on `web-sys`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, NodeList, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

use super::{Dom, Rect, Viewport};
use crate::core::error::{SiteError, SiteResult};

fn js_err(op: &'static str) -> impl Fn(JsValue) -> SiteError {
    move |err| SiteError::dom(op, format!("{err:?}"))
}

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn html(node: &Element, op: &'static str) -> SiteResult<HtmlElement> {
        node.dyn_ref::<HtmlElement>()
            .cloned()
            .ok_or_else(|| SiteError::dom(op, "element has no inline style"))
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector))
    }

    fn query_all_in(&self, scope: &Element, selector: &str) -> Vec<Element> {
        elements(scope.query_selector_all(selector))
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).ok().flatten()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(&**node))
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) -> SiteResult {
        node.class_list().add_1(class).map_err(js_err("add_class"))
    }

    fn remove_class(&self, node: &Element, class: &str) -> SiteResult {
        node.class_list()
            .remove_1(class)
            .map_err(js_err("remove_class"))
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&self, node: &Element, name: &str, value: &str) -> SiteResult {
        node.set_attribute(name, value).map_err(js_err("set_attr"))
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) -> SiteResult {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&self, node: &Element, html: &str) -> SiteResult {
        node.set_inner_html(html);
        Ok(())
    }

    fn style(&self, node: &Element, prop: &str) -> Option<String> {
        let value = node
            .dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value(prop)
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&self, node: &Element, prop: &str, value: &str) -> SiteResult {
        Self::html(node, "set_style")?
            .style()
            .set_property(prop, value)
            .map_err(js_err("set_style"))
    }

    fn clear_style(&self, node: &Element, prop: &str) -> SiteResult {
        Self::html(node, "clear_style")?
            .style()
            .remove_property(prop)
            .map(|_| ())
            .map_err(js_err("clear_style"))
    }

    fn computed_style(&self, node: &Element, prop: &str) -> Option<String> {
        let value = self
            .window
            .get_computed_style(node)
            .ok()
            .flatten()?
            .get_property_value(prop)
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn reset_form(&self, form: &Element) -> SiteResult {
        form.dyn_ref::<HtmlFormElement>()
            .ok_or_else(|| SiteError::dom("reset_form", "element is not a form"))?
            .reset();
        Ok(())
    }

    fn create_element(&self, tag: &str) -> SiteResult<Element> {
        self.document
            .create_element(tag)
            .map_err(js_err("create_element"))
    }

    fn append(&self, parent: &Element, child: &Element) -> SiteResult {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(js_err("append"))
    }

    fn remove(&self, node: &Element) -> SiteResult {
        node.remove();
        Ok(())
    }

    fn rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn viewport(&self) -> Viewport {
        let measure = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64());
        let fallback = Viewport::default();
        Viewport {
            width: measure(self.window.inner_width()).unwrap_or(fallback.width),
            height: measure(self.window.inner_height()).unwrap_or(fallback.height),
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to_top(&self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn title(&self) -> String {
        self.document.title()
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn notify(&self, message: &str) {
        self.window.alert_with_message(message).ok();
    }
}
