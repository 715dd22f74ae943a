//! Browser side of the form: a structural scan over the live DOM and
//! client-side file saving.

use wasm_bindgen::JsCast;
use web_sys::{Blob, Element, HtmlAnchorElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, Url};

use crate::error::ControllerError;
use crate::form::{FieldReader, FormSource, ENTRY_CLASS};

/// Field lookups scoped to one element.
#[derive(Debug, Clone)]
pub struct DomScope {
    root: Element,
}

impl DomScope {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.root.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl FieldReader for DomScope {
    fn value(&self, name: &str) -> Option<String> {
        self.root
            .query_selector(&name_selector(name))
            .ok()
            .flatten()
            .and_then(|el| control_value(&el))
    }

    fn values(&self, name: &str) -> Vec<String> {
        self.select_all(&name_selector(name))
            .iter()
            .filter_map(control_value)
            .collect()
    }
}

/// The resume form as seen by the aggregator.
#[derive(Debug, Clone)]
pub struct DomForm {
    scope: DomScope,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self {
            scope: DomScope::new(form.into()),
        }
    }
}

impl FieldReader for DomForm {
    fn value(&self, name: &str) -> Option<String> {
        self.scope.value(name)
    }

    fn values(&self, name: &str) -> Vec<String> {
        self.scope.values(name)
    }
}

impl FormSource for DomForm {
    type Block = DomScope;

    fn section(&self, id: &str) -> Option<DomScope> {
        self.scope
            .root
            .query_selector(&format!("#{}", id))
            .ok()
            .flatten()
            .map(DomScope::new)
    }

    fn blocks(&self, container_id: &str) -> Vec<DomScope> {
        self.scope
            .select_all(&format!("#{} .{}", container_id, ENTRY_CLASS))
            .into_iter()
            .map(DomScope::new)
            .collect()
    }
}

fn name_selector(name: &str) -> String {
    format!("[name='{}']", name)
}

fn control_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
}

/// Save a blob through a temporary object URL and anchor click.
pub fn save_blob(blob: &Blob, filename: &str) -> Result<(), ControllerError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ControllerError::Browser("no document available".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| ControllerError::Browser("document has no body".to_string()))?;

    let url = Url::create_object_url_with_blob(blob).map_err(ControllerError::from_js)?;
    let anchor = document
        .create_element("a")
        .map_err(ControllerError::from_js)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| ControllerError::Browser("could not create download link".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let clicked = body.append_child(&anchor).map(|_| anchor.click());
    anchor.remove();
    let _ = Url::revoke_object_url(&url);

    clicked.map_err(ControllerError::from_js)
}
