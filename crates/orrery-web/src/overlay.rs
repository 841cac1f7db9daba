//! Applies engine `OverlayState` to the page DOM.

use orrery_engine::OverlayState;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// One absolutely-positioned element per engine label, created on demand
/// and reused across config reloads.
#[derive(Default)]
pub struct DomOverlay {
    labels: Vec<(HtmlElement, String)>,
}

impl DomOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push pending text updates and label positions into the document.
    pub fn sync(&mut self, overlay: &mut OverlayState) -> Result<(), JsValue> {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Ok(());
        };

        for (element_id, text) in overlay.take_text_updates() {
            match document.get_element_by_id(&element_id) {
                Some(el) => el.set_text_content(Some(&text)),
                None => log::warn!("overlay: no element #{element_id}"),
            }
        }

        for (i, label) in overlay.labels().iter().enumerate() {
            if i == self.labels.len() {
                let el = create_label(&document, &label.class)?;
                self.labels.push((el, String::new()));
            }
            let (el, shown) = &mut self.labels[i];
            if *shown != label.text {
                el.set_text_content(Some(&label.text));
                *shown = label.text.clone();
            }
            el.set_class_name(&label.class);

            let style = el.style();
            match label.screen_pos {
                Some(pos) => {
                    style.set_property("display", "block")?;
                    style.set_property("left", &format!("{}px", pos.x))?;
                    style.set_property("top", &format!("{}px", pos.y))?;
                }
                None => style.set_property("display", "none")?,
            }
        }

        for (el, _) in self.labels.iter().skip(overlay.labels().len()) {
            el.style().set_property("display", "none")?;
        }
        Ok(())
    }
}

fn create_label(document: &Document, class: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = document.create_element("div")?.dyn_into()?;
    el.set_class_name(class);

    let style = el.style();
    style.set_property("position", "absolute")?;
    style.set_property("color", "white")?;
    style.set_property("font-family", "Arial")?;
    style.set_property("font-size", "14px")?;
    style.set_property("pointer-events", "none")?;

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&el)?;
    Ok(el)
}
