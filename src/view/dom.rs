use glam::DVec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::view::BadgeStyles;

/// The badge root and the optional child nodes it animates.
pub struct BadgeElements {
    pub root: HtmlElement,
    card: Option<HtmlElement>,
    string: Option<HtmlElement>,
    shadow: Option<HtmlElement>,
}

impl BadgeElements {
    pub fn new(root: HtmlElement) -> Result<Self, JsValue> {
        let card = find_child(&root, ".hb-card")?;
        let string = find_child(&root, ".hb-string")?;
        let shadow = find_child(&root, ".hb-shadow")?;
        if card.is_none() || string.is_none() || shadow.is_none() {
            tracing::warn!("badge is missing some of .hb-card/.hb-string/.hb-shadow; only the root will swing fully");
        }
        Ok(Self { root, card, string, shadow })
    }

    /// Top-centre of the root's bounding box in client coordinates.
    pub fn anchor(&self) -> DVec2 {
        let rect = self.root.get_bounding_client_rect();
        DVec2::new(rect.left() + rect.width() / 2.0, rect.top())
    }

    pub fn apply(&self, styles: &BadgeStyles) -> Result<(), JsValue> {
        let root = self.root.style();
        root.set_property("--rope", &styles.rope)?;
        root.set_property("transform-origin", &styles.transform_origin)?;
        root.set_property("transform", &styles.root_transform)?;

        if let Some(string) = &self.string {
            string.style().set_property("transform", &styles.string_transform)?;
        }
        if let Some(card) = &self.card {
            card.style().set_property("transform", &styles.card_transform)?;
        }
        if let Some(shadow) = &self.shadow {
            let style = shadow.style();
            style.set_property("transform", &styles.shadow_transform)?;
            style.set_property("opacity", &styles.shadow_opacity)?;
        }
        Ok(())
    }
}

fn find_child(root: &HtmlElement, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(root
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}
