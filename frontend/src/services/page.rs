use std::rc::Rc;

use shared::{EventCard, Visibility};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub const CARD_CLASS: &str = "card";
pub const LANGUAGE_CLASS: &str = "language";
pub const LANGUAGE_ATTR: &str = "language";
pub const TIME_TAG: &str = "time";
pub const DATETIME_ATTR: &str = "datetime";

/// The event cards rendered on the page, read once at startup.
///
/// Cloning is cheap; clones share the same card list and compare equal.
#[derive(Clone)]
pub struct Page {
    elements: Rc<Vec<HtmlElement>>,
    events: Rc<Vec<EventCard>>,
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.elements, &other.elements)
    }
}

impl Page {
    /// Collect every `.card` below `root`, in document order.
    pub fn scan(root: &Element) -> Self {
        let found = root.get_elements_by_class_name(CARD_CLASS);
        let mut elements = Vec::new();
        let mut events = Vec::new();

        for element in (0..found.length()).filter_map(|i| found.item(i)) {
            let event = read_card(&element);
            match element.dyn_into::<HtmlElement>() {
                Ok(element) => {
                    elements.push(element);
                    events.push(event);
                }
                Err(_) => tracing::warn!("Skipping card that is not an HTML element"),
            }
        }

        tracing::debug!("Found {} event cards", events.len());
        Self {
            elements: Rc::new(elements),
            events: Rc::new(events),
        }
    }

    pub fn events(&self) -> &[EventCard] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Show or hide each card according to its decision.
    pub fn apply(&self, decisions: &[Visibility]) {
        for (element, decision) in self.elements.iter().zip(decisions) {
            let display = if decision.is_visible() { "block" } else { "none" };
            if let Err(e) = element.style().set_property("display", display) {
                tracing::warn!("Failed to set card display: {:?}", e);
            }
        }
    }
}

fn read_card(card: &Element) -> EventCard {
    let language = card
        .get_elements_by_class_name(LANGUAGE_CLASS)
        .item(0)
        .and_then(|el| el.get_attribute(LANGUAGE_ATTR));
    let datetime = card
        .get_elements_by_tag_name(TIME_TAG)
        .item(0)
        .and_then(|el| el.get_attribute(DATETIME_ATTR));

    let event = EventCard::from_attributes(language.as_deref(), datetime.as_deref());
    if event.start.is_none() {
        tracing::warn!("Card has no usable timestamp: {:?}", datetime);
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::HideReason;
    use wasm_bindgen_test::*;

    fn fixture(html: &str) -> Element {
        let document = gloo::utils::document();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    const CARDS: &str = r#"
        <div class="card">
            <span class="language" language="Rust"></span>
            <time datetime="2026-10-19T10:00:00+02:00">Oct 19</time>
        </div>
        <div class="card">
            <span class="language" language="Python"></span>
            <time datetime="2026-10-20T18:30:00+02:00">Oct 20</time>
        </div>
        <div class="card">
            <time datetime="not a date">TBD</time>
        </div>
    "#;

    #[wasm_bindgen_test]
    fn test_scan_reads_cards_in_order() {
        let root = fixture(CARDS);
        let page = Page::scan(&root);

        assert_eq!(page.len(), 3);
        let events = page.events();
        assert_eq!(events[0].language, "Rust");
        assert!(events[0].start.is_some());
        assert_eq!(events[1].language, "Python");
        assert_eq!(events[2].language, "");
        assert!(events[2].start.is_none());

        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_apply_sets_display() {
        let root = fixture(CARDS);
        let page = Page::scan(&root);

        page.apply(&[
            Visibility::Shown,
            Visibility::Hidden(HideReason::Language),
            Visibility::Hidden(HideReason::InvalidTimestamp),
        ]);

        let displays: Vec<String> = page
            .elements
            .iter()
            .map(|el| el.style().get_property_value("display").unwrap())
            .collect();
        assert_eq!(displays, vec!["block", "none", "none"]);

        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_clones_compare_equal() {
        let root = fixture(CARDS);
        let page = Page::scan(&root);
        assert!(page == page.clone());
        assert!(page != Page::scan(&root));
        root.remove();
    }
}
