use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, FixedOffset, Local};
use gloo::events::EventListener;
use shared::{compute_visibility, Control, FilterConfig, FilterSummary};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlInputElement, HtmlSelectElement};

use crate::services::localize::format_long;
use crate::services::page::Page;
use crate::services::storage::ConfigStore;

/// Current instant together with the viewer's UTC offset.
pub fn viewer_now() -> DateTime<FixedOffset> {
    Local::now().into()
}

/// Result of one filter pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub summary: FilterSummary,
    pub now_label: String,
}

/// Persist `config`, recompute visibility and apply it to the cards.
pub fn refresh(page: &Page, config: &FilterConfig) -> Refresh {
    let now = viewer_now();
    ConfigStore::save(config);

    let decisions = compute_visibility(page.events(), config, &now);
    page.apply(&decisions);

    Refresh {
        summary: FilterSummary::from_decisions(&decisions),
        now_label: format_long(&now).unwrap_or_else(|| now.to_rfc2822()),
    }
}

/// The `#now`, `#total` and `#showing` elements the page already carries.
#[derive(Clone, Default, PartialEq)]
pub struct PageCounters {
    now: Option<Element>,
    total: Option<Element>,
    showing: Option<Element>,
}

impl PageCounters {
    pub fn find(document: &Document) -> Self {
        Self {
            now: document.get_element_by_id("now"),
            total: document.get_element_by_id("total"),
            showing: document.get_element_by_id("showing"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.now.is_none() && self.total.is_none() && self.showing.is_none()
    }

    pub fn show(&self, refresh: &Refresh) {
        let texts = [
            (&self.now, refresh.now_label.clone()),
            (&self.total, refresh.summary.total.to_string()),
            (&self.showing, refresh.summary.showing.to_string()),
        ];
        for (element, text) in texts {
            if let Some(element) = element {
                element.set_text_content(Some(&text));
            }
        }
    }
}

/// Filter controls the page renders itself.
pub struct PageControls {
    days: HtmlInputElement,
    start: HtmlInputElement,
    end: HtmlInputElement,
    language: HtmlSelectElement,
}

impl PageControls {
    /// All four controls, or `None` when the page lacks any of them.
    pub fn find(document: &Document) -> Option<Self> {
        Some(Self {
            days: by_id(document, Control::Days)?,
            start: by_id(document, Control::Start)?,
            end: by_id(document, Control::End)?,
            language: by_id(document, Control::Language)?,
        })
    }

    /// Append one `<option>` per selector entry.
    pub fn fill_languages(&self, document: &Document, options: &[String]) {
        for language in options {
            let option = match document.create_element("option") {
                Ok(option) => option,
                Err(e) => {
                    tracing::warn!("Failed to create language option: {:?}", e);
                    continue;
                }
            };
            if let Err(e) = option.set_attribute("value", language) {
                tracing::warn!("Failed to set language option value: {:?}", e);
            }
            option.set_text_content(Some(language));
            if let Err(e) = self.language.append_child(&option) {
                tracing::warn!("Failed to add language option: {:?}", e);
            }
        }
    }

    fn value(&self, control: Control) -> String {
        match control {
            Control::Days => self.days.value(),
            Control::Start => self.start.value(),
            Control::End => self.end.value(),
            Control::Language => self.language.value(),
        }
    }

    fn set_value(&self, control: Control, value: &str) {
        match control {
            Control::Days => self.days.set_value(value),
            Control::Start => self.start.set_value(value),
            Control::End => self.end.set_value(value),
            Control::Language => self.language.set_value(value),
        }
    }

    fn target(&self, control: Control) -> &EventTarget {
        match control {
            Control::Days => &self.days,
            Control::Start => &self.start,
            Control::End => &self.end,
            Control::Language => &self.language,
        }
    }

    /// Show `initial`, run the first pass and re-run on every `change`.
    pub fn bind(self, page: Page, counters: PageCounters, initial: FilterConfig) -> BoundFilter {
        let state = Rc::new(BoundState {
            controls: self,
            page,
            counters,
            config: RefCell::new(initial),
        });

        for control in Control::ALL {
            let value = state.config.borrow().control_value(control);
            state.controls.set_value(control, &value);
        }
        state.refresh();

        let listeners = Control::ALL
            .into_iter()
            .map(|control| {
                let listener_state = state.clone();
                EventListener::new(state.controls.target(control), "change", move |_| {
                    listener_state.changed(control)
                })
            })
            .collect();

        BoundFilter {
            state,
            listeners,
        }
    }
}

fn by_id<T: JsCast>(document: &Document, control: Control) -> Option<T> {
    document.get_element_by_id(control.id())?.dyn_into().ok()
}

struct BoundState {
    controls: PageControls,
    page: Page,
    counters: PageCounters,
    config: RefCell<FilterConfig>,
}

impl BoundState {
    fn refresh(&self) {
        let refresh = refresh(&self.page, &self.config.borrow());
        self.counters.show(&refresh);
    }

    fn changed(&self, control: Control) {
        let raw = self.controls.value(control);
        let next = self.config.borrow().with_control(control, &raw);
        match next {
            Ok(next) => {
                *self.config.borrow_mut() = next;
                self.refresh();
            }
            Err(e) => {
                tracing::warn!("Ignoring {} change: {}", control.id(), e);
                let current = self.config.borrow().control_value(control);
                self.controls.set_value(control, &current);
            }
        }
    }
}

/// Page controls wired to the filter; dropping it detaches the listeners.
pub struct BoundFilter {
    state: Rc<BoundState>,
    listeners: Vec<EventListener>,
}

impl BoundFilter {
    pub fn config(&self) -> FilterConfig {
        self.state.config.borrow().clone()
    }

    /// Keep the listeners attached for the lifetime of the page.
    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }
}
