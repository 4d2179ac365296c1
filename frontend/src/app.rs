use shared::{FilterConfig, FilterSummary, LanguageCatalog};
use web_sys::Element;
use yew::prelude::*;
use yew::AppHandle;

use crate::components::counters::Counters;
use crate::components::filter_panel::FilterPanel;
use crate::services::controls::{refresh, BoundFilter, PageControls, PageCounters};
use crate::services::localize::localize_timestamps;
use crate::services::page::Page;
use crate::services::storage::ConfigStore;

/// Class of the element the rendered panel is mounted into.
pub const MOUNT_CLASS: &str = "event-filter-mount";

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub page: Page,
    pub catalog: LanguageCatalog,
    pub counters: PageCounters,
    pub initial: FilterConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = use_state(|| props.initial.clone());
    let summary = use_state(FilterSummary::default);
    let now_label = use_state(AttrValue::default);

    // Every config change: persist, recompute, apply to the cards, refresh counters.
    {
        let page = props.page.clone();
        let counters = props.counters.clone();
        let summary = summary.clone();
        let now_label = now_label.clone();

        use_effect_with((*config).clone(), move |config| {
            let refresh = refresh(&page, config);
            counters.show(&refresh);
            summary.set(refresh.summary);
            now_label.set(refresh.now_label.into());
            || ()
        });
    }

    let on_change = {
        let config = config.clone();
        Callback::from(move |next: FilterConfig| config.set(next))
    };

    html! {
        <div class="event-filter">
            <FilterPanel
                config={(*config).clone()}
                languages={props.catalog.options()}
                on_change={on_change}
            />
            if props.counters.is_empty() {
                <Counters now={(*now_label).clone()} summary={*summary} />
            }
        </div>
    }
}

/// How the filter ended up attached to the page.
pub enum Mounted {
    /// The page brought its own controls.
    Bound(BoundFilter),
    /// The panel was rendered into a fresh element.
    Rendered(AppHandle<App>),
}

/// Wire the filter to the cards below `root`.
///
/// Controls already on the page are bound in place. Otherwise the panel is
/// rendered into a new element appended to `host`; `host` itself is never
/// used as the mount root, so its content survives.
pub fn start(root: &Element, host: &Element) -> Result<Mounted, String> {
    let document = root
        .owner_document()
        .ok_or_else(|| "Root element is not attached to a document".to_string())?;

    let page = Page::scan(root);
    if page.is_empty() {
        tracing::info!("No event cards on this page");
    }

    let catalog = LanguageCatalog::from_cards(page.events());
    for language in catalog.languages() {
        tracing::debug!("{}: {} events", language, catalog.count(language));
    }

    let localized = localize_timestamps(root);
    tracing::debug!("Localized {} timestamps", localized);

    let initial = ConfigStore::load().reconciled(&catalog);
    tracing::info!(
        "Filtering {} events in {} languages",
        page.len(),
        catalog.len()
    );

    let counters = PageCounters::find(&document);

    if let Some(controls) = PageControls::find(&document) {
        controls.fill_languages(&document, &catalog.options());
        let bound = controls.bind(page, counters, initial);
        tracing::info!("Bound to the page's controls with {:?}", bound.config());
        return Ok(Mounted::Bound(bound));
    }

    let mount = document
        .create_element("div")
        .map_err(|e| format!("Failed to create mount element: {:?}", e))?;
    mount.set_class_name(MOUNT_CLASS);
    host.append_child(&mount)
        .map_err(|e| format!("Failed to attach mount element: {:?}", e))?;

    let props = AppProps {
        page,
        catalog,
        counters,
        initial,
    };
    Ok(Mounted::Rendered(
        yew::Renderer::<App>::with_root_and_props(mount, props).render(),
    ))
}
