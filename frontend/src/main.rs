mod app;
mod components;
mod services;

use crate::app::{start, Mounted};

/// Element the rendered panel is appended to; `<body>` when the page has none.
const HOST_ID: &str = "event-filter";

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        tracing::error!("No document to attach the event filter to");
        return;
    };
    let Some(root) = document.document_element() else {
        tracing::error!("Document has no root element");
        return;
    };
    let Some(host) = document
        .get_element_by_id(HOST_ID)
        .or_else(|| document.body().map(Into::into))
    else {
        tracing::error!("No element to host the event filter");
        return;
    };

    match start(&root, &host) {
        Ok(Mounted::Bound(bound)) => bound.forget(),
        // The app lives as long as the page.
        Ok(Mounted::Rendered(_app)) => {}
        Err(e) => tracing::error!("Failed to start event filter: {}", e),
    }
}

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);
