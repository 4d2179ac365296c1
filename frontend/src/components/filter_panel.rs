use shared::{Control, FilterConfig};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FilterPanelProps {
    pub config: FilterConfig,
    /// Selector options, `All` first.
    pub languages: Vec<String>,
    /// The config after an accepted control change.
    pub on_change: Callback<FilterConfig>,
}

/// Apply a control's new text to `config`. A rejected value is put back to the
/// one in use, since the rendered value has not changed and nothing re-renders.
fn accept(
    config: &FilterConfig,
    control: Control,
    raw: &str,
    reset: impl FnOnce(&str),
) -> Option<FilterConfig> {
    match config.with_control(control, raw) {
        Ok(next) => Some(next),
        Err(e) => {
            tracing::warn!("Ignoring {} change: {}", control.id(), e);
            reset(&config.control_value(control));
            None
        }
    }
}

#[function_component(FilterPanel)]
pub fn filter_panel(props: &FilterPanelProps) -> Html {
    let config = &props.config;

    let number_changed = |control: Control| {
        let on_change = props.on_change.clone();
        let config = props.config.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(next) = accept(&config, control, &input.value(), |v| input.set_value(v)) {
                on_change.emit(next);
            }
        })
    };

    let language_changed = {
        let on_change = props.on_change.clone();
        let config = props.config.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let raw = select.value();
            if let Some(next) = accept(&config, Control::Language, &raw, |v| select.set_value(v)) {
                on_change.emit(next);
            }
        })
    };

    html! {
        <div class="filter-panel">
            <label for={Control::Days.id()}>{ "Days ahead" }</label>
            <input
                id={Control::Days.id()}
                type="number"
                min="0"
                value={config.days.to_string()}
                onchange={number_changed(Control::Days)}
            />
            <label for={Control::Start.id()}>{ "From hour" }</label>
            <input
                id={Control::Start.id()}
                type="number"
                min="0"
                max="23"
                value={config.start_hour.to_string()}
                onchange={number_changed(Control::Start)}
            />
            <label for={Control::End.id()}>{ "To hour" }</label>
            <input
                id={Control::End.id()}
                type="number"
                min="0"
                max="23"
                value={config.end_hour.to_string()}
                onchange={number_changed(Control::End)}
            />
            <label for={Control::Language.id()}>{ "Language" }</label>
            <select id={Control::Language.id()} onchange={language_changed}>
                { for props.languages.iter().map(|language| html! {
                    <option value={language.clone()} selected={*language == config.language}>
                        { language.clone() }
                    </option>
                })}
            </select>
        </div>
    }
}
