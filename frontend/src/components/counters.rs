use shared::FilterSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CountersProps {
    pub now: AttrValue,
    pub summary: FilterSummary,
}

#[function_component(Counters)]
pub fn counters(props: &CountersProps) -> Html {
    html! {
        <div class="filter-counters">
            <p class="filter-now">
                { "Now: " }
                <span id="now">{ props.now.clone() }</span>
            </p>
            <p class="filter-count">
                { "Showing " }
                <span id="showing">{ props.summary.showing }</span>
                { " of " }
                <span id="total">{ props.summary.total }</span>
                { " events" }
            </p>
        </div>
    }
}
