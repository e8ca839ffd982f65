//! Handlers for the server-rendered form.

use axum::{Form, extract::State, response::Html};
use resale::PropertyInputs;

use crate::server::state::AppState;
use crate::server::views::{PageContext, render_page};

/// GET / - the form with default values and the map.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let inputs = PropertyInputs::default();
    let page = render_page(&PageContext {
        inputs: &inputs,
        outcome: None,
        map: state.estimator.map_view().map_err(|e| e.to_string()),
    });
    Html(page)
}

/// POST / - predict, chart the holding trend, and re-render the form.
///
/// Failures are shown on the page; the form and map stay usable.
pub async fn submit(
    State(state): State<AppState>,
    Form(inputs): Form<PropertyInputs>,
) -> Html<String> {
    let outcome = state.estimator.estimate(&inputs).map_err(|e| e.to_string());
    let page = render_page(&PageContext {
        inputs: &inputs,
        outcome: Some(outcome),
        map: state.estimator.map_view().map_err(|e| e.to_string()),
    });
    Html(page)
}
