//! Server-rendered HTML for the estimation form.

use std::fmt::Write;

use resale::bounds::{self, NumericBounds};
use resale::markup::escape_html;
use resale::{CategoryKind, Estimate, MapView, PropertyInputs, SweepSeries};

use crate::fmt::format_price;

/// What a single page render shows.
pub struct PageContext<'a> {
    /// Values to pre-fill the form with.
    pub inputs: &'a PropertyInputs,
    /// Prediction outcome, present after the form was submitted.
    pub outcome: Option<Result<Estimate, String>>,
    /// Map view, or the reason it could not be built.
    pub map: Result<MapView, String>,
}

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 88.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 48.0;

/// Render the full page.
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut body = String::new();

    body.push_str(
        r#"<h1>🏢 Singapore Flat Resale Price Prediction 🦁</h1>
<h2>Introduction</h2>
<p>Estimate the resale price of an HDB flat from its location, size and lease details,
using a model trained on historical resale transactions.</p>
<h3>📊 Predict the resale price using the below factors</h3>
"#,
    );

    body.push_str(&render_form(ctx.inputs));

    match &ctx.outcome {
        Some(Ok(estimate)) => body.push_str(&render_estimate(estimate)),
        Some(Err(message)) => body.push_str(&render_error("Prediction failed", message)),
        None => {}
    }

    body.push_str(&render_map(&ctx.map));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Singapore Flat Resale Price Prediction</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<link rel="stylesheet" href="/assets/style.css">
</head>
<body>
<main>
{body}
</main>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="/assets/map.js"></script>
</body>
</html>
"#
    )
}

fn render_form(inputs: &PropertyInputs) -> String {
    let mut html = String::from(r#"<form method="post" action="/" class="estimate-form">"#);
    html.push('\n');

    html.push_str(&select_field("Town", "town", CategoryKind::Town, &inputs.town));
    html.push_str(&select_field(
        "Storey Range",
        "storey_range",
        CategoryKind::StoreyRange,
        &inputs.storey_range,
    ));
    html.push_str(&price_slider(inputs.price_per_sqm));
    html.push_str(&select_field(
        "Flat Type",
        "flat_type",
        CategoryKind::FlatType,
        &inputs.flat_type,
    ));
    html.push_str(&select_field(
        "Flat Model",
        "flat_model",
        CategoryKind::FlatModel,
        &inputs.flat_model,
    ));

    let area = bounds::FLOOR_AREA_SQM;
    let _ = writeln!(
        html,
        r#"<label>Floor Area (sqm)<input type="number" name="floor_area_sqm" min="{:.1}" max="{:.1}" step="0.01" value="{}" required></label>"#,
        area.min, area.max, inputs.floor_area_sqm
    );

    html.push_str(&integer_field(
        "Age of Property (Years)",
        "age_of_property",
        bounds::AGE_OF_PROPERTY,
        inputs.age_of_property,
    ));
    html.push_str(&integer_field(
        "Lease Commencement Year",
        "lease_commence_date",
        bounds::LEASE_COMMENCE_DATE,
        inputs.lease_commence_date,
    ));
    html.push_str(&integer_field(
        "Current Remaining Lease (Years)",
        "current_remaining_lease",
        bounds::CURRENT_REMAINING_LEASE,
        inputs.current_remaining_lease,
    ));
    html.push_str(&integer_field(
        "Remaining Lease (Years)",
        "remaining_lease",
        bounds::REMAINING_LEASE,
        inputs.remaining_lease,
    ));
    html.push_str(&integer_field(
        "Years Holding (Years)",
        "years_holding",
        bounds::YEARS_HOLDING,
        inputs.years_holding,
    ));

    html.push_str("<button type=\"submit\">Predict</button>\n</form>\n");
    html
}

fn select_field(label: &str, name: &str, kind: CategoryKind, selected: &str) -> String {
    let mut html = format!("<label>{label}<select name=\"{name}\">");
    for option in kind.labels() {
        let escaped = escape_html(option);
        let marker = if *option == selected { " selected" } else { "" };
        let _ = write!(html, "<option value=\"{escaped}\"{marker}>{escaped}</option>");
    }
    html.push_str("</select></label>\n");
    html
}

fn integer_field(label: &str, name: &str, bounds: NumericBounds<u32>, value: u32) -> String {
    format!(
        "<label>{label}<input type=\"number\" name=\"{name}\" min=\"{}\" max=\"{}\" step=\"1\" value=\"{value}\" required></label>\n",
        bounds.min, bounds.max
    )
}

fn price_slider(value: u32) -> String {
    let options = bounds::price_per_sqm_options();
    let max = options.last().copied().unwrap_or(bounds::PRICE_PER_SQM_MIN);
    format!(
        "<label>Price per Square Meter <output id=\"price-per-sqm-value\">{value}</output>\
         <input type=\"range\" name=\"price_per_sqm\" id=\"price-per-sqm\" min=\"{}\" max=\"{max}\" step=\"{}\" value=\"{value}\"></label>\n",
        bounds::PRICE_PER_SQM_MIN,
        bounds::PRICE_PER_SQM_STEP
    )
}

fn render_estimate(estimate: &Estimate) -> String {
    format!(
        "<section class=\"result\">\n<h3>Predicted Resale Price: {}</h3>\n\
         <h2>Additional Visualizations</h2>\n{}</section>\n",
        format_price(estimate.predicted_price),
        render_chart(&estimate.series)
    )
}

fn render_error(title: &str, message: &str) -> String {
    format!(
        "<div class=\"error\" role=\"alert\"><strong>{}</strong>: {}</div>\n",
        escape_html(title),
        escape_html(message)
    )
}

fn render_map(map: &Result<MapView, String>) -> String {
    match map {
        Ok(view) => {
            let data = serde_json::to_string(view)
                .unwrap_or_else(|_| "null".to_string())
                .replace("</", "<\\/");
            format!(
                "<section class=\"map\">\n<div id=\"map\"></div>\n\
                 <script type=\"application/json\" id=\"map-data\">{data}</script>\n</section>\n"
            )
        }
        Err(message) => format!(
            "<section class=\"map\">\n{}</section>\n",
            render_error("Map unavailable", message)
        ),
    }
}

/// Scatter chart of predicted price against years of holding, as inline SVG.
pub fn render_chart(series: &SweepSeries) -> String {
    let Some((lo, hi)) = series.price_range() else {
        return "<p>No trend data.</p>\n".to_string();
    };
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 1.0, hi + 1.0) };

    let first_year = series.points.first().map_or(0, |p| p.years_holding);
    let last_year = series.points.last().map_or(0, |p| p.years_holding);
    let year_span = f64::from(last_year.saturating_sub(first_year).max(1));

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x_of = |years: u32| MARGIN_LEFT + f64::from(years - first_year) / year_span * plot_width;
    let y_of = |price: f64| MARGIN_TOP + (hi - price) / (hi - lo) * plot_height;

    let mut svg = format!(
        "<svg class=\"chart\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" role=\"img\" \
         aria-label=\"Predicted resale price by years holding\">\n"
    );

    let axis_y = MARGIN_TOP + plot_height;
    let _ = writeln!(
        svg,
        "<line class=\"axis\" x1=\"{MARGIN_LEFT}\" y1=\"{axis_y}\" x2=\"{}\" y2=\"{axis_y}\"/>",
        MARGIN_LEFT + plot_width
    );
    let _ = writeln!(
        svg,
        "<line class=\"axis\" x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{axis_y}\"/>"
    );

    for years in (first_year..=last_year).filter(|y| y % 10 == 0) {
        let x = x_of(years);
        let _ = writeln!(
            svg,
            "<text class=\"tick\" x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{years}</text>",
            axis_y + 16.0
        );
    }

    for step in 0..=4 {
        let price = lo + (hi - lo) * f64::from(step) / 4.0;
        let y = y_of(price);
        let _ = writeln!(
            svg,
            "<text class=\"tick\" x=\"{:.1}\" y=\"{y:.1}\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>",
            MARGIN_LEFT - 6.0,
            format_price(price)
        );
    }

    for point in series.iter() {
        let _ = writeln!(
            svg,
            "<circle class=\"point\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\"><title>{} years: {}</title></circle>",
            x_of(point.years_holding),
            y_of(point.predicted_price),
            point.years_holding,
            format_price(point.predicted_price)
        );
    }

    let _ = writeln!(
        svg,
        "<text class=\"label\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">Years Holding</text>",
        MARGIN_LEFT + plot_width / 2.0,
        CHART_HEIGHT - 8.0
    );
    let _ = writeln!(
        svg,
        "<text class=\"label\" x=\"14\" y=\"{:.1}\" text-anchor=\"middle\" transform=\"rotate(-90 14 {:.1})\">Predicted Resale Price</text>",
        MARGIN_TOP + plot_height / 2.0,
        MARGIN_TOP + plot_height / 2.0
    );

    svg.push_str("</svg>\n");
    svg
}
