//! Browser front-end: DOM surface, interval timer, page listeners.
//!
//! Call [`start`] once the page has loaded. It wires:
//! - a [`DomSurface`] over the dashboard's fixed element IDs,
//! - a [`JsChartSink`] that hands each series to a page-provided JS function,
//! - a [`WebScheduler`] on `gloo_timers` intervals,
//! - `visibilitychange` plus the `refresh-interval` / `chart-period` controls.
//!
//! All state lives in `thread_local!` statics (WASM is single-threaded).

use std::cell::RefCell;

use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlSelectElement};

use crate::client::DashboardClient;
use crate::dashboard::{Dashboard, DashboardState};
use crate::display::{ChangeDirection, DisplaySurface};
use crate::domain::history::{ChartSeries, ChartSink};
use crate::domain::status::ConnectionStatus;
use crate::error::ChartError;
use crate::pipeline::UpdatePipeline;
use crate::refresh::{RefreshConfig, Scheduler};
use crate::shared::{Asset, SecondaryMetric, DEFAULT_DAYS};

/// Default name of the page function that redraws a chart.
pub const DEFAULT_CHART_HOOK: &str = "updatePriceChart";

type WebPipeline = UpdatePipeline<DashboardClient, DomSurface, JsChartSink>;
pub type WebDashboard = Dashboard<DashboardClient, DomSurface, JsChartSink, WebScheduler>;

thread_local! {
    static DASHBOARD: RefCell<Option<WebDashboard>> = RefCell::new(None);
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

// ─── Display surface ─────────────────────────────────────────────────────────

/// Writes into the dashboard's elements by ID. Missing elements are skipped.
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            tracing::debug!("Element #{} not found", id);
        }
        element
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl DisplaySurface for DomSurface {
    fn set_price(&mut self, asset: Asset, text: &str) {
        self.set_text(&format!("{}-price", asset.as_str()), text);
    }

    fn set_change(&mut self, asset: Asset, text: &str, direction: ChangeDirection) {
        let Some(el) = self.element(&format!("{}-change", asset.as_str())) else {
            return;
        };
        if let Ok(Some(value)) = el.query_selector(".change-value") {
            value.set_text_content(Some(text));
        }
        el.set_class_name(&direction.css_class());
    }

    fn set_secondary(&mut self, asset: Asset, metric: SecondaryMetric, text: &str) {
        self.set_text(
            &format!("{}-{}", asset.as_str(), metric.element_suffix()),
            text,
        );
    }

    fn set_card_error(&mut self, asset: Asset, errored: bool) {
        if let Some(el) = self.element(&format!("{}-card", asset.as_str())) {
            let _ = el.class_list().toggle_with_force("error", errored);
        }
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        if let Some(el) = self.element("connection-status") {
            el.set_class_name(&status.css_class());
        }
    }

    fn set_last_update(&mut self, text: &str) {
        self.set_text("last-update-time", text);
    }

    fn show_error(&mut self, message: &str) {
        web_sys::console::error_1(&JsValue::from_str(message));
    }
}

// ─── Chart sink ──────────────────────────────────────────────────────────────

/// Calls `window[hook](canvasId, labels, values)` for each redraw. The page
/// owns the chart objects and must update them without animation.
pub struct JsChartSink {
    hook: String,
}

impl JsChartSink {
    pub fn new(hook: impl Into<String>) -> Self {
        Self { hook: hook.into() }
    }
}

impl ChartSink for JsChartSink {
    fn redraw(&mut self, asset: Asset, series: &ChartSeries) -> Result<(), ChartError> {
        let window = web_sys::window().ok_or_else(|| ChartError::Render("no window".into()))?;
        let hook = js_sys::Reflect::get(&window, &JsValue::from_str(&self.hook))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| ChartError::Render(format!("window.{} is not a function", self.hook)))?;

        let labels: js_sys::Array = series.labels().iter().map(|l| JsValue::from_str(l)).collect();
        let values: js_sys::Array = series.values().iter().map(|v| JsValue::from_f64(*v)).collect();
        let canvas_id = JsValue::from_str(&format!("{}-chart", asset.as_str()));

        hook.call3(&JsValue::NULL, &canvas_id, &labels, &values)
            .map_err(|e| ChartError::Render(format!("{:?}", e)))?;
        Ok(())
    }
}

// ─── Scheduler ───────────────────────────────────────────────────────────────

/// `gloo_timers` interval; dropping the `Interval` clears it.
pub struct WebScheduler {
    pipeline: WebPipeline,
}

impl WebScheduler {
    fn spawn_cycle(pipeline: WebPipeline) {
        wasm_bindgen_futures::spawn_local(async move {
            let _ = pipeline.run_cycle().await;
        });
    }
}

impl Scheduler for WebScheduler {
    type Timer = Interval;

    fn start_timer(&self, period: std::time::Duration) -> Interval {
        let pipeline = self.pipeline.clone();
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, move || Self::spawn_cycle(pipeline.clone()))
    }

    fn trigger_now(&self) {
        Self::spawn_cycle(self.pipeline.clone());
    }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn select_value(document: &Document, id: &str) -> Option<String> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
}

/// Unparsable refresh values disable the timer.
fn refresh_from(value: Option<String>) -> RefreshConfig {
    value
        .and_then(|v| v.parse::<RefreshConfig>().ok())
        .unwrap_or(RefreshConfig::DISABLED)
}

fn days_from(value: Option<String>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|d| *d > 0)
        .unwrap_or(DEFAULT_DAYS)
}

fn with_dashboard(f: impl FnOnce(&mut WebDashboard)) {
    DASHBOARD.with(|d| {
        if let Ok(mut slot) = d.try_borrow_mut() {
            if let Some(dashboard) = slot.as_mut() {
                f(dashboard);
            }
        }
    });
}

/// Build the dashboard, run the first cycle and install the page listeners.
#[wasm_bindgen]
pub fn start(api_url: Option<String>, chart_hook: Option<String>) -> Result<(), JsValue> {
    let document = document()?;

    let mut builder = DashboardClient::builder();
    if let Some(url) = api_url.as_deref() {
        builder = builder.base_url(url);
    }
    let client = builder
        .build()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let days = days_from(select_value(&document, "chart-period"));
    let refresh = refresh_from(select_value(&document, "refresh-interval"));

    let sink = JsChartSink::new(chart_hook.unwrap_or_else(|| DEFAULT_CHART_HOOK.to_string()));
    let state = DashboardState::new(DomSurface::new(document.clone()), sink, days);
    let pipeline = UpdatePipeline::new(client, state);
    let scheduler = WebScheduler {
        pipeline: pipeline.clone(),
    };

    let mut dashboard = Dashboard::new(pipeline, scheduler);
    dashboard.start(refresh);
    DASHBOARD.with(|d| *d.borrow_mut() = Some(dashboard));

    install_listeners(&document)?;
    tracing::info!("Price dashboard started");
    Ok(())
}

fn install_listeners(document: &Document) -> Result<(), JsValue> {
    let doc = document.clone();
    let on_visibility = Closure::<dyn FnMut()>::new(move || {
        let hidden = doc.hidden();
        with_dashboard(|dashboard| dashboard.on_visibility_change(hidden));
    });
    document.add_event_listener_with_callback(
        "visibilitychange",
        on_visibility.as_ref().unchecked_ref(),
    )?;
    on_visibility.forget();

    if let Some(el) = document.get_element_by_id("refresh-interval") {
        let doc = document.clone();
        let on_refresh = Closure::<dyn FnMut()>::new(move || {
            let refresh = refresh_from(select_value(&doc, "refresh-interval"));
            with_dashboard(|dashboard| dashboard.set_refresh(refresh));
        });
        el.add_event_listener_with_callback("change", on_refresh.as_ref().unchecked_ref())?;
        on_refresh.forget();
    }

    if let Some(el) = document.get_element_by_id("chart-period") {
        let doc = document.clone();
        let on_days = Closure::<dyn FnMut()>::new(move || {
            let days = days_from(select_value(&doc, "chart-period"));
            let mut pipeline = None;
            with_dashboard(|dashboard| pipeline = Some(dashboard.pipeline().clone()));
            if let Some(pipeline) = pipeline {
                wasm_bindgen_futures::spawn_local(async move {
                    pipeline.set_days(days).await;
                });
            }
        });
        el.add_event_listener_with_callback("change", on_days.as_ref().unchecked_ref())?;
        on_days.forget();
    }

    Ok(())
}
