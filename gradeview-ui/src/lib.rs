//! gradeview browser glue
//!
//! WebAssembly bindings that attach the dashboard chart and the profile
//! photo preview to an existing page.
//!
//! # Page contract
//!
//! - `<canvas id="studentsTestChart">`, optionally with
//!   `data-variant="percentage|plain"`
//! - `<img id="profilePhotoPreview">`
//! - a file input with `onchange="previewProfilePhoto(this)"`
//! - Chart.js loaded as the global `Chart`
//!
//! The chart loads once on `DOMContentLoaded`. `refreshChart()` reloads it,
//! cancelling a load still in flight and replacing the drawn chart.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, HtmlInputElement};

use gradeview::chart::{ChartError, ChartRenderer, ChartVariant};
use gradeview::photo::{PhotoError, PhotoPreviewer};

pub mod api;
pub mod chart;
pub mod photo;

use api::FetchChartSource;
use chart::CanvasPainter;
use photo::{ImagePreview, InputSelection};

/// Canvas the test-score chart is drawn into
pub const CHART_CANVAS_ID: &str = "studentsTestChart";
/// Image element showing the selected profile photo
pub const PHOTO_PREVIEW_ID: &str = "profilePhotoPreview";

type PageRenderer = ChartRenderer<FetchChartSource, CanvasPainter>;

thread_local! {
    static RENDERER: RefCell<Option<Rc<PageRenderer>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = document()?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(load_chart);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        load_chart();
    }

    Ok(())
}

/// Reload the chart, replacing the one already drawn
#[wasm_bindgen(js_name = refreshChart)]
pub fn refresh_chart() {
    match RENDERER.with(|r| r.borrow().clone()) {
        Some(renderer) => spawn_local(async move {
            let _ = renderer.refresh().await;
        }),
        None => load_chart(),
    }
}

/// `onchange` handler for the profile photo input
#[wasm_bindgen(js_name = previewProfilePhoto)]
pub fn preview_profile_photo(input: HtmlInputElement) {
    let Some(image) = element_by_id::<HtmlImageElement>(PHOTO_PREVIEW_ID) else {
        web_sys::console::warn_1(&format!("#{} not found", PHOTO_PREVIEW_ID).into());
        return;
    };

    let previewer = PhotoPreviewer::new(ImagePreview::new(image)).on_error(log_photo_error);
    let selection = InputSelection::new(input);

    spawn_local(async move {
        let _ = previewer.preview(&selection).await;
    });
}

fn load_chart() {
    let Some(canvas) = element_by_id::<HtmlCanvasElement>(CHART_CANVAS_ID) else {
        web_sys::console::warn_1(&format!("#{} not found", CHART_CANVAS_ID).into());
        return;
    };

    let variant = canvas
        .get_attribute("data-variant")
        .and_then(|v| v.parse().ok())
        .unwrap_or(ChartVariant::Percentage);

    let renderer = Rc::new(
        ChartRenderer::new(FetchChartSource::default(), CanvasPainter::new(canvas))
            .variant(variant)
            .on_error(log_chart_error),
    );
    RENDERER.with(|r| *r.borrow_mut() = Some(Rc::clone(&renderer)));

    spawn_local(async move {
        let _ = renderer.render_once().await;
    });
}

fn log_chart_error(err: &ChartError) {
    web_sys::console::error_2(
        &"Error fetching chart data:".into(),
        &err.to_string().into(),
    );
}

fn log_photo_error(err: &PhotoError) {
    web_sys::console::debug_2(&"Profile photo preview skipped:".into(), &err.to_string().into());
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    document()
        .ok()?
        .get_element_by_id(id)?
        .dyn_into::<T>()
        .ok()
}
