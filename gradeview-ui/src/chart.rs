//! Chart Component
//!
//! Paints chart configurations onto the dashboard canvas through Chart.js.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use gradeview::chart::{
    ChartConfiguration, ChartError, ChartHandle, ChartPainter, ChartResult, TickFormat,
};

#[wasm_bindgen]
extern "C" {
    /// Chart.js' global `Chart` class, loaded by the page
    #[wasm_bindgen(js_name = Chart)]
    pub type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(ctx: &CanvasRenderingContext2d, config: &JsValue) -> Result<ChartJs, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &ChartJs);
}

/// One live Chart.js instance and the tick callback it calls back into
struct LiveChart {
    chart: ChartJs,
    _tick_callback: Option<Closure<dyn Fn(JsValue) -> JsValue>>,
}

/// Paints onto a `<canvas>` element
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    charts: RefCell<HashMap<u64, LiveChart>>,
    next_id: Cell<u64>,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self {
            canvas,
            charts: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    /// Number of charts currently alive on the canvas
    pub fn live_charts(&self) -> usize {
        self.charts.borrow().len()
    }

    fn context(&self) -> ChartResult<CanvasRenderingContext2d> {
        self.canvas
            .get_context("2d")
            .map_err(|e| paint_error("getContext failed", &e))?
            .ok_or_else(|| ChartError::Paint("canvas has no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|e| paint_error("unexpected context type", &e))
    }
}

impl ChartPainter for CanvasPainter {
    fn paint(&self, config: &ChartConfiguration) -> ChartResult<ChartHandle> {
        let ctx = self.context()?;

        let json = serde_json::to_string(config).map_err(|e| ChartError::Paint(e.to_string()))?;
        let js_config =
            js_sys::JSON::parse(&json).map_err(|e| paint_error("invalid configuration", &e))?;

        let tick_callback = match config.options.scales.y.ticks.tick_format {
            TickFormat::Plain => None,
            format => Some(install_tick_callback(&js_config, format)?),
        };

        let chart = ChartJs::new(&ctx, &js_config).map_err(|e| paint_error("Chart.js", &e))?;

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.charts.borrow_mut().insert(
            id,
            LiveChart {
                chart,
                _tick_callback: tick_callback,
            },
        );

        Ok(ChartHandle(id))
    }

    fn destroy(&self, handle: ChartHandle) {
        if let Some(live) = self.charts.borrow_mut().remove(&handle.0) {
            live.chart.destroy();
        }
    }
}

/// Chart.js formats ticks through `options.scales.y.ticks.callback`
fn install_tick_callback(
    js_config: &JsValue,
    format: TickFormat,
) -> ChartResult<Closure<dyn Fn(JsValue) -> JsValue>> {
    let ticks = ["options", "scales", "y", "ticks"]
        .iter()
        .try_fold(js_config.clone(), |node, key| {
            js_sys::Reflect::get(&node, &JsValue::from_str(key))
        })
        .map_err(|e| paint_error("missing y ticks", &e))?;

    let callback = Closure::<dyn Fn(JsValue) -> JsValue>::new(move |value: JsValue| {
        JsValue::from_str(&format.format(value.as_f64().unwrap_or_default()))
    });

    js_sys::Reflect::set(&ticks, &JsValue::from_str("callback"), callback.as_ref())
        .map_err(|e| paint_error("cannot set tick callback", &e))?;

    Ok(callback)
}

fn paint_error(context: &str, err: &JsValue) -> ChartError {
    ChartError::Paint(format!("{}: {:?}", context, err))
}
