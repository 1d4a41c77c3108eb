//! `BlockEditor`: the processing cycle bound to a live element
//!
//! JavaScript registers the DOM listeners and forwards them here:
//! `keyup` to `handleKeyUp`, clicks on block controls to
//! `handleControlClick`. Cycles scheduled from key events run on a
//! `setTimeout` after the configured debounce.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use super::dom::DomSurface;
use super::export::download_text_file;
use super::helpers::{config_from_js, error_to_js, serialize};
use super::types::EditorSnapshot;
use crate::cycle::{CycleReport, ProcessingCycle, Trigger};
use crate::error::EditorError;
use crate::html_layout::document::{
    ACTION_ATTR, ACTION_IMPORTANCE, ACTION_TOGGLE_COLLAPSE, BLOCK_INDEX_ATTR, IMPORTANCE_ATTR,
};
use crate::text::annotations::Importance;
use crate::utils::performance::PerformanceMonitor;

const CYCLE_METRIC: &str = "cycle";

/// Delay before retrying a scheduled cycle that found the editor borrowed
const RETRY_DELAY_MS: u32 = 10;

struct EditorInner {
    surface: DomSurface,
    cycle: ProcessingCycle,
    perf: PerformanceMonitor,
}

impl EditorInner {
    fn process(&mut self) -> CycleReport {
        self.timed(|surface, cycle| cycle.run(surface))
    }

    /// The cycle a trigger key asked for; releases the busy flag
    fn process_scheduled(&mut self) -> CycleReport {
        self.timed(|surface, cycle| cycle.run_scheduled(surface))
    }

    fn timed<F>(&mut self, run: F) -> CycleReport
    where
        F: FnOnce(&mut DomSurface, &mut ProcessingCycle) -> CycleReport,
    {
        let started = now_ms();
        let report = run(&mut self.surface, &mut self.cycle);
        if let (Some(start), Some(end)) = (started, now_ms()) {
            self.perf.record_measurement(CYCLE_METRIC, (end - start) as f32);
        }
        report
    }
}

fn now_ms() -> Option<f64> {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
}

/// Run a cycle on `inner` after `delay_ms`
fn schedule_cycle(inner: &Rc<RefCell<EditorInner>>, delay_ms: u32) -> Result<(), EditorError> {
    let window = web_sys::window().ok_or(EditorError::NoWindow)?;
    let pending = Rc::clone(inner);
    let callback = Closure::once_into_js(move || {
        if let Ok(mut inner) = pending.try_borrow_mut() {
            inner.process_scheduled();
            return;
        }
        log::warn!("editor borrowed when scheduled cycle fired; retrying");
        if let Err(err) = schedule_cycle(&pending, RETRY_DELAY_MS) {
            log::error!("could not reschedule cycle: {}", err);
            if let Ok(mut inner) = pending.try_borrow_mut() {
                inner.cycle.cancel_scheduled();
            }
        }
    });

    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        )
        .map_err(EditorError::dom)?;
    Ok(())
}

/// Block editor bound to a contenteditable element
#[wasm_bindgen]
pub struct BlockEditor {
    inner: Rc<RefCell<EditorInner>>,
}

#[wasm_bindgen]
impl BlockEditor {
    /// Bind to `root` and run the first cycle
    ///
    /// # Parameters
    /// - `root`: the contenteditable editor element
    /// - `config_js`: optional config object; missing fields take defaults
    #[wasm_bindgen(constructor)]
    pub fn new(root: HtmlElement, config_js: JsValue) -> Result<BlockEditor, JsValue> {
        let config = config_from_js(config_js)?;
        let surface = DomSurface::new(root);
        surface.prepare().map_err(error_to_js)?;
        let mut inner = EditorInner {
            surface,
            cycle: ProcessingCycle::new(config),
            perf: PerformanceMonitor::new(),
        };
        let report = inner.process();
        log::info!("BlockEditor ready: {} blocks", report.block_count);

        Ok(BlockEditor {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    /// Forward a `keyup` key value.
    ///
    /// # Returns
    /// `true` if a cycle was scheduled
    #[wasm_bindgen(js_name = handleKeyUp)]
    pub fn handle_key_up(&self, key: &str) -> Result<bool, JsValue> {
        let trigger = self.inner.borrow_mut().cycle.on_key(key);
        let Trigger::Scheduled { delay_ms } = trigger else {
            return Ok(false);
        };

        if let Err(err) = schedule_cycle(&self.inner, delay_ms) {
            // never leave the busy flag stuck
            log::warn!("could not schedule cycle ({}); running now", err);
            self.inner.borrow_mut().process_scheduled();
        }
        Ok(true)
    }

    /// Run a cycle immediately
    ///
    /// # Returns
    /// The cycle report `{ block_count, text_len, caret, restored }`
    #[wasm_bindgen(js_name = processText)]
    pub fn process_text(&self) -> Result<JsValue, JsValue> {
        let report = self.inner.borrow_mut().process();
        serialize(&report, "Failed to serialize cycle report")
    }

    /// Forward a click event; acts on clicks inside block controls.
    ///
    /// # Returns
    /// `true` if the click hit a control and was handled
    #[wasm_bindgen(js_name = handleControlClick)]
    pub fn handle_control_click(&self, event: &Event) -> Result<bool, JsValue> {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return Ok(false);
        };
        let Some(control) = target
            .closest(&format!("[{}]", ACTION_ATTR))
            .map_err(|e| error_to_js(EditorError::dom(e)))?
        else {
            return Ok(false);
        };
        if !self.inner.borrow().surface.owns(&control) {
            return Ok(false);
        }

        let index = control
            .get_attribute(BLOCK_INDEX_ATTR)
            .and_then(|v| v.parse::<usize>().ok())
            .ok_or_else(|| error_to_js(EditorError::Dom(format!("control without {}", BLOCK_INDEX_ATTR))))?;

        event.prevent_default();
        event.stop_propagation();

        match control.get_attribute(ACTION_ATTR).as_deref() {
            Some(ACTION_IMPORTANCE) => {
                let level = control.get_attribute(IMPORTANCE_ATTR).unwrap_or_default();
                self.set_importance(index, &level)?;
                Ok(true)
            }
            Some(ACTION_TOGGLE_COLLAPSE) => {
                self.toggle_collapsed(index)?;
                Ok(true)
            }
            other => {
                log::warn!("unknown control action {:?}", other);
                Ok(false)
            }
        }
    }

    /// Tag block `index` with an importance level name
    #[wasm_bindgen(js_name = setImportance)]
    pub fn set_importance(&self, index: usize, level: &str) -> Result<(), JsValue> {
        let importance: Importance = level.parse().map_err(error_to_js)?;
        let mut inner = self.inner.borrow_mut();
        let EditorInner { surface, cycle, .. } = &mut *inner;
        cycle
            .set_importance(surface, index, importance)
            .map_err(error_to_js)?;
        Ok(())
    }

    /// Collapse or expand block `index`; returns the new collapsed state
    #[wasm_bindgen(js_name = toggleCollapsed)]
    pub fn toggle_collapsed(&self, index: usize) -> Result<bool, JsValue> {
        let mut inner = self.inner.borrow_mut();
        let EditorInner { surface, cycle, .. } = &mut *inner;
        cycle.toggle_collapsed(surface, index).map_err(error_to_js)
    }

    /// Show or hide block outlines; returns the new state
    #[wasm_bindgen(js_name = toggleBlockBoundaries)]
    pub fn toggle_block_boundaries(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        let EditorInner { surface, cycle, .. } = &mut *inner;
        cycle.toggle_block_boundaries(surface)
    }

    /// Document text with controls excluded
    #[wasm_bindgen(js_name = exportText)]
    pub fn export_text(&self) -> String {
        let inner = self.inner.borrow();
        inner.cycle.export_text(&inner.surface)
    }

    /// Download the document text under the configured file name
    #[wasm_bindgen(js_name = downloadText)]
    pub fn download_text(&self) -> Result<(), JsValue> {
        let (text, filename) = {
            let inner = self.inner.borrow();
            (
                inner.cycle.export_text(&inner.surface),
                inner.cycle.config().export_filename.clone(),
            )
        };
        download_text_file(&text, &filename).map_err(error_to_js)
    }

    /// Current blocks and toggles
    #[wasm_bindgen(js_name = snapshot)]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        let snapshot = EditorSnapshot {
            blocks: inner.cycle.block_views(),
            show_block_boundaries: inner.cycle.show_block_boundaries(),
            pending: inner.cycle.is_busy(),
        };
        serialize(&snapshot, "Failed to serialize editor snapshot")
    }

    /// Mean cycle duration in milliseconds, if any cycle was timed
    #[wasm_bindgen(js_name = averageCycleMs)]
    pub fn average_cycle_ms(&self) -> Option<f32> {
        self.inner.borrow().perf.get_average_time(CYCLE_METRIC)
    }
}
