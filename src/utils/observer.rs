//! Scroll-spy over document headings.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::toc::{OBSERVER_ROOT_MARGIN, OBSERVER_THRESHOLDS};
use crate::core::toc::{HeadingVisibility, active_heading};
use crate::utils::dom;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Watches heading elements and reports the one entering the reading band.
///
/// Disconnects when dropped; replace the handle to observe a new document.
pub struct HeadingObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl HeadingObserver {
    /// Observe the elements with the given ids.
    ///
    /// `on_active` receives the id of the top-most heading inside the band
    /// on every intersection change. Returns `None` outside a browser.
    pub fn observe(ids: &[String], on_active: impl Fn(String) + 'static) -> Option<Self> {
        let document = dom::document()?;

        let callback: ObserverCallback = Closure::new(move |entries: Array, _: IntersectionObserver| {
            let visibility: Vec<HeadingVisibility> = entries
                .iter()
                .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| HeadingVisibility {
                    id: entry.target().id(),
                    intersecting: entry.is_intersecting(),
                    top: entry.bounding_client_rect().top(),
                })
                .collect();

            if let Some(id) = active_heading(&visibility) {
                on_active(id.to_string());
            }
        });

        let thresholds = Array::new();
        for t in OBSERVER_THRESHOLDS {
            thresholds.push(&JsValue::from_f64(t));
        }
        let init = IntersectionObserverInit::new();
        init.set_root_margin(OBSERVER_ROOT_MARGIN);
        init.set_threshold(&thresholds);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;
        for id in ids {
            if let Some(element) = document.get_element_by_id(id) {
                observer.observe(&element);
            }
        }

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for HeadingObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
