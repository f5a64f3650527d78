//! Browser glue for the scene host

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::host::{BoundingBox, Container, Detach, SceneHost};
use crate::renderer::CanvasSurface;
use crate::scheduler::{FrameHandle, Scheduler};
use crate::theme::{Theme, ThemeSource};

/// Host type used in the browser
pub type WebHost = SceneHost<WebScheduler, CanvasSurface>;

/// `requestAnimationFrame`-backed scheduler
pub struct WebScheduler {
    window: Window,
    callback: Option<Closure<dyn FnMut(f64)>>,
}

impl WebScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    /// Install the frame callback; must happen before the first `schedule_next`.
    /// `mount_scene` binds it to the host's `on_animation_frame`.
    pub fn set_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }
}

impl Scheduler for WebScheduler {
    fn schedule_next(&mut self) -> FrameHandle {
        let Some(callback) = self.callback.as_ref() else {
            log::warn!("No frame callback installed");
            return FrameHandle(0);
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                FrameHandle(0)
            }
        }
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// The element the scene fills
pub struct DomContainer(pub HtmlElement);

impl Container for DomContainer {
    fn bounding_box(&self) -> Option<BoundingBox> {
        if !self.0.is_connected() {
            return None;
        }
        let rect = self.0.get_bounding_client_rect();
        Some(BoundingBox::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }
}

/// Reads the page theme from the `dark` class on `<html>`
pub struct DocumentTheme(pub Document);

impl ThemeSource for DocumentTheme {
    fn theme(&self) -> Theme {
        let is_dark = self
            .0
            .document_element()
            .map(|root| root.class_list().contains("dark"))
            .unwrap_or(true);
        Theme::from_is_dark(is_dark)
    }
}

/// Attach an event listener and return the step that removes it again
fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Option<Detach> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(e) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("Failed to listen for {}: {:?}", event, e);
        return None;
    }

    let target = target.clone();
    Some(Box::new(move || {
        let result = target
            .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| SceneError::Detach(format!("{}: {:?}", event, e)));
        drop(closure);
        result
    }))
}

/// Run `f` against the host if it is still alive and not busy
fn with_host(host: &Weak<RefCell<WebHost>>, f: impl FnOnce(&mut WebHost)) {
    if let Some(host) = host.upgrade() {
        if let Ok(mut host) = host.try_borrow_mut() {
            f(&mut host);
        }
    }
}

/// Reuse the container's `<canvas>` or append a full-size one
fn canvas_in(document: &Document, container: &HtmlElement) -> Option<HtmlCanvasElement> {
    if let Some(existing) = container.query_selector("canvas").ok().flatten() {
        return existing.dyn_into().ok();
    }
    let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
    if let Err(e) = canvas.set_attribute("style", "display:block;width:100%;height:100%") {
        log::debug!("Failed to style canvas: {:?}", e);
    }
    container.append_child(&canvas).ok()?;
    Some(canvas)
}

/// Mount a scene into the element with id `container_id`.
///
/// Returns `None` (after logging) if the page has no such element or no 2D
/// context; nothing is drawn in that case.
pub fn mount_scene(container_id: &str, config: SceneConfig) -> Option<Rc<RefCell<WebHost>>> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let Some(element) = document
        .get_element_by_id(container_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        log::debug!("No #{} element, scene not mounted", container_id);
        return None;
    };

    let surface = canvas_in(&document, &element).and_then(|canvas| {
        CanvasSurface::new(canvas)
            .map_err(|e| log::debug!("{}", e))
            .ok()
    });

    let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
    let host = Rc::new(RefCell::new(SceneHost::new(
        config,
        seed,
        WebScheduler::new(window.clone()),
        DocumentTheme(document.clone()),
    )));

    {
        let weak = Rc::downgrade(&host);
        let callback = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            with_host(&weak, |h| h.on_animation_frame());
        });
        host.borrow_mut().scheduler_mut().set_callback(callback);
    }

    if !host
        .borrow_mut()
        .mount(Some(DomContainer(element.clone())), surface)
    {
        return None;
    }

    let weak = Rc::downgrade(&host);
    let container: &EventTarget = element.as_ref();
    let window_target: &EventTarget = window.as_ref();
    let listeners = [
        listen(window_target, "resize", {
            let weak = weak.clone();
            move |_| with_host(&weak, |h| h.resize())
        }),
        listen(container, "mousemove", {
            let weak = weak.clone();
            move |event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    let (x, y) = (mouse.client_x() as f32, mouse.client_y() as f32);
                    with_host(&weak, |h| h.on_pointer_move(x, y));
                }
            }
        }),
        listen(container, "mouseleave", {
            let weak = weak.clone();
            move |_| with_host(&weak, |h| h.on_pointer_leave())
        }),
        listen(container, "click", {
            let weak = weak.clone();
            move |_| with_host(&weak, |h| h.on_click())
        }),
    ];

    {
        let mut h = host.borrow_mut();
        for detach in listeners.into_iter().flatten() {
            h.on_teardown(detach);
        }
    }

    log::info!("Kinetic balls running in #{} (seed {})", container_id, seed);
    Some(host)
}
