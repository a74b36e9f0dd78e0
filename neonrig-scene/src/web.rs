//! Browser mount: canvas creation, input listeners and the animation-frame loop

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent, Window};

use crate::animation::{AnimationLoop, FrameClock};
use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::interaction::InteractionTracker;
use crate::rig;
use crate::viewport::{RenderSurface, Viewport};
use crate::webgl_renderer::WebGLRenderer;

/// Get the window object
pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| SceneError::Dom("no global `window` exists".to_string()))
}

/// Get the document of the window
pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| SceneError::Dom("window has no document".to_string()))
}

/// Current size of `container` in CSS pixels
pub fn container_viewport(window: &Window, container: &Element) -> Viewport {
    Viewport::new(
        container.client_width().max(0) as u32,
        container.client_height().max(0) as u32,
        window.device_pixel_ratio(),
    )
}

fn window_size(window: &Window) -> (f32, f32) {
    let dimension = |value: std::result::Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

/// A scene running in the page
pub struct MountedScene {
    canvas: HtmlCanvasElement,
    animation: Rc<RefCell<AnimationLoop>>,
}

impl MountedScene {
    /// The canvas appended to the container
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.animation.borrow().state().frame
    }
}

/// Mount the rig into `#config.container_id`.
///
/// Returns `Ok(None)` when the container is absent so pages without the
/// showcase still run the rest of the site script.
pub fn mount(config: &SceneConfig) -> Result<Option<MountedScene>> {
    let window = window()?;
    let document = document()?;

    let Some(container) = document.get_element_by_id(&config.container_id) else {
        log::warn!("{}; skipping 3D scene", SceneError::ContainerMissing(config.container_id.clone()));
        return Ok(None);
    };

    let viewport = container_viewport(&window, &container);
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SceneError::Dom("created element is not a canvas".to_string()))?;

    let renderer = WebGLRenderer::new(canvas.clone(), viewport, config.exposure)?;
    container.append_child(&canvas)?;

    let rig = rig::build(viewport, config)?;
    let animation = Rc::new(RefCell::new(AnimationLoop::new(rig, config.motion.clone())));
    let renderer = Rc::new(RefCell::new(renderer));

    let (width, height) = window_size(&window);
    let tracker = Rc::new(RefCell::new(InteractionTracker::new(config.tracking_zone, width, height)));

    install_pointer_listeners(&document, &window, &tracker)?;
    install_resize_listener(&window, container, &tracker, &animation, &renderer)?;
    start_frame_loop(&window, &tracker, &animation, &renderer)?;

    log::info!(
        "Mounted scene in #{} at {}x{} (pixel ratio {})",
        config.container_id,
        viewport.width,
        viewport.height,
        viewport.pixel_ratio
    );

    Ok(Some(MountedScene { canvas, animation }))
}

fn install_pointer_listeners(
    document: &Document,
    window: &Window,
    tracker: &Rc<RefCell<InteractionTracker>>,
) -> Result<()> {
    {
        let tracker = Rc::clone(tracker);
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            tracker
                .borrow_mut()
                .pointer_moved(event.client_x() as f32, event.client_y() as f32);
        }) as Box<dyn FnMut(_)>);

        document.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let tracker = Rc::clone(tracker);
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            // No related target means the pointer left the window entirely
            if event.related_target().is_none() {
                tracker.borrow_mut().pointer_left();
            }
        }) as Box<dyn FnMut(_)>);

        window.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn install_resize_listener(
    window: &Window,
    container: Element,
    tracker: &Rc<RefCell<InteractionTracker>>,
    animation: &Rc<RefCell<AnimationLoop>>,
    renderer: &Rc<RefCell<WebGLRenderer>>,
) -> Result<()> {
    let tracker = Rc::clone(tracker);
    let animation = Rc::clone(animation);
    let renderer = Rc::clone(renderer);

    let closure = Closure::wrap(Box::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (width, height) = window_size(&window);
        tracker.borrow_mut().set_window_size(width, height);

        let viewport = container_viewport(&window, &container);
        let mut renderer = renderer.borrow_mut();
        animation.borrow_mut().resize(&mut *renderer, viewport);
        log::debug!("Resized scene to {:?}", renderer.size());
    }) as Box<dyn FnMut()>);

    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn start_frame_loop(
    window: &Window,
    tracker: &Rc<RefCell<InteractionTracker>>,
    animation: &Rc<RefCell<AnimationLoop>>,
    renderer: &Rc<RefCell<WebGLRenderer>>,
) -> Result<()> {
    let clock = FrameClock::start();
    let tracker = Rc::clone(tracker);
    let animation = Rc::clone(animation);
    let renderer = Rc::clone(renderer);

    // The closure re-requests itself through this slot
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&frame);

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let pointer = tracker.borrow().sample();
        let result = animation
            .borrow_mut()
            .tick(clock.elapsed_secs(), pointer, &mut *renderer.borrow_mut());

        if let Err(e) = result {
            // Not rescheduling ends the loop
            log::error!("Stopping render loop: {}", e);
            return;
        }

        let requested = web_sys::window().map(|window| {
            next.borrow()
                .as_ref()
                .map(|callback| window.request_animation_frame(callback.as_ref().unchecked_ref()))
        });
        if !matches!(requested, Some(Some(Ok(_)))) {
            log::error!("Failed to schedule the next animation frame");
        }
    }) as Box<dyn FnMut()>));

    let borrowed = frame.borrow();
    let callback = borrowed
        .as_ref()
        .ok_or_else(|| SceneError::Dom("frame callback missing".to_string()))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
