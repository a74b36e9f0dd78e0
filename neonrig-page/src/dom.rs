//! DOM adapter: attaches the page behaviours to the live document

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, FormData, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Request, RequestInit, RequestMode,
    Response, ScrollBehavior, ScrollIntoViewOptions, Window,
};

use crate::config::{ContactConfig, PageConfig, RevealConfig};
use crate::contact::{self, ButtonLook, ContactButton, FormPayload, SubmissionOutcome, SubmitTransport};
use crate::error::{PageError, Result};
use crate::marquee;
use crate::reveal::{RevealTracker, HIDDEN_STYLES, INDEX_ATTRIBUTE, REVEAL_CLEARS};
use crate::scroll::{self, AnchorAction};

/// What [`install`] found on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledGlue {
    /// In-page links given smooth scrolling
    pub anchors: usize,
    /// Elements waiting to be revealed
    pub reveal_targets: usize,
    /// Whether a marquee track was doubled
    pub marquee: bool,
    /// Whether the contact form is posted with `fetch`
    pub contact_form: bool,
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| PageError::Dom("no global `window` exists".to_string()))
}

fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| PageError::Dom("window has no document".to_string()))
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Attach every page behaviour. Pieces missing from the page are skipped.
pub fn install(config: &PageConfig) -> Result<InstalledGlue> {
    let document = document()?;

    let glue = InstalledGlue {
        anchors: install_smooth_scroll(&document, &config.anchor_selector)?,
        marquee: install_marquee(&document, &config.marquee_selector)?,
        reveal_targets: install_reveal(&document, &config.reveal)?,
        contact_form: install_contact_form(&document, &config.contact)?,
    };

    log::info!(
        "Page glue installed: {} anchors, {} reveal targets, marquee {}, contact form {}",
        glue.anchors,
        glue.reveal_targets,
        glue.marquee,
        glue.contact_form
    );
    Ok(glue)
}

/// Smooth-scroll in-page links
pub fn install_smooth_scroll(document: &Document, selector: &str) -> Result<usize> {
    let anchors = elements(document, selector)?;

    for anchor in &anchors {
        let link = anchor.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let href = link.get_attribute("href").unwrap_or_default();
            match scroll::anchor_action(&href) {
                AnchorAction::Ignore => {}
                AnchorAction::PreventOnly => event.prevent_default(),
                AnchorAction::ScrollTo(target) => {
                    event.prevent_default();
                    scroll_to(&target);
                }
            }
        }) as Box<dyn FnMut(_)>);

        anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(anchors.len())
}

fn scroll_to(selector: &str) {
    let Ok(document) = document() else {
        return;
    };
    match document.query_selector(selector) {
        Ok(Some(target)) => {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }
        Ok(None) => log::debug!("No element matches {}", selector),
        Err(e) => log::debug!("Invalid anchor selector {}: {:?}", selector, e),
    }
}

/// Double the ticker content once
pub fn install_marquee(document: &Document, selector: &str) -> Result<bool> {
    let Some(track) = document.query_selector(selector)? else {
        return Ok(false);
    };
    track.set_inner_html(&marquee::loop_track(&track.inner_html()));
    Ok(true)
}

/// Hide the reveal targets and show each the first time it scrolls into view
pub fn install_reveal(document: &Document, config: &RevealConfig) -> Result<usize> {
    let targets = elements(document, &config.selector_group())?;
    if targets.is_empty() {
        return Ok(0);
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::new(targets.len())));
    let visible_class = config.visible_class.clone();

    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let Some(index) = target
                .get_attribute(INDEX_ATTRIBUTE)
                .and_then(|value| value.parse::<usize>().ok())
            else {
                continue;
            };

            if tracker.borrow_mut().on_intersection(index, entry.is_intersecting()) {
                reveal(&target, &visible_class);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for (index, target) in targets.iter().enumerate() {
        target.set_attribute(INDEX_ATTRIBUTE, &index.to_string())?;
        if let Some(element) = target.dyn_ref::<HtmlElement>() {
            let style = element.style();
            for (property, value) in HIDDEN_STYLES {
                style.set_property(property, value)?;
            }
        }
        observer.observe(target);
    }

    Ok(targets.len())
}

fn reveal(target: &Element, visible_class: &str) {
    if let Err(e) = target.class_list().add_1(visible_class) {
        log::warn!("Failed to add class {}: {:?}", visible_class, e);
    }
    if let Some(element) = target.dyn_ref::<HtmlElement>() {
        let style = element.style();
        for property in REVEAL_CLEARS {
            let _ = style.remove_property(property);
        }
    }
}

/// `fetch`-backed transport
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    async fn send(&self, endpoint: &str, body: String) -> Result<u16> {
        let options = RequestInit::new();
        options.set_method("POST");
        options.set_mode(RequestMode::Cors);
        options.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(endpoint, &options)
            .map_err(|e| PageError::Transport(format!("{:?}", e)))?;
        request.headers().set("Content-Type", "application/json")?;
        request.headers().set("Accept", "application/json")?;

        let response = JsFuture::from(window()?.fetch_with_request(&request))
            .await
            .map_err(|e| PageError::Transport(format!("{:?}", e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| PageError::Transport("fetch did not resolve to a Response".to_string()))?;
        Ok(response.status())
    }
}

#[async_trait(?Send)]
impl SubmitTransport for FetchTransport {
    async fn post_json(&self, endpoint: &str, body: String) -> SubmissionOutcome {
        match self.send(endpoint, body).await {
            Ok(status) => SubmissionOutcome::from_status(status),
            Err(e) => SubmissionOutcome::Unreachable(e.to_string()),
        }
    }
}

/// Collect the named text fields of `form`
pub fn form_payload(form: &HtmlFormElement) -> Result<FormPayload> {
    let data = FormData::new_with_form(form)?;
    let mut payload = FormPayload::new();

    if let Some(entries) = js_sys::try_iter(&data)? {
        for entry in entries {
            let pair: js_sys::Array = entry?.unchecked_into();
            // File inputs have no string value
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                payload.insert(name, value);
            }
        }
    }

    Ok(payload)
}

fn apply_look(button: &HtmlElement, look: &ButtonLook) {
    button.set_text_content(Some(&look.text));
    let style = button.style();
    let result = match &look.background {
        Some(color) => style.set_property("background", color),
        None => style.remove_property("background").map(|_| ()),
    };
    if let Err(e) = result {
        log::warn!("Failed to style submit button: {:?}", e);
    }
}

/// Post the contact form with `fetch` and reflect progress on its button
pub fn install_contact_form(document: &Document, config: &ContactConfig) -> Result<bool> {
    let Some(form) = document.query_selector(&config.form_selector)? else {
        return Ok(false);
    };
    let form: HtmlFormElement = form
        .dyn_into()
        .map_err(|_| PageError::Dom(format!("{} is not a form", config.form_selector)))?;

    let Some(button) = form.query_selector(&config.button_selector)? else {
        log::warn!("Contact form has no {}; leaving native submit", config.button_selector);
        return Ok(false);
    };
    let button: HtmlElement = button
        .dyn_into()
        .map_err(|_| PageError::Dom(format!("{} is not an HTML element", config.button_selector)))?;

    let original_text = button.text_content().unwrap_or_default();
    let state = Rc::new(RefCell::new(ContactButton::new(original_text, config.clone())));
    let endpoint = Rc::new(config.endpoint.clone());

    let submit_form = form.clone();
    let closure = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();

        let payload = match form_payload(&submit_form) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Could not read contact form: {}", e);
                FormPayload::new()
            }
        };

        let token = state.borrow_mut().begin();
        apply_look(&button, &state.borrow().look());

        let state = Rc::clone(&state);
        let button = button.clone();
        let form = submit_form.clone();
        let endpoint = Rc::clone(&endpoint);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = contact::submit(&FetchTransport, &endpoint, &payload)
                .await
                .unwrap_or_else(|e| SubmissionOutcome::Unreachable(e.to_string()));

            let Some(revert_token) = state.borrow_mut().settle(token, &outcome) else {
                return;
            };
            apply_look(&button, &state.borrow().look());
            if outcome.is_success() {
                form.reset();
            }
            schedule_revert(state, button, revert_token);
        });
    }) as Box<dyn FnMut(_)>);

    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(true)
}

fn schedule_revert(state: Rc<RefCell<ContactButton>>, button: HtmlElement, token: u64) {
    let delay = state.borrow().revert_timeout_ms();
    let revert_state = Rc::clone(&state);
    let callback = Closure::once_into_js(move || {
        if revert_state.borrow_mut().revert(token) {
            apply_look(&button, &revert_state.borrow().look());
        }
    });

    let scheduled = window().and_then(|window| {
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
            .map_err(PageError::from)
    });
    if let Err(e) = scheduled {
        log::warn!("Failed to schedule button revert: {}", e);
    }
}
