//! Browser wiring: document listeners feed [`SiteApp::handle`], deferred
//! work sleeps on a timer and comes back through a coroutine channel.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

use super::app::SiteApp;
use super::deferred::Deferred;
use super::intent::Interaction;
use super::registry::site_registry;
use crate::core::config::SiteConfig;
use crate::core::{platform, timing};
use crate::dom::WebDom;

pub type SharedApp = Rc<RefCell<SiteApp<WebDom>>>;
type SenderSlot = Rc<RefCell<Option<UnboundedSender<SiteEvent>>>>;

#[derive(Debug, Clone)]
pub enum SiteEvent {
    Fire(Deferred),
}

/// Queue every item of `deferred` on its own timer.
pub fn schedule(sender: &UnboundedSender<SiteEvent>, deferred: Vec<Deferred>) {
    for work in deferred {
        let sender = sender.clone();
        platform::spawn_future(async move {
            timing::sleep_ms(work.delay_ms).await;
            if let Err(err) = sender.unbounded_send(SiteEvent::Fire(work)) {
                tracing::debug!(task = ?err.into_inner(), "event loop closed; deferred work dropped");
            }
        });
    }
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn listen(
    target: &EventTarget,
    name: &str,
    app: &SharedApp,
    sender: &UnboundedSender<SiteEvent>,
    to_interaction: impl Fn(&Event) -> Option<Interaction<Element>> + 'static,
) {
    let app = Rc::clone(app);
    let sender = sender.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(interaction) = to_interaction(&event) else {
            return;
        };
        let response = match app.try_borrow_mut() {
            Ok(mut app) => app.handle(interaction),
            Err(_) => {
                tracing::warn!("event arrived while the site was busy; dropped");
                return;
            }
        };
        if response.prevent_default {
            event.prevent_default();
        }
        schedule(&sender, response.deferred);
    });
    if let Err(err) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
        tracing::error!(event = name, ?err, "failed to attach listener");
    }
    closure.forget();
}

/// Build the app on the live document, attach listeners and show the
/// first view.
pub fn boot(sender: &UnboundedSender<SiteEvent>) -> Option<SharedApp> {
    let dom = WebDom::new()?;
    let document: EventTarget = dom.document().clone().into();
    let window: EventTarget = dom.window().clone().into();
    let frames = dom.document().query_selector_all("iframe").ok();

    let app = Rc::new(RefCell::new(SiteApp::new(
        dom,
        site_registry(),
        SiteConfig::load(),
    )));

    listen(&document, "click", &app, sender, |event| {
        target_element(event).map(|target| Interaction::Click { target })
    });
    listen(&document, "submit", &app, sender, |event| {
        target_element(event).map(|form| Interaction::Submit { form })
    });
    listen(&document, "keydown", &app, sender, |event| {
        let key = event.dyn_ref::<KeyboardEvent>()?.key();
        Some(Interaction::Key { key })
    });
    listen(&window, "scroll", &app, sender, |_| Some(Interaction::Scroll));
    listen(&window, "resize", &app, sender, |_| Some(Interaction::Resize));
    listen(&window, "load", &app, sender, |_| Some(Interaction::Load));

    if let Some(frames) = frames {
        for index in 0..frames.length() {
            let Some(frame) = frames.get(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let target: EventTarget = frame.clone().into();
            listen(&target, "load", &app, sender, move |_| {
                Some(Interaction::FrameLoaded {
                    frame: frame.clone(),
                })
            });
        }
    }

    let deferred = app.borrow_mut().start();
    schedule(sender, deferred);
    tracing::info!("site runtime started");
    Some(app)
}

/// Start the runtime once the markup is mounted.
pub fn use_site_runtime() {
    let app_slot: Rc<RefCell<Option<SharedApp>>> = use_hook(|| Rc::new(RefCell::new(None)));
    let sender_slot: SenderSlot = use_hook(|| Rc::new(RefCell::new(None)));

    let coroutine = {
        let app_slot = app_slot.clone();
        let sender_slot = sender_slot.clone();
        use_coroutine(move |mut rx: UnboundedReceiver<SiteEvent>| {
            let app_slot = app_slot.clone();
            let sender_slot = sender_slot.clone();
            async move {
                while let Some(SiteEvent::Fire(work)) = rx.next().await {
                    let Some(app) = app_slot.borrow().clone() else {
                        continue;
                    };
                    let follow_ups = app.borrow_mut().fire(work);
                    if let Some(sender) = sender_slot.borrow().as_ref() {
                        schedule(sender, follow_ups);
                    }
                }
            }
        })
    };

    use_effect(move || {
        if app_slot.borrow().is_some() {
            return;
        }
        let sender = coroutine.tx();
        sender_slot.borrow_mut().replace(sender.clone());
        match boot(&sender) {
            Some(app) => {
                app_slot.borrow_mut().replace(app);
            }
            None => tracing::error!("no browser document; site runtime not started"),
        }
    });
}
