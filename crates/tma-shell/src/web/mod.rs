//! Browser host: builds the form in the page and keeps it in sync with the
//! screen's view.
//!
//! Event closures live for the whole page and are leaked with
//! `Closure::forget`.

use std::rc::Rc;

use anyhow::anyhow;
use tma_app::cosmetic::ignore_cosmetic;
use tma_app::view::{CLEAR_LABEL, SEND_TO_BOT_LABEL, SEND_TO_SERVER_LABEL, STATUS_LABEL};
use tma_app::{MiniAppScreen, ScreenView};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement};

/// Element the form is mounted into when the page provides one.
pub const MOUNT_POINT_ID: &str = "app";

fn js_error(context: &str, value: JsValue) -> anyhow::Error {
    anyhow!("{context}: {value:?}")
}

struct Dom {
    root: Element,
    greeting: Element,
    input: HtmlInputElement,
    choices: Vec<Element>,
    status: Element,
}

impl Dom {
    fn render(&self, view: &ScreenView) {
        set_cosmetic_attribute(&self.root, "data-theme", view.scheme.as_str());
        self.greeting.set_text_content(Some(&view.greeting));

        // Rewriting an unchanged value would move the caret.
        if self.input.value() != view.text {
            self.input.set_value(&view.text);
        }

        for (button, choice) in self.choices.iter().zip(&view.choices) {
            let class = if choice.selected { "choice selected" } else { "choice" };
            let pressed = if choice.selected { "true" } else { "false" };
            set_cosmetic_attribute(button, "class", class);
            set_cosmetic_attribute(button, "aria-pressed", pressed);
        }

        self.status
            .set_text_content(Some(&format!("{STATUS_LABEL} {}", view.status)));
    }
}

/// Mount the form, attach the render hook and start the screen.
pub fn mount(screen: Rc<MiniAppScreen>) -> anyhow::Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window.document().ok_or_else(|| anyhow!("no document"))?;
    let host: Element = match document.get_element_by_id(MOUNT_POINT_ID) {
        Some(element) => element,
        None => document
            .body()
            .ok_or_else(|| anyhow!("document has no body"))?
            .into(),
    };

    let initial = screen.view();

    let root = element(&document, "div", "miniapp")?;
    let title = element(&document, "h1", "title")?;
    title.set_text_content(Some(initial.title));
    let greeting = element(&document, "p", "greeting")?;

    let input: HtmlInputElement = element(&document, "input", "text")?
        .dyn_into()
        .map_err(|_| anyhow!("created <input> is not an HtmlInputElement"))?;
    input.set_placeholder(initial.placeholder);
    {
        let screen = screen.clone();
        let field = input.clone();
        listen(&input, "input", move |_| screen.set_text(field.value()))?;
    }

    let selector = element(&document, "div", "choices")?;
    let mut choices = Vec::with_capacity(initial.choices.len());
    for (index, choice) in initial.choices.iter().enumerate() {
        let button = element(&document, "button", "choice")?;
        button.set_text_content(Some(&choice.glyph));
        set_attribute(&button, "title", &choice.title)?;
        let screen = screen.clone();
        listen(&button, "click", move |_| {
            if let Err(err) = screen.select_index(index) {
                tracing::warn!(error = %err, "choice click ignored");
            }
        })?;
        append(&selector, &button)?;
        choices.push(button);
    }

    let actions = element(&document, "div", "actions")?;
    let clear = button(&document, CLEAR_LABEL)?;
    {
        let screen = screen.clone();
        listen(&clear, "click", move |_| screen.clear())?;
    }
    let to_bot = button(&document, SEND_TO_BOT_LABEL)?;
    {
        let screen = screen.clone();
        listen(&to_bot, "click", move |_| screen.send_to_bot())?;
    }
    let to_server = button(&document, SEND_TO_SERVER_LABEL)?;
    {
        let screen = screen.clone();
        listen(&to_server, "click", move |_| {
            let screen = screen.clone();
            wasm_bindgen_futures::spawn_local(async move { screen.send_to_server().await });
        })?;
    }
    for action in [&clear, &to_bot, &to_server] {
        append(&actions, action)?;
    }

    let status = element(&document, "p", "status")?;

    let children: [&Element; 6] = [&title, &greeting, &input, &selector, &actions, &status];
    for child in children {
        append(&root, child)?;
    }
    append(&host, &root)?;

    let dom = Rc::new(Dom {
        root,
        greeting,
        input,
        choices,
        status,
    });
    screen.set_render_hook(Rc::new(move |view| dom.render(view)));

    {
        let screen = screen.clone();
        listen(&window, "pagehide", move |_| screen.teardown())?;
    }

    screen.start();
    tracing::info!("screen mounted");
    Ok(())
}

fn element(document: &Document, tag: &str, class: &str) -> anyhow::Result<Element> {
    let element = document
        .create_element(tag)
        .map_err(|err| js_error("create_element", err))?;
    set_attribute(&element, "class", class)?;
    Ok(element)
}

fn button(document: &Document, label: &str) -> anyhow::Result<Element> {
    let button = element(document, "button", "action")?;
    button.set_text_content(Some(label));
    Ok(button)
}

fn set_attribute(element: &Element, name: &str, value: &str) -> anyhow::Result<()> {
    element
        .set_attribute(name, value)
        .map_err(|err| js_error("set_attribute", err))
}

/// Styling-only attribute; a failure is logged and the render goes on.
fn set_cosmetic_attribute(element: &Element, name: &str, value: &str) {
    ignore_cosmetic("set_attribute", set_attribute(element, name, value));
}

fn append(parent: &Element, child: &Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|err| js_error("append_child", err))
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> anyhow::Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure: Closure<dyn FnMut(Event)> = Closure::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|err| js_error("add_event_listener", err))?;
    closure.forget();
    Ok(())
}
