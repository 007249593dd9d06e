extern crate console_error_panic_hook;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod connection;
pub mod post;
pub mod present;
pub mod query_result;
pub mod render;
pub mod request;
pub mod vote;

use chrono::Utc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement, HtmlInputElement};

use crate::connection::FrontendConnection;
use crate::query_result::QueryResult;
use crate::request::Request;

pub const ROOT_ELEMENT_SELECTOR: &str = "#link_board_root";
pub const WEBSOCKET_URL: &str = "ws://127.0.0.1:5050";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(contents: &str);
}

fn root_element() -> Result<Element, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    document
        .query_selector(ROOT_ELEMENT_SELECTOR)?
        .ok_or_else(|| JsValue::from_str("missing board root element"))
}

#[wasm_bindgen]
pub fn bootstrap() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let root = root_element()?;
    let connection = FrontendConnection::new(WEBSOCKET_URL)?;

    let render_root = root.clone();
    connection.init_on_parsed_message(Box::new(move |results: Vec<QueryResult>| {
        render_root.set_inner_html(&render::render_board(&results, Utc::now()));
    }));

    let vote_connection = connection.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(request) = vote_request(&event) {
            vote_connection.send_request(&request);
        }
    });
    root.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        match submit_request(&event) {
            Some(request) => connection.send_request(&request),
            None => log("submit event without a board form"),
        }
    });
    root.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}

// vote buttons carry their post id and direction as data attributes
fn vote_request(event: &Event) -> Option<Request> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest("button[data-vote]").ok()??;

    let vote = button.get_attribute("data-vote")?;
    let post_id = button.get_attribute("data-post-id")?.parse().ok()?;

    Some(Request::Vote { post_id, vote })
}

fn submit_request(event: &Event) -> Option<Request> {
    let form = event.target()?.dyn_into::<HtmlFormElement>().ok()?;
    if form.id() != render::SUBMIT_FORM_ID {
        return None;
    }

    let field = |name: &str| -> Option<String> {
        let input = form
            .query_selector(&format!("input[name={}]", name))
            .ok()??
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        Some(input.value())
    };

    let request = Request::SubmitPost {
        title: field("title")?,
        url: field("url")?,
    };
    form.reset();

    Some(request)
}
