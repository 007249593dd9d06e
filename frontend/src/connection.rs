use web_sys::Event;
use web_sys::MessageEvent as WebSocketMessageEvent;
use web_sys::WebSocket;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::log;
use crate::query_result::QueryResult;
use crate::request::Request;

/// Browser side of a board session. One connection is one voting session.
#[derive(Clone)]
pub struct FrontendConnection {
    websocket: Rc<WebSocket>,
}

impl FrontendConnection {
    pub fn new(url: &str) -> Result<Self, JsValue> {
        let websocket = Rc::new(WebSocket::new(url)?);

        let websocket0 = websocket.clone();
        let onopen = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            log("websocket opened");
            let msg = serde_json::to_string(&Request::ViewPosts).unwrap_or_default();
            if let Err(err) = websocket0.send_with_str(&msg) {
                log(&format!("could not request posts: {:?}", err));
            }
        });
        websocket.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();

        let onclose = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            log("websocket closed");
        });
        websocket.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        Ok(FrontendConnection { websocket })
    }

    pub fn init_on_parsed_message(&self, on_parsed_message: Box<dyn Fn(Vec<QueryResult>)>) {
        let onmessage = Closure::<dyn FnMut(WebSocketMessageEvent)>::new(
            move |message: WebSocketMessageEvent| {
                let data = message.data().as_string().unwrap_or_default();

                match serde_json::from_str::<Vec<QueryResult>>(&data) {
                    Ok(parsed) => on_parsed_message(parsed),
                    Err(err) => log(&format!("could not parse query results: {}", err)),
                }
            },
        );
        self.websocket
            .set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();
    }

    pub fn send_request(&self, request: &Request) {
        let msg = match serde_json::to_string(request) {
            Ok(msg) => msg,
            Err(err) => {
                log(&format!("could not encode request: {}", err));
                return;
            }
        };

        if let Err(err) = self.websocket.send_with_str(&msg) {
            log(&format!("could not send request: {:?}", err));
        }
    }
}
