//! Streaming client for the hosted chat endpoint.
//!
//! One request shape: `POST {endpoint}` with a bearer token and the full
//! message history; the reply is an SSE-framed token stream consumed chunk
//! by chunk. Fragments are dispatched as they decode so the drawer renders
//! incrementally. There is no retry and no cancellation.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, ReadableStreamDefaultReader, Request, RequestInit, RequestMode, Response};

use crate::messages::Message;
use crate::models::ChatMessage;
use crate::network::sse::SseAssembler;
use crate::state::dispatch_global_message;

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    messages: &'a [ChatMessage],
}

/// Optional error payload on non-success responses: `{"error": "..."}`.
#[derive(Deserialize, Default)]
struct ChatErrorBody {
    error: Option<String>,
}

pub struct ChatClient;

impl ChatClient {
    /// POST the conversation and stream the reply, dispatching one
    /// `ReceiveAssistantFragment` per decoded content delta. The returned
    /// error string is already human-readable; the chat reducer prefixes
    /// the warning glyph.
    pub async fn stream_completion(messages: &[ChatMessage]) -> Result<(), String> {
        let config = super::config::get_chat_config()?;

        let body = serde_json::to_string(&ChatRequestBody { messages })
            .map_err(|e| format!("Failed to encode request: {}", e))?;

        let mut opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(describe_js_error)?;
        headers
            .append(
                "Authorization",
                &format!("Bearer {}", config.bearer_token()),
            )
            .map_err(describe_js_error)?;
        headers
            .append("Content-Type", "application/json")
            .map_err(describe_js_error)?;
        opts.set_headers(&headers);
        opts.set_body(&JsValue::from_str(&body));

        let request =
            Request::new_with_str_and_init(config.endpoint(), &opts).map_err(describe_js_error)?;

        let window = web_sys::window().ok_or_else(|| "no global window".to_string())?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(describe_js_error)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| "fetch returned a non-Response value".to_string())?;

        if !resp.ok() {
            return Err(error_from_response(&resp).await);
        }

        let stream = resp.body().ok_or_else(|| "No stream body".to_string())?;
        let reader: ReadableStreamDefaultReader = stream
            .get_reader()
            .dyn_into()
            .map_err(|_| "response body has no default reader".to_string())?;

        let mut assembler = SseAssembler::new();
        loop {
            // Chunks are read strictly one at a time; this await is the
            // only suspension point, so fragment application stays
            // serialized on the UI thread.
            let chunk = JsFuture::from(reader.read())
                .await
                .map_err(describe_js_error)?;
            let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(true);
            if done {
                break;
            }

            let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value"))
                .map_err(describe_js_error)?;
            let bytes = js_sys::Uint8Array::new(&value).to_vec();

            for delta in assembler.push_chunk(&bytes) {
                dispatch_global_message(Message::ReceiveAssistantFragment(delta));
            }
            if assembler.is_done() {
                break;
            }
        }

        for delta in assembler.finish() {
            dispatch_global_message(Message::ReceiveAssistantFragment(delta));
        }

        Ok(())
    }
}

/// Prefer the server's `{"error": ...}` text, fall back to the HTTP status.
async fn error_from_response(resp: &Response) -> String {
    let status = resp.status();
    if let Ok(text_promise) = resp.text() {
        if let Ok(text) = JsFuture::from(text_promise).await {
            if let Some(text) = text.as_string() {
                if let Ok(parsed) = serde_json::from_str::<ChatErrorBody>(&text) {
                    if let Some(error) = parsed.error.filter(|e| !e.is_empty()) {
                        return error;
                    }
                }
            }
        }
    }
    format!("Error {}", status)
}

fn describe_js_error(err: JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMessage;

    #[test]
    fn request_body_matches_wire_shape() {
        let history = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        let body = serde_json::to_string(&ChatRequestBody { messages: &history }).unwrap();
        assert_eq!(
            body,
            r#"{"messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}"#
        );
    }

    #[test]
    fn error_body_parses_with_and_without_field() {
        let with: ChatErrorBody = serde_json::from_str(r#"{"error":"rate limited"}"#).unwrap();
        assert_eq!(with.error.as_deref(), Some("rate limited"));
        let without: ChatErrorBody = serde_json::from_str("{}").unwrap();
        assert!(without.error.is_none());
    }
}
