//! Incremental parser for the chat endpoint's SSE-framed response stream.
//!
//! Network chunks arrive with no alignment guarantees: a UTF-8 code point,
//! a line, or a JSON record may be split anywhere. The assembler carries
//! the unfinished tail across calls and only yields the content deltas it
//! could fully decode. Malformed records are dropped silently; the stream
//! contract gives no way to tell "malformed" from "not all here yet", so
//! mid-stream we wait for more bytes and at flush time we discard.

use serde::Deserialize;

/// Event-data marker. Lines without it (comments, blanks, other fields)
/// carry no content.
const DATA_PREFIX: &str = "data: ";

/// Terminator payload: once seen, no further lines are processed.
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Deserialize)]
struct StreamRecord {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    content: Option<String>,
}

enum LineOutcome {
    /// Content extracted from a well-formed data record.
    Delta(String),
    /// Comment, blank, non-data, or a record without a content field.
    Skip,
    /// `[DONE]` seen.
    Done,
    /// Payload did not decode; likely a record split across chunks.
    Incomplete,
}

/// Reassembles assistant text from raw response-body chunks.
pub struct SseAssembler {
    /// Decoded text waiting for its closing newline.
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence from the last chunk.
    utf8_carry: Vec<u8>,
    done: bool,
}

impl SseAssembler {
    pub fn new() -> Self {
        SseAssembler {
            buffer: String::new(),
            utf8_carry: Vec::new(),
            done: false,
        }
    }

    /// True once the `[DONE]` sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one raw chunk; returns the content deltas it completed, in
    /// arrival order.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.done {
            return Vec::new();
        }

        let decoded = self.decode_streaming(chunk);
        self.buffer.push_str(&decoded);

        let mut deltas = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=newline).collect();
            line.pop(); // the \n itself
            if line.ends_with('\r') {
                line.pop();
            }

            match self.consume_line(&line) {
                LineOutcome::Delta(content) => deltas.push(content),
                LineOutcome::Skip => {}
                LineOutcome::Done => {
                    self.done = true;
                    return deltas;
                }
                LineOutcome::Incomplete => {
                    // Put the line back, newline included, and wait for the
                    // rest of the record to arrive.
                    let mut restored = String::with_capacity(line.len() + 1 + self.buffer.len());
                    restored.push_str(&line);
                    restored.push('\n');
                    restored.push_str(&self.buffer);
                    self.buffer = restored;
                    break;
                }
            }
        }
        deltas
    }

    /// Drain whatever is still buffered after the stream ends. Same
    /// per-line rules, but a payload that still fails to decode has no
    /// more bytes coming and is dropped without comment.
    pub fn finish(&mut self) -> Vec<String> {
        if self.done {
            return Vec::new();
        }

        // An unterminated UTF-8 sequence can no longer complete; decode it
        // lossily like a final TextDecoder.decode() call would.
        if !self.utf8_carry.is_empty() {
            let tail = std::mem::take(&mut self.utf8_carry);
            self.buffer.push_str(&String::from_utf8_lossy(&tail));
        }

        let mut deltas = Vec::new();
        for raw in std::mem::take(&mut self.buffer).split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            match self.consume_line(line) {
                LineOutcome::Delta(content) => deltas.push(content),
                LineOutcome::Done => {
                    self.done = true;
                    break;
                }
                LineOutcome::Skip | LineOutcome::Incomplete => {}
            }
        }
        deltas
    }

    fn consume_line(&self, line: &str) -> LineOutcome {
        if line.starts_with(':') || line.trim().is_empty() {
            return LineOutcome::Skip;
        }
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return LineOutcome::Skip;
        };
        let payload = payload.trim();
        if payload == DONE_SENTINEL {
            return LineOutcome::Done;
        }

        match serde_json::from_str::<StreamRecord>(payload) {
            Ok(record) => {
                let content = record
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content);
                match content {
                    // A record without the content field is a no-op.
                    Some(content) => LineOutcome::Delta(content),
                    None => LineOutcome::Skip,
                }
            }
            Err(_) => LineOutcome::Incomplete,
        }
    }

    /// Decode `chunk` as UTF-8, joining it onto any incomplete sequence
    /// carried over from the previous chunk. A sequence cut off at the end
    /// of this chunk is carried forward; invalid bytes in the middle decode
    /// to U+FFFD, matching TextDecoder's non-fatal mode.
    fn decode_streaming(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.utf8_carry);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut pos = 0;
        while pos < bytes.len() {
            match std::str::from_utf8(&bytes[pos..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    pos = bytes.len();
                }
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&bytes[pos..pos + valid_up_to]));
                    match err.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            pos += valid_up_to + bad;
                        }
                        None => {
                            // Truncated sequence at the chunk boundary.
                            self.utf8_carry = bytes[pos + valid_up_to..].to_vec();
                            pos = bytes.len();
                        }
                    }
                }
            }
        }
        out
    }
}

impl Default for SseAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed(assembler: &mut SseAssembler, chunks: &[&str]) -> Vec<String> {
        let mut deltas = Vec::new();
        for chunk in chunks {
            deltas.extend(assembler.push_chunk(chunk.as_bytes()));
        }
        deltas.extend(assembler.finish());
        deltas
    }

    #[test]
    fn record_split_across_chunks_reassembles() {
        let mut assembler = SseAssembler::new();
        let deltas = feed(
            &mut assembler,
            &[
                "data: {\"choices\":[{\"delta\":{\"content\":\"Hel",
                "lo\"}}]}\n\n",
            ],
        );
        assert_eq!(deltas, vec!["Hello"]);
    }

    #[test]
    fn done_sentinel_stops_processing_later_lines() {
        let mut assembler = SseAssembler::new();
        let deltas = assembler.push_chunk(
            b"data: [DONE]\ndata: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n",
        );
        assert!(deltas.is_empty());
        assert!(assembler.is_done());
        // Later chunks and the flush are ignored too.
        assert!(assembler
            .push_chunk(b"data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\n")
            .is_empty());
        assert!(assembler.finish().is_empty());
    }

    #[test]
    fn comment_and_blank_lines_are_no_ops() {
        let mut assembler = SseAssembler::new();
        let deltas = feed(&mut assembler, &[": keep-alive\n", "\r\n", "   \n"]);
        assert!(deltas.is_empty());
        assert!(!assembler.is_done());
    }

    #[test]
    fn non_data_lines_are_skipped() {
        let mut assembler = SseAssembler::new();
        let deltas = feed(
            &mut assembler,
            &[
                "event: ping\n",
                "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n",
            ],
        );
        assert_eq!(deltas, vec!["ok"]);
    }

    #[test]
    fn record_without_content_field_is_a_no_op() {
        let mut assembler = SseAssembler::new();
        let deltas = feed(
            &mut assembler,
            &[
                "data: {\"choices\":[{\"delta\":{}}]}\n",
                "data: {\"choices\":[]}\n",
                "data: {}\n",
            ],
        );
        assert!(deltas.is_empty());
    }

    #[test]
    fn crlf_lines_parse_like_lf_lines() {
        let mut assembler = SseAssembler::new();
        let deltas =
            feed(&mut assembler, &["data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\r\n"]);
        assert_eq!(deltas, vec!["hi"]);
    }

    #[test]
    fn flush_drops_malformed_residue_silently() {
        let mut assembler = SseAssembler::new();
        assert!(assembler.push_chunk(b"data: {\"choices\": oops\n").is_empty());
        // Mid-stream the broken line was pushed back; at flush it is gone.
        assert!(assembler.finish().is_empty());
    }

    #[test]
    fn flush_recovers_final_unterminated_record() {
        let mut assembler = SseAssembler::new();
        assert!(assembler
            .push_chunk(b"data: {\"choices\":[{\"delta\":{\"content\":\"tail\"}}]}")
            .is_empty());
        assert_eq!(assembler.finish(), vec!["tail"]);
    }

    #[test]
    fn multibyte_code_point_split_across_chunks() {
        let text = "data: {\"choices\":[{\"delta\":{\"content\":\"caf\u{e9}\"}}]}\n";
        let bytes = text.as_bytes();
        // Split inside the two-byte encoding of é.
        let split = text.find('\u{e9}').unwrap() + 1;
        let mut assembler = SseAssembler::new();
        let mut deltas = assembler.push_chunk(&bytes[..split]);
        deltas.extend(assembler.push_chunk(&bytes[split..]));
        deltas.extend(assembler.finish());
        assert_eq!(deltas, vec!["caf\u{e9}"]);
    }

    #[test]
    fn several_records_in_one_chunk() {
        let mut assembler = SseAssembler::new();
        let deltas = assembler.push_chunk(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n",
        );
        assert_eq!(deltas, vec!["a", "b"]);
    }

    proptest! {
        /// Splitting the same stream at any byte boundaries yields the same
        /// assembled content.
        #[test]
        fn split_points_do_not_change_output(splits in proptest::collection::vec(0usize..200, 0..6)) {
            let stream = "data: {\"choices\":[{\"delta\":{\"content\":\"Hello \u{1f44b}\"}}]}\n\
                          : keep-alive\n\
                          data: {\"choices\":[{\"delta\":{\"content\":\"world\"}}]}\n\
                          data: [DONE]\n";
            let bytes = stream.as_bytes();

            let mut cuts: Vec<usize> = splits.into_iter().map(|s| s % (bytes.len() + 1)).collect();
            cuts.push(0);
            cuts.push(bytes.len());
            cuts.sort_unstable();

            let mut assembler = SseAssembler::new();
            let mut deltas = Vec::new();
            for pair in cuts.windows(2) {
                deltas.extend(assembler.push_chunk(&bytes[pair[0]..pair[1]]));
            }
            deltas.extend(assembler.finish());

            prop_assert_eq!(deltas.concat(), "Hello \u{1f44b}world");
            prop_assert!(assembler.is_done());
        }
    }
}
