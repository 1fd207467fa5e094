//! Trace context propagation
//!
//! The gateway continues or starts a trace for every inbound request and
//! hands a child context to each outbound backend call using the W3C
//! `traceparent` header format:
//!
//! ```text
//! 00-<trace-id: 32 hex>-<parent-id: 16 hex>-<flags: 2 hex>
//! ```

use std::fmt;

use uuid::Uuid;

/// Header carrying the trace context on inbound and outbound requests
pub const TRACEPARENT_HEADER: &str = "traceparent";

const VERSION: &str = "00";
const FLAG_SAMPLED: u8 = 0x01;

/// Identifies one span within a distributed trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: [u8; 16],
    pub span_id: [u8; 8],
    pub sampled: bool,
}

impl TraceContext {
    /// Start a new trace
    pub fn new_root() -> Self {
        Self {
            trace_id: *Uuid::new_v4().as_bytes(),
            span_id: new_span_id(),
            sampled: true,
        }
    }

    /// A new span in the same trace, parented by this one
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id,
            span_id: new_span_id(),
            sampled: self.sampled,
        }
    }

    /// Parse a `traceparent` header value.
    ///
    /// Returns `None` for unknown versions, malformed fields and all-zero ids.
    pub fn from_traceparent(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('-');
        let version = parts.next()?;
        let trace_id = parts.next()?;
        let span_id = parts.next()?;
        let flags = parts.next()?;

        if version != VERSION || parts.next().is_some() {
            return None;
        }
        if trace_id.len() != 32 || span_id.len() != 16 || flags.len() != 2 {
            return None;
        }

        let mut context = Self {
            trace_id: [0; 16],
            span_id: [0; 8],
            sampled: false,
        };
        hex::decode_to_slice(trace_id, &mut context.trace_id).ok()?;
        hex::decode_to_slice(span_id, &mut context.span_id).ok()?;
        let mut flag_byte = [0u8; 1];
        hex::decode_to_slice(flags, &mut flag_byte).ok()?;
        context.sampled = flag_byte[0] & FLAG_SAMPLED != 0;

        if context.trace_id == [0; 16] || context.span_id == [0; 8] {
            return None;
        }

        Some(context)
    }

    /// Format as a `traceparent` header value
    pub fn to_traceparent(&self) -> String {
        let flags = if self.sampled { FLAG_SAMPLED } else { 0 };
        format!(
            "{}-{}-{}-{:02x}",
            VERSION,
            hex::encode(self.trace_id),
            hex::encode(self.span_id),
            flags
        )
    }

    pub fn trace_id_hex(&self) -> String {
        hex::encode(self.trace_id)
    }

    pub fn span_id_hex(&self) -> String {
        hex::encode(self.span_id)
    }
}

impl fmt::Display for TraceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_traceparent())
    }
}

fn new_span_id() -> [u8; 8] {
    let bytes = Uuid::new_v4();
    let mut id = [0u8; 8];
    id.copy_from_slice(&bytes.as_bytes()[..8]);
    id
}
