use std::sync::atomic::{AtomicU32, Ordering};

// Vertex attachment ids are process-global, monotonically increasing counters. Deform timelines
// fold them into their property id and match the slot's attachment against them.
static NEXT_VERTEX_ATTACHMENT_ID: AtomicU32 = AtomicU32::new(0);

pub(crate) fn next_vertex_attachment_id() -> u32 {
    NEXT_VERTEX_ATTACHMENT_ID.fetch_add(1, Ordering::Relaxed)
}
