use crate::kernel::envelope::EventPayload;
use crate::page::classify;

pub fn page_view(path: &str) -> EventPayload {
    EventPayload::PageView {
        page_type: classify(path),
    }
}
