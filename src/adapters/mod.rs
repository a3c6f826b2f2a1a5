// Adapters layer: concrete implementations for external systems (http, html, storage, reports).

pub mod http;
pub mod markup;
pub mod report;
pub mod storage;
