//! 工具模块

pub mod languages;
pub mod render;
pub mod request_logger;

pub use languages::{detect_language_from_filename, is_supported_language, SUPPORTED_LANGUAGES};
pub use render::render_body;
pub use request_logger::{LogEntry, RequestLogger};
