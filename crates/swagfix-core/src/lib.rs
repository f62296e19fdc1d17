pub mod config;
pub mod document;
pub mod error;
pub mod fixup;
pub mod normalize;

pub use document::SwaggerDocument;
pub use fixup::{fixup_file, fixup_str};
pub use normalize::{NormalizeReport, normalize};
