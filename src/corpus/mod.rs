// Corpus access — the document source seam and the concurrent loader.

pub mod loader;
pub mod source;
