//! DOCX serializer for assembled reqdoc documents, built on `docx-rs`.
//!
//! - `writer`: maps `DocumentTree` nodes to docx-rs elements and packs the archive

mod writer;

pub use writer::DocxWriter;
