pub mod collection;
pub mod decode;
pub mod snippet;
pub mod source;
pub mod tags;

pub use collection::SnippetCollection;
pub use decode::{DecodeReport, DocumentFormat, RejectReason, Rejection, decode_document};
pub use snippet::{Author, Snippet, SnippetLanguage};
pub use source::SnippetSource;
pub use tags::{DEFAULT_TAGS, TagVocabulary};
