pub mod captions;
pub mod store;
pub mod summarizer;
