//! REST API endpoint implementations.

pub mod kvstore;
mod request;
pub mod url_encoding;

pub use kvstore::{CollectionPath, DataEndpoint, find_record, insert_record, update_record};
pub use request::send_request;
pub use url_encoding::encode_path_segment;
