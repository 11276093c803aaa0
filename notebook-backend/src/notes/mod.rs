//! Notes system: plain text notes named by their creation time.

pub mod file_ops;
pub mod store;

pub use file_ops::display_date;
pub use store::NoteStore;
