//! Pagination of classified documents into positioned lines.

mod cursor;
mod event;
mod options;
mod paginator;

pub use cursor::PageCursor;
pub use event::{LayoutEvent, PageEvent, PageLayout, Position};
pub use options::{FontFace, FontSpec, LayoutOptions};
pub use paginator::{paginate, paginate_pages, split_block, Paginator};
