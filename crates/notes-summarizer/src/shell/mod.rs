//! Interactive page: per-session state, its store, and HTML rendering

pub mod page;
pub mod session;
pub mod store;

pub use page::{escape_html, render_page};
pub use session::{InteractionState, LoadedDocument, Notice, NoticeLevel, Stage};
pub use store::SessionStore;
