//! Built-in widgets: Label, Entry, ScrollList, Dialog.

pub mod dialog;
pub mod entry;
pub mod label;
pub mod scroll_list;

pub use dialog::{Dialog, DialogConfig};
pub use entry::{DisplayKind, Entry, EntryConfig};
pub use label::{Label, LabelConfig};
pub use scroll_list::{ScrollList, ScrollListConfig};
