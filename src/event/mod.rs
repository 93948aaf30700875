//! Key input and per-widget key bindings.

pub mod binding;
pub mod input;

pub use binding::{Action, Binding, BindingTable, HandlerId, UserData};
pub use input::{
    Key, KeyEvent, Modifiers, UnsupportedKey, COPY, CUT, ERASE, KILL, PASTE, REFRESH, TRANSPOSE,
};
