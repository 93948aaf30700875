//! Widget runtime: state, capability traits, scrolling and the input
//! pipeline.

pub mod base;
pub mod error;
pub mod runtime;
pub mod scroll;
pub mod state;
pub mod traits;

pub use base::WidgetBase;
pub use error::{ConstructError, ConstructResult};
pub use runtime::{
    Handler, HandlerTable, InjectResult, InputContext, Interactive, KeyOutcome, PostProcess, PreProcess,
};
pub use scroll::{Motion, ScrollState, Thumb};
pub use state::{ExitType, WidgetState};
pub use traits::{Bindable, Drawable, ScreenObject, Scrollable};
