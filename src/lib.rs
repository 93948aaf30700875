//! # cellkit
//!
//! The core of a curses-style terminal widget toolkit: attributed cells, an
//! inline markup language, list scrolling math, per-widget key bindings and a
//! focus-tracking screen registry.
//!
//! ## Core Systems
//!
//! - **[`attr`]**: Attribute masks and color pairs
//! - **[`markup`]**: Markup compiler and decompiler, line glyphs
//! - **[`widget`]**: Exit types, capability traits, scroll engine, input pipeline
//! - **[`widgets`]**: Built-in widgets: Label, Entry, ScrollList, Dialog
//! - **[`event`]**: Key codes and binding tables
//! - **[`render`]**: Surface contract, window stack and crossterm backend
//! - **[`screen`]**: Widget registry with focus traversal and paint order
//! - **[`testing`]**: Headless surface for scripted tests
//! - **[`geometry`]**: Offset, Size, Region, Placement primitives
//!
//! ## Example
//!
//! ```
//! use cellkit::event::{Key, KeyEvent};
//! use cellkit::geometry::Size;
//! use cellkit::testing::HeadlessSurface;
//! use cellkit::widget::{ExitType, Interactive};
//! use cellkit::widgets::{Entry, EntryConfig};
//!
//! let mut surface = HeadlessSurface::new(Size::new(40, 10));
//! let entry = Entry::new(&mut surface, EntryConfig::default().with_label("Name: ")).unwrap();
//! let mut entry = Interactive::new(entry);
//!
//! surface.type_text("Ada");
//! surface.push_key(Key::Enter);
//! let result = entry.activate(&mut surface, None);
//! assert_eq!(result.exit_type, ExitType::Normal);
//! assert_eq!(result.value.as_deref(), Some("Ada"));
//! ```

// Foundation
pub mod attr;
pub mod geometry;

// Text
pub mod markup;

// Input
pub mod event;

// Rendering
pub mod render;

// Widget system
pub mod widget;
pub mod widgets;

// Containers
pub mod screen;

// Test support
pub mod testing;
