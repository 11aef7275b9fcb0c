//! Core types and traits for Tessera widgets.
//!
//! This crate provides foundational types used throughout Tessera:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`], and DOM-style custom events: [`CustomEvent`], [`EventTarget`]
//! - The [`Widget`] and [`Brick`] traits, plus [`RecordingCanvas`] for tests
//! - Chip theming: [`ChipTheme`]

mod brick;
mod canvas;
mod color;
mod constraints;
mod dispatch;
mod event;
mod geometry;
mod theme;
pub mod widget;

pub use brick::{escape_html, Brick, BrickAssertion, BrickBudget, BrickVerification};
pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use dispatch::{CustomEvent, EventTarget, ListenerFn, ListenerId};
pub use event::{Event, Key, MouseButton};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use theme::{ChipTheme, ThemeError};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget, WidgetMessage,
};
