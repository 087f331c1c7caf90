#![warn(clippy::all, rust_2018_idioms)]

//! A pixel-art drawing engine: mutable RGBA canvas, stroke-based tools,
//! symmetry mirroring, and snapshot-based undo history. The engine is
//! headless; a UI shell feeds it pointer events and configuration and renders
//! the buffer it exposes.

pub mod brush;
pub mod buffer;
pub mod color;
pub mod document;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod history;
pub mod raster;
pub mod symmetry;
pub mod tools;

pub use brush::{BrushDescriptor, BrushShape};
pub use buffer::PixelBuffer;
pub use color::{BlendMode, Rgba};
pub use document::Document;
pub use editor::Editor;
pub use error::EngineError;
pub use event::{EngineEvent, EventBus, EventHandler};
pub use geometry::{DirtyRect, PixelPoint};
pub use history::HistoryManager;
pub use symmetry::{LineId, ReflectionLine, SymmetryPreset, SymmetrySet};
pub use tools::ToolKind;
