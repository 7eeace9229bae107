//! Toolkit-independent core of a pie-slice popup menu: sector layout,
//! hit-testing, styling and the show/hide state machine.

mod macros;

pub mod entry;
pub mod error;
pub mod geometry;
pub mod menu;
pub mod style;

pub use entry::{Label, MenuEntry};
pub use error::MenuError;
pub use geometry::{ColorStop, LinearGradient, Point, Rect, Sector};
pub use menu::{MenuHost, PointerButton, PressOutcome, RadialMenu};
pub use style::{Color, FontStyle, FontWeight, MenuStyle};
