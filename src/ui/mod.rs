//! Terminal presentation: block formatting, spinner and live painting.

pub mod blocks;
pub mod painter;
pub mod spinner;

pub use blocks::BlockFormatter;
pub use painter::LivePainter;
pub use spinner::Spinner;
