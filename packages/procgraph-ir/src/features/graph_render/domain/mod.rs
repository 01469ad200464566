mod palette;

pub use palette::{DataPalette, X11_PALETTE};
