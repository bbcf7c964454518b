//! Page components around the pathway canvas.

pub mod detail_panel;
pub mod export;
pub mod legend;
pub mod pathway;
