//! Canvas flowchart: data model, connector routing, layout and painting.

mod component;
pub mod geometry;
mod render;
pub mod routing;
pub mod scene;
mod state;
pub mod text;
mod types;

pub use component::PathwayCanvas;
pub(crate) use render::paint;
pub use types::{
	Category, CategoryId, ColorToken, Diagram, Edge, EdgeKind, Intervention, Interventions,
	LineStyle, Node,
};
