//! Render and export settings, passed to components as props.

/// How connectors are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectorMode {
	/// Rule-based right-angle routing.
	#[default]
	Orthogonal,
	/// One quadratic curve per edge between the facing edges of each node.
	Curved,
}

/// Settings for the interactive canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
	/// Connector drawing mode.
	pub connector: ConnectorMode,
	/// Canvas clear color behind the diagram.
	pub background: String,
	/// Lower zoom bound relative to the fitted scale.
	pub min_zoom: f64,
	/// Upper zoom bound relative to the fitted scale.
	pub max_zoom: f64,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			connector: ConnectorMode::Orthogonal,
			background: "#ffffff".into(),
			min_zoom: 0.2,
			max_zoom: 5.0,
		}
	}
}

/// Settings for the PNG download.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportConfig {
	/// Name of the downloaded file.
	pub file_name: String,
	/// Upscale factor applied to diagram units.
	pub scale: f64,
	/// Border around the diagram, in diagram units.
	pub padding: f64,
	/// Fill color of the border and background.
	pub background: String,
	/// Time given to the de-selected frame to paint before capture.
	pub settle_ms: i32,
}

impl Default for ExportConfig {
	fn default() -> Self {
		Self {
			file_name: "heart-failure-pathway.png".into(),
			scale: 2.0,
			padding: 40.0,
			background: "#f1f5f9".into(),
			settle_ms: 100,
		}
	}
}

impl ExportConfig {
	/// Output pixel size for a diagram of the given size.
	pub fn output_size(&self, width: f64, height: f64) -> (u32, u32) {
		let px = |v: f64| ((v + 2.0 * self.padding) * self.scale).ceil() as u32;
		(px(width), px(height))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_is_padded_then_scaled() {
		let cfg = ExportConfig::default();
		assert_eq!(cfg.output_size(960.0, 2150.0), (2080, 4460));
	}
}
