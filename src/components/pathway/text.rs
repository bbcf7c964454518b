//! Line placement inside a node box. Coordinates are relative to the node's
//! top-left corner.

const LABEL_LINE_HEIGHT: f64 = 18.0;
const EXAMPLE_LINE_HEIGHT: f64 = 16.0;
/// Gap between the label and example blocks; the rule sits in its middle.
const SEPARATOR_HEIGHT: f64 = 12.0;
/// Minimum space above the first line.
pub const PADDING_Y: f64 = 15.0;
const LIST_INDENT: f64 = 40.0;

// Puts the glyph baseline low enough that text looks centered in its line.
const BASELINE_FACTOR: f64 = 0.75;

/// Horizontal anchoring of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
	/// Centered on `x`.
	Center,
	/// Left edge at `x`.
	Start,
}

/// Which block a line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
	/// Main label, drawn bold.
	Label,
	/// Example line, drawn italic.
	Example,
}

/// One placed line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
	/// Text as authored.
	pub text: String,
	/// Anchor x, relative to the node.
	pub x: f64,
	/// Baseline y, relative to the node.
	pub baseline: f64,
	/// How `x` anchors the text.
	pub align: Align,
	/// Label or example line.
	pub kind: LineKind,
}

/// All placed lines of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
	/// Label lines, then example lines.
	pub lines: Vec<TextLine>,
	/// Y of the rule between label and examples, when there are examples.
	pub separator_y: Option<f64>,
}

/// Bulleted or dashed lines keep their left edge instead of being centered.
pub fn is_list_item(line: &str) -> bool {
	let line = line.trim_start();
	line.starts_with('•') || line.starts_with('-')
}

/// Height of the label and example blocks, without padding.
pub fn content_height(label_lines: usize, example_lines: usize) -> f64 {
	let label = label_lines as f64 * LABEL_LINE_HEIGHT;
	if example_lines == 0 {
		label
	} else {
		label + SEPARATOR_HEIGHT + example_lines as f64 * EXAMPLE_LINE_HEIGHT
	}
}

/// Centers the text vertically in a `width` by `height` box, keeping at least
/// [`PADDING_Y`] above it. List items are indented; other lines are centered.
pub fn layout(label: &[String], examples: &[String], width: f64, height: f64) -> TextBlock {
	let top = PADDING_Y.max((height - content_height(label.len(), examples.len())) / 2.0);
	let indent = LIST_INDENT.min(width / 4.0);

	let place = |text: &String, block_top: f64, index: usize, line_height: f64, kind| {
		let (x, align) = if is_list_item(text) {
			(indent, Align::Start)
		} else {
			(width / 2.0, Align::Center)
		};
		TextLine {
			text: text.clone(),
			x,
			baseline: block_top + index as f64 * line_height + line_height * BASELINE_FACTOR,
			align,
			kind,
		}
	};

	let mut lines: Vec<TextLine> = label
		.iter()
		.enumerate()
		.map(|(i, text)| place(text, top, i, LABEL_LINE_HEIGHT, LineKind::Label))
		.collect();

	let label_bottom = top + label.len() as f64 * LABEL_LINE_HEIGHT;
	let separator_y = (!examples.is_empty()).then(|| label_bottom + SEPARATOR_HEIGHT / 2.0);
	let examples_top = label_bottom + SEPARATOR_HEIGHT;
	lines.extend(
		examples
			.iter()
			.enumerate()
			.map(|(i, text)| place(text, examples_top, i, EXAMPLE_LINE_HEIGHT, LineKind::Example)),
	);

	TextBlock { lines, separator_y }
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn strings(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn short_label_is_vertically_centered() {
		let block = layout(&strings(&["Decreased Cardiac Output", "& Blood Pressure"]), &[], 380.0, 70.0);
		let baselines: Vec<f64> = block.lines.iter().map(|l| l.baseline).collect();
		assert_eq!(baselines, vec![30.5, 48.5]);
		assert!(block.lines.iter().all(|l| l.align == Align::Center && l.x == 190.0));
		assert_eq!(block.separator_y, None);
	}

	#[test]
	fn overflowing_content_keeps_minimum_padding() {
		let label = strings(&["a", "b", "c", "d", "e", "f"]);
		let block = layout(&label, &[], 200.0, 100.0);
		assert_eq!(block.lines[0].baseline, PADDING_Y + 13.5);
	}

	#[test]
	fn list_items_are_indented_and_left_aligned() {
		let label = strings(&["Heading", "• bullet", "  - dash"]);
		let block = layout(&label, &[], 280.0, 110.0);
		assert_eq!(block.lines[0].align, Align::Center);
		assert_eq!(block.lines[1].align, Align::Start);
		assert_eq!(block.lines[1].x, LIST_INDENT);
		assert_eq!(block.lines[2].align, Align::Start);
	}

	#[test]
	fn narrow_nodes_clamp_the_indent() {
		let block = layout(&strings(&["• x"]), &[], 100.0, 40.0);
		assert_eq!(block.lines[0].x, 25.0);
	}

	#[test]
	fn examples_follow_separator() {
		let label = strings(&["Predisposing Factors", "(Chronic Conditions)"]);
		let examples = strings(&["• A", "• B", "• C", "• D"]);
		let block = layout(&label, &examples, 380.0, 160.0);

		assert_eq!(content_height(2, 4), 112.0);
		assert_eq!(block.separator_y, Some(66.0));
		let example_baselines: Vec<f64> = block
			.lines
			.iter()
			.filter(|l| l.kind == LineKind::Example)
			.map(|l| l.baseline)
			.collect();
		assert_eq!(example_baselines, vec![84.0, 100.0, 116.0, 132.0]);
		assert_eq!(block.lines[1].baseline, 55.5);
	}

	#[test]
	fn plain_text_is_not_a_list_item() {
		assert!(!is_list_item("Frank-Starling"));
		assert!(is_list_item("• Orthopnea"));
		assert!(is_list_item("- dash"));
	}
}
