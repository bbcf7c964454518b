//! The one piece of mutable application state: which node is selected.

/// Single nullable node id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection(Option<String>);

impl Selection {
	/// Selection starting on `id`.
	pub fn of(id: impl Into<String>) -> Self {
		Self(Some(id.into()))
	}

	/// Currently selected node id.
	pub fn id(&self) -> Option<&str> {
		self.0.as_deref()
	}

	/// Whether `id` is the selected node.
	pub fn is(&self, id: &str) -> bool {
		self.id() == Some(id)
	}

	/// Overwrites the selection. Returns whether it changed.
	pub fn select(&mut self, id: &str) -> bool {
		if self.is(id) {
			return false;
		}
		self.0 = Some(id.to_string());
		true
	}

	/// Clears the selection and hands back what was selected.
	pub fn clear(&mut self) -> Option<String> {
		self.0.take()
	}

	/// Puts back a snapshot taken with [`Selection::clear`].
	pub fn restore(&mut self, snapshot: Option<String>) {
		self.0 = snapshot;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn selecting_replaces_previous() {
		let mut s = Selection::of("a");
		assert!(s.select("b"));
		assert_eq!(s.id(), Some("b"));
		assert!(!s.is("a"));
	}

	#[test]
	fn reselecting_is_a_no_op() {
		let mut s = Selection::of("a");
		let before = s.clone();
		assert!(!s.select("a"));
		assert_eq!(s, before);
	}

	#[test]
	fn clear_and_restore_round_trip() {
		let mut s = Selection::of("a");
		let snapshot = s.clear();
		assert_eq!(s.id(), None);
		s.restore(snapshot);
		assert_eq!(s, Selection::of("a"));
	}
}
