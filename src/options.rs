use std::borrow::Cow;

/// The empty-state text shown when there are no items, unless configured otherwise.
pub const DEFAULT_PLACEHOLDER: &str = "No items yet";

/// How a surface attaches a committed element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitMode {
	/// Assemble the elements off-surface and insert them in one step (a single layout flush).
	Batched,
	/// Insert the elements one at a time, each of which may cause a layout flush.
	Incremental,
}
impl Default for CommitMode {
	fn default() -> Self {
		Self::Batched
	}
}

/// Rendering configuration shared by renderers and surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
	pub placeholder: Option<Cow<'static, str>>,
	pub commit_mode: CommitMode,
}
impl Default for Options {
	fn default() -> Self {
		Self {
			placeholder: Some(Cow::Borrowed(DEFAULT_PLACEHOLDER)),
			commit_mode: CommitMode::default(),
		}
	}
}
impl Options {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_placeholder(mut self, placeholder: impl Into<Cow<'static, str>>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	/// Commits an empty element list instead of a placeholder when there are no items.
	#[must_use]
	pub fn without_placeholder(mut self) -> Self {
		self.placeholder = None;
		self
	}

	#[must_use]
	pub fn with_commit_mode(mut self, commit_mode: CommitMode) -> Self {
		self.commit_mode = commit_mode;
		self
	}
}
