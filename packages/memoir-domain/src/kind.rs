use serde::{Deserialize, Serialize};

/// The closed set of record types the pipeline indexes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
	Contact,
	Note,
	Task,
	LifeEvent,
	Thread,
	ThreadMessage,
}
impl SourceKind {
	pub const ALL: [Self; 6] =
		[Self::Contact, Self::Note, Self::Task, Self::LifeEvent, Self::Thread, Self::ThreadMessage];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Contact => "contact",
			Self::Note => "note",
			Self::Task => "task",
			Self::LifeEvent => "life-event",
			Self::Thread => "thread",
			Self::ThreadMessage => "thread-message",
		}
	}

	/// Unknown tags return `None`; callers treat that as skip, not an error.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"contact" => Some(Self::Contact),
			"note" => Some(Self::Note),
			"task" => Some(Self::Task),
			"life-event" => Some(Self::LifeEvent),
			"thread" => Some(Self::Thread),
			"thread-message" => Some(Self::ThreadMessage),
			_ => None,
		}
	}
}
impl std::fmt::Display for SourceKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
