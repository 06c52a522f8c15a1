/// Execution classes used to tag spawned work for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// A request/response exchange driven on the transport runtime.
	Exchange,
	/// Delivery of a completed outcome to a callback.
	Notify,
	/// Blocking work executed on the blocking pool or a helper thread.
	Blocking,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Exchange => "exchange",
			Self::Notify => "notify",
			Self::Blocking => "blocking",
		}
	}
}
