//! Pointer and drag event results

/// Result of handling a host event.
///
/// Anything other than `Ignored` means the host must suppress the
/// platform's default behaviour for the event (`preventDefault`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, let the platform handle it.
    Ignored,
    /// Event was consumed.
    Consumed,
    /// Event started a drag operation.
    StartDrag,
}

impl EventResult {
    /// Check if the event was handled (consumed or started drag).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }

    /// Check if the host should suppress the platform default.
    pub fn prevents_default(&self) -> bool {
        self.is_handled()
    }
}

/// Drop effect advertised while a row is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    /// The dragged row is moved, not copied.
    #[default]
    Move,
}

impl DropEffect {
    /// Returns the value hosts assign to `dataTransfer.dropEffect`.
    pub fn as_str(self) -> &'static str {
        match self {
            DropEffect::Move => "move",
        }
    }
}
