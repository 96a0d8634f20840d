//! Per-invocation net name generation.

/// Generates fresh adder output names for one synthesis call.
///
/// Each call owns its own generator, so repeated or concurrent runs never
/// share a counter. Names follow `{tag}s_c{column}_{id}` / `{tag}c_c{column}_{id}`.
#[derive(Debug, Default)]
pub struct NameGen {
    next: u32,
}

impl NameGen {
    /// Creates a generator starting at id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh `(sum, carry)` name pair for an adder at `column`.
    pub fn adder_outputs(&mut self, column: u32, tag: &str) -> (String, String) {
        let id = self.next;
        self.next += 1;
        (
            format!("{tag}s_c{column}_{id}"),
            format!("{tag}c_c{column}_{id}"),
        )
    }

    /// Returns how many name pairs have been issued.
    pub fn issued(&self) -> u32 {
        self.next
    }
}
