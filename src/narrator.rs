use tracing::info;

/// Receives human-readable descriptions of what the engine did.
///
/// Purely observational: nothing the narrator does feeds back into the game.
pub trait Narrator {
    fn narrate(&mut self, message: &str);
}

/// Forwards every message to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNarrator;

impl Narrator for TracingNarrator {
    fn narrate(&mut self, message: &str) {
        info!(target: "machikoro::narration", "{message}");
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Narrator for Silent {
    fn narrate(&mut self, _message: &str) {}
}

/// Keeps every message, in order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl Narrator for Transcript {
    fn narrate(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}
