//! Scanner configuration

/// How the end of a `<? ... ?>` instruction body is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstructionTerminator {
    /// Stop at the first `?>` sequence
    #[default]
    Sequence,
    /// Stop at the first byte that is `?` or is followed by `>`, whichever
    /// comes first, then require `?>`. Rejects `<?a>b?>` and `<?a?b?>`.
    Legacy,
}

/// Options controlling edge-case behavior of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub instruction_terminator: InstructionTerminator,
    /// Require the byte after a self-closing `/` to be `>`.
    ///
    /// When disabled the two bytes are skipped unchecked, so `<a/x` scans as a
    /// self-closing tag and `x` is lost.
    pub strict_self_close: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            instruction_terminator: InstructionTerminator::Sequence,
            strict_self_close: true,
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Legacy instruction terminator and unchecked self-close
    pub fn legacy() -> Self {
        Self {
            instruction_terminator: InstructionTerminator::Legacy,
            strict_self_close: false,
        }
    }

    pub fn instruction_terminator(mut self, terminator: InstructionTerminator) -> Self {
        self.instruction_terminator = terminator;
        self
    }

    pub fn strict_self_close(mut self, strict: bool) -> Self {
        self.strict_self_close = strict;
        self
    }
}
