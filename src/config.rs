/// What `step()` does when the fetched word decodes to no instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownOpcodePolicy {
    /// Report `UnknownOpcode` and leave the program counter on the word.
    #[default]
    Halt,
    /// Log a warning and move past the word.
    Skip,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub unknown_opcode: UnknownOpcodePolicy,
    /// Seed for the `CXNN` random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl ProcessorConfig {
    pub fn skipping_unknown(mut self) -> Self {
        self.unknown_opcode = UnknownOpcodePolicy::Skip;
        self
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
