/// How much a run prints to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Quiet,   // Nothing at all
    Normal,  // One line per step plus a summary
    Verbose, // Also every captured folder
}

impl OutputMode {
    /// Map a `-v` count to an output mode.
    pub fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => OutputMode::Quiet,
            1 => OutputMode::Normal,
            _ => OutputMode::Verbose,
        }
    }
}
