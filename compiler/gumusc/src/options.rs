use bitflags::bitflags;

bitflags! {
    /// What a run does besides executing the program.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RunOptions: u8 {
        /// Print the resolved AST as JSON instead of running.
        const DUMP_AST = 1 << 0;
        /// Print the globals frame after the run.
        const DUMP_MEMORY = 1 << 1;
        /// Attach the line-stepping protocol on stdin/stdout.
        const DEBUG = 1 << 2;
        /// Collect after the run and print the collector report.
        const GC_REPORT = 1 << 3;
        /// Print how long a file took to run.
        const TIMING = 1 << 4;
    }
}

impl RunOptions {
    /// Map one command-line flag; `None` for anything that is not a flag
    /// this driver knows.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--dump-ast" => Some(RunOptions::DUMP_AST),
            "--dump-memory" => Some(RunOptions::DUMP_MEMORY),
            "--debug" | "--hata-ayikla" => Some(RunOptions::DEBUG | RunOptions::TIMING),
            "--gc-report" => Some(RunOptions::GC_REPORT),
            _ => None,
        }
    }
}
