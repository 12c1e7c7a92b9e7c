#[derive(Debug, Clone)]
pub struct Config {
    /// Input names in merge order. `-` stands for standard input.
    pub inputs: Vec<String>,
    /// Output name. `-` stands for standard output.
    pub output: String,
    /// 0 shows the summary, 1 only warnings, 2 and up only errors.
    pub quiet: u8,
    /// 1 adds per-source details, 2 and up adds every dropped line.
    pub verbose: u8,
    pub no_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: vec![String::from("-")],
            output: String::from("-"),
            quiet: 0,
            verbose: 0,
            no_color: false,
        }
    }
}
