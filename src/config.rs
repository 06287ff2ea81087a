use argh::FromArgs;

pub const DEFAULT_PROMPT: &str = "jsh > ";

#[derive(FromArgs, Debug, Clone, PartialEq, Eq)]
/// A minimal interactive shell: built-ins `cd`, `help` and `exit`, everything
/// else is run as an external program.
pub struct Options {
    #[argh(option, default = "String::from(DEFAULT_PROMPT)")]
    /// text printed before each command line.
    pub prompt: String,

    #[argh(switch, short = 'q')]
    /// do not print the welcome banner.
    pub quiet: bool,

    #[argh(switch)]
    /// read plain lines from standard input even when it is a terminal.
    pub plain: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_owned(),
            quiet: false,
            plain: false,
        }
    }
}
