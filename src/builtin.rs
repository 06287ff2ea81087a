use crate::command::{ExecutableCommand, LoopStatus};
use crate::lexer::ArgumentList;
use anyhow::{Context, Result, bail};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;

/// Built-in commands known to the shell at compile time.
///
/// Builtins run inside the shell process, which is the only way `cd` can
/// change the working directory inherited by later commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Help,
    Exit,
}

/// Name to handler table, in the order `help` lists them.
pub static BUILTINS: [(&str, Builtin); 3] = [
    ("cd", Builtin::Cd),
    ("help", Builtin::Help),
    ("exit", Builtin::Exit),
];

/// Find the built-in called exactly `name`.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS
        .iter()
        .find(|(builtin_name, _)| *builtin_name == name)
        .map(|&(_, builtin)| builtin)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|&(name, _)| name)
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => "cd",
            Builtin::Help => "help",
            Builtin::Exit => "exit",
        }
    }
}

impl ExecutableCommand for Builtin {
    fn execute(
        &self,
        args: &ArgumentList<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<LoopStatus> {
        let outcome = match self {
            Builtin::Cd => cd(args.operands(), stdout),
            Builtin::Help => help(stdout),
            Builtin::Exit => Ok(LoopStatus::Terminate),
        };
        match outcome {
            Ok(status) => Ok(status),
            Err(err) => {
                writeln!(stderr, "jsh: {err:#}")?;
                Ok(LoopStatus::Continue)
            }
        }
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
struct Cd {
    // Only used to render `cd --help`.
    #[allow(dead_code)]
    #[argh(positional)]
    /// directory to switch to, absolute or relative to the current directory.
    /// Anything after the first operand is ignored.
    operands: Vec<String>,
}

fn cd(operands: &[&str], stdout: &mut dyn Write) -> Result<LoopStatus> {
    // Only the exact `--help` token is usage; any other operand is a path,
    // even when it looks like a flag.
    let Some(&target) = operands.first() else {
        bail!("expected argument to \"cd\"");
    };
    if target == "--help" {
        if let Err(EarlyExit { output, .. }) = Cd::from_args(&["cd"], &["--help"]) {
            write!(stdout, "{output}")?;
        }
        return Ok(LoopStatus::Continue);
    }

    env::set_current_dir(target).with_context(|| target.to_owned())?;
    tracing::debug!(%target, "changed directory");
    Ok(LoopStatus::Continue)
}

fn help(stdout: &mut dyn Write) -> Result<LoopStatus> {
    writeln!(stdout, "J Shell")?;
    writeln!(stdout, "Type program names and arguments, and hit enter.")?;
    writeln!(stdout, "The following are built in:")?;
    for name in names() {
        writeln!(stdout, "\t{name}")?;
    }
    writeln!(stdout, "Use the man command for information on other programs.")?;
    Ok(LoopStatus::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::split_line;
    use crate::reader::Line;
    use crate::test_support::cwd_lock;

    fn run(input: &str) -> (LoopStatus, String, String) {
        let line = Line::from(input);
        let args = split_line(&line);
        let builtin = lookup(args.command().unwrap()).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = builtin.execute(&args, &mut out, &mut err).unwrap();
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(lookup("cd"), Some(Builtin::Cd));
        assert_eq!(lookup("help"), Some(Builtin::Help));
        assert_eq!(lookup("exit"), Some(Builtin::Exit));
        assert_eq!(lookup("ex"), None);
        assert_eq!(lookup("exit2"), None);
        assert_eq!(lookup("CD"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn names_are_unique_and_match_variants() {
        let all: Vec<_> = names().collect();
        assert_eq!(all, vec!["cd", "help", "exit"]);
        for (name, builtin) in BUILTINS {
            assert_eq!(builtin.name(), name);
        }
    }

    #[test]
    fn exit_terminates_with_or_without_arguments() {
        for input in ["exit", "exit 3", "exit --force now"] {
            let (status, out, err) = run(input);
            assert_eq!(status, LoopStatus::Terminate, "{input}");
            assert!(out.is_empty());
            assert!(err.is_empty());
        }
    }

    #[test]
    fn help_lists_every_builtin() {
        let (status, out, err) = run("help");
        assert_eq!(status, LoopStatus::Continue);
        assert!(err.is_empty());
        assert!(out.starts_with("J Shell\n"));
        for name in names() {
            assert!(out.contains(&format!("\t{name}\n")), "missing {name}");
        }
        assert!(out.ends_with("Use the man command for information on other programs.\n"));
    }

    #[test]
    fn help_ignores_arguments() {
        let (plain, _, _) = run("help");
        let (with_args, out, _) = run("help cd");
        assert_eq!(plain, with_args);
        assert!(out.contains("\tcd\n"));
    }

    #[test]
    fn cd_without_argument_reports_usage() {
        let _guard = cwd_lock();
        let before = env::current_dir().unwrap();
        let (status, out, err) = run("cd");
        assert_eq!(status, LoopStatus::Continue);
        assert!(out.is_empty());
        assert_eq!(err, "jsh: expected argument to \"cd\"\n");
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn cd_to_missing_directory_reports_os_error() {
        let _guard = cwd_lock();
        let before = env::current_dir().unwrap();
        let (status, _, err) = run("cd /nonexistent-path-xyz");
        assert_eq!(status, LoopStatus::Continue);
        assert_eq!(err.lines().count(), 1);
        assert!(err.starts_with("jsh: /nonexistent-path-xyz: "), "{err}");
        assert!(err.contains("os error"), "{err}");
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn cd_changes_directory() {
        let _guard = cwd_lock();
        let before = env::current_dir().unwrap();
        let target = env::temp_dir().canonicalize().unwrap();

        let (status, _, err) = run(&format!("cd {} ignored", target.display()));
        let after = env::current_dir().unwrap();
        env::set_current_dir(&before).unwrap();

        assert_eq!(status, LoopStatus::Continue);
        assert!(err.is_empty(), "{err}");
        assert_eq!(after, target);
    }

    #[test]
    fn cd_help_prints_usage() {
        let _guard = cwd_lock();
        let before = env::current_dir().unwrap();
        let (status, out, err) = run("cd --help");
        assert_eq!(status, LoopStatus::Continue);
        assert!(out.contains("Usage: cd"), "{out}");
        assert!(err.is_empty());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    fn in_scratch_dir(name: &str, dirs: &[&str], check: impl FnOnce(&std::path::Path)) {
        let _guard = cwd_lock();
        let before = env::current_dir().unwrap();
        let base = env::temp_dir()
            .join(format!("builtin_tests_{}_{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&base);
        std::fs::create_dir_all(&base).expect("create scratch dir");
        for dir in dirs {
            std::fs::create_dir_all(base.join(dir)).expect("create scratch dir");
        }
        let base = base.canonicalize().unwrap();

        env::set_current_dir(&base).expect("enter scratch dir");
        check(&base);
        // Restore cwd before cleanup even if the check moved it
        env::set_current_dir(&before).ok();
        let _ = std::fs::remove_dir_all(base);
    }

    #[test]
    fn cd_into_directory_named_like_a_word_argh_knows() {
        in_scratch_dir("help", &["help"], |base| {
            let (status, out, err) = run("cd help");
            assert_eq!(status, LoopStatus::Continue);
            assert!(out.is_empty(), "{out}");
            assert!(err.is_empty(), "{err}");
            assert_eq!(env::current_dir().unwrap(), base.join("help"));
        });
    }

    #[test]
    fn cd_into_directories_that_look_like_flags() {
        for dir in ["-x", "-h", "--"] {
            in_scratch_dir("flags", &["-x", "-h", "--"], |base| {
                let (status, _, err) = run(&format!("cd {dir}"));
                assert_eq!(status, LoopStatus::Continue);
                assert!(err.is_empty(), "cd {dir}: {err}");
                assert_eq!(env::current_dir().unwrap(), base.join(dir));
            });
        }
    }

    #[test]
    fn cd_missing_flag_like_directory_reports_os_error() {
        in_scratch_dir("bogus", &[], |base| {
            let (status, out, err) = run("cd --bogus");
            assert_eq!(status, LoopStatus::Continue);
            assert!(out.is_empty());
            assert!(err.starts_with("jsh: --bogus: "), "{err}");
            assert_eq!(env::current_dir().unwrap(), base);
        });
    }
}
