use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use hearth::SocialNetwork;

use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::session::{Flow, Session};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Run a script",
        commands: &["hearth run seed.hearth", "hearth --quiet run seed.hearth"],
    },
    ExampleGroup {
        title: "Continue past failing lines",
        commands: &["hearth run seed.hearth --keep-going"],
    },
];

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script file with one shell command per line
    pub script: PathBuf,

    /// Report failing lines and keep executing
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub executed: usize,
    pub failed: usize,
}

pub fn handle_run(args: RunArgs, network: SocialNetwork, output: &OutputManager) -> Result<()> {
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    output.verbose(&format!("running {}", args.script.display()));

    let mut session = Session::new(network, output);
    let summary = run_script(&mut session, &script, args.keep_going)?;

    if summary.failed > 0 {
        bail!("{} of {} commands failed", summary.failed, summary.executed);
    }
    output.verbose(&format!("{} commands executed", summary.executed));
    Ok(())
}

/// Execute `script` line by line. Without `keep_going` the first failing
/// line aborts the run.
pub fn run_script(session: &mut Session<'_>, script: &str, keep_going: bool) -> Result<ScriptSummary> {
    let mut summary = ScriptSummary::default();
    let output = session.output();

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;
        let result = session.execute_line(line);
        if !line.trim().is_empty() && !line.trim_start().starts_with('#') {
            summary.executed += 1;
        }

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) => {
                output.error(&format!("line {line_no}: {err}"));
                summary.failed += 1;
                if !keep_going {
                    bail!("script stopped at line {line_no}");
                }
            }
        }
    }
    Ok(summary)
}
