use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use hearth::SocialNetwork;

use crate::examples::ExampleGroup;
use crate::output::OutputManager;
use crate::session::{Flow, Session};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Interactive session",
        commands: &["hearth shell", "hearth --output json shell"],
    },
    ExampleGroup {
        title: "Piped input",
        commands: &["printf 'add-user 1 Ann\\nusers\\n' | hearth shell"],
    },
];

/// Read commands from stdin until `exit` or end of input.
pub fn handle_shell(network: SocialNetwork, output: &OutputManager) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        output.info("Type 'help' for commands, 'exit' to leave.");
    }

    let mut session = Session::new(network, output);
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{}", output.prompt());
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;

        match session.execute_line(&line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) => output.error(&err.to_string()),
        }
    }

    output.verbose(&format!("session ended with {} users", session.network().len()));
    Ok(())
}
