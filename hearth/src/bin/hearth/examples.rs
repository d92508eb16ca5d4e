use crate::commands::{config, run, shell};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "shell",
            groups: shell::EXAMPLES,
        },
        CommandExample {
            name: "run",
            groups: run::EXAMPLES,
        },
        CommandExample {
            name: "config",
            groups: config::EXAMPLES,
        },
    ]
}
