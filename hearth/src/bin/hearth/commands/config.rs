use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{Cell, Table};
use hearth::HearthConfig;
use serde::Serialize;

use crate::examples::ExampleGroup;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, themed_table};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Show the effective configuration",
        commands: &["hearth config", "hearth --output json config"],
    },
    ExampleGroup {
        title: "Use a specific file",
        commands: &["hearth --config ./hearth.toml config", "HEARTH_CONFIG=/etc/hearth.toml hearth config"],
    },
];

#[derive(Debug, Serialize)]
struct ConfigView<'a> {
    source: Option<&'a Path>,
    #[serde(flatten)]
    config: &'a HearthConfig,
}

impl ConfigView<'_> {
    fn settings(&self) -> Vec<(&'static str, String)> {
        let network = &self.config.network;
        let limits = &self.config.limits;
        vec![
            ("network.fan_out_posts", network.fan_out_posts.to_string()),
            ("network.notify_on_friendship", network.notify_on_friendship.to_string()),
            ("network.notify_on_comment", network.notify_on_comment.to_string()),
            ("limits.max_display_name_len", limits.max_display_name_len.to_string()),
            ("limits.max_bio_len", limits.max_bio_len.to_string()),
            ("limits.max_body_len", limits.max_body_len.to_string()),
        ]
    }
}

impl TableDisplay for ConfigView<'_> {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Setting", "Value"]);
        for (key, value) in self.settings() {
            table.add_row(vec![Cell::new(key), Cell::new(value)]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.settings()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn handle_config(config: &HearthConfig, source: Option<&PathBuf>, output: &OutputManager) -> Result<()> {
    match source {
        Some(path) => output.verbose(&format!("configuration loaded from {}", path.display())),
        None => output.verbose("no configuration file found, showing defaults"),
    }
    output.display(&ConfigView {
        source: source.map(PathBuf::as_path),
        config,
    })
}
