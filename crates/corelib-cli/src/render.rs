use anyhow::Context;
use corelib::builder::Statement;

use crate::cli::RenderArgs;
use crate::config::{ConfigFile, ProjectConfig};

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let project = ProjectConfig::load(args.config)?;
    tracing::debug!(
        config = %project.config_path.display(),
        statements = project.file.statements.len(),
        "loaded config"
    );

    for (_, sql) in render_all(&project.file, args.only.as_deref())? {
        println!("{sql}\n");
    }
    Ok(())
}

/// Render every statement (or just `only`), returning `(name, sql)` pairs in
/// config order. Stops at the first statement that fails to build.
pub fn render_all(file: &ConfigFile, only: Option<&str>) -> anyhow::Result<Vec<(String, String)>> {
    let selected: Vec<_> = file
        .statements
        .iter()
        .filter(|s| only.is_none_or(|name| s.name == name))
        .collect();

    if selected.is_empty() {
        match only {
            Some(name) => anyhow::bail!("no statement named {name}"),
            None => tracing::warn!("config has no [[statements]] entries"),
        }
    }

    let indent = file.render.indent.as_str();
    selected
        .into_iter()
        .map(|s| -> anyhow::Result<(String, String)> {
            let sql = s
                .to_statement()
                .build_with(indent)
                .with_context(|| format!("failed to render statement {}", s.name))?;
            Ok((s.name.clone(), sql))
        })
        .collect()
}
