use crate::cli::InitArgs;
use std::path::Path;

const TEMPLATE: &str = r#"
version = "1"

[render]
indent = "    "

[[statements]]
name = "people"
kind = "select" # select | insert | update | delete
table = "dbo.Person"
columns = ["Id", "Name", "Age"]
where = "Age > 0"
order_by = "Id"
direction = "desc" # asc | desc
# top = 10
# no_lock = true

[[statements]]
name = "add_person"
kind = "insert"
table = "Person"
schema = "${DB_SCHEMA}"
return_id = true

[statements.values]
Name = "Ali"
Age = 5

[[statements]]
name = "remove_person"
kind = "delete"
table = "dbo.Person"
where = "Id = 5"
"#;

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    write_template(&args.config)?;
    println!("wrote {}", args.config.display());
    Ok(())
}

fn write_template(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("refusing to overwrite existing file: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("failed to create directory {}: {e}", parent.display())
            })?;
        }
    }

    std::fs::write(path, TEMPLATE.trim_start_matches('\n'))
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))
}
