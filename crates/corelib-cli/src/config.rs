use corelib::builder::{self, AnyStatement, DEFAULT_INDENT};
use corelib::SqlValue;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_path: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!("invalid config file {}: {e:#}", config_path.display())
        })?;

        Ok(Self { config_path, file })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub version: String,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub statements: Vec<StatementConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKindConfig {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKindConfig {
    fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionConfig {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatementConfig {
    pub name: String,
    pub kind: StatementKindConfig,
    pub table: String,
    pub schema: Option<String>,

    // select
    #[serde(default)]
    pub columns: Vec<String>,
    pub order_by: Option<String>,
    pub direction: Option<DirectionConfig>,
    pub top: Option<u64>,
    #[serde(default)]
    pub no_lock: bool,

    // select / update / delete
    #[serde(rename = "where")]
    pub where_clause: Option<String>,

    // insert / update
    #[serde(default)]
    pub values: toml::Table,
    #[serde(default)]
    pub return_id: bool,
    #[serde(default = "default_true")]
    pub force_format: bool,
}

impl ConfigFile {
    /// Parse, expand `${VAR}` references and validate.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.expand_env()?;
        file.validate()?;
        Ok(file)
    }

    fn expand_env(&mut self) -> anyhow::Result<()> {
        self.render.indent = expand_env_vars(&self.render.indent)?;

        for s in &mut self.statements {
            s.name = expand_env_vars(&s.name)?;
            s.table = expand_env_vars(&s.table)?;
            if let Some(schema) = s.schema.as_mut() {
                *schema = expand_env_vars(schema)?;
            }
            if let Some(predicate) = s.where_clause.as_mut() {
                *predicate = expand_env_vars(predicate)?;
            }
            if let Some(column) = s.order_by.as_mut() {
                *column = expand_env_vars(column)?;
            }
            for c in &mut s.columns {
                *c = expand_env_vars(c)?;
            }
            for (_, v) in s.values.iter_mut() {
                if let toml::Value::String(text) = v {
                    *text = expand_env_vars(text)?;
                }
            }
        }

        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }
        if self.render.indent.contains('\n') {
            anyhow::bail!("render.indent must not contain a newline");
        }

        let mut seen = std::collections::HashSet::<&str>::new();
        for s in &self.statements {
            if s.name.trim().is_empty() {
                anyhow::bail!("statements.name must not be empty");
            }
            if !seen.insert(s.name.as_str()) {
                anyhow::bail!("duplicate statements.name: {}", s.name);
            }
            s.validate_fields()?;
        }

        Ok(())
    }
}

impl StatementConfig {
    /// Reject fields that the statement kind does not use.
    fn validate_fields(&self) -> anyhow::Result<()> {
        let kind = self.kind;
        let is_select = kind == StatementKindConfig::Select;
        let writes = matches!(
            kind,
            StatementKindConfig::Insert | StatementKindConfig::Update
        );

        let mut unused: Vec<&str> = Vec::new();
        if !is_select {
            if !self.columns.is_empty() {
                unused.push("columns");
            }
            if self.order_by.is_some() {
                unused.push("order_by");
            }
            if self.direction.is_some() {
                unused.push("direction");
            }
            if self.top.is_some() {
                unused.push("top");
            }
            if self.no_lock {
                unused.push("no_lock");
            }
        }
        if kind == StatementKindConfig::Insert && self.where_clause.is_some() {
            unused.push("where");
        }
        if !writes {
            if !self.values.is_empty() {
                unused.push("values");
            }
            if self.return_id {
                unused.push("return_id");
            }
            if !self.force_format {
                unused.push("force_format");
            }
        }

        if !unused.is_empty() {
            anyhow::bail!(
                "statement {}: {} not valid for a {} statement",
                self.name,
                unused.join(", "),
                kind.as_str()
            );
        }
        Ok(())
    }

    /// Turn the entry into a statement builder. Builder-level problems
    /// (missing table, no values, `top = 0`) surface when it is built.
    pub fn to_statement(&self) -> AnyStatement {
        let schema = self.schema.as_deref().unwrap_or_default();
        let predicate = self.where_clause.as_deref().unwrap_or_default();

        match self.kind {
            StatementKindConfig::Select => {
                let mut qb = builder::select(&self.table)
                    .set_schema(schema)
                    .columns(self.columns.iter().map(String::as_str))
                    .where_clause(predicate)
                    .with_no_lock(self.no_lock);
                if let Some(n) = self.top {
                    qb = qb.top(n);
                }
                if let Some(column) = &self.order_by {
                    qb = qb.order_by(column);
                }
                qb = match self.direction {
                    Some(DirectionConfig::Asc) => qb.ascending(),
                    Some(DirectionConfig::Desc) => qb.descending(),
                    None => qb,
                };
                qb.into()
            }
            StatementKindConfig::Insert => builder::insert(&self.table)
                .set_schema(schema)
                .values(self.values.iter().map(|(k, v)| (k, to_sql_value(v))))
                .return_id(self.return_id)
                .force_format_values(self.force_format)
                .into(),
            StatementKindConfig::Update => builder::update(&self.table)
                .set_schema(schema)
                .set_many(self.values.iter().map(|(k, v)| (k, to_sql_value(v))))
                .where_clause(predicate)
                .return_id(self.return_id)
                .force_format_values(self.force_format)
                .into(),
            StatementKindConfig::Delete => builder::delete(&self.table)
                .set_schema(schema)
                .where_clause(predicate)
                .into(),
        }
    }
}

fn to_sql_value(v: &toml::Value) -> SqlValue {
    match v {
        toml::Value::String(s) => SqlValue::from(s.as_str()),
        toml::Value::Integer(i) => SqlValue::from(*i),
        toml::Value::Float(f) => SqlValue::from(*f),
        toml::Value::Boolean(b) => SqlValue::from(*b),
        toml::Value::Datetime(dt) => SqlValue::other(dt),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            serde_json::to_value(v).map_or_else(|_| SqlValue::other(v), SqlValue::Json)
        }
    }
}

fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}}}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let v = std::env::var(&key)
                .map_err(|_| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}
