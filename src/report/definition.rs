//! Report definition model

use std::fmt;
use std::path::PathBuf;

/// Declared type of a report parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamType {
    #[default]
    String,
    Number,
    Date,
    Boolean,
}

impl std::str::FromStr for ParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STRING" => Ok(ParamType::String),
            "NUMBER" => Ok(ParamType::Number),
            "DATE" => Ok(ParamType::Date),
            "BOOLEAN" => Ok(ParamType::Boolean),
            _ => Err(format!("Unknown parameter type: {}", s)),
        }
    }
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "STRING",
            ParamType::Number => "NUMBER",
            ParamType::Date => "DATE",
            ParamType::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display format of a report output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatType {
    #[default]
    Text,
    Number,
    Date,
    Currency,
    Percentage,
}

impl std::str::FromStr for FormatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TEXT" => Ok(FormatType::Text),
            "NUMBER" => Ok(FormatType::Number),
            "DATE" => Ok(FormatType::Date),
            "CURRENCY" => Ok(FormatType::Currency),
            "PERCENTAGE" => Ok(FormatType::Percentage),
            _ => Err(format!("Unknown column format: {}", s)),
        }
    }
}

impl FormatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatType::Text => "TEXT",
            FormatType::Number => "NUMBER",
            FormatType::Date => "DATE",
            FormatType::Currency => "CURRENCY",
            FormatType::Percentage => "PERCENTAGE",
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared report parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportParam {
    /// Placeholder name without the leading colon
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
}

impl ReportParam {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// An output column of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportColumn {
    /// Column name as produced by the query
    pub field_name: String,
    /// Header shown to users
    pub display_name: String,
    pub format_type: FormatType,
}

impl ReportColumn {
    /// Column whose display name is the field name, formatted as text
    pub fn new(field_name: impl Into<String>) -> Self {
        let field_name = field_name.into();
        Self {
            display_name: field_name.clone(),
            field_name,
            format_type: FormatType::Text,
        }
    }
}

/// A parameterized SQL report
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportDefinition {
    pub name: String,
    pub description: Option<String>,
    /// SQL text with `:name` placeholders
    pub sql: String,
    pub params: Vec<ReportParam>,
    pub columns: Vec<ReportColumn>,
    /// File the definition was read from, if any
    pub source_file: Option<PathBuf>,
}

impl ReportDefinition {
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            ..Default::default()
        }
    }

    /// Declared parameter names, in declaration order
    pub fn declared_param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    /// Label used in messages: the source file if known, else the name
    pub fn label(&self) -> String {
        match &self.source_file {
            Some(path) => path.display().to_string(),
            None => self.name.clone(),
        }
    }
}
