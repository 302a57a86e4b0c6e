//! Structural checks for workspace records.
//!
//! Validation collects every problem instead of stopping at the first, so a
//! caller can show the user the complete list. Warnings describe settings that
//! are legal but have no effect.

use std::fmt;

use crate::ide::Ide;
use crate::models::Workspace;
use crate::source::WorkspaceSource;

/// Validation error with actionable fix suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub fix_suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            fix_suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.fix_suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of workspace validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Validate a workspace record.
pub fn validate_workspace(workspace: &Workspace) -> ValidationResult {
    let mut result = ValidationResult::new();

    validate_identity(workspace, &mut result);
    validate_source(&workspace.source, &mut result);
    validate_ide(workspace.ide.ide.as_ref(), &mut result);
    validate_provider(workspace, &mut result);

    if workspace.server.auto_delete && !workspace.server.has_server() {
        result.add_warning("server.autoDelete has no effect without server.serverId");
    }

    result
}

fn validate_identity(workspace: &Workspace, result: &mut ValidationResult) {
    if workspace.id.trim().is_empty() {
        result.add_error(
            ValidationError::new("id", "Workspace id cannot be empty")
                .with_suggestion("Give the workspace a name such as 'my-project'"),
        );
    }

    if workspace.context.trim().is_empty() {
        result.add_error(
            ValidationError::new("context", "Workspace context cannot be empty")
                .with_suggestion("Use the 'default' context unless you manage several"),
        );
    }
}

fn validate_source(source: &WorkspaceSource, result: &mut ValidationResult) {
    let kinds = source.primary_kinds();

    if kinds.is_empty() {
        result.add_error(
            ValidationError::new("source", "No source configured")
                .with_suggestion("Set one of gitRepository, localFolder or image"),
        );
    } else if kinds.len() > 1 {
        let fields: Vec<&str> = kinds.iter().map(|kind| kind.field()).collect();
        result.add_error(
            ValidationError::new(
                "source",
                format!("Multiple sources configured: {}", fields.join(", ")),
            )
            .with_suggestion("Keep exactly one of gitRepository, localFolder or image"),
        );
    }

    if source.git_repository.is_empty() {
        if !source.git_branch.is_empty() {
            result.add_warning("source.gitBranch has no effect without source.gitRepository");
        }
        if !source.git_commit.is_empty() {
            result.add_warning("source.gitCommit has no effect without source.gitRepository");
        }
    } else if !source.git_branch.is_empty() && !source.git_commit.is_empty() {
        result.add_warning(format!(
            "source.gitCommit '{}' is ignored because source.gitBranch '{}' is set",
            source.git_commit, source.git_branch
        ));
    }
}

fn validate_ide(ide: Option<&Ide>, result: &mut ValidationResult) {
    if let Some(Ide::Unrecognized(name)) = ide {
        let known: Vec<String> = Ide::KNOWN.iter().map(ToString::to_string).collect();
        result.add_error(
            ValidationError::new("ide.ide", format!("Unknown IDE '{}'", name))
                .with_suggestion(format!("Use one of: {}", known.join(", "))),
        );
    }
}

fn validate_provider(workspace: &Workspace, result: &mut ValidationResult) {
    let provider = &workspace.provider;
    if provider.name.trim().is_empty() && !provider.options.is_empty() {
        result.add_error(
            ValidationError::new(
                "provider.name",
                "Provider options are set but no provider is named",
            )
            .with_suggestion("Set provider.name or remove provider.options"),
        );
    }
}
