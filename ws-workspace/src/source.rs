use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance family of a workspace's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Git,
    LocalFolder,
    Image,
}

impl SourceKind {
    /// Wire field that makes a source belong to this family.
    pub fn field(self) -> &'static str {
        match self {
            SourceKind::Git => "gitRepository",
            SourceKind::LocalFolder => "localFolder",
            SourceKind::Image => "image",
        }
    }
}

/// Where the content of a workspace comes from.
///
/// A well formed source populates exactly one of the git repository, the local
/// folder or the image. Branch and commit only apply to a git repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkspaceSource {
    /// Repository to clone
    #[serde(skip_serializing_if = "String::is_empty")]
    pub git_repository: String,

    /// Branch to check out
    #[serde(skip_serializing_if = "String::is_empty")]
    pub git_branch: String,

    /// Commit to check out when no branch is given
    #[serde(skip_serializing_if = "String::is_empty")]
    pub git_commit: String,

    /// Folder on the local machine
    #[serde(skip_serializing_if = "String::is_empty")]
    pub local_folder: String,

    /// Container image
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
}

impl WorkspaceSource {
    pub fn git(repository: impl Into<String>) -> Self {
        Self {
            git_repository: repository.into(),
            ..Default::default()
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.git_branch = branch.into();
        self
    }

    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.git_commit = commit.into();
        self
    }

    pub fn local_folder(folder: impl Into<String>) -> Self {
        Self {
            local_folder: folder.into(),
            ..Default::default()
        }
    }

    pub fn image(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    /// Family that wins the display precedence, `None` for an empty source.
    pub fn kind(&self) -> Option<SourceKind> {
        if !self.git_repository.is_empty() {
            Some(SourceKind::Git)
        } else if !self.local_folder.is_empty() {
            Some(SourceKind::LocalFolder)
        } else if !self.image.is_empty() {
            Some(SourceKind::Image)
        } else {
            None
        }
    }

    /// Every populated provenance family, in precedence order.
    pub fn primary_kinds(&self) -> Vec<SourceKind> {
        [
            (SourceKind::Git, &self.git_repository),
            (SourceKind::LocalFolder, &self.local_folder),
            (SourceKind::Image, &self.image),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(kind, _)| kind)
        .collect()
    }

    /// True when no field at all is set, including a stray branch or commit.
    pub(crate) fn is_unset(&self) -> bool {
        *self == WorkspaceSource::default()
    }

    /// True when the canonical string is empty, i.e. no source is configured.
    pub fn is_empty(&self) -> bool {
        self.kind().is_none()
    }
}

/// Canonical identifier: `repo@branch`, `repo@commit`, `repo`, the local folder or the image.
impl fmt::Display for WorkspaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.git_repository.is_empty() {
            if !self.git_branch.is_empty() {
                return write!(f, "{}@{}", self.git_repository, self.git_branch);
            }
            if !self.git_commit.is_empty() {
                return write!(f, "{}@{}", self.git_repository, self.git_commit);
            }
            return f.write_str(&self.git_repository);
        }

        if !self.local_folder.is_empty() {
            return f.write_str(&self.local_folder);
        }

        f.write_str(&self.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = "https://example.com/r.git";

    #[test]
    fn test_branch_wins_over_commit() {
        let source = WorkspaceSource::git(REPO)
            .with_branch("main")
            .with_commit("abc123");
        assert_eq!(source.to_string(), "https://example.com/r.git@main");
    }

    #[test]
    fn test_branch_ignores_other_families() {
        let source = WorkspaceSource {
            local_folder: "/home/u/proj".into(),
            image: "ubuntu:22.04".into(),
            ..WorkspaceSource::git(REPO).with_branch("dev")
        };
        assert_eq!(source.to_string(), format!("{}@dev", REPO));
    }

    #[test]
    fn test_commit_when_no_branch() {
        let source = WorkspaceSource::git(REPO).with_commit("abc123");
        assert_eq!(source.to_string(), format!("{}@abc123", REPO));
    }

    #[test]
    fn test_repository_alone() {
        assert_eq!(WorkspaceSource::git(REPO).to_string(), REPO);
    }

    #[test]
    fn test_local_folder() {
        assert_eq!(
            WorkspaceSource::local_folder("/home/u/proj").to_string(),
            "/home/u/proj"
        );
    }

    #[test]
    fn test_local_folder_beats_image() {
        let source = WorkspaceSource {
            local_folder: "/home/u/proj".into(),
            image: "ubuntu:22.04".into(),
            ..Default::default()
        };
        assert_eq!(source.to_string(), "/home/u/proj");
    }

    #[test]
    fn test_image() {
        assert_eq!(
            WorkspaceSource::image("ubuntu:22.04").to_string(),
            "ubuntu:22.04"
        );
    }

    #[test]
    fn test_empty_source() {
        let source = WorkspaceSource::default();
        assert_eq!(source.to_string(), "");
        assert!(source.is_empty());
        assert_eq!(source.kind(), None);
    }

    #[test]
    fn test_branch_without_repository_is_not_a_source() {
        let source = WorkspaceSource::default().with_branch("main");
        assert_eq!(source.to_string(), "");
        assert!(source.is_empty());
        assert!(source.primary_kinds().is_empty());
    }

    #[test]
    fn test_primary_kinds() {
        let source = WorkspaceSource {
            git_repository: REPO.into(),
            image: "ubuntu:22.04".into(),
            ..Default::default()
        };
        assert_eq!(
            source.primary_kinds(),
            vec![SourceKind::Git, SourceKind::Image]
        );
        assert_eq!(source.kind(), Some(SourceKind::Git));
    }

    #[test]
    fn test_wire_keys() {
        let json = serde_json::to_value(WorkspaceSource::git(REPO).with_commit("abc")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "gitRepository": REPO, "gitCommit": "abc" })
        );
    }
}
