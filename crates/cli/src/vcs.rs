//! Version-control operations used by the chronos driver

use crate::error::{Error, Result};
use git2::build::CheckoutBuilder;
use git2::Repository;
use std::path::Path;

/// The version-control operations the run driver needs
pub trait Vcs {
    /// Commit id currently checked out
    fn current_revision(&self, repo_path: &Path) -> Result<String>;

    /// Check out a branch ref, commit id or relative revision such as `abc123~2`
    fn checkout(&self, repo_path: &Path, reference: &str) -> Result<()>;

    /// Reference that `checkout` can use to return to the current state
    fn restore_point(&self, repo_path: &Path) -> Result<String> {
        self.current_revision(repo_path)
    }
}

/// [`Vcs`] backed by libgit2
#[derive(Debug, Default, Clone, Copy)]
pub struct Git;

impl Vcs for Git {
    fn current_revision(&self, repo_path: &Path) -> Result<String> {
        let repo = Repository::open(repo_path)?;
        let commit = repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn checkout(&self, repo_path: &Path, reference: &str) -> Result<()> {
        let repo = Repository::open(repo_path)?;

        let commit = repo.revparse_single(reference)?.peel_to_commit()?;

        let mut options = CheckoutBuilder::new();
        options.safe();
        repo.checkout_tree(commit.as_object(), Some(&mut options))?;

        if reference.starts_with("refs/heads/") {
            repo.set_head(reference)?;
        } else {
            repo.set_head_detached(commit.id())?;
        }

        Ok(())
    }

    /// The branch ref when HEAD is on a branch, so restoring does not leave a detached HEAD
    fn restore_point(&self, repo_path: &Path) -> Result<String> {
        let repo = Repository::open(repo_path)?;
        let head = repo.head()?;

        if head.is_branch() {
            if let Some(name) = head.name() {
                return Ok(name.to_string());
            }
        }

        let commit = head
            .peel_to_commit()
            .map_err(|_| Error::Git(git2::Error::from_str("HEAD does not point to a commit")))?;
        Ok(commit.id().to_string())
    }
}
