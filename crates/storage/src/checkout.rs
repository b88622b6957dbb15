//! Checkout tier: scripts committed on the branch itself.

use std::path::Path;

use git2::{ErrorCode, ObjectType, Repository};
use mbdefaults_core::{BranchRun, ConfigOrigin, NamedConfig};
use tracing::{debug, instrument};

use super::{validate_id, ConfigStore, Result, StoreError};

/// Reads the snippet from the git tree of the branch's checkout.
///
/// The revision defaults to the branch name. A run without a checkout, a
/// revision that does not resolve, or a tree without the file are all
/// misses. A checkout path that is not a git repository is an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckoutTier;

impl CheckoutTier {
    /// Create the tier.
    pub fn new() -> Self {
        Self
    }

    fn read_blob(repo: &Repository, revision: &str, id: &str) -> std::result::Result<Option<Vec<u8>>, git2::Error> {
        let commit = repo.revparse_single(revision)?.peel_to_commit()?;
        let tree = commit.tree()?;
        let entry = tree.get_path(Path::new(id))?;
        if entry.kind() != Some(ObjectType::Blob) {
            return Ok(None);
        }
        let blob = entry.to_object(repo)?.peel_to_blob()?;
        Ok(Some(blob.content().to_vec()))
    }
}

impl ConfigStore for CheckoutTier {
    #[instrument(skip(self, run), fields(job = %run.job))]
    fn lookup(&self, run: &BranchRun, id: &str) -> Result<Option<NamedConfig>> {
        validate_id(id)?;

        let Some(checkout) = &run.checkout else {
            debug!("Run has no checkout");
            return Ok(None);
        };
        let revision = checkout.revision.as_deref().unwrap_or(&run.branch);

        // A checkout that cannot be opened is misconfigured, not a miss.
        let repo = Repository::open(&checkout.repository)?;

        let bytes = match Self::read_blob(&repo, revision, id) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(None),
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(revision, error = %e, "Not present in checkout");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::Git(e)),
        };

        let content = String::from_utf8(bytes).map_err(|_| StoreError::NotUtf8(id.to_string()))?;
        Ok(Some(NamedConfig::new(id, content, ConfigOrigin::Checkout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Commit, Signature};
    use mbdefaults_core::Checkout;

    fn commit_file(repo: &Repository, name: &str, content: &str) -> git2::Oid {
        commit_bytes(repo, name, content.as_bytes())
    }

    fn commit_bytes(repo: &Repository, name: &str, content: &[u8]) -> git2::Oid {
        let workdir = repo.workdir().unwrap();
        std::fs::write(workdir.join(name), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

        let sig = Signature::now("ci", "ci@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, "update", &tree, &parents).unwrap()
    }

    fn branch_at(repo: &Repository, name: &str, oid: git2::Oid) {
        let commit = repo.find_commit(oid).unwrap();
        repo.branch(name, &commit, true).unwrap();
    }

    #[test]
    fn test_reads_script_from_branch_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let oid = commit_file(&repo, "Jenkinsfile", "pipeline { stages {} }");
        branch_at(&repo, "feature", oid);

        let run = BranchRun::new("app/feature", "feature", 1).with_checkout(Checkout::new(dir.path()));
        let config = CheckoutTier::new().lookup(&run, "Jenkinsfile").unwrap().unwrap();

        assert_eq!(config.content, "pipeline { stages {} }");
        assert_eq!(config.origin, ConfigOrigin::Checkout);
    }

    #[test]
    fn test_pinned_revision_wins_over_branch() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let first = commit_file(&repo, "Jenkinsfile", "v1");
        let second = commit_file(&repo, "Jenkinsfile", "v2");
        branch_at(&repo, "feature", second);

        let run = BranchRun::new("app/feature", "feature", 1)
            .with_checkout(Checkout::new(dir.path()).at(first.to_string()));
        let config = CheckoutTier::new().lookup(&run, "Jenkinsfile").unwrap().unwrap();

        assert_eq!(config.content, "v1");
    }

    #[test]
    fn test_missing_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let oid = commit_file(&repo, "README", "hello");
        branch_at(&repo, "feature", oid);

        let run = BranchRun::new("app/feature", "feature", 1).with_checkout(Checkout::new(dir.path()));
        assert!(CheckoutTier::new().lookup(&run, "Jenkinsfile").unwrap().is_none());
    }

    #[test]
    fn test_unknown_branch_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_file(&repo, "Jenkinsfile", "pipeline {}");

        let run = BranchRun::new("app/gone", "gone", 1).with_checkout(Checkout::new(dir.path()));
        assert!(CheckoutTier::new().lookup(&run, "Jenkinsfile").unwrap().is_none());
    }

    #[test]
    fn test_checkout_that_is_not_a_repository_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let run = BranchRun::new("app/main", "main", 1).with_checkout(Checkout::new(dir.path()));
        assert!(matches!(
            CheckoutTier::new().lookup(&run, "Jenkinsfile"),
            Err(StoreError::Git(_))
        ));
    }

    #[test]
    fn test_checkout_path_that_does_not_exist_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let run = BranchRun::new("app/main", "main", 1)
            .with_checkout(Checkout::new(dir.path().join("missing")));
        assert!(matches!(
            CheckoutTier::new().lookup(&run, "Jenkinsfile"),
            Err(StoreError::Git(_))
        ));
    }

    #[test]
    fn test_rejects_escaping_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let oid = commit_file(&repo, "Jenkinsfile", "pipeline {}");
        branch_at(&repo, "feature", oid);

        let run = BranchRun::new("app/feature", "feature", 1).with_checkout(Checkout::new(dir.path()));
        assert!(matches!(
            CheckoutTier::new().lookup(&run, "../Jenkinsfile"),
            Err(StoreError::InvalidId(_))
        ));
    }

    #[test]
    fn test_non_utf8_blob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let oid = commit_bytes(&repo, "Jenkinsfile", &[0xff, 0xfe, 0x00, 0x41]);
        branch_at(&repo, "feature", oid);

        let run = BranchRun::new("app/feature", "feature", 1).with_checkout(Checkout::new(dir.path()));
        assert!(matches!(
            CheckoutTier::new().lookup(&run, "Jenkinsfile"),
            Err(StoreError::NotUtf8(_))
        ));
    }

    #[test]
    fn test_run_without_checkout_is_a_miss() {
        let run = BranchRun::new("app/main", "main", 1);
        assert!(CheckoutTier::new().lookup(&run, "Jenkinsfile").unwrap().is_none());
    }
}
