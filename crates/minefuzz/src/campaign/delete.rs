//! Recursive directory deleter campaign.

use std::fs;
use std::path::PathBuf;

use fastrand::Rng;

use crate::checks::{self, Verdict};
use crate::error::{HarnessError, Result};
use crate::generators::random_label;
use crate::sandbox::Sandbox;
use crate::targets::{MiningTargets, TargetResult};

use super::{Campaign, CampaignKind};

#[derive(Debug, Clone)]
pub struct DeleteInput {
    pub path: PathBuf,
    pub label: String,
    pub existed_before: bool,
}

/// Alternates between a populated directory (even iterations) and a path
/// that does not exist (odd iterations).
#[derive(Debug, Clone)]
pub struct DirectoryDeleterCampaign {
    sandbox: Sandbox,
}

impl DirectoryDeleterCampaign {
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }

    fn target_path(&self, iteration: usize) -> PathBuf {
        if iteration % 2 == 0 {
            self.sandbox.path(format!("dir_{}", iteration))
        } else {
            self.sandbox.path(format!("nonexistent_{}", iteration))
        }
    }
}

impl Campaign for DirectoryDeleterCampaign {
    type Input = DeleteInput;
    type Output = ();

    fn kind(&self) -> CampaignKind {
        CampaignKind::DirectoryDeleter
    }

    fn prepare(&self, rng: &mut Rng, iteration: usize) -> Result<DeleteInput> {
        let path = self.target_path(iteration);
        if iteration % 2 == 0 {
            let io_err = |source| HarnessError::Io {
                path: path.clone(),
                source,
            };
            fs::create_dir_all(&path).map_err(io_err)?;
            fs::write(path.join("dummy.txt"), "dummy").map_err(io_err)?;
        }

        Ok(DeleteInput {
            existed_before: path.exists(),
            label: random_label(rng),
            path,
        })
    }

    fn fixture_inputs(&self, iteration: usize) -> String {
        format!("path={}", self.target_path(iteration).display())
    }

    fn invoke(&self, targets: &dyn MiningTargets, input: &DeleteInput) -> TargetResult<()> {
        targets.delete_repo(&input.path, &input.label)
    }

    fn check(&self, input: &DeleteInput, _output: &()) -> Verdict {
        checks::check_deleted(&input.path, &input.label, input.existed_before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_even_iterations_are_populated() {
        let dir = TempDir::new().unwrap();
        let campaign = DirectoryDeleterCampaign::new(Sandbox::new(dir.path()));
        let mut rng = Rng::with_seed(1);

        let populated = campaign.prepare(&mut rng, 0).unwrap();
        assert!(populated.existed_before);
        assert!(populated.path.join("dummy.txt").is_file());

        let missing = campaign.prepare(&mut rng, 1).unwrap();
        assert!(!missing.existed_before);
        assert!(missing.path.ends_with("nonexistent_1"));
    }

    #[test]
    fn test_fixture_inputs_name_the_path() {
        let campaign = DirectoryDeleterCampaign::new(Sandbox::new("/tmp/sandbox"));
        assert_eq!(campaign.fixture_inputs(4), "path=/tmp/sandbox/dir_4");
        assert_eq!(campaign.fixture_inputs(5), "path=/tmp/sandbox/nonexistent_5");
    }
}
