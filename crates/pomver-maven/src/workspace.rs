//! Locating and loading pom.xml files under a project root.

use crate::error::{MavenError, Result};
use crate::pom::{PomFile, parse_pom};
use std::fs;
use std::path::{Path, PathBuf};

/// A pom.xml found under the workspace root.
#[derive(Debug, Clone)]
pub struct WorkspacePom {
    pub path: PathBuf,
    /// Path components below the root; the root's own pom.xml has depth 1.
    pub depth: usize,
    pub pom: PomFile,
}

/// Collects pom.xml paths under `root`, shallowest first.
///
/// Dot-directories are skipped, as is any path whose root-relative form
/// contains one of the excluded substrings (generated trees like
/// `/dalgen` live there).
pub fn find_pom_files(root: &Path, excluded: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_poms(root, root, excluded, &mut found)?;
    found.sort_by(|a, b| {
        let depth_a = a.components().count();
        let depth_b = b.components().count();
        depth_a.cmp(&depth_b).then_with(|| a.cmp(b))
    });
    Ok(found)
}

fn collect_poms(
    root: &Path,
    dir: &Path,
    excluded: &[String],
    found: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if path.is_dir() {
            if name.starts_with('.') || is_excluded(root, &path, excluded) {
                continue;
            }
            collect_poms(root, &path, excluded, found)?;
        } else if name == "pom.xml" && !is_excluded(root, &path, excluded) {
            found.push(path);
        }
    }
    Ok(())
}

fn is_excluded(root: &Path, path: &Path, excluded: &[String]) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    let relative = format!("/{}", relative.to_string_lossy().replace('\\', "/"));
    excluded.iter().any(|pattern| relative.contains(pattern.as_str()))
}

/// Finds and parses every pom.xml under `root`, shallowest first.
pub fn load_workspace(root: &Path, excluded: &[String]) -> Result<Vec<WorkspacePom>> {
    let mut poms = Vec::new();
    for path in find_pom_files(root, excluded)? {
        let content = fs::read_to_string(&path)?;
        let pom = parse_pom(&content).map_err(|e| MavenError::InvalidPom {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let depth = path
            .strip_prefix(root)
            .map_or(usize::MAX, |p| p.components().count());
        poms.push(WorkspacePom { path, depth, pom });
    }
    Ok(poms)
}

/// The aggregator pom the rest of the tree inherits from: the first
/// `<packaging>pom</packaging>` entry, else the shallowest pom.
pub fn root_pom(poms: &[WorkspacePom]) -> Option<&WorkspacePom> {
    poms.iter()
        .find(|p| p.pom.is_aggregator())
        .or_else(|| poms.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_POM: &str = r"<project>
        <groupId>com.acme.platform</groupId>
        <artifactId>platform-parent</artifactId>
        <version>1.9.3.RELEASE</version>
        <packaging>pom</packaging>
        <modules>
            <module>platform-api</module>
        </modules>
    </project>";

    const MODULE_POM: &str = r"<project>
        <parent>
            <groupId>com.acme.platform</groupId>
            <artifactId>platform-parent</artifactId>
            <version>1.9.3.RELEASE</version>
        </parent>
        <artifactId>platform-api</artifactId>
    </project>";

    fn write_pom(dir: &Path, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("pom.xml"), content).unwrap();
    }

    #[test]
    fn test_find_pom_files_sorted_by_depth() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_pom(root, ROOT_POM);
        write_pom(&root.join("platform-api"), MODULE_POM);
        write_pom(&root.join("platform-api").join("nested"), MODULE_POM);
        write_pom(&root.join("alpha"), MODULE_POM);

        let found = find_pom_files(root, &[]).unwrap();
        assert_eq!(found.len(), 4);
        assert_eq!(found[0], root.join("pom.xml"));
        assert_eq!(found[1], root.join("alpha").join("pom.xml"));
        assert_eq!(found[2], root.join("platform-api").join("pom.xml"));
        assert_eq!(
            found[3],
            root.join("platform-api").join("nested").join("pom.xml")
        );
    }

    #[test]
    fn test_find_pom_files_skips_excluded_and_hidden() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_pom(root, ROOT_POM);
        write_pom(&root.join("dalgen").join("generated"), MODULE_POM);
        write_pom(&root.join("api").join("dalgen"), MODULE_POM);
        write_pom(&root.join(".hidden"), MODULE_POM);
        write_pom(&root.join("api").join("real"), MODULE_POM);

        let found = find_pom_files(root, &["/dalgen".to_string()]).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], root.join("pom.xml"));
        assert_eq!(found[1], root.join("api").join("real").join("pom.xml"));
    }

    #[test]
    fn test_load_workspace_parses_poms() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_pom(root, ROOT_POM);
        write_pom(&root.join("platform-api"), MODULE_POM);

        let poms = load_workspace(root, &[]).unwrap();
        assert_eq!(poms.len(), 2);
        assert_eq!(poms[0].depth, 1);
        assert_eq!(poms[1].depth, 2);
        assert_eq!(poms[0].pom.artifact_id.as_deref(), Some("platform-parent"));
        assert_eq!(poms[1].pom.artifact_id.as_deref(), Some("platform-api"));
    }

    #[test]
    fn test_load_workspace_reports_invalid_pom() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("pom.xml"), "<project><broken></project>").unwrap();

        let result = load_workspace(root, &[]);
        assert!(matches!(result, Err(MavenError::InvalidPom { .. })));
    }

    #[test]
    fn test_root_pom_prefers_aggregator() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_pom(root, ROOT_POM);
        write_pom(&root.join("platform-api"), MODULE_POM);

        let poms = load_workspace(root, &[]).unwrap();
        let found = root_pom(&poms).unwrap();
        assert_eq!(found.pom.artifact_id.as_deref(), Some("platform-parent"));
    }

    #[test]
    fn test_root_pom_falls_back_to_shallowest() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_pom(root, MODULE_POM);

        let poms = load_workspace(root, &[]).unwrap();
        let found = root_pom(&poms).unwrap();
        assert_eq!(found.pom.artifact_id.as_deref(), Some("platform-api"));
    }

    #[test]
    fn test_root_pom_empty_workspace() {
        assert!(root_pom(&[]).is_none());
    }
}
