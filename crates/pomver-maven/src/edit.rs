//! Textual pom.xml edits.
//!
//! Edits are line-based: exactly one line changes and everything else,
//! indentation and trailing newlines included, passes through untouched.
//! This keeps diffs minimal and never reformats a file the way a full XML
//! rewrite would.

use crate::error::{MavenError, Result};

const SKIP_OPEN: [&str; 4] = [
    "<dependencies>",
    "<dependencyManagement>",
    "<build>",
    "<profiles>",
];
const SKIP_CLOSE: [&str; 4] = [
    "</dependencies>",
    "</dependencyManagement>",
    "</build>",
    "</profiles>",
];

/// Replaces the project-level `<version>` value.
///
/// Subtrees that hold other versions (`<parent>`, `<dependencies>`,
/// `<dependencyManagement>`, `<build>`, `<profiles>`) are skipped. A pom
/// without an own `<version>` inherits it from its parent, so the
/// `<parent>` block's copy is rewritten instead. A pom with neither is an
/// error.
pub fn replace_project_version(content: &str, new_version: &str) -> Result<String> {
    if let Some(updated) = rewrite_version_line(content, new_version, false) {
        return Ok(updated);
    }
    if let Some(updated) = rewrite_version_line(content, new_version, true) {
        return Ok(updated);
    }
    Err(MavenError::VersionNotFound)
}

fn rewrite_version_line(content: &str, new_version: &str, in_parent: bool) -> Option<String> {
    let mut out = String::with_capacity(content.len() + new_version.len());
    let mut replaced = false;
    let mut parent_depth = 0usize;
    let mut skip_depth = 0usize;

    for line in content.split_inclusive('\n') {
        if replaced {
            out.push_str(line);
            continue;
        }

        parent_depth += line.matches("<parent>").count();
        for open in SKIP_OPEN {
            skip_depth += line.matches(open).count();
        }

        let eligible = skip_depth == 0 && (parent_depth > 0) == in_parent;
        match eligible
            .then(|| set_tag_value(line, "version", new_version))
            .flatten()
        {
            Some(updated) => {
                out.push_str(&updated);
                replaced = true;
            }
            None => {
                out.push_str(line);
                parent_depth = parent_depth.saturating_sub(line.matches("</parent>").count());
                for close in SKIP_CLOSE {
                    skip_depth = skip_depth.saturating_sub(line.matches(close).count());
                }
            }
        }
    }

    replaced.then_some(out)
}

/// Replaces the `<version>` value of the first `<dependency>` block
/// matching the given coordinates, in `<dependencies>` or
/// `<dependencyManagement>`.
pub fn replace_dependency_version(
    content: &str,
    group_id: &str,
    artifact_id: &str,
    new_version: &str,
) -> Result<String> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    let mut outside_depth = 0usize;
    let mut in_dep = false;
    let mut dep_group: Option<&str> = None;
    let mut dep_artifact: Option<&str> = None;
    let mut version_at: Option<usize> = None;

    for (index, line) in lines.iter().enumerate() {
        // <build> and <profiles> have their own dependency blocks that the
        // parser does not collect; leave them alone here too.
        outside_depth += line.matches("<build>").count() + line.matches("<profiles>").count();
        if outside_depth > 0 {
            outside_depth = outside_depth
                .saturating_sub(line.matches("</build>").count() + line.matches("</profiles>").count());
            continue;
        }

        if line.contains("<dependency>") {
            in_dep = true;
            dep_group = None;
            dep_artifact = None;
            version_at = None;
        }
        if !in_dep {
            continue;
        }

        if dep_group.is_none() {
            dep_group = tag_value(line, "groupId");
        }
        if dep_artifact.is_none() {
            dep_artifact = tag_value(line, "artifactId");
        }
        if version_at.is_none() && line.contains("<version>") {
            version_at = Some(index);
        }

        if line.contains("</dependency>") {
            in_dep = false;
            if dep_group == Some(group_id) && dep_artifact == Some(artifact_id) {
                let Some(at) = version_at else {
                    return Err(MavenError::VersionNotFound);
                };
                let updated = set_tag_value(lines[at], "version", new_version)
                    .ok_or(MavenError::VersionNotFound)?;
                let mut out = String::with_capacity(content.len() + new_version.len());
                for (i, l) in lines.iter().enumerate() {
                    if i == at {
                        out.push_str(&updated);
                    } else {
                        out.push_str(l);
                    }
                }
                return Ok(out);
            }
        }
    }

    Err(MavenError::DependencyNotFound {
        group_id: group_id.to_string(),
        artifact_id: artifact_id.to_string(),
    })
}

/// Replaces the value of `<key>...</key>` inside `<properties>`.
pub fn replace_property(content: &str, key: &str, new_value: &str) -> Result<String> {
    let mut out = String::with_capacity(content.len() + new_value.len());
    let mut in_properties = false;
    let mut replaced = false;

    for line in content.split_inclusive('\n') {
        if line.contains("<properties>") {
            in_properties = true;
        }
        if in_properties
            && !replaced
            && let Some(updated) = set_tag_value(line, key, new_value)
        {
            out.push_str(&updated);
            replaced = true;
        } else {
            out.push_str(line);
        }
        if line.contains("</properties>") {
            in_properties = false;
        }
    }

    if replaced {
        Ok(out)
    } else {
        Err(MavenError::PropertyNotFound {
            key: key.to_string(),
        })
    }
}

/// Text between `<tag>` and `</tag>` on one line.
fn tag_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = line.find(&open)? + open.len();
    let end = line[start..].find(&close)? + start;
    Some(&line[start..end])
}

/// Swaps the text between `<tag>` and `</tag>`, keeping the rest of the
/// line byte-identical.
fn set_tag_value(line: &str, tag: &str, new_value: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = line.find(&open)? + open.len();
    let end = line[start..].find(&close)? + start;
    let mut updated = String::with_capacity(line.len() + new_value.len());
    updated.push_str(&line[..start]);
    updated.push_str(new_value);
    updated.push_str(&line[end..]);
    Some(updated)
}
