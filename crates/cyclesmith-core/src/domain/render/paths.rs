use std::path::{Component, Path};

/// Path of `target` as seen from directory `base`, joined with `/`.
///
/// Works on the lexical form only. When no relative form exists (one side is
/// absolute and the other is not, or `base` climbs out with `..` past the
/// common prefix) the target is returned as is.
pub fn relative_include(target: &Path, base: &Path) -> String {
    let target_parts = parts(target);
    if target.has_root() != base.has_root() {
        return target_parts.join("/");
    }
    let base_parts = parts(base);

    let common = target_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if base_parts[common..].iter().any(|p| p == "..") {
        return target_parts.join("/");
    }

    let mut rel: Vec<String> = vec!["..".to_string(); base_parts.len() - common];
    rel.extend(target_parts[common..].iter().cloned());
    rel.join("/")
}

fn parts(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::CurDir => None,
            // Joins to a leading `/`.
            Component::RootDir => Some(String::new()),
            Component::Prefix(p) => Some(p.as_os_str().to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
        })
        .collect()
}
