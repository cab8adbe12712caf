//! Tool group shortcuts for the `DISABLED_TOOLS` environment variable
//!
//! A group name (e.g. `@active-file`) stands for a fixed list of tool names,
//! so several tools can be disabled at once. Groups are flat: a group never
//! references another group.

use std::collections::HashSet;

/// Leading character that marks a group reference
pub const GROUP_SENTINEL: char = '@';

/// Static group table, group name to member tool names
pub static TOOL_GROUPS: &[(&str, &[&str])] = &[
    (
        "@active-file",
        &[
            "get_active_file",
            "update_active_file",
            "append_to_active_file",
            "patch_active_file",
            "delete_active_file",
        ],
    ),
    (
        "@vault-file",
        &[
            "get_vault_file",
            "get_vault_files",
            "create_vault_file",
            "append_to_vault_file",
            "patch_vault_file",
            "delete_vault_file",
        ],
    ),
    (
        "@write",
        &[
            "update_active_file",
            "append_to_active_file",
            "patch_active_file",
            "delete_active_file",
            "create_vault_file",
            "append_to_vault_file",
            "patch_vault_file",
            "delete_vault_file",
        ],
    ),
    ("@search", &["search_vault", "search_vault_simple", "search_vault_smart"]),
];

/// Returns true if `name` carries the group sentinel
pub fn is_group_reference(name: &str) -> bool {
    name.starts_with(GROUP_SENTINEL)
}

/// Looks up the members of a group by its full name (including the sentinel)
pub fn tool_group(name: &str) -> Option<&'static [&'static str]> {
    TOOL_GROUPS
        .iter()
        .find(|(group, _)| *group == name)
        .map(|(_, members)| *members)
}

/// Iterates over all known group names
pub fn group_names() -> impl Iterator<Item = &'static str> {
    TOOL_GROUPS.iter().map(|(group, _)| *group)
}

/// Expands tool names, replacing group shortcuts with their member tools
///
/// Plain names are kept verbatim. Unknown group names are kept verbatim too,
/// so a typo in `DISABLED_TOOLS` is visible rather than silently dropped. The
/// result has no duplicates; its order follows first insertion but carries no
/// meaning.
///
/// # Examples
///
/// ```
/// use obsidian_mcp::tool_groups::expand_tool_names;
///
/// let names = expand_tool_names(["fetch", "@search", "fetch"]);
/// assert_eq!(names.len(), 4);
/// assert!(names.iter().any(|n| n == "search_vault_smart"));
/// ```
pub fn expand_tool_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    let mut add = |tool: &str| {
        if seen.insert(tool.to_string()) {
            result.push(tool.to_string());
        }
    };

    for name in names {
        let name = name.as_ref();
        match tool_group(name).filter(|_| is_group_reference(name)) {
            Some(members) => {
                for tool in members {
                    add(*tool);
                }
            }
            None => add(name),
        }
    }

    result
}
