// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Placeholder substitution over the legacy and structured argument forms.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use picomc_auth::Account;
use picomc_vspec::resolver::flatten_argument_elements;
use picomc_vspec::{Environment, ResolvedVspec};

/// Everything the placeholder table in [`substitute`] draws on, gathered up
/// front so every argument can be rendered by reference alone.
pub struct PlaceholderContext<'a> {
    pub account: &'a Account,
    pub version_name: &'a str,
    pub game_directory: &'a Path,
    pub assets_root: &'a Path,
    pub assets_index_name: &'a str,
    pub game_assets: Option<&'a Path>,
    pub natives_directory: &'a Path,
    pub classpath: &'a str,
}

impl<'a> PlaceholderContext<'a> {
    fn table(&self) -> HashMap<&'static str, String> {
        let mut t = HashMap::new();
        t.insert("auth_player_name", self.account.display_name.clone());
        t.insert("auth_uuid", self.account.uuid.clone());
        t.insert("auth_access_token", self.account.access_token_value().to_string());
        t.insert(
            "auth_session",
            format!("token:{}:{}", self.account.access_token_value(), self.account.uuid),
        );
        t.insert("user_type", self.account.account_type.user_type_value().to_string());
        t.insert("user_properties", "{}".to_string());
        t.insert("version_name", self.version_name.to_string());
        t.insert("version_type", self.account.account_type.version_type_value().to_string());
        t.insert("game_directory", self.game_directory.to_string_lossy().into_owned());
        t.insert("assets_root", self.assets_root.to_string_lossy().into_owned());
        t.insert("assets_index_name", self.assets_index_name.to_string());
        t.insert(
            "game_assets",
            self.game_assets
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        t.insert("natives_directory", self.natives_directory.to_string_lossy().into_owned());
        t.insert("launcher_name", picomc_core::LAUNCHER_NAME.to_string());
        t.insert("launcher_version", picomc_core::LAUNCHER_VERSION.to_string());
        t.insert("classpath", self.classpath.to_string());
        t
    }
}

/// Replaces every `${placeholder}` occurrence exactly once; an unknown
/// placeholder is retained literally (boundary scenario S5).
pub fn substitute<'s>(template: &'s str, values: &HashMap<&'static str, String>) -> Cow<'s, str> {
    if !template.contains("${") {
        return Cow::Borrowed(template);
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        let Some(end_rel) = rest[start + 2..].find('}') else {
            break;
        };
        let key = &rest[start + 2..start + 2 + end_rel];
        out.push_str(&rest[..start]);
        match values.get(key) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end_rel + 1]),
        }
        rest = &rest[start + 2 + end_rel + 1..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Produces the game argument list: the legacy flat string (split on
/// whitespace) if the resolved vspec carries `minecraftArguments`, otherwise
/// the structured `arguments.game[]` list flattened under `env`.
pub fn game_arguments(vspec: &ResolvedVspec, env: &Environment, ctx: &PlaceholderContext) -> Vec<String> {
    let table = ctx.table();
    let raw: Vec<String> = match &vspec.minecraft_arguments {
        Some(legacy) => legacy.split_whitespace().map(String::from).collect(),
        None => match &vspec.arguments {
            Some(args) => flatten_argument_elements(&args.game, env),
            None => Vec::new(),
        },
    };
    raw.iter().map(|a| substitute(a, &table).into_owned()).collect()
}

/// Structured `arguments.jvm[]`, flattened under `env` and substituted. The
/// legacy form carries no JVM argument list of its own: the fixed prologue
/// (`-Djava.library.path=...`, `-cp`, classpath) is built directly by the
/// composer for that case.
pub fn jvm_arguments(vspec: &ResolvedVspec, env: &Environment, ctx: &PlaceholderContext) -> Vec<String> {
    let table = ctx.table();
    let raw = match &vspec.arguments {
        Some(args) => flatten_argument_elements(&args.jvm, env),
        None => Vec::new(),
    };
    raw.iter().map(|a| substitute(a, &table).into_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_placeholder_and_keeps_unknown_literal() {
        let mut values = HashMap::new();
        values.insert("auth_player_name", "Steve".to_string());
        let rendered = substitute("${auth_player_name}", &values);
        assert_eq!(rendered, "Steve");
        let rendered = substitute("${nope}", &values);
        assert_eq!(rendered, "${nope}");
    }

    #[test]
    fn passthrough_with_no_placeholders_borrows() {
        let values = HashMap::new();
        match substitute("--fullscreen", &values) {
            Cow::Borrowed(s) => assert_eq!(s, "--fullscreen"),
            Cow::Owned(_) => panic!("expected borrowed fast path"),
        }
    }
}
