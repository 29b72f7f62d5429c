use anyhow::{anyhow, Context, Result};
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAME: &str = ".logchainrc";
const MAX_ALIAS_DEPTH: usize = 10;

/// Configuration file handler for logchain
///
/// ```ini
/// # arguments prepended to every invocation
/// defaults = --stats -v
///
/// [aliases]
/// audit = --output-format json --pretty -vv
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub defaults: Option<String>,
    pub aliases: HashMap<String, String>,
}

impl ConfigFile {
    /// Find project-level .logchainrc by walking up from the current directory
    pub fn find_project_config() -> Option<PathBuf> {
        let mut current = env::current_dir().ok()?;
        loop {
            let candidate = current.join(PROJECT_CONFIG_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// User config file locations in order of preference
    pub fn user_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        let xdg_config = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")));
        if let Some(dir) = xdg_config {
            paths.push(dir.join("logchain").join("config.ini"));
        }

        if let Some(home) = env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(PROJECT_CONFIG_NAME));
        }

        paths
    }

    /// Load configuration with precedence: project > user
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(user_path) = Self::user_config_paths().into_iter().find(|p| p.is_file()) {
            config = config.merged_with(Self::load_from_path(&user_path)?);
        }

        if let Some(project_path) = Self::find_project_config() {
            config = config.merged_with(Self::load_from_path(&project_path)?);
        }

        Ok(config)
    }

    /// Load from `--config-file` when given, otherwise from the search locations
    pub fn load_with_custom_path(custom_path: Option<&str>) -> Result<Self> {
        match custom_path {
            Some(path) => Self::load_from_path(Path::new(path)),
            None => Self::load(),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse_ini_content(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    fn parse_ini_content(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut section = String::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(anyhow!(
                    "line {}: expected 'key = value', got '{}'",
                    index + 1,
                    line
                ));
            };
            let (key, value) = (key.trim(), value.trim());

            match section.as_str() {
                "" if key == "defaults" => config.defaults = Some(value.to_string()),
                "aliases" => {
                    config.aliases.insert(key.to_string(), value.to_string());
                }
                // Unknown keys and sections are ignored
                _ => {}
            }
        }

        Ok(config)
    }

    /// Merge with `overlay` taking precedence
    fn merged_with(self, overlay: Self) -> Self {
        let mut aliases = self.aliases;
        aliases.extend(overlay.aliases);
        Self {
            defaults: overlay.defaults.or(self.defaults),
            aliases,
        }
    }

    /// Resolve a single alias, expanding aliases it references
    pub fn resolve_alias(
        &self,
        name: &str,
        seen: &mut HashSet<String>,
        depth: usize,
    ) -> Result<Vec<String>> {
        if depth > MAX_ALIAS_DEPTH {
            return Err(anyhow!("Alias chain too deep: {} levels", depth));
        }

        if !seen.insert(name.to_string()) {
            return Err(anyhow!("Circular dependency detected in alias: {}", name));
        }

        let value = self
            .aliases
            .get(name)
            .ok_or_else(|| anyhow!("Unknown alias: {}", name))?;
        let args = shell_words::split(value)
            .with_context(|| format!("Invalid alias '{}': failed to parse arguments", name))?;

        let mut resolved = Vec::with_capacity(args.len());
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if is_alias_flag(&arg) {
                if let Some(reference) = iter.next() {
                    resolved.extend(self.resolve_alias(&reference, seen, depth + 1)?);
                    continue;
                }
            }
            resolved.push(arg);
        }

        seen.remove(name);
        Ok(resolved)
    }

    /// Apply `defaults` after the program name, then expand every `-a NAME`
    pub fn process_args(&self, args: Vec<String>) -> Result<Vec<String>> {
        let mut with_defaults = Vec::with_capacity(args.len());
        let mut args = args.into_iter();

        if let Some(program) = args.next() {
            with_defaults.push(program);
        }
        if let Some(defaults) = &self.defaults {
            let default_args = shell_words::split(defaults)
                .context("Invalid defaults: failed to parse arguments")?;
            with_defaults.extend(default_args);
        }
        with_defaults.extend(args);

        let mut expanded = Vec::with_capacity(with_defaults.len());
        let mut iter = with_defaults.into_iter();
        while let Some(arg) = iter.next() {
            if is_alias_flag(&arg) {
                if let Some(name) = iter.next() {
                    let mut seen = HashSet::new();
                    expanded.extend(self.resolve_alias(&name, &mut seen, 0)?);
                    continue;
                }
            }
            expanded.push(arg);
        }

        Ok(expanded)
    }

    /// Describe where configuration comes from and what is active
    pub fn describe(custom_path: Option<&str>) -> String {
        let mut out = String::new();
        out.push_str("Configuration precedence: CLI > project .logchainrc > user config\n\n");

        let project = Self::find_project_config();
        let user_paths = Self::user_config_paths();

        let loaded = match custom_path {
            Some(path) => Self::load_from_path(Path::new(path)),
            None => Self::load(),
        };

        match loaded {
            Ok(config) => {
                match (&project, custom_path) {
                    (_, Some(path)) => out.push_str(&format!("Loaded from: {}\n", path)),
                    (Some(path), None) => {
                        out.push_str(&format!("Project: {}\n", path.display()))
                    }
                    (None, None) => out.push_str("No project configuration found.\n"),
                }

                if let Some(defaults) = &config.defaults {
                    out.push_str(&format!("\nActive defaults:\n  defaults = {}\n", defaults));
                }
                if !config.aliases.is_empty() {
                    out.push_str("\nActive aliases:\n");
                    let mut sorted: Vec<_> = config.aliases.iter().collect();
                    sorted.sort_by_key(|(k, _)| k.as_str());
                    for (key, value) in sorted {
                        out.push_str(&format!("  {} = {}\n", key, value));
                    }
                }
            }
            Err(e) => out.push_str(&format!("Error loading configuration: {:#}\n", e)),
        }

        out.push_str("\nConfiguration search locations (in precedence order):\n");
        match &project {
            Some(path) => out.push_str(&format!("  1. Project: {} (found)\n", path.display())),
            None => out.push_str("  1. Project: .logchainrc (searched up directory tree, not found)\n"),
        }
        for (i, path) in user_paths.iter().enumerate() {
            let status = if path.is_file() { "(found)" } else { "(not found)" };
            out.push_str(&format!("  {}. User: {} {}\n", i + 2, path.display(), status));
        }

        out
    }
}

fn is_alias_flag(arg: &str) -> bool {
    arg == "-a" || arg == "--alias"
}
