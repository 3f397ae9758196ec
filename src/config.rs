use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File type written for gallery renders.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Png,
    Svg,
}

impl FileFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigFlags {
    pub perf: bool,
    pub format: Option<FileFormat>,
    pub scale: Option<f64>,
    pub out_dir: Option<PathBuf>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            perf: self.perf || other.perf,
            format: other.format.or(self.format),
            scale: other.scale.or(self.scale),
            out_dir: other.out_dir.clone().or_else(|| self.out_dir.clone()),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("graphfig").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("graphfig")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("graphfig").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("graphfig")
                .join("config");
        }
    }

    PathBuf::from(".graphfigrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".graphfigrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# graphfig defaults (saved with --save)".to_string());
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(format) = flags.format {
        lines.push(format!("--format {}", format.extension()));
    }
    if let Some(scale) = flags.scale {
        lines.push(format!("--scale {scale}"));
    }
    if let Some(dir) = &flags.out_dir {
        lines.push(format!("--out-dir {}", dir.display()));
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pull the persistent flags out of raw command-line or rc-file tokens.
///
/// Unknown tokens are skipped, so this can be fed `std::env::args()`
/// directly.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token.as_str(), None),
        };
        let takes_value = matches!(
            name,
            "--format" | "--scale" | "--out-dir" | "--render-debug-log"
        );
        let value = if takes_value && inline.is_none() {
            i += 1;
            tokens.get(i).map(String::as_str)
        } else {
            inline
        };

        match (name, value) {
            ("--perf", None) => flags.perf = true,
            ("--format", Some(v)) => flags.format = parse_format(v),
            ("--scale", Some(v)) => flags.scale = v.parse().ok().filter(|s: &f64| *s > 0.0),
            ("--out-dir", Some(v)) => flags.out_dir = Some(PathBuf::from(v)),
            ("--render-debug-log", Some(v)) => flags.render_debug_log = Some(PathBuf::from(v)),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_format(s: &str) -> Option<FileFormat> {
    match s {
        "png" => Some(FileFormat::Png),
        "svg" => Some(FileFormat::Svg),
        _ => None,
    }
}
