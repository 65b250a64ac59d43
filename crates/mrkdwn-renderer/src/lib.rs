use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use log::debug;

const BASE_CSS: &str = include_str!("../assets/mrkdwn.css");

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Theme {
    Auto,
    Light,
    Dark,
}

impl Theme {
    /// Parses `auto`, `light` or `dark`.
    pub fn from_name(name: &str) -> Option<Theme> {
        match name {
            "auto" => Some(Theme::Auto),
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Produces the stylesheet for rendered messages and wraps fragments into
/// standalone pages.
#[derive(Debug, Clone)]
pub struct Renderer {
    theme: Theme,
    custom_vars: BTreeMap<String, String>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            custom_vars: BTreeMap::new(),
        }
    }

    /// Overrides one custom property, e.g. `--mrkdwn-accent`.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_vars.insert(key.into(), value.into());
        self
    }

    pub fn stylesheet(&self) -> String {
        let mut out = String::new();
        let (light_vars, dark_vars) = default_theme_vars();

        match self.theme {
            Theme::Auto => {
                out.push_str(&root_block(&light_vars, 0));
                out.push_str("@media (prefers-color-scheme: dark) {\n");
                out.push_str(&root_block(&dark_vars, 1));
                out.push_str("}\n");
            }
            Theme::Light => out.push_str(&root_block(&light_vars, 0)),
            Theme::Dark => out.push_str(&root_block(&dark_vars, 0)),
        }

        if !self.custom_vars.is_empty() {
            out.push_str(&root_block(&self.custom_vars, 0));
        }

        out.push_str(BASE_CSS);
        out
    }

    pub fn embed_html(&self, html: &str, with_inline_css: bool) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html lang=\"en\">\n");
        out.push_str("<head>\n");
        out.push_str("  <meta charset=\"utf-8\" />\n");
        out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
        if with_inline_css {
            out.push_str("  <style>\n");
            out.push_str(&self.stylesheet());
            out.push_str("\n  </style>\n");
        } else {
            out.push_str("  <link rel=\"stylesheet\" href=\"mrkdwn.css\" />\n");
        }
        out.push_str("</head>\n");
        out.push_str("<body>\n");
        out.push_str(html);
        if !html.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("</body>\n");
        out.push_str("</html>\n");
        out
    }

    /// Writes `mrkdwn.css` into `out_dir`, creating it if needed.
    pub fn generate_files(&self, out_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(out_dir)?;
        let path = out_dir.join("mrkdwn.css");
        fs::write(&path, self.stylesheet())?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}

fn default_theme_vars() -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    // Catppuccin Latte and Mocha.
    let light = vars(&[
        ("--mrkdwn-bg", "#eff1f5"),
        ("--mrkdwn-fg", "#4c4f69"),
        ("--mrkdwn-muted", "#8c8fa1"),
        ("--mrkdwn-border", "#ccd0da"),
        ("--mrkdwn-accent", "#1e66f5"),
        ("--mrkdwn-code-bg", "#e6e9ef"),
        ("--mrkdwn-code-fg", "#d20f39"),
        ("--mrkdwn-pre-bg", "#e6e9ef"),
        ("--mrkdwn-pre-fg", "#4c4f69"),
        ("--mrkdwn-hl-keyword", "#8839ef"),
        ("--mrkdwn-hl-builtin", "#df8e1d"),
        ("--mrkdwn-hl-string", "#40a02b"),
        ("--mrkdwn-hl-number", "#fe640b"),
        ("--mrkdwn-hl-comment", "#8c8fa1"),
        ("--mrkdwn-hl-decorator", "#dd7878"),
        (
            "--mrkdwn-mono",
            "\"SF Mono\", Monaco, Menlo, Consolas, monospace",
        ),
    ]);

    let dark = vars(&[
        ("--mrkdwn-bg", "#1e1e2e"),
        ("--mrkdwn-fg", "#cdd6f4"),
        ("--mrkdwn-muted", "#7f849c"),
        ("--mrkdwn-border", "#313244"),
        ("--mrkdwn-accent", "#89b4fa"),
        ("--mrkdwn-code-bg", "#181825"),
        ("--mrkdwn-code-fg", "#f38ba8"),
        ("--mrkdwn-pre-bg", "#181825"),
        ("--mrkdwn-pre-fg", "#cdd6f4"),
        ("--mrkdwn-hl-keyword", "#cba6f7"),
        ("--mrkdwn-hl-builtin", "#f9e2af"),
        ("--mrkdwn-hl-string", "#a6e3a1"),
        ("--mrkdwn-hl-number", "#fab387"),
        ("--mrkdwn-hl-comment", "#7f849c"),
        ("--mrkdwn-hl-decorator", "#f2cdcd"),
        (
            "--mrkdwn-mono",
            "\"SF Mono\", Monaco, Menlo, Consolas, monospace",
        ),
    ]);

    (light, dark)
}

fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn root_block(vars: &BTreeMap<String, String>, depth: usize) -> String {
    let pad = "  ".repeat(depth);
    let mut out = String::new();
    out.push_str(&pad);
    out.push_str(":root {\n");
    for (key, value) in vars {
        out.push_str(&pad);
        out.push_str("  ");
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push_str(";\n");
    }
    out.push_str(&pad);
    out.push_str("}\n");
    out
}
