//! # Display Module
//!
//! Boxed, colored terminal summary of an [`Analysis`] for the `analyze` command.

use crate::analyzer::{Analysis, ArtifactInfo};
use colored::*;

#[derive(Debug, Clone)]
enum BoxLine {
    Entry { label: String, value: String },
    Separator,
}

/// Box drawer that sizes itself to its content
pub struct BoxDrawer {
    title: String,
    lines: Vec<BoxLine>,
    min_width: usize,
    max_width: usize,
}

impl BoxDrawer {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
            min_width: 60,
            max_width: 120,
        }
    }

    pub fn add_line(&mut self, label: &str, value: &str) {
        self.lines.push(BoxLine::Entry {
            label: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn add_separator(&mut self) {
        self.lines.push(BoxLine::Separator);
    }

    fn label_width(&self) -> usize {
        self.lines
            .iter()
            .filter_map(|line| match line {
                BoxLine::Entry { label, .. } => Some(visual_width(label)),
                BoxLine::Separator => None,
            })
            .max()
            .unwrap_or(0)
    }

    fn optimal_width(&self) -> usize {
        let label_width = self.label_width();
        let content = self
            .lines
            .iter()
            .filter_map(|line| match line {
                BoxLine::Entry { value, .. } => Some(label_width + 2 + visual_width(value)),
                BoxLine::Separator => None,
            })
            .max()
            .unwrap_or(0);

        // "│ " + content + " │", title needs "┌─ " + title + " ┐"
        let needed = (content + 4).max(visual_width(&self.title) + 6);
        needed.max(self.min_width).min(self.max_width)
    }

    pub fn draw(&self) -> String {
        let width = self.optimal_width();
        let content_width = width - 4;
        let label_width = self.label_width();

        let mut output = Vec::with_capacity(self.lines.len() + 2);
        let title_space = width.saturating_sub(visual_width(&self.title) + 5);
        output.push(format!("┌─ {} {}┐", self.title.bright_cyan(), "─".repeat(title_space)));

        for line in &self.lines {
            match line {
                BoxLine::Separator => {
                    output.push(format!("│ {} │", "─".repeat(content_width).dimmed()));
                }
                BoxLine::Entry { label, value } => {
                    let padded_label = format!("{:<width$}", label, width = label_width);
                    let room = content_width.saturating_sub(label_width + 2);
                    let value = truncate_to_width(value, room);
                    let used = label_width + 2 + visual_width(&value);
                    output.push(format!(
                        "│ {}  {}{} │",
                        padded_label.bright_white(),
                        value,
                        " ".repeat(content_width.saturating_sub(used))
                    ));
                }
            }
        }

        output.push(format!("└{}┘", "─".repeat(width - 2)));
        output.join("\n")
    }
}

/// Visible width, ignoring ANSI color sequences
fn visual_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

/// Cuts by visible width; escape sequences are copied whole and color is reset after the cut
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if visual_width(s) <= max_width {
        return s.to_string();
    }
    let keep = max_width.saturating_sub(3);
    let mut truncated = String::with_capacity(s.len());
    let mut visible = 0;
    let mut styled = false;
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            styled = true;
            truncated.push(ch);
            for c in chars.by_ref() {
                truncated.push(c);
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if visible == keep {
            break;
        }
        truncated.push(ch);
        visible += 1;
    }

    truncated.push_str("...");
    if styled {
        truncated.push_str("\x1b[0m");
    }
    truncated
}

fn yes_no(value: bool) -> ColoredString {
    if value {
        "yes".green()
    } else {
        "no".red()
    }
}

fn artifact_status(info: &ArtifactInfo) -> String {
    match (&info.path, info.exists, info.is_valid) {
        (Some(path), true, true) => format!("{} {}", "✓".green(), path),
        (Some(path), true, false) => format!("{} {} (invalid)", "!".yellow(), path),
        _ => format!("{} missing", "✗".red()),
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".dimmed().to_string()
    } else {
        items.join(", ")
    }
}

/// Builds the boxed summary without printing it
pub fn render_analysis(analysis: &Analysis) -> String {
    let mut overview = BoxDrawer::new("Repository Overview");
    overview.add_line("Project type", &analysis.project_type.to_string().bright_green().to_string());
    overview.add_line("Files", &analysis.total_files.to_string());
    overview.add_line("Entry points", &list_or_none(&analysis.entry_points));
    let ports: Vec<String> = analysis.ports.iter().map(|p| p.to_string()).collect();
    overview.add_line("Ports", &ports.join(", "));
    overview.add_line(
        "Manifest",
        analysis.package.path.as_deref().unwrap_or("none"),
    );

    let mut artifacts = BoxDrawer::new("Deployment Artifacts");
    artifacts.add_line("Dockerfile", &artifact_status(&analysis.dockerfile));
    artifacts.add_line("Compose", &artifact_status(&analysis.compose));
    artifacts.add_line(
        "README",
        &match &analysis.readme.path {
            Some(path) => format!("{} {}", "✓".green(), path),
            None => format!("{} missing", "✗".red()),
        },
    );
    artifacts.add_separator();
    artifacts.add_line(".gitignore", &yes_no(analysis.gitignore.exists).to_string());
    artifacts.add_line(".dockerignore", &yes_no(analysis.has_dockerignore).to_string());
    let env_files: Vec<String> = analysis.env.files.iter().map(|f| f.path.clone()).collect();
    artifacts.add_line("Env files", &list_or_none(&env_files));

    let mut stack = BoxDrawer::new("Technology Stack");
    stack.add_line("Frameworks", &list_or_none(&analysis.frameworks));
    stack.add_line("Databases", &list_or_none(&analysis.database));
    stack.add_line("Build tools", &list_or_none(&analysis.build_tools));
    stack.add_line("Testing", &list_or_none(&analysis.test_framework));
    stack.add_line("Linters", &list_or_none(&analysis.linter));
    stack.add_line("CI", &list_or_none(&analysis.ci));
    if !analysis.dependencies.utilities.is_empty() {
        stack.add_separator();
        stack.add_line("Utilities", &analysis.dependencies.utilities.join(", "));
    }

    let mut sections = vec![overview.draw(), artifacts.draw(), stack.draw()];

    if !analysis.sensitive_files.is_empty() || !analysis.large_files.is_empty() {
        let mut attention = BoxDrawer::new("Needs Attention");
        for path in &analysis.sensitive_files {
            attention.add_line("Sensitive", &path.yellow().to_string());
        }
        for path in &analysis.large_files {
            attention.add_line("Large", path);
        }
        sections.push(attention.draw());
    }

    sections.join("\n\n")
}

pub fn display_analysis(analysis: &Analysis) {
    println!("\n{}", "📊 Repository Analysis".bright_white().bold());
    println!("{}", render_analysis(analysis));
}
