use inksac::prelude::*;

/// Styles the shell's own output, degrading to plain text when the
/// terminal reports no color support.
#[derive(Debug, Clone, Copy)]
pub struct OutputStyler {
    color_support: ColorSupport,
}

impl Default for OutputStyler {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputStyler {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// Live highlighting for the line editor: command in cyan, dash-flags
    /// in yellow.
    pub fn command_line(&self, input: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return input.to_string();
        }

        let mut parts: Vec<String> = input.split_whitespace().map(String::from).collect();
        if parts.is_empty() {
            return input.to_string();
        }

        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        parts[0] = parts[0].clone().style(command_style).to_string();

        for part in parts.iter_mut().skip(1) {
            if part.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                *part = part.clone().style(flag_style).to_string();
            }
        }

        parts.join(" ")
    }

    pub fn error(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        message.style(error_style).to_string()
    }

    pub fn notice(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let notice_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        message.style(notice_style).to_string()
    }

    pub fn banner(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let banner_style = Style::builder().foreground(Color::Red).bold().build();
        message.style(banner_style).to_string()
    }

    pub fn prompt(&self, prompt: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return prompt.to_string();
        }

        let prompt_style = Style::builder().foreground(Color::Green).bold().build();
        prompt.style(prompt_style).to_string()
    }
}
