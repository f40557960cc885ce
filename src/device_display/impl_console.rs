use crate::capture_session::preview_layer::PreviewLayer;
use crate::device_display::interface::DeviceDisplay;
use crate::display_state::DisplayState;
use crate::ui_context::UiContext;
use std::error::Error;
use std::io::Write;

const MIN_INNER_WIDTH: usize = 24;

/// Prints a boxed two-line panel each time the labels change. There is no
/// room for a preview on a terminal.
pub struct DeviceDisplayConsole {}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {}
    }
}

pub fn render_panel(state: &DisplayState) -> String {
    let lines = [
        format!("Object: {}", state.label),
        format!("Confidence: {}", state.confidence),
    ];
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_INNER_WIDTH);

    let mut panel = format!("┌{}┐\n", "─".repeat(width));
    for line in &lines {
        let padding = width - line.chars().count();
        panel.push_str(&format!("│{}{}│\n", line, " ".repeat(padding)));
    }
    panel.push_str(&format!("└{}┘\n", "─".repeat(width)));
    panel
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn run(
        &mut self,
        mut ui: UiContext,
        _preview: PreviewLayer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", render_panel(ui.state()))?;
        stdout.flush()?;

        while let Some(changed) = ui.wait_for_update() {
            if changed {
                write!(stdout, "{}", render_panel(ui.state()))?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_panel() {
        let panel = render_panel(&DisplayState::default());

        let lines: Vec<&str> = panel.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!("┌{}┐", "─".repeat(24)));
        assert_eq!(lines[1], format!("│Object: {}│", " ".repeat(16)));
        assert_eq!(lines[2], format!("│Confidence: {}│", " ".repeat(12)));
        assert_eq!(lines[3], format!("└{}┘", "─".repeat(24)));
    }

    #[test]
    fn test_panel_grows_with_long_labels() {
        let state = DisplayState {
            label: "Great White Shark, White Shark".to_string(),
            confidence: "91.0%".to_string(),
        };

        let panel = render_panel(&state);
        let widths: Vec<usize> = panel.lines().map(|line| line.chars().count()).collect();

        assert!(panel.contains("│Object: Great White Shark, White Shark│"));
        assert!(widths.iter().all(|w| *w == widths[0]));
    }
}
