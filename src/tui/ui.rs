use crate::core::state::App;
use crate::tui::view::{self, FIELD_ROW};

use ratatui::Frame;
use ratatui::widgets::{Paragraph, Wrap};

/// Paint the rendered view and park the terminal cursor inside the field.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let paragraph = Paragraph::new(view::render(app)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);

    if view::screen(app).shows_field() {
        let x = area.x.saturating_add(app.input.cursor_column());
        let y = area.y.saturating_add(FIELD_ROW);
        frame.set_cursor_position((x, y));
    }
}
