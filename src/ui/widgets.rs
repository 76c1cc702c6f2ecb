use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Single-line input prompt drawn over the footer.
///
/// Text wider than the area is cut from the left so the end of the buffer,
/// where the user is typing, stays visible.
#[derive(Debug, Clone)]
pub(super) struct PromptWidget {
    text: String,
    style: Style,
}

impl PromptWidget {
    pub(super) fn new(message: &str, buffer: &str) -> Self {
        Self {
            text: format!("{message}{buffer}"),
            style: Style::default(),
        }
    }

    pub(super) fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for PromptWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                let cell = &mut buf[(x, y)];
                cell.reset();
                cell.set_symbol(" ");
                cell.set_style(self.style);
            }
        }
        if area.width == 0 || area.height == 0 {
            return;
        }

        let max_width = area.width as usize;
        let char_count = self.text.chars().count();
        let skip = char_count.saturating_sub(max_width);

        let mut x = area.x;
        for ch in self.text.chars().skip(skip) {
            let cell = &mut buf[(x, area.y)];
            cell.set_symbol(ch.encode_utf8(&mut [0; 4]));
            x += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn renders_message_and_buffer() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        PromptWidget::new("New todo: ", "milk").render(area, &mut buf);
        assert_eq!(row(&buf, 0).trim_end(), "New todo: milk");
    }

    #[test]
    fn long_input_keeps_the_tail_visible() {
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        PromptWidget::new("Rename: ", "abcdefgh").render(area, &mut buf);
        assert_eq!(row(&buf, 0), "abcdefgh");
    }
}
