//! Media library counts.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::ui::{panel, stat};
use crate::view::LibraryView;

pub fn draw_library(f: &mut ratatui::Frame<'_>, area: Rect, library: Option<&LibraryView>) {
    let inner = panel(f, area, "Library");
    // left blank until the first library snapshot
    let Some(l) = library else { return };
    if inner.height < 1 {
        return;
    }
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut first = stat("Movies", &l.movies, bold);
    first.extend(stat("Series", &l.series, bold));
    let mut second = stat("Episodes", &l.episodes, bold);
    second.extend(stat("Songs", &l.songs, bold));
    f.render_widget(
        Paragraph::new(vec![Line::from(first), Line::from(second)]),
        inner,
    );
}
