//! Library totals.

use crate::types::Library;
use crate::ui::util::thousands;
use crate::view::{LibraryView, View};

/// Unlike the other regions there is no placeholder: an absent snapshot
/// leaves whatever is shown untouched.
pub fn render_library(view: &mut View, lib: Option<&Library>) {
    let Some(l) = lib else { return };
    view.library = Some(LibraryView {
        movies: thousands(l.movies),
        series: thousands(l.series),
        episodes: thousands(l.episodes),
        songs: thousands(l.songs),
    });
}
