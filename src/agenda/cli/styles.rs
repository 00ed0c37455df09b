//! Theme for the agenda CLI.
//!
//! Decoration only ever attaches semantic tag names (`agenda-today`, `todo`, ...).
//! This theme is the one place that decides what those look like on a terminal.
//! Keyword styles come from the config file, so any tag it mentions that is not
//! listed here simply renders unstyled.

use agenda::decorate::{DONE_STYLE, SCHEDULED_STYLE, TODAY_STYLE};
use agenda::render::DEFAULT_TAG_STYLE;
use console::Style;
use once_cell::sync::Lazy;
use richtext::Theme;

pub static AGENDA_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add("todo", Style::new().red().bold())
        .add("done", Style::new().green().bold())
        .add(DONE_STYLE, Style::new().dim().strikethrough())
        .add(TODAY_STYLE, Style::new().bold())
        .add(SCHEDULED_STYLE, Style::new().green())
        .add(DEFAULT_TAG_STYLE, Style::new().cyan().dim())
        .add("agenda-category", Style::new().yellow())
        .add("muted", Style::new().dim().italic())
});
