//! Styled terminal output for `classdump-ctl`.
//!
//! Status lines go to stderr; stdout carries generated source only, so
//! `generate --stdout` can be piped into a file. Styling is dropped when the
//! stream is not a terminal.

use std::fmt::Display;
use std::io::Write;

use anstyle::{AnsiColor, Color, Effects, Style};

const GREEN: Style = fg(AnsiColor::Green);
const RED: Style = fg(AnsiColor::Red);
const YELLOW: Style = fg(AnsiColor::Yellow);
const CYAN: Style = fg(AnsiColor::Cyan);
const BOLD: Style = Style::new().effects(Effects::BOLD);
const DIM: Style = Style::new().effects(Effects::DIMMED);

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Help colors, in the same palette as the status lines.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    let heading = GREEN.effects(Effects::BOLD);
    clap::builder::Styles::styled()
        .header(heading)
        .usage(heading)
        .literal(CYAN)
        .placeholder(CYAN)
        .error(RED.effects(Effects::BOLD))
        .valid(GREEN)
        .invalid(YELLOW)
}

fn status(style: Style, line: impl Display) {
    let mut err = anstream::stderr().lock();
    writeln!(err, "{style}{line}{style:#}").ok();
}

pub(crate) fn success(msg: impl Display) {
    status(GREEN, format_args!("✓ {msg}"));
}

pub(crate) fn error(msg: impl Display) {
    status(RED, format_args!("✗ {msg}"));
}

pub(crate) fn warning(msg: impl Display) {
    status(YELLOW, format_args!("! {msg}"));
}

pub(crate) fn hint(msg: impl Display) {
    status(DIM, msg);
}

/// `  Name: value`, name in bold.
pub(crate) fn label(name: impl Display, value: impl Display) {
    let mut err = anstream::stderr().lock();
    writeln!(err, "  {BOLD}{name}:{BOLD:#} {value}").ok();
}

/// Indented list entry under a [`label`].
pub(crate) fn item(msg: impl Display) {
    let mut err = anstream::stderr().lock();
    writeln!(err, "    - {msg}").ok();
}

/// Write `text` to stdout as is.
pub(crate) fn raw(text: &str) {
    let mut out = anstream::stdout().lock();
    write!(out, "{text}").ok();
}
