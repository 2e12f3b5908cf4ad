use crate::game::{LetterState, Verdict};
use crossterm::{
    queue,
    style::{Color, ContentStyle, Print, PrintStyledContent, Stylize},
};
use std::io::{self, Write};

const KEY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

pub(crate) fn verdict_style(v: Verdict) -> ContentStyle {
    match v {
        Verdict::Unknown => ContentStyle::new()
            .white()
            .on(Color::from((32, 32, 32)))
            .bold(),
        Verdict::Absent => ContentStyle::new().black().on_dark_grey(),
        Verdict::Present => ContentStyle::new().black().on_dark_yellow().bold(),
        Verdict::Correct => ContentStyle::new().black().on_dark_green().bold(),
    }
}

fn key_style(v: Verdict) -> ContentStyle {
    match v {
        Verdict::Absent => ContentStyle::new()
            .dark_grey()
            .on(Color::from((32, 32, 32))),
        Verdict::Unknown => ContentStyle::new().black().on_grey(),
        v => verdict_style(v),
    }
}

/// Prints `letters` as a row of coloured cells followed by a newline.
pub(crate) fn render_cells<T: Write, I>(mut out: T, letters: &str, styles: I) -> io::Result<()>
where
    I: Iterator<Item = ContentStyle>,
{
    for (c, style) in letters.chars().zip(styles) {
        queue!(
            out,
            PrintStyledContent(style.apply(format!(" {} ", c.to_ascii_uppercase()))),
            Print(' ')
        )?;
    }
    queue!(out, Print("\n"))
}

pub(crate) fn render_keyboard<T: Write>(mut out: T, letters: &LetterState) -> io::Result<()> {
    for (indent, row) in KEY_ROWS.iter().enumerate() {
        queue!(out, Print(" ".repeat(indent * 2)))?;
        render_cells(&mut out, row, row.chars().map(|c| key_style(letters.status(c))))?;
    }
    Ok(())
}

pub(crate) fn render_line<T: Write>(mut out: T, text: &str, style: ContentStyle) -> io::Result<()> {
    queue!(out, PrintStyledContent(style.apply(text)), Print("\n"))
}
