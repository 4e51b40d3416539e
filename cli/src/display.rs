//! Terminal output for documents and layouts.

use colored::{ColoredString, Colorize};

use textgen::layout::{FontFace, PageLayout};
use textgen::render::{to_display_spans, DisplaySpan, Rgb, ScreenTheme};
use textgen::Document;

fn style(span: &DisplaySpan, theme: &ScreenTheme) -> ColoredString {
    let mut text = span.text.normal();
    if span.bold {
        text = text.bold();
    }
    if span.italic {
        text = text.italic();
    }
    // The terminal has one font size; the largest headings get an underline instead.
    if span.size >= theme.heading_sizes[0] {
        text = text.underline();
    }
    if let Some(Rgb(r, g, b)) = span.color {
        text = text.truecolor(r, g, b);
    }
    text
}

/// Print a document with heading colors and bold/italic runs.
pub fn print_document(doc: &Document, theme: &ScreenTheme) {
    for span in to_display_spans(doc, theme) {
        if span.is_newline() {
            println!();
        } else {
            print!("{}", style(&span, theme));
        }
    }
}

/// Print every page with the position and font of each line.
pub fn print_layout(pages: &[PageLayout]) {
    for page in pages {
        println!(
            "{} {} ({} lines)",
            "Page".cyan().bold(),
            page.index + 1,
            page.fragments.len()
        );
        println!("{}", "─".repeat(40).dimmed());
        for fragment in &page.fragments {
            let font = match fragment.font.face {
                FontFace::Regular => "R",
                FontFace::Bold => "B",
            };
            let position = format!(
                "{:>6.1} {:>6.1} {}{:<4}",
                fragment.position.x, fragment.position.y, font, fragment.font.size
            );
            let text = if fragment.font.face == FontFace::Bold {
                fragment.text.bold()
            } else {
                fragment.text.normal()
            };
            println!("{} {}", position.dimmed(), text);
        }
        println!();
    }
}
