pub mod panels;
pub mod plot;

use eframe::egui::RichText;

use cv_analyzer::style::FontStyle;

/// Apply a configured font size / weight to a piece of text.
pub fn styled(text: impl Into<String>, font: FontStyle) -> RichText {
    let text = RichText::new(text).size(font.size);
    if font.bold {
        text.strong()
    } else {
        text
    }
}
