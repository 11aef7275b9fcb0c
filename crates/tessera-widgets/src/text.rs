//! Text widget for displaying text content.

use std::any::Any;
use tessera_core::{
    escape_html, widget::LayoutResult, AccessibleRole, Brick, BrickAssertion, BrickVerification,
    Canvas, Color, Constraints, Event, FontWeight, Rect, Size, TextStyle, TypeId, Widget,
    WidgetMessage,
};

/// Text widget for displaying styled text. Renders as a `span`.
#[derive(Debug, Clone)]
pub struct Text {
    /// Text content
    content: String,
    /// Text color
    color: Color,
    /// Font size in pixels
    font_size: f32,
    /// Font weight
    font_weight: FontWeight,
    /// Line height multiplier
    line_height: f32,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds
    bounds: Rect,
}

impl Text {
    /// Create new text widget.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: Color::BLACK,
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            line_height: 1.2,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Set text color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set font size.
    #[must_use]
    pub const fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set font weight.
    #[must_use]
    pub const fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Estimate text size (~0.6 em per character, no font metrics).
    fn estimate_size(&self) -> Size {
        let char_width = self.font_size * 0.6;
        let line_height = self.font_size * self.line_height;
        Size::new(self.content.chars().count() as f32 * char_width, line_height)
    }
}

impl Widget for Text {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.estimate_size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let style = TextStyle {
            size: self.font_size,
            color: self.color,
            weight: self.font_weight,
        };

        canvas.draw_text(&self.content, self.bounds.origin(), &style);
    }

    fn event(&mut self, _event: &Event) -> Option<WidgetMessage> {
        None
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn tag_name(&self) -> &'static str {
        "span"
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.content)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Text
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for Text {
    fn brick_name(&self) -> &'static str {
        "Text"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::TextVisible, BrickAssertion::MaxLatencyMs(16)]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification.check(
            BrickAssertion::TextVisible,
            !self.content.is_empty() && self.color.a > 0.0,
            "Text content is empty or transparent",
        );
        verification.check(BrickAssertion::MaxLatencyMs(16), true, "");
        verification
    }

    fn to_html(&self) -> String {
        match &self.test_id_value {
            Some(id) => format!(
                r#"<span data-testid="{}">{}</span>"#,
                escape_html(id),
                escape_html(&self.content)
            ),
            None => format!("<span>{}</span>", escape_html(&self.content)),
        }
    }

    fn to_css(&self) -> String {
        format!(
            "span {{ color: {}; font-size: {}px; line-height: {}; }}",
            self.color.to_hex(),
            self.font_size,
            self.line_height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{DrawCommand, Point, RecordingCanvas};

    #[test]
    fn test_text_new() {
        let t = Text::new("Hello");
        assert_eq!(t.content(), "Hello");
        assert_eq!(t.font_size, 16.0);
        assert_eq!(t.tag_name(), "span");
    }

    #[test]
    fn test_text_builder() {
        let t = Text::new("Test")
            .color(Color::WHITE)
            .font_size(24.0)
            .font_weight(FontWeight::Bold)
            .with_test_id("my-text");

        assert_eq!(t.color, Color::WHITE);
        assert_eq!(t.font_size, 24.0);
        assert_eq!(t.font_weight, FontWeight::Bold);
        assert_eq!(Widget::test_id(&t), Some("my-text"));
    }

    #[test]
    fn test_text_measure_counts_chars_not_bytes() {
        let ascii = Text::new("ab").measure(Constraints::unbounded());
        let wide = Text::new("éé").measure(Constraints::unbounded());
        assert_eq!(ascii, wide);
    }

    #[test]
    fn test_text_paint_draws_text() {
        let mut text = Text::new("Hello World");
        text.layout(Rect::new(10.0, 20.0, 200.0, 30.0));

        let mut canvas = RecordingCanvas::new();
        text.paint(&mut canvas);

        assert_eq!(canvas.command_count(), 1);
        match &canvas.commands()[0] {
            DrawCommand::Text {
                content, position, ..
            } => {
                assert_eq!(content, "Hello World");
                assert_eq!(*position, Point::new(10.0, 20.0));
            }
            other => panic!("Expected Text command, got {other:?}"),
        }
    }

    #[test]
    fn test_text_verify_empty_fails() {
        assert!(Text::new("x").can_render());
        assert!(!Text::new("").can_render());
        assert!(!Text::new("x").color(Color::TRANSPARENT).can_render());
    }

    #[test]
    fn test_text_html_is_escaped() {
        assert_eq!(Text::new("a<b").to_html(), "<span>a&lt;b</span>");
        assert_eq!(
            Text::new("x").with_test_id("label").to_html(),
            r#"<span data-testid="label">x</span>"#
        );
    }
}
