//! Button widget for user interactions.

use tessera_core::{
    escape_html, widget::LayoutResult, AccessibleRole, Brick, BrickAssertion, BrickVerification,
    Canvas, Color, Constraints, CornerRadius, Event, FontWeight, Key, MouseButton, Point, Rect,
    Size, TextStyle, TypeId, Widget, WidgetMessage,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Button widget with label and click handling.
#[derive(Debug, Clone)]
pub struct Button {
    /// Button label
    label: String,
    /// Background color (normal state)
    background: Color,
    /// Text color (normal state)
    text_color: Color,
    /// Text color (hover state)
    text_color_hover: Color,
    /// Corner radius
    corner_radius: CornerRadius,
    /// Padding
    padding: f32,
    /// Font size
    font_size: f32,
    /// Whether button is disabled
    disabled: bool,
    /// Test ID
    test_id_value: Option<String>,
    /// Accessible name (overrides label)
    accessible_name: Option<String>,
    hovered: bool,
    pressed: bool,
    focused: bool,
    bounds: Rect,
}

/// Message emitted when button is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonClicked;

impl Button {
    /// Create a new button with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            background: Color::TRANSPARENT,
            text_color: Color::BLACK,
            text_color_hover: Color::BLACK,
            corner_radius: CornerRadius::uniform(4.0),
            padding: 4.0,
            font_size: 14.0,
            disabled: false,
            test_id_value: None,
            accessible_name: None,
            hovered: false,
            pressed: false,
            focused: false,
            bounds: Rect::default(),
        }
    }

    /// Set background color.
    #[must_use]
    pub const fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set text color.
    #[must_use]
    pub const fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Set text color used while hovered.
    #[must_use]
    pub const fn text_color_hover(mut self, color: Color) -> Self {
        self.text_color_hover = color;
        self
    }

    /// Set corner radius.
    #[must_use]
    pub const fn corner_radius(mut self, radius: CornerRadius) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set padding.
    #[must_use]
    pub const fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Set font size.
    #[must_use]
    pub const fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name = Some(name.into());
        self
    }

    /// Button label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the accessible name in place.
    pub fn set_accessible_name(&mut self, name: impl Into<String>) {
        self.accessible_name = Some(name.into());
    }

    /// Whether the pointer is over the button.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn current_text_color(&self) -> Color {
        if self.disabled {
            Color::rgb(0.7, 0.7, 0.7)
        } else if self.hovered || self.pressed {
            self.text_color_hover
        } else {
            self.text_color
        }
    }

    fn estimate_text_size(&self) -> Size {
        let char_width = self.font_size * 0.6;
        let width = self.label.chars().count() as f32 * char_width;
        let height = self.font_size * 1.2;
        Size::new(width, height)
    }
}

impl Widget for Button {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let text_size = self.estimate_text_size();
        let size = Size::new(
            text_size.width + self.padding * 2.0,
            text_size.height + self.padding * 2.0,
        );
        constraints.constrain(size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.background.a > 0.0 {
            canvas.fill_rounded_rect(self.bounds, self.corner_radius.top_left, self.background);
        }

        let text_size = self.estimate_text_size();
        let text_pos = Point::new(
            self.bounds.x + (self.bounds.width - text_size.width) / 2.0,
            self.bounds.y + (self.bounds.height - text_size.height) / 2.0,
        );

        let style = TextStyle {
            size: self.font_size,
            color: self.current_text_color(),
            weight: FontWeight::Medium,
        };

        canvas.draw_text(&self.label, text_pos, &style);
    }

    fn event(&mut self, event: &Event) -> Option<WidgetMessage> {
        if self.disabled {
            return None;
        }

        match event {
            Event::MouseMove { position } => {
                self.hovered = self.bounds.contains_point(position);
                None
            }
            Event::MouseEnter => {
                self.hovered = true;
                None
            }
            Event::MouseLeave => {
                self.hovered = false;
                self.pressed = false;
                None
            }
            Event::FocusIn => {
                self.focused = true;
                None
            }
            Event::FocusOut => {
                self.focused = false;
                self.pressed = false;
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.bounds.contains_point(position) {
                    self.pressed = true;
                }
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = self.pressed;
                self.pressed = false;

                if was_pressed && self.bounds.contains_point(position) {
                    Some(Box::new(ButtonClicked))
                } else {
                    None
                }
            }
            Event::KeyDown {
                key: Key::Enter | Key::Space,
            } if self.focused => {
                self.pressed = true;
                None
            }
            Event::KeyUp {
                key: Key::Enter | Key::Space,
            } if self.focused && self.pressed => {
                self.pressed = false;
                Some(Box::new(ButtonClicked))
            }
            _ => None,
        }
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
        "button"
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name.as_deref().or(Some(&self.label))
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for Button {
    fn brick_name(&self) -> &'static str {
        "Button"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::TextVisible, BrickAssertion::Focusable]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        verification.check(
            BrickAssertion::TextVisible,
            !self.label.is_empty(),
            "Button label is empty",
        );
        verification.check(
            BrickAssertion::Focusable,
            self.disabled || self.is_focusable(),
            "Enabled button is not focusable",
        );
        verification
    }

    fn to_html(&self) -> String {
        let mut attrs = String::from(r#" type="button""#);
        if let Some(name) = &self.accessible_name {
            attrs.push_str(&format!(r#" aria-label="{}""#, escape_html(name)));
        }
        if let Some(id) = &self.test_id_value {
            attrs.push_str(&format!(r#" data-testid="{}""#, escape_html(id)));
        }
        if self.disabled {
            attrs.push_str(" disabled");
        }
        format!("<button{attrs}>{}</button>", escape_html(&self.label))
    }

    fn to_css(&self) -> String {
        format!(
            "button {{ color: {}; font-size: {}px; padding: {}px; border-radius: {}px; }}",
            self.text_color.to_hex(),
            self.font_size,
            self.padding,
            self.corner_radius.top_left
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out(button: Button) -> Button {
        let mut button = button;
        button.layout(Rect::new(0.0, 0.0, 40.0, 20.0));
        button
    }

    fn click(button: &mut Button, at: Point) -> Option<WidgetMessage> {
        button.event(&Event::MouseDown {
            position: at,
            button: MouseButton::Left,
        });
        button.event(&Event::MouseUp {
            position: at,
            button: MouseButton::Left,
        })
    }

    #[test]
    fn test_button_new() {
        let b = Button::new("Click me");
        assert_eq!(b.label(), "Click me");
        assert!(!b.disabled);
        assert_eq!(b.tag_name(), "button");
    }

    #[test]
    fn test_button_builder() {
        let b = Button::new("Test")
            .padding(20.0)
            .font_size(18.0)
            .disabled(true)
            .with_test_id("my-button");

        assert_eq!(b.padding, 20.0);
        assert_eq!(b.font_size, 18.0);
        assert!(b.disabled);
        assert_eq!(Widget::test_id(&b), Some("my-button"));
    }

    #[test]
    fn test_button_accessible() {
        let b = Button::new("OK");
        assert_eq!(Widget::accessible_name(&b), Some("OK"));
        assert_eq!(Widget::accessible_role(&b), AccessibleRole::Button);
        assert!(Widget::is_focusable(&b));

        let b = Button::new("x").with_accessible_name("Remove");
        assert_eq!(Widget::accessible_name(&b), Some("Remove"));
    }

    #[test]
    fn test_click_inside_emits_clicked() {
        let mut b = laid_out(Button::new("x"));
        let msg = click(&mut b, Point::new(10.0, 10.0)).expect("clicked");
        assert!(msg.downcast_ref::<ButtonClicked>().is_some());
    }

    #[test]
    fn test_click_outside_is_ignored() {
        let mut b = laid_out(Button::new("x"));
        assert!(click(&mut b, Point::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut b = laid_out(Button::new("x"));
        b.event(&Event::MouseDown {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Left,
        });
        let msg = b.event(&Event::MouseUp {
            position: Point::new(500.0, 5.0),
            button: MouseButton::Left,
        });
        assert!(msg.is_none());
    }

    #[test]
    fn test_disabled_ignores_click() {
        let mut b = laid_out(Button::new("x").disabled(true));
        assert!(click(&mut b, Point::new(10.0, 10.0)).is_none());
        assert!(!Widget::is_interactive(&b));
    }

    #[test]
    fn test_keyboard_requires_focus() {
        let mut b = laid_out(Button::new("x"));
        b.event(&Event::KeyDown { key: Key::Enter });
        assert!(b.event(&Event::KeyUp { key: Key::Enter }).is_none());

        b.event(&Event::FocusIn);
        b.event(&Event::KeyDown { key: Key::Space });
        assert!(b.event(&Event::KeyUp { key: Key::Space }).is_some());
    }

    #[test]
    fn test_hover_tracks_mouse_move() {
        let mut b = laid_out(Button::new("x"));
        b.event(&Event::MouseMove {
            position: Point::new(1.0, 1.0),
        });
        assert!(b.is_hovered());
        b.event(&Event::MouseMove {
            position: Point::new(99.0, 1.0),
        });
        assert!(!b.is_hovered());
    }

    #[test]
    fn test_button_measure() {
        let b = Button::new("Test");
        let size = b.measure(Constraints::loose(Size::new(1000.0, 1000.0)));
        assert!(size.width > 0.0);
        assert!(size.height > 0.0);
    }

    #[test]
    fn test_button_html() {
        let html = Button::new("\u{d7}")
            .with_accessible_name("Remove repo-a")
            .to_html();
        assert_eq!(
            html,
            "<button type=\"button\" aria-label=\"Remove repo-a\">\u{d7}</button>"
        );
    }
}
