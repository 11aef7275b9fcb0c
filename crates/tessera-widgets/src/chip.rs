//! Removable chip: a labeled token with an optional remove button.
//!
//! The chip never removes itself. Activating its button dispatches a
//! cancelable `remove` event to the chip's listeners and hands a
//! [`RemoveRequested`] message to whoever owns the chip; the owner decides
//! what happens to the collection.
//!
//! The child tree is a pure function of `(label, removable)`:
//!
//! | `removable` | children              |
//! |-------------|-----------------------|
//! | `true`      | `span` + `button`     |
//! | `false`     | `span`                |

use crate::button::{Button, ButtonClicked};
use crate::text::Text;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use tessera_core::{
    escape_html, widget::LayoutResult, AccessibleRole, Brick, BrickAssertion, BrickVerification,
    Canvas, ChipTheme, Constraints, CustomEvent, Event, EventTarget, ListenerId, Rect, Size,
    TypeId, Widget, WidgetMessage,
};
use tracing::debug;

/// Name of the event dispatched when the remove button is activated.
pub const REMOVE_EVENT: &str = "remove";

/// Space between the label and the remove button.
const GAP: f32 = 4.0;

/// Message returned from [`Widget::event`] when the remove button fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveRequested {
    /// Label of the chip that asked to be removed
    pub label: String,
    /// A listener called `prevent_default` on the `remove` event
    pub canceled: bool,
}

/// Render state selected by the `removable` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChipMode {
    /// Remove button shown
    Removable,
    /// Label only
    Fixed,
}

/// A labeled token that can ask to be removed.
pub struct RemovableChip {
    label: String,
    removable: bool,
    theme: ChipTheme,
    test_id_value: Option<String>,
    children: Vec<Box<dyn Widget>>,
    listeners: EventTarget,
    focused: bool,
    bounds: Rect,
}

impl RemovableChip {
    /// Create a removable chip showing `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let mut chip = Self {
            label: label.into(),
            removable: true,
            theme: ChipTheme::default(),
            test_id_value: None,
            children: Vec::new(),
            listeners: EventTarget::new(),
            focused: false,
            bounds: Rect::default(),
        };
        chip.render();
        chip
    }

    /// Show or hide the remove button.
    #[must_use]
    pub fn removable(mut self, removable: bool) -> Self {
        self.set_removable(removable);
        self
    }

    /// Use a custom theme.
    #[must_use]
    pub fn theme(mut self, theme: ChipTheme) -> Self {
        self.set_theme(theme);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Displayed label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the remove button is rendered.
    #[must_use]
    pub const fn is_removable(&self) -> bool {
        self.removable
    }

    /// Current render state.
    #[must_use]
    pub const fn mode(&self) -> ChipMode {
        if self.removable {
            ChipMode::Removable
        } else {
            ChipMode::Fixed
        }
    }

    /// Re-render with a new label. Does not emit `remove`.
    ///
    /// Children are re-laid out inside the current bounds. The chip's size
    /// may have changed, so the owner measures and lays it out again.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.render();
    }

    /// Re-render with or without the remove button. Does not emit `remove`.
    ///
    /// As with [`RemovableChip::set_label`], the owner lays the chip out again.
    pub fn set_removable(&mut self, removable: bool) {
        self.removable = removable;
        self.render();
    }

    /// Re-render with a new theme. Listeners are kept.
    pub fn set_theme(&mut self, theme: ChipTheme) {
        self.theme = theme;
        self.render();
    }

    /// Register a listener for the `remove` event.
    pub fn on_remove<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&mut CustomEvent) + Send + Sync + 'static,
    {
        self.listeners.add_listener(REMOVE_EVENT, listener)
    }

    /// Unregister a `remove` listener.
    pub fn off_remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove_listener(id)
    }

    /// Number of registered `remove` listeners.
    #[must_use]
    pub fn remove_listener_count(&self) -> usize {
        self.listeners.listener_count(REMOVE_EVENT)
    }

    /// Signal that the user asked to remove this chip.
    ///
    /// Dispatches one cancelable `remove` event and returns the message for
    /// the owner. Returns `None` on a fixed chip, which has no button to
    /// activate. Never changes `label` or `removable`.
    pub fn activate_remove(&mut self) -> Option<RemoveRequested> {
        if !self.removable {
            return None;
        }

        let mut event = CustomEvent::new(REMOVE_EVENT).cancelable(true);
        let proceed = self.listeners.dispatch(&mut event);
        debug!(label = %self.label, canceled = !proceed, "remove requested");

        Some(RemoveRequested {
            label: self.label.clone(),
            canceled: !proceed,
        })
    }

    fn render(&mut self) {
        let text = Text::new(self.label.clone())
            .color(self.theme.text)
            .font_size(self.theme.font_size);
        self.children.clear();
        self.children.push(Box::new(text));

        if self.removable {
            let mut button = Button::new(self.theme.remove_glyph.clone())
                .text_color(self.theme.button)
                .text_color_hover(self.theme.button_hover)
                .font_size(self.theme.font_size)
                .padding(0.0)
                .with_accessible_name(format!("Remove {}", self.label));
            // A rebuilt button inherits keyboard focus.
            if self.focused {
                button.event(&Event::FocusIn);
            }
            self.children.push(Box::new(button));
        }

        if self.bounds.width > 0.0 || self.bounds.height > 0.0 {
            let bounds = self.bounds;
            self.layout(bounds);
        }
    }

    fn content_size(&self) -> Size {
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for (i, child) in self.children.iter().enumerate() {
            let size = child.measure(Constraints::unbounded());
            if i > 0 {
                width += GAP;
            }
            width += size.width;
            height = height.max(size.height);
        }
        Size::new(width, height)
    }
}

impl fmt::Debug for RemovableChip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovableChip")
            .field("label", &self.label)
            .field("removable", &self.removable)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl Widget for RemovableChip {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let content = self.content_size();
        let padding = self.theme.padding;
        constraints.constrain(Size::new(
            content.width + padding * 2.0,
            content.height + padding * 2.0,
        ))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let padding = self.theme.padding;
        let mut x = bounds.x + padding;

        for child in &mut self.children {
            let size = child.measure(Constraints::unbounded());
            let y = bounds.y + (bounds.height - size.height) / 2.0;
            child.layout(Rect::new(x, y, size.width, size.height));
            x += size.width + GAP;
        }

        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rounded_rect(self.bounds, self.theme.corner_radius, self.theme.background);
        for child in &self.children {
            child.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<WidgetMessage> {
        match event {
            Event::FocusIn => self.focused = true,
            Event::FocusOut => self.focused = false,
            _ => {}
        }
        let mut clicked = false;
        for child in &mut self.children {
            if let Some(msg) = child.event(event) {
                clicked |= msg.downcast_ref::<ButtonClicked>().is_some();
            }
        }

        if clicked {
            self.activate_remove()
                .map(|request| Box::new(request) as WidgetMessage)
        } else {
            None
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn tag_name(&self) -> &'static str {
        "chip"
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ListItem
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for RemovableChip {
    fn brick_name(&self) -> &'static str {
        "RemovableChip"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[
            BrickAssertion::ElementPresent("span"),
            BrickAssertion::ElementPresent("button"),
        ]
    }

    fn verify(&self) -> BrickVerification {
        let tags: Vec<&str> = self.children.iter().map(|c| c.tag_name()).collect();
        let mut verification = BrickVerification::default();
        verification.check(
            BrickAssertion::element_present("span"),
            tags.first() == Some(&"span"),
            "Label span missing",
        );
        let buttons = tags.iter().filter(|t| **t == "button").count();
        let expected = usize::from(self.removable);
        verification.check(
            BrickAssertion::element_present("button"),
            buttons == expected,
            format!("Expected {expected} remove button(s), found {buttons}"),
        );
        verification
    }

    fn to_html(&self) -> String {
        let test_id = self
            .test_id_value
            .as_deref()
            .map(|id| format!(r#" data-testid="{}""#, escape_html(id)))
            .unwrap_or_default();
        let inner: String = self.children.iter().map(|c| c.to_html()).collect();
        format!(r#"<div class="chip"{test_id}>{inner}</div>"#)
    }

    fn to_css(&self) -> String {
        format!(
            ".chip {{ display: inline-flex; align-items: center; gap: {GAP}px; \
             background: {}; border-radius: {}px; padding: {}px; }}",
            self.theme.background.to_hex(),
            self.theme.corner_radius,
            self.theme.padding
        )
    }
}
