//! Chip list: the owner of a collection of [`RemovableChip`]s.
//!
//! Chips only ask to be removed. The list listens for their
//! [`RemoveRequested`] messages and performs the removal, unless a `remove`
//! listener canceled the event. Removal happens synchronously inside
//! [`Widget::event`], so the next event already sees the shorter list.
//!
//! Pointer events are offered to every chip and each button hit-tests them.
//! Focus and keyboard events go to the focused chip only; `Tab` moves focus
//! to the next chip.

use crate::chip::{RemovableChip, RemoveRequested};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use tessera_core::{
    widget::LayoutResult, AccessibleRole, Brick, BrickAssertion, BrickVerification, Canvas,
    ChipTheme, Constraints, Event, Key, Rect, Size, TypeId, Widget, WidgetMessage,
};
use thiserror::Error;
use tracing::{debug, info};

/// Space between chips, both axes.
const SPACING: f32 = 8.0;

/// Errors from mutating a [`ChipList`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChipListError {
    /// A chip with this label is already in the list
    #[error("chip `{0}` is already in the list")]
    Duplicate(String),
    /// No chip at this index
    #[error("no chip at index {0}")]
    NoSuchChip(usize),
}

/// Message returned from [`Widget::event`] after a chip was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipRemoved {
    /// Label of the removed chip
    pub label: String,
    /// Position the chip occupied
    pub index: usize,
}

/// An ordered set of uniquely labeled chips, laid out left to right and
/// wrapped to the available width.
pub struct ChipList {
    children: Vec<Box<dyn Widget>>,
    removable: bool,
    theme: ChipTheme,
    test_id_value: Option<String>,
    focused: Option<usize>,
    bounds: Rect,
}

impl fmt::Debug for ChipList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChipList")
            .field("labels", &self.labels())
            .field("removable", &self.removable)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Default for ChipList {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipList {
    /// Create an empty list of removable chips.
    #[must_use]
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            removable: true,
            theme: ChipTheme::default(),
            test_id_value: None,
            focused: None,
            bounds: Rect::default(),
        }
    }

    /// Create a list from labels, skipping duplicates.
    #[must_use]
    pub fn with_chips<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for label in labels {
            if let Err(e) = list.push(label) {
                debug!(error = %e, "skipping chip");
            }
        }
        list
    }

    /// Render every chip removable or fixed.
    #[must_use]
    pub fn removable(mut self, removable: bool) -> Self {
        self.set_removable(removable);
        self
    }

    /// Use a custom theme for every chip.
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

    /// Append a chip. Labels must be unique.
    pub fn push(&mut self, label: impl Into<String>) -> Result<(), ChipListError> {
        let label = label.into();
        if self.contains(&label) {
            return Err(ChipListError::Duplicate(label));
        }
        debug!(label = %label, "chip added");
        let chip = self.make_chip(label);
        self.children.push(Box::new(chip));
        self.relayout();
        Ok(())
    }

    /// Re-render every chip removable or fixed. Chips keep their listeners.
    pub fn set_removable(&mut self, removable: bool) {
        self.removable = removable;
        for chip in self.chips_mut() {
            chip.set_removable(removable);
        }
        self.relayout();
    }

    /// Restyle every chip. Chips keep their listeners.
    pub fn set_theme(&mut self, theme: ChipTheme) {
        for chip in self.chips_mut() {
            chip.set_theme(theme.clone());
        }
        self.theme = theme;
        self.relayout();
    }

    /// Change the label of the chip at `index` and lay the list out again.
    pub fn rename(&mut self, index: usize, label: impl Into<String>) -> Result<(), ChipListError> {
        let label = label.into();
        if index >= self.children.len() {
            return Err(ChipListError::NoSuchChip(index));
        }
        if self.labels().iter().enumerate().any(|(i, l)| i != index && *l == label) {
            return Err(ChipListError::Duplicate(label));
        }
        if let Some(chip) = self.chip_mut(index) {
            chip.set_label(label);
        }
        self.relayout();
        Ok(())
    }

    /// Labels in display order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter_map(|c| c.accessible_name())
            .collect()
    }

    /// Check if a label is present.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.children
            .iter()
            .any(|c| c.accessible_name() == Some(label))
    }

    /// Number of chips.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the list has no chips.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Chip at `index`.
    #[must_use]
    pub fn chip(&self, index: usize) -> Option<&RemovableChip> {
        self.children
            .get(index)
            .and_then(|c| c.as_any().downcast_ref::<RemovableChip>())
    }

    /// Mutable chip at `index`, e.g. to attach `remove` listeners.
    ///
    /// Changing the label here skips the uniqueness check and leaves the
    /// list's layout stale; use [`ChipList::rename`] instead.
    pub fn chip_mut(&mut self, index: usize) -> Option<&mut RemovableChip> {
        self.children
            .get_mut(index)
            .and_then(|c| c.as_any_mut().downcast_mut::<RemovableChip>())
    }

    /// Index of the chip holding keyboard focus.
    #[must_use]
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    fn chips_mut(&mut self) -> impl Iterator<Item = &mut RemovableChip> {
        self.children
            .iter_mut()
            .filter_map(|c| c.as_any_mut().downcast_mut::<RemovableChip>())
    }

    fn make_chip(&self, label: String) -> RemovableChip {
        RemovableChip::new(label)
            .theme(self.theme.clone())
            .removable(self.removable)
    }

    /// Move keyboard focus to the chip at `index`, blurring the previous one.
    fn focus_chip(&mut self, index: usize) {
        if index >= self.children.len() || self.focused == Some(index) {
            return;
        }
        self.blur();
        self.children[index].event(&Event::FocusIn);
        self.focused = Some(index);
        debug!(index, "chip focused");
    }

    fn blur(&mut self) {
        if let Some(index) = self.focused.take() {
            if let Some(chip) = self.children.get_mut(index) {
                chip.event(&Event::FocusOut);
            }
        }
    }

    /// Keep focus on the same slot after the chip at `removed` is gone.
    fn refocus_after_removal(&mut self, removed: usize) {
        match self.focused {
            Some(f) if f == removed => {
                self.focused = None;
                if !self.children.is_empty() {
                    self.focus_chip(removed.min(self.children.len() - 1));
                }
            }
            Some(f) if f > removed => self.focused = Some(f - 1),
            _ => {}
        }
    }

    fn relayout(&mut self) {
        if self.bounds.width > 0.0 || self.bounds.height > 0.0 {
            let bounds = self.bounds;
            self.layout(bounds);
        }
    }

    /// Chip rectangles relative to the list origin, wrapping at `max_width`.
    fn flow(&self, max_width: f32) -> (Vec<Rect>, Size) {
        let mut rects = Vec::with_capacity(self.children.len());
        let (mut x, mut y) = (0.0f32, 0.0f32);
        let mut row_height = 0.0f32;
        let mut width = 0.0f32;

        for child in &self.children {
            let size = child.measure(Constraints::unbounded());
            if x > 0.0 && x + size.width > max_width {
                x = 0.0;
                y += row_height + SPACING;
                row_height = 0.0;
            }
            rects.push(Rect::new(x, y, size.width, size.height));
            width = width.max(x + size.width);
            row_height = row_height.max(size.height);
            x += size.width + SPACING;
        }

        (rects, Size::new(width, y + row_height))
    }
}

impl Widget for ChipList {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let (_, size) = self.flow(constraints.max_width);
        constraints.constrain(size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let (rects, _) = self.flow(bounds.width);
        for (child, rect) in self.children.iter_mut().zip(rects) {
            child.layout(Rect::new(
                bounds.x + rect.x,
                bounds.y + rect.y,
                rect.width,
                rect.height,
            ));
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.push_clip(self.bounds);
        for child in &self.children {
            child.paint(canvas);
        }
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<WidgetMessage> {
        match event {
            Event::FocusIn => {
                self.focus_chip(self.focused.unwrap_or(0));
                return None;
            }
            Event::FocusOut => {
                self.blur();
                return None;
            }
            Event::KeyDown { key: Key::Tab } => {
                if !self.children.is_empty() {
                    let next = self.focused.map_or(0, |f| (f + 1) % self.children.len());
                    self.focus_chip(next);
                }
                return None;
            }
            _ => {}
        }

        let targets: Vec<usize> = if event.is_keyboard() {
            self.focused.into_iter().collect()
        } else {
            (0..self.children.len()).collect()
        };

        let mut to_remove = None;
        for index in targets {
            let Some(msg) = self.children[index].event(event) else {
                continue;
            };
            if let Some(request) = msg.downcast_ref::<RemoveRequested>() {
                if request.canceled {
                    debug!(label = %request.label, "removal canceled by listener");
                } else {
                    to_remove = Some(index);
                }
            }
            // One activation per event.
            break;
        }

        let index = to_remove?;
        let chip = self.children.remove(index);
        let label = chip.accessible_name().unwrap_or_default().to_string();
        info!(label = %label, index, remaining = self.children.len(), "chip removed");
        self.refocus_after_removal(index);
        self.relayout();
        Some(Box::new(ChipRemoved { label, index }))
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
        "chip-list"
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::List
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for ChipList {
    fn brick_name(&self) -> &'static str {
        "ChipList"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::ElementPresent("chip")]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification::default();
        let labels = self.labels();
        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();
        verification.check(
            BrickAssertion::element_present("chip"),
            unique.len() == labels.len(),
            "Chip labels are not unique",
        );
        verification
    }

    fn to_html(&self) -> String {
        let inner: String = self.children.iter().map(|c| c.to_html()).collect();
        format!(r#"<div class="chip-list" role="list">{inner}</div>"#)
    }
}
