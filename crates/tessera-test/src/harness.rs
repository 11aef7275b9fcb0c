//! Test harness for Tessera widgets.

use std::any::Any;
use std::collections::VecDeque;
use tessera_core::{
    Constraints, Event, Key, MouseButton, Rect, RecordingCanvas, Size, Widget, WidgetMessage,
};
use tracing::{trace, warn};

use crate::selector::Selector;

/// Test harness for interacting with a widget tree.
///
/// The root is laid out inside the viewport on creation and after every
/// batch of simulated input. Messages the root returns from
/// [`Widget::event`] are collected in arrival order.
pub struct Harness {
    /// Root widget being tested
    root: Box<dyn Widget>,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Current viewport
    viewport: Rect,
    /// Messages returned by the root
    messages: Vec<WidgetMessage>,
}

impl Harness {
    /// Create a new harness with a root widget.
    pub fn new(root: impl Widget + 'static) -> Self {
        let mut harness = Self {
            root: Box::new(root),
            event_queue: VecDeque::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
            messages: Vec::new(),
        };
        harness.relayout();
        harness
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.relayout();
        self
    }

    /// The root widget.
    #[must_use]
    pub fn root(&self) -> &dyn Widget {
        &*self.root
    }

    /// Mutable access to the root, for re-rendering with new inputs.
    ///
    /// Call [`Harness::relayout`] afterwards if the change affects size.
    pub fn root_mut(&mut self) -> &mut dyn Widget {
        &mut *self.root
    }

    /// Measure and lay out the root inside the viewport.
    pub fn relayout(&mut self) {
        let size = self
            .root
            .measure(Constraints::loose(Size::new(self.viewport.width, self.viewport.height)));
        self.root.layout(Rect::new(
            self.viewport.x,
            self.viewport.y,
            size.width,
            size.height,
        ));
    }

    // === Event Simulation ===

    /// Simulate a click at the centre of the first widget matching the selector.
    ///
    /// Does nothing if no widget matches.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        let Some(bounds) = self.query(selector).map(|w| w.bounds()) else {
            warn!(selector, "click target not found");
            return self;
        };

        let center = bounds.center();
        self.event_queue
            .push_back(Event::MouseMove { position: center });
        self.event_queue.push_back(Event::MouseDown {
            position: center,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position: center,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Give focus to the tree.
    pub fn focus(&mut self) -> &mut Self {
        self.event_queue.push_back(Event::FocusIn);
        self.process_events();
        self
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Send a single raw event.
    pub fn send(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            trace!(?event, "dispatching to root");
            if let Some(msg) = self.root.event(&event) {
                self.messages.push(msg);
            }
        }
        self.relayout();
    }

    // === Messages ===

    /// Messages returned by the root so far.
    #[must_use]
    pub fn messages(&self) -> &[WidgetMessage] {
        &self.messages
    }

    /// Drain collected messages.
    pub fn take_messages(&mut self) -> Vec<WidgetMessage> {
        std::mem::take(&mut self.messages)
    }

    /// Most recent message of type `T`.
    #[must_use]
    pub fn last_message<T: Any>(&self) -> Option<&T> {
        self.messages
            .iter()
            .rev()
            .find_map(|msg| msg.downcast_ref::<T>())
    }

    /// Number of collected messages of type `T`.
    #[must_use]
    pub fn message_count<T: Any>(&self) -> usize {
        self.messages
            .iter()
            .filter(|msg| msg.downcast_ref::<T>().is_some())
            .count()
    }

    // === Queries ===

    /// Query for the first widget matching the selector, in document order.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<&dyn Widget> {
        self.query_all(selector).into_iter().next()
    }

    /// Query for all widgets matching the selector, in document order.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<&dyn Widget> {
        let Ok(sel) = Selector::parse(selector) else {
            warn!(selector, "invalid selector");
            return Vec::new();
        };
        let mut path = Vec::new();
        let mut results = Vec::new();
        Self::find_all_widgets(&*self.root, &sel, &mut path, &mut results);
        results
    }

    /// Query for a widget, panicking if none matches.
    ///
    /// # Panics
    ///
    /// Panics if no widget matches the selector.
    #[must_use]
    pub fn query_and_assert(&self, selector: &str) -> &dyn Widget {
        match self.query(selector) {
            Some(widget) => widget,
            None => panic!("Expected widget matching '{selector}' to exist"),
        }
    }

    /// Accessible text of the first matching widget, or empty.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .and_then(|w| w.accessible_name())
            .map(String::from)
            .unwrap_or_default()
    }

    /// Check if a widget exists.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    /// Number of widgets matching the selector.
    #[must_use]
    pub fn count(&self, selector: &str) -> usize {
        self.query_all(selector).len()
    }

    // === Rendering ===

    /// Paint the tree into a fresh recording canvas.
    #[must_use]
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    /// HTML rendering of the tree.
    #[must_use]
    pub fn html(&self) -> String {
        self.root.to_html()
    }

    // === Assertions ===

    /// Assert that a widget exists.
    ///
    /// # Panics
    ///
    /// Panics if the widget does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected widget matching '{selector}' to exist"
        );
        self
    }

    /// Assert that a widget does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the widget exists.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected widget matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching widgets.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.count(selector);
        assert_eq!(
            actual, expected,
            "Expected {expected} widgets matching '{selector}' but found {actual}"
        );
        self
    }

    fn find_all_widgets<'a>(
        widget: &'a dyn Widget,
        selector: &Selector,
        path: &mut Vec<&'a dyn Widget>,
        results: &mut Vec<&'a dyn Widget>,
    ) {
        path.push(widget);
        if selector.matches_path(path) {
            results.push(widget);
        }
        for child in widget.children() {
            Self::find_all_widgets(child.as_ref(), selector, path, results);
        }
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{
        widget::LayoutResult, Brick, BrickAssertion, BrickVerification, Canvas, Color, Point,
        TypeId,
    };

    #[derive(Debug, PartialEq)]
    struct Pressed(&'static str);

    /// Minimal widget: a named box that reports `Pressed` on mouse up inside.
    struct MockWidget {
        tag: &'static str,
        name: Option<String>,
        test_id: Option<String>,
        size: Size,
        bounds: Rect,
        children: Vec<Box<dyn Widget>>,
    }

    impl MockWidget {
        fn new(tag: &'static str) -> Self {
            Self {
                tag,
                name: None,
                test_id: None,
                size: Size::new(40.0, 20.0),
                bounds: Rect::default(),
                children: Vec::new(),
            }
        }

        fn named(mut self, name: &str) -> Self {
            self.name = Some(name.to_string());
            self
        }

        fn with_test_id(mut self, id: &str) -> Self {
            self.test_id = Some(id.to_string());
            self
        }

        fn with_child(mut self, child: Self) -> Self {
            self.children.push(Box::new(child));
            self
        }
    }

    impl Brick for MockWidget {
        fn brick_name(&self) -> &'static str {
            "MockWidget"
        }

        fn assertions(&self) -> &[BrickAssertion] {
            &[]
        }

        fn verify(&self) -> BrickVerification {
            BrickVerification::default()
        }

        fn to_html(&self) -> String {
            format!("<{0}></{0}>", self.tag)
        }
    }

    impl Widget for MockWidget {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }

        fn measure(&self, constraints: Constraints) -> Size {
            let width = self.size.width
                + self
                    .children
                    .iter()
                    .map(|c| c.measure(Constraints::unbounded()).width)
                    .sum::<f32>();
            constraints.constrain(Size::new(width, self.size.height))
        }

        fn layout(&mut self, bounds: Rect) -> LayoutResult {
            self.bounds = bounds;
            let mut x = bounds.x + self.size.width;
            for child in &mut self.children {
                let size = child.measure(Constraints::unbounded());
                child.layout(Rect::new(x, bounds.y, size.width, size.height));
                x += size.width;
            }
            LayoutResult {
                size: bounds.size(),
            }
        }

        fn paint(&self, canvas: &mut dyn Canvas) {
            canvas.fill_rect(self.bounds, Color::WHITE);
        }

        fn event(&mut self, event: &Event) -> Option<WidgetMessage> {
            for child in &mut self.children {
                if let Some(msg) = child.event(event) {
                    return Some(msg);
                }
            }
            match event {
                Event::MouseUp { position, .. } if self.bounds.contains_point(position) => {
                    Some(Box::new(Pressed(self.tag)))
                }
                _ => None,
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
            self.tag
        }

        fn accessible_name(&self) -> Option<&str> {
            self.name.as_deref()
        }

        fn test_id(&self) -> Option<&str> {
            self.test_id.as_deref()
        }

        fn bounds(&self) -> Rect {
            self.bounds
        }
    }

    fn tree() -> MockWidget {
        MockWidget::new("chip")
            .with_test_id("root")
            .with_child(MockWidget::new("span").named("repo-a"))
            .with_child(
                MockWidget::new("group")
                    .with_child(MockWidget::new("button").named("Remove repo-a")),
            )
    }

    #[test]
    fn test_harness_lays_out_root() {
        let harness = Harness::new(tree());
        let root = harness.root();
        assert_eq!(root.bounds().origin(), Point::ORIGIN);
        assert_eq!(root.bounds().width, 40.0 * 4.0);
    }

    #[test]
    fn test_query_by_tag_and_test_id() {
        let harness = Harness::new(tree());
        assert!(harness.exists("span"));
        assert!(harness.exists("[data-testid='root']"));
        assert!(!harness.exists("[data-testid='missing']"));
        assert_eq!(harness.text("span"), "repo-a");
        assert_eq!(harness.text("missing"), "");
    }

    #[test]
    fn test_query_by_brick_name_is_case_insensitive() {
        let harness = Harness::new(tree());
        assert_eq!(harness.count("mockwidget"), 4);
    }

    #[test]
    fn test_child_vs_descendant() {
        let harness = Harness::new(tree());
        harness
            .assert_count("chip button", 1)
            .assert_count("chip > button", 0)
            .assert_count("group > button", 1)
            .assert_count("chip > span", 1);
    }

    #[test]
    fn test_aria_label_selector() {
        let harness = Harness::new(tree());
        harness.assert_exists("[aria-label='Remove repo-a']");
        assert_eq!(
            harness
                .query_and_assert("[aria-label='Remove repo-a']")
                .tag_name(),
            "button"
        );
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let harness = Harness::new(tree());
        assert!(harness.query_all("@@").is_empty());
        harness.assert_not_exists("chip >");
    }

    #[test]
    fn test_click_collects_messages() {
        let mut harness = Harness::new(tree());
        harness.click("button");
        assert_eq!(harness.message_count::<Pressed>(), 1);
        assert_eq!(harness.last_message::<Pressed>(), Some(&Pressed("button")));

        harness.click("span");
        assert_eq!(harness.messages().len(), 2);
        assert_eq!(harness.last_message::<Pressed>(), Some(&Pressed("span")));

        let drained = harness.take_messages();
        assert_eq!(drained.len(), 2);
        assert!(harness.messages().is_empty());
    }

    #[test]
    fn test_click_missing_target_is_noop() {
        let mut harness = Harness::new(tree());
        harness.click("[data-testid='nope']");
        assert!(harness.messages().is_empty());
    }

    #[test]
    fn test_paint_and_html() {
        let harness = Harness::new(tree());
        assert_eq!(harness.paint().command_count(), 1);
        assert_eq!(harness.html(), "<chip></chip>");
    }

    #[test]
    #[should_panic(expected = "Expected widget matching 'table' to exist")]
    fn test_assert_exists_panics() {
        Harness::new(tree()).assert_exists("table");
    }

    #[test]
    #[should_panic(expected = "Expected 3 widgets matching 'span' but found 1")]
    fn test_assert_count_panics() {
        Harness::new(tree()).assert_count("span", 3);
    }
}
