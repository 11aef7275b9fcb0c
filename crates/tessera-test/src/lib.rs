//! Testing harness for Tessera widgets.
//!
//! Mounts a widget tree, queries it with CSS-like selectors, simulates
//! pointer and keyboard input, and collects the messages the root returns.
//!
//! ```
//! use tessera_test::Selector;
//!
//! let sel = Selector::parse("chip > [aria-label='Remove a']").unwrap();
//! assert!(matches!(sel, Selector::Child(..)));
//! ```

mod harness;
mod selector;

pub use harness::Harness;
pub use selector::{Selector, SelectorError, SelectorParser};
