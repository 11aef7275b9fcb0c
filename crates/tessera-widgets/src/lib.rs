//! Widget implementations for Tessera.
//!
//! - [`Text`]: a `span` of styled text
//! - [`Button`]: an activatable control emitting [`ButtonClicked`]
//! - [`RemovableChip`]: a labeled token whose button emits a cancelable `remove` event
//! - [`ChipList`]: owns a set of chips and removes them on request

pub mod button;
pub mod chip;
pub mod chip_list;
pub mod text;

pub use button::{Button, ButtonClicked};
pub use chip::{ChipMode, RemovableChip, RemoveRequested, REMOVE_EVENT};
pub use chip_list::{ChipList, ChipListError, ChipRemoved};
pub use text::Text;
