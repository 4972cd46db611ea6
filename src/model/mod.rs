// SPDX-License-Identifier: PMPL-1.0-or-later
//! Platform-neutral UI tree model.

pub mod node;
pub mod rect;

pub use node::{ExtraValue, PreOrder, UiNode};
pub use rect::Rect;
