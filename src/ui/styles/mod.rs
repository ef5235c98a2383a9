// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the launcher and the video modal.

pub mod button;
pub mod container;
pub mod overlay;
pub mod tooltip;
