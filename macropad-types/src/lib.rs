//! # Macropad Types
//!
//! Plain data types shared by the macropad firmware and by host-side tools
//! that provision its configuration table.
//!
//! - [`action`] - Actions bound to an input slot (keyboard key, consumer key, macro)
//! - [`modifier`] - Stored modifier combination and HID report modifier bits
//! - [`slot`] - Physical input slots and their LED feedback channels

#![no_std]

pub mod action;
pub mod modifier;
pub mod slot;
