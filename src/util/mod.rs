// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility modules for character-offset text handling and keyword highlighting.
//!
//! Every position this crate reports is a character offset, because the
//! transcripts are CJK and a byte offset into them is useless to anyone
//! rendering the text. These helpers keep the byte/char conversion in one place.

pub mod highlight;
pub mod text;
