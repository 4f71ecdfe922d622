// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: templates, photo placement, gestures and the editing session.

pub mod gesture;
pub mod placement;
pub mod session;
pub mod template;
