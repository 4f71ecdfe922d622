// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Raster output: the drawing surface and the badge compositor.

pub mod compositor;
pub mod surface;
