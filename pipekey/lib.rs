// pipekey
//
// Copyright 2026 the pipekey authors
//
// Permission is hereby granted, free of charge, to any person obtaining a
// copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice (including the next
// paragraph) shall be included in all copies or substantial portions of the
// Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.  IN NO EVENT SHALL
// THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Pipeline state keys for a Vulkan shader test runner.
//!
//! A [Key](key::Key) holds every configurable piece of
//! graphics-pipeline state a test script can set, one slot per entry
//! of the static [property schema](schema::properties). The script
//! parser resolves property names with [Key::lookup](key::Key::lookup)
//! and symbolic values with
//! [lookup_enum](enum_table::lookup_enum), the pipeline cache compares
//! keys (or uses them as map keys) to reuse pipelines, and
//! [CreateInfo](create_info::CreateInfo) translates a key into the
//! `VkGraphicsPipelineCreateInfo` graph that pipeline creation
//! consumes.

pub mod create_info;
pub mod enum_table;
pub mod key;
pub mod schema;
pub mod vk;

pub use create_info::{CreateInfo, RenderTarget, VertexAttrib, VertexLayout};
pub use enum_table::lookup_enum;
pub use key::{Key, LookupError, Source};
pub use schema::{Category, Kind, Property, Value};
