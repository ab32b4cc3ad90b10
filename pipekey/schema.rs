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

//! The property schema: one static table describing every pipeline
//! property a test script can set. The table is the single source of
//! truth shared by key initialization, name lookup and the descriptor
//! translator, so adding a property means adding one entry here.

use crate::vk;
use once_cell::sync::Lazy;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::offset_of;

/// Which native sub-descriptor of `VkGraphicsPipelineCreateInfo` a
/// property is written into. The stencil faces get their own
/// categories because their fields live in the embedded
/// `VkStencilOpState` structs rather than directly in the
/// depth/stencil descriptor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Category {
    InputAssembly,
    Tessellation,
    Rasterization,
    DepthStencil,
    StencilFront,
    StencilBack,
    ColorBlend,
    /// Replicated to every color attachment of the render target.
    BlendAttachment,
}

/// The declared kind of a property value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    Bool,
    Int,
    Float,
}

/// One property value. Every slot in a [Key](crate::key::Key) holds
/// one of these; the schema declares which variant a given slot is
/// supposed to carry.
#[derive(Copy, Clone)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
        }
    }
}

// Keys are cache keys, so float slots compare by bit pattern rather
// than numeric equality. This makes Eq and Hash sound too.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Bool(v) => {
                state.write_u8(0);
                v.hash(state);
            },
            Value::Int(v) => {
                state.write_u8(1);
                v.hash(state);
            },
            Value::Float(v) => {
                state.write_u8(2);
                v.to_bits().hash(state);
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Static descriptor of one settable property. `offset` is the byte
/// offset of the target field within the sub-descriptor selected by
/// `category`. The declared kind of the property is the kind of its
/// default value.
#[derive(Copy, Clone, Debug)]
pub struct Property {
    pub name: &'static str,
    pub category: Category,
    pub offset: usize,
    pub default: Value,
}

impl Property {
    pub fn kind(&self) -> Kind {
        self.default.kind()
    }
}

// Shorthand for the table below.
use self::Category::*;
use self::Value::{Bool, Float, Int};

macro_rules! prop {
    ($name:literal, $category:expr, $struct:ident, $field:ident, $def:expr) => {
        Property {
            name: $name,
            category: $category,
            offset: offset_of!(vk::$struct, $field),
            default: $def,
        }
    };
}

// The property names are the field names used by the Vulkan structs,
// matching what the original runner accepted in test scripts. Defaults
// are the runner's historical defaults, not Vulkan's zero state: a
// rectangle draws as a four-vertex triangle strip, stencil compares
// default to "always" with full masks and blending defaults to
// conventional alpha blending factors.
static SCHEMA: [Property; 44] = [
    prop!("topology", InputAssembly,
          VkPipelineInputAssemblyStateCreateInfo, topology,
          Int(vk::VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP as i32)),
    prop!("primitiveRestartEnable", InputAssembly,
          VkPipelineInputAssemblyStateCreateInfo, primitiveRestartEnable,
          Bool(false)),

    prop!("patchControlPoints", Tessellation,
          VkPipelineTessellationStateCreateInfo, patchControlPoints,
          Int(0)),

    prop!("depthClampEnable", Rasterization,
          VkPipelineRasterizationStateCreateInfo, depthClampEnable,
          Bool(false)),
    prop!("rasterizerDiscardEnable", Rasterization,
          VkPipelineRasterizationStateCreateInfo, rasterizerDiscardEnable,
          Bool(false)),
    prop!("polygonMode", Rasterization,
          VkPipelineRasterizationStateCreateInfo, polygonMode,
          Int(vk::VK_POLYGON_MODE_FILL as i32)),
    prop!("cullMode", Rasterization,
          VkPipelineRasterizationStateCreateInfo, cullMode,
          Int(vk::VK_CULL_MODE_NONE as i32)),
    prop!("frontFace", Rasterization,
          VkPipelineRasterizationStateCreateInfo, frontFace,
          Int(vk::VK_FRONT_FACE_COUNTER_CLOCKWISE as i32)),
    prop!("depthBiasEnable", Rasterization,
          VkPipelineRasterizationStateCreateInfo, depthBiasEnable,
          Bool(false)),
    prop!("depthBiasConstantFactor", Rasterization,
          VkPipelineRasterizationStateCreateInfo, depthBiasConstantFactor,
          Float(0.0)),
    prop!("depthBiasClamp", Rasterization,
          VkPipelineRasterizationStateCreateInfo, depthBiasClamp,
          Float(0.0)),
    prop!("depthBiasSlopeFactor", Rasterization,
          VkPipelineRasterizationStateCreateInfo, depthBiasSlopeFactor,
          Float(0.0)),
    prop!("lineWidth", Rasterization,
          VkPipelineRasterizationStateCreateInfo, lineWidth,
          Float(1.0)),

    prop!("depthTestEnable", DepthStencil,
          VkPipelineDepthStencilStateCreateInfo, depthTestEnable,
          Bool(false)),
    prop!("depthWriteEnable", DepthStencil,
          VkPipelineDepthStencilStateCreateInfo, depthWriteEnable,
          Bool(false)),
    prop!("depthCompareOp", DepthStencil,
          VkPipelineDepthStencilStateCreateInfo, depthCompareOp,
          Int(vk::VK_COMPARE_OP_LESS as i32)),
    prop!("depthBoundsTestEnable", DepthStencil,
          VkPipelineDepthStencilStateCreateInfo, depthBoundsTestEnable,
          Bool(false)),
    prop!("stencilTestEnable", DepthStencil,
          VkPipelineDepthStencilStateCreateInfo, stencilTestEnable,
          Bool(false)),
    prop!("minDepthBounds", DepthStencil,
          VkPipelineDepthStencilStateCreateInfo, minDepthBounds,
          Float(0.0)),
    prop!("maxDepthBounds", DepthStencil,
          VkPipelineDepthStencilStateCreateInfo, maxDepthBounds,
          Float(0.0)),

    prop!("front.failOp", StencilFront,
          VkStencilOpState, failOp, Int(vk::VK_STENCIL_OP_KEEP as i32)),
    prop!("front.passOp", StencilFront,
          VkStencilOpState, passOp, Int(vk::VK_STENCIL_OP_KEEP as i32)),
    prop!("front.depthFailOp", StencilFront,
          VkStencilOpState, depthFailOp, Int(vk::VK_STENCIL_OP_KEEP as i32)),
    prop!("front.compareOp", StencilFront,
          VkStencilOpState, compareOp, Int(vk::VK_COMPARE_OP_ALWAYS as i32)),
    prop!("front.compareMask", StencilFront,
          VkStencilOpState, compareMask, Int(-1)),
    prop!("front.writeMask", StencilFront,
          VkStencilOpState, writeMask, Int(-1)),
    prop!("front.reference", StencilFront,
          VkStencilOpState, reference, Int(0)),

    prop!("back.failOp", StencilBack,
          VkStencilOpState, failOp, Int(vk::VK_STENCIL_OP_KEEP as i32)),
    prop!("back.passOp", StencilBack,
          VkStencilOpState, passOp, Int(vk::VK_STENCIL_OP_KEEP as i32)),
    prop!("back.depthFailOp", StencilBack,
          VkStencilOpState, depthFailOp, Int(vk::VK_STENCIL_OP_KEEP as i32)),
    prop!("back.compareOp", StencilBack,
          VkStencilOpState, compareOp, Int(vk::VK_COMPARE_OP_ALWAYS as i32)),
    prop!("back.compareMask", StencilBack,
          VkStencilOpState, compareMask, Int(-1)),
    prop!("back.writeMask", StencilBack,
          VkStencilOpState, writeMask, Int(-1)),
    prop!("back.reference", StencilBack,
          VkStencilOpState, reference, Int(0)),

    prop!("logicOpEnable", ColorBlend,
          VkPipelineColorBlendStateCreateInfo, logicOpEnable, Bool(false)),
    prop!("logicOp", ColorBlend,
          VkPipelineColorBlendStateCreateInfo, logicOp,
          Int(vk::VK_LOGIC_OP_SET as i32)),

    prop!("blendEnable", BlendAttachment,
          VkPipelineColorBlendAttachmentState, blendEnable, Bool(false)),
    prop!("srcColorBlendFactor", BlendAttachment,
          VkPipelineColorBlendAttachmentState, srcColorBlendFactor,
          Int(vk::VK_BLEND_FACTOR_SRC_ALPHA as i32)),
    prop!("dstColorBlendFactor", BlendAttachment,
          VkPipelineColorBlendAttachmentState, dstColorBlendFactor,
          Int(vk::VK_BLEND_FACTOR_ONE_MINUS_SRC_ALPHA as i32)),
    prop!("colorBlendOp", BlendAttachment,
          VkPipelineColorBlendAttachmentState, colorBlendOp,
          Int(vk::VK_BLEND_OP_ADD as i32)),
    prop!("srcAlphaBlendFactor", BlendAttachment,
          VkPipelineColorBlendAttachmentState, srcAlphaBlendFactor,
          Int(vk::VK_BLEND_FACTOR_SRC_ALPHA as i32)),
    prop!("dstAlphaBlendFactor", BlendAttachment,
          VkPipelineColorBlendAttachmentState, dstAlphaBlendFactor,
          Int(vk::VK_BLEND_FACTOR_ONE_MINUS_SRC_ALPHA as i32)),
    prop!("alphaBlendOp", BlendAttachment,
          VkPipelineColorBlendAttachmentState, alphaBlendOp,
          Int(vk::VK_BLEND_OP_ADD as i32)),
    prop!("colorWriteMask", BlendAttachment,
          VkPipelineColorBlendAttachmentState, colorWriteMask,
          Int((vk::VK_COLOR_COMPONENT_R_BIT
               | vk::VK_COLOR_COMPONENT_G_BIT
               | vk::VK_COLOR_COMPONENT_B_BIT
               | vk::VK_COLOR_COMPONENT_A_BIT) as i32)),
];

/// The number of properties in the schema.
pub const N_PROPERTIES: usize = SCHEMA.len();

// The table above is declaration-ordered for readability; lookup wants
// it sorted by name. Sorting happens once, on first use, and a
// duplicate name is a fatal schema definition error that must be
// caught before any test runs.
static SORTED: Lazy<Vec<Property>> = Lazy::new(|| {
    let mut table = SCHEMA.to_vec();

    table.sort_by(|a, b| a.name.cmp(b.name));

    for pair in table.windows(2) {
        if pair[0].name == pair[1].name {
            panic!("duplicate property name in schema: {}", pair[0].name);
        }
    }

    log::trace!("property schema built ({} entries)", table.len());

    table
});

/// Returns the schema sorted by property name. Slot `i` of a
/// [Key](crate::key::Key) corresponds to entry `i` of this slice.
pub fn properties() -> &'static [Property] {
    &SORTED
}

/// Looks up a property by name and returns its slot index along with
/// its schema entry, or `None` if no property has that name.
pub fn find(name: &str) -> Option<(usize, &'static Property)> {
    let table = properties();

    table.binary_search_by(|p| p.name.cmp(name))
        .ok()
        .map(|pos| (pos, &table[pos]))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sorted_and_unique() {
        let table = properties();

        assert_eq!(table.len(), N_PROPERTIES);

        for pair in table.windows(2) {
            assert!(pair[0].name < pair[1].name);
        }
    }

    #[test]
    fn test_find_every_property() {
        for (i, prop) in properties().iter().enumerate() {
            let (pos, found) = find(prop.name).unwrap();
            assert_eq!(pos, i);
            assert_eq!(found.name, prop.name);
        }

        assert!(find("unicornCount").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_kinds_and_defaults() {
        let (_, prop) = find("topology").unwrap();
        assert_eq!(prop.kind(), Kind::Int);
        assert_eq!(
            prop.default,
            Value::Int(vk::VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP as i32),
        );

        let (_, prop) = find("depthTestEnable").unwrap();
        assert_eq!(prop.kind(), Kind::Bool);
        assert_eq!(prop.default, Value::Bool(false));

        let (_, prop) = find("lineWidth").unwrap();
        assert_eq!(prop.kind(), Kind::Float);
        assert_eq!(prop.default, Value::Float(1.0));

        let (_, prop) = find("back.compareMask").unwrap();
        assert_eq!(prop.category, Category::StencilBack);
        assert_eq!(prop.default, Value::Int(-1));

        let (_, prop) = find("colorWriteMask").unwrap();
        assert_eq!(prop.category, Category::BlendAttachment);
        assert_eq!(prop.default, Value::Int(15));
    }

    #[test]
    fn test_offsets_match_fields() {
        let (_, prop) = find("cullMode").unwrap();
        assert_eq!(
            prop.offset,
            offset_of!(vk::VkPipelineRasterizationStateCreateInfo, cullMode),
        );

        let (_, prop) = find("front.reference").unwrap();
        assert_eq!(prop.offset, offset_of!(vk::VkStencilOpState, reference));
    }

    #[test]
    fn test_value_equality_is_bitwise() {
        assert_eq!(Value::Float(1.0), Value::Float(1.0));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(Value::Float(f32::NAN), Value::Float(f32::NAN));
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_ne!(Value::Int(0), Value::Float(0.0));
    }

    #[test]
    fn test_value_debug() {
        assert_eq!(format!("{:?}", Value::Bool(true)), "true");
        assert_eq!(format!("{:?}", Value::Int(-1)), "-1");
        assert_eq!(format!("{:?}", Value::Float(42.0)), "42");
    }
}
