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

//! Resolution of symbolic Vulkan enum names to their integer codes.
//! The table is flat: a name resolves to the same code no matter which
//! property it ends up assigned to, so for example the comparison
//! operator names serve both the depth and the stencil compare
//! properties.

use crate::key::LookupError;
use crate::vk;
use once_cell::sync::Lazy;

struct EnumValue {
    name: &'static str,
    value: i32,
}

macro_rules! enum_value {
    ($name:ident) => {
        EnumValue {
            name: stringify!($name),
            value: vk::$name as i32,
        }
    };
}

static ENUM_VALUES: [EnumValue; 80] = [
    enum_value!(VK_PRIMITIVE_TOPOLOGY_POINT_LIST),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_LINE_LIST),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_LINE_STRIP),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_TRIANGLE_FAN),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_LINE_LIST_WITH_ADJACENCY),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_LINE_STRIP_WITH_ADJACENCY),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST_WITH_ADJACENCY),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP_WITH_ADJACENCY),
    enum_value!(VK_PRIMITIVE_TOPOLOGY_PATCH_LIST),

    enum_value!(VK_POLYGON_MODE_FILL),
    enum_value!(VK_POLYGON_MODE_LINE),
    enum_value!(VK_POLYGON_MODE_POINT),

    enum_value!(VK_CULL_MODE_NONE),
    enum_value!(VK_CULL_MODE_FRONT_BIT),
    enum_value!(VK_CULL_MODE_BACK_BIT),
    enum_value!(VK_CULL_MODE_FRONT_AND_BACK),

    enum_value!(VK_FRONT_FACE_COUNTER_CLOCKWISE),
    enum_value!(VK_FRONT_FACE_CLOCKWISE),

    enum_value!(VK_COMPARE_OP_NEVER),
    enum_value!(VK_COMPARE_OP_LESS),
    enum_value!(VK_COMPARE_OP_EQUAL),
    enum_value!(VK_COMPARE_OP_LESS_OR_EQUAL),
    enum_value!(VK_COMPARE_OP_GREATER),
    enum_value!(VK_COMPARE_OP_NOT_EQUAL),
    enum_value!(VK_COMPARE_OP_GREATER_OR_EQUAL),
    enum_value!(VK_COMPARE_OP_ALWAYS),

    enum_value!(VK_STENCIL_OP_KEEP),
    enum_value!(VK_STENCIL_OP_ZERO),
    enum_value!(VK_STENCIL_OP_REPLACE),
    enum_value!(VK_STENCIL_OP_INCREMENT_AND_CLAMP),
    enum_value!(VK_STENCIL_OP_DECREMENT_AND_CLAMP),
    enum_value!(VK_STENCIL_OP_INVERT),
    enum_value!(VK_STENCIL_OP_INCREMENT_AND_WRAP),
    enum_value!(VK_STENCIL_OP_DECREMENT_AND_WRAP),

    enum_value!(VK_LOGIC_OP_CLEAR),
    enum_value!(VK_LOGIC_OP_AND),
    enum_value!(VK_LOGIC_OP_AND_REVERSE),
    enum_value!(VK_LOGIC_OP_COPY),
    enum_value!(VK_LOGIC_OP_AND_INVERTED),
    enum_value!(VK_LOGIC_OP_NO_OP),
    enum_value!(VK_LOGIC_OP_XOR),
    enum_value!(VK_LOGIC_OP_OR),
    enum_value!(VK_LOGIC_OP_NOR),
    enum_value!(VK_LOGIC_OP_EQUIVALENT),
    enum_value!(VK_LOGIC_OP_INVERT),
    enum_value!(VK_LOGIC_OP_OR_REVERSE),
    enum_value!(VK_LOGIC_OP_COPY_INVERTED),
    enum_value!(VK_LOGIC_OP_OR_INVERTED),
    enum_value!(VK_LOGIC_OP_NAND),
    enum_value!(VK_LOGIC_OP_SET),

    enum_value!(VK_BLEND_FACTOR_ZERO),
    enum_value!(VK_BLEND_FACTOR_ONE),
    enum_value!(VK_BLEND_FACTOR_SRC_COLOR),
    enum_value!(VK_BLEND_FACTOR_ONE_MINUS_SRC_COLOR),
    enum_value!(VK_BLEND_FACTOR_DST_COLOR),
    enum_value!(VK_BLEND_FACTOR_ONE_MINUS_DST_COLOR),
    enum_value!(VK_BLEND_FACTOR_SRC_ALPHA),
    enum_value!(VK_BLEND_FACTOR_ONE_MINUS_SRC_ALPHA),
    enum_value!(VK_BLEND_FACTOR_DST_ALPHA),
    enum_value!(VK_BLEND_FACTOR_ONE_MINUS_DST_ALPHA),
    enum_value!(VK_BLEND_FACTOR_CONSTANT_COLOR),
    enum_value!(VK_BLEND_FACTOR_ONE_MINUS_CONSTANT_COLOR),
    enum_value!(VK_BLEND_FACTOR_CONSTANT_ALPHA),
    enum_value!(VK_BLEND_FACTOR_ONE_MINUS_CONSTANT_ALPHA),
    enum_value!(VK_BLEND_FACTOR_SRC_ALPHA_SATURATE),
    enum_value!(VK_BLEND_FACTOR_SRC1_COLOR),
    enum_value!(VK_BLEND_FACTOR_ONE_MINUS_SRC1_COLOR),
    enum_value!(VK_BLEND_FACTOR_SRC1_ALPHA),
    enum_value!(VK_BLEND_FACTOR_ONE_MINUS_SRC1_ALPHA),

    enum_value!(VK_BLEND_OP_ADD),
    enum_value!(VK_BLEND_OP_SUBTRACT),
    enum_value!(VK_BLEND_OP_REVERSE_SUBTRACT),
    enum_value!(VK_BLEND_OP_MIN),
    enum_value!(VK_BLEND_OP_MAX),

    enum_value!(VK_COLOR_COMPONENT_R_BIT),
    enum_value!(VK_COLOR_COMPONENT_G_BIT),
    enum_value!(VK_COLOR_COMPONENT_B_BIT),
    enum_value!(VK_COLOR_COMPONENT_A_BIT),
];

// Sorted once on first use so that lookup can binary search. A
// duplicate name would make two lookups ambiguous and is a fatal
// table definition error.
static SORTED: Lazy<Vec<&'static EnumValue>> = Lazy::new(|| {
    let mut table: Vec<&EnumValue> = ENUM_VALUES.iter().collect();

    table.sort_by(|a, b| a.name.cmp(b.name));

    for pair in table.windows(2) {
        if pair[0].name == pair[1].name {
            panic!("duplicate name in enum table: {}", pair[0].name);
        }
    }

    table
});

/// Resolves a symbolic enum name to its integer code. The result
/// depends only on the name, never on which property the value is
/// being assigned to. Returns [LookupError::UnknownEnum] for an
/// unrecognized name; reporting that with source-location context is
/// the caller's job.
pub fn lookup_enum(name: &str) -> Result<i32, LookupError> {
    SORTED.binary_search_by(|e| e.name.cmp(name))
        .map(|pos| SORTED[pos].value)
        .map_err(|_| LookupError::UnknownEnum(name))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(
            lookup_enum("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP").unwrap(),
            4,
        );
        assert_eq!(lookup_enum("VK_CULL_MODE_BACK_BIT").unwrap(), 2);
        assert_eq!(lookup_enum("VK_BLEND_FACTOR_SRC_ALPHA").unwrap(), 6);
        assert_eq!(lookup_enum("VK_LOGIC_OP_SET").unwrap(), 15);
        assert_eq!(lookup_enum("VK_COLOR_COMPONENT_A_BIT").unwrap(), 8);
    }

    #[test]
    fn test_shared_namespace() {
        // The comparison operators resolve the same whether they end
        // up in depthCompareOp or one of the stencil compareOps, and
        // the two INVERTs keep their own prefixed names.
        assert_eq!(lookup_enum("VK_COMPARE_OP_ALWAYS").unwrap(), 7);
        assert_eq!(lookup_enum("VK_STENCIL_OP_INVERT").unwrap(), 5);
        assert_eq!(lookup_enum("VK_LOGIC_OP_INVERT").unwrap(), 10);
    }

    #[test]
    fn test_pure_function_of_table() {
        for e in ENUM_VALUES.iter() {
            assert_eq!(lookup_enum(e.name).unwrap(), e.value);
            assert_eq!(lookup_enum(e.name).unwrap(), e.value);
        }
    }

    #[test]
    fn test_unknown_name() {
        let e = lookup_enum("VK_CULL_MODE_SIDEWAYS").unwrap_err();
        assert_eq!(e.to_string(), "Unknown enum name: VK_CULL_MODE_SIDEWAYS");
        assert!(lookup_enum("").is_err());
    }
}
