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

use crate::schema::{self, Kind, Value, N_PROPERTIES};
use std::fmt;
use thiserror::Error;

/// Notes whether the pipeline will be used to draw a full-viewport
/// rectangle or whether it will use explicit vertex data supplied by
/// the test.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Source {
    Rectangle,
    VertexData,
}

/// The failure code returned by [Key::lookup] and
/// [lookup_enum](crate::enum_table::lookup_enum). An unknown name is a
/// normal negative result; the script parser uses it to decide whether
/// a token names a property at all and owns the user-facing
/// diagnostic.
#[derive(Copy, Clone, Debug, Error)]
pub enum LookupError<'a> {
    #[error("Unknown property: {0}")]
    UnknownProperty(&'a str),
    #[error("Unknown enum name: {0}")]
    UnknownEnum(&'a str),
}

/// A complete description of the configurable pipeline state requested
/// by a test. The intention is that this will work as a key so that
/// the runner can detect when the same state is used more than once
/// and reuse the pipeline object it already built: two keys are equal
/// exactly when every slot (including [source](Key::source)) is
/// bit-identical, and `Key` implements [Hash](std::hash::Hash) on the
/// same terms so it can be used directly in a map.
///
/// Slot `i` holds the value of entry `i` of the sorted
/// [schema](schema::properties); a freshly created key holds every
/// schema default and compares equal to any other fresh key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key {
    source: Source,
    values: [Value; N_PROPERTIES],
}

impl Key {
    pub fn new() -> Key {
        Key {
            source: Source::Rectangle,
            values: std::array::from_fn(|i| schema::properties()[i].default),
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn set_source(&mut self, source: Source) {
        self.source = source;
    }

    /// Looks up a property by name and returns a mutable reference to
    /// its slot together with the declared kind, so the caller knows
    /// which [Value] variant to write. The lookup itself never
    /// changes the key; whether to write through the returned slot is
    /// the caller's decision. Returns
    /// [UnknownProperty](LookupError::UnknownProperty) when no schema
    /// entry has that name.
    pub fn lookup<'k, 'n>(
        &'k mut self,
        name: &'n str,
    ) -> Result<(&'k mut Value, Kind), LookupError<'n>> {
        match schema::find(name) {
            Some((index, prop)) => {
                Ok((&mut self.values[index], prop.kind()))
            },
            None => Err(LookupError::UnknownProperty(name)),
        }
    }

    // The translator walks this in step with schema::properties().
    pub(crate) fn values(&self) -> &[Value; N_PROPERTIES] {
        &self.values
    }
}

impl Default for Key {
    fn default() -> Key {
        Key::new()
    }
}

// Custom debug implementation that reports the slots using the
// property names instead of an anonymous array.
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Key {{ source: {:?}", self.source)?;

        for (prop, value) in schema::properties().iter().zip(&self.values) {
            write!(f, ", {}: {:?}", prop.name, value)?;
        }

        write!(f, " }}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn set(key: &mut Key, name: &str, value: Value) {
        let (slot, kind) = key.lookup(name).unwrap();
        assert_eq!(kind, value.kind());
        *slot = value;
    }

    #[test]
    fn test_fresh_keys_are_equal() {
        assert_eq!(Key::new(), Key::new());
        assert_eq!(Key::default(), Key::new());
        assert_eq!(Key::new().source(), Source::Rectangle);
    }

    #[test]
    fn test_mutation_breaks_equality() {
        let mut key = Key::new();
        let before = key.clone();

        assert_eq!(key, before);

        set(&mut key, "depthTestEnable", Value::Bool(true));
        assert_ne!(key, before);

        // Writing the default back restores equality; there are no
        // "don't care" slots.
        set(&mut key, "depthTestEnable", Value::Bool(false));
        assert_eq!(key, before);

        set(&mut key, "lineWidth", Value::Float(3.0));
        assert_ne!(key, before);
        set(&mut key, "lineWidth", Value::Float(1.0));
        assert_eq!(key, before);

        key.set_source(Source::VertexData);
        assert_ne!(key, before);
        key.set_source(Source::Rectangle);
        assert_eq!(key, before);
    }

    #[test]
    fn test_equality_ignores_mutation_order() {
        let mut a = Key::new();
        let mut b = Key::new();

        set(&mut a, "cullMode", Value::Int(2));
        set(&mut a, "depthTestEnable", Value::Bool(true));
        a.set_source(Source::VertexData);

        b.set_source(Source::VertexData);
        set(&mut b, "depthTestEnable", Value::Bool(true));
        set(&mut b, "depthTestEnable", Value::Bool(false));
        set(&mut b, "depthTestEnable", Value::Bool(true));
        set(&mut b, "cullMode", Value::Int(2));

        assert_eq!(a, b);
    }

    #[test]
    fn test_float_slots_compare_by_bits() {
        let mut a = Key::new();
        let mut b = Key::new();

        set(&mut a, "minDepthBounds", Value::Float(0.0));
        set(&mut b, "minDepthBounds", Value::Float(-0.0));
        assert_ne!(a, b);

        set(&mut b, "minDepthBounds", Value::Float(0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_lookup_kinds() {
        let mut key = Key::new();

        let (_, kind) = key.lookup("topology").unwrap();
        assert_eq!(kind, Kind::Int);
        let (_, kind) = key.lookup("blendEnable").unwrap();
        assert_eq!(kind, Kind::Bool);
        let (_, kind) = key.lookup("depthBiasClamp").unwrap();
        assert_eq!(kind, Kind::Float);

        let (slot, _) = key.lookup("front.reference").unwrap();
        assert_eq!(*slot, Value::Int(0));
    }

    #[test]
    fn test_lookup_unknown_property() {
        let mut key = Key::new();
        let before = key.clone();

        for _ in 0..3 {
            let e = key.lookup("unicornCount").unwrap_err();
            assert_eq!(e.to_string(), "Unknown property: unicornCount");
        }

        // A failed (or unwritten successful) lookup has no side
        // effects on the key.
        assert!(key.lookup("topology").is_ok());
        assert_eq!(key, before);
    }

    #[test]
    fn test_usable_as_map_key() {
        use std::collections::HashMap;

        let mut cache: HashMap<Key, u32> = HashMap::new();

        let mut key = Key::new();
        set(&mut key, "cullMode", Value::Int(2));

        cache.insert(Key::new(), 1);
        cache.insert(key.clone(), 2);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache[&Key::new()], 1);
        assert_eq!(cache[&key], 2);

        let mut same = Key::new();
        set(&mut same, "cullMode", Value::Int(2));
        assert_eq!(cache[&same], 2);
    }

    #[test]
    fn test_debug() {
        let mut key = Key::new();

        set(&mut key, "depthWriteEnable", Value::Bool(true));
        set(&mut key, "colorWriteMask", Value::Int(1));
        set(&mut key, "lineWidth", Value::Float(42.0));

        assert_eq!(
            format!("{:?}", key),
            "Key { \
             source: Rectangle, \
             alphaBlendOp: 0, \
             back.compareMask: -1, \
             back.compareOp: 7, \
             back.depthFailOp: 0, \
             back.failOp: 0, \
             back.passOp: 0, \
             back.reference: 0, \
             back.writeMask: -1, \
             blendEnable: false, \
             colorBlendOp: 0, \
             colorWriteMask: 1, \
             cullMode: 0, \
             depthBiasClamp: 0, \
             depthBiasConstantFactor: 0, \
             depthBiasEnable: false, \
             depthBiasSlopeFactor: 0, \
             depthBoundsTestEnable: false, \
             depthClampEnable: false, \
             depthCompareOp: 1, \
             depthTestEnable: false, \
             depthWriteEnable: true, \
             dstAlphaBlendFactor: 7, \
             dstColorBlendFactor: 7, \
             front.compareMask: -1, \
             front.compareOp: 7, \
             front.depthFailOp: 0, \
             front.failOp: 0, \
             front.passOp: 0, \
             front.reference: 0, \
             front.writeMask: -1, \
             frontFace: 0, \
             lineWidth: 42, \
             logicOp: 15, \
             logicOpEnable: false, \
             maxDepthBounds: 0, \
             minDepthBounds: 0, \
             patchControlPoints: 0, \
             polygonMode: 0, \
             primitiveRestartEnable: false, \
             rasterizerDiscardEnable: false, \
             srcAlphaBlendFactor: 6, \
             srcColorBlendFactor: 6, \
             stencilTestEnable: false, \
             topology: 4 \
             }",
        );
    }
}
