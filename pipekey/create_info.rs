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

//! Translation of a [Key] into the `VkGraphicsPipelineCreateInfo`
//! graph consumed by `vkCreateGraphicsPipelines`.

use crate::key::{Key, Source};
use crate::schema::{self, Category, Value};
use crate::vk;
use std::mem;
use std::ptr;

/// The vertex format the runner uploads when a pipeline draws an
/// implicit full-viewport rectangle.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct RectangleVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Metadata about the framebuffer the pipeline will draw to. The
/// viewport and scissor cover the whole target and the per-attachment
/// blend state from the key is replicated to every color attachment.
#[derive(Copy, Clone, Debug)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    pub n_color_attachments: u32,
}

/// One attribute of a caller-supplied vertex layout.
#[derive(Copy, Clone, Debug)]
pub struct VertexAttrib {
    pub location: u32,
    pub format: vk::VkFormat,
    pub offset: u32,
}

/// Describes the layout of the test's `[vertex data]` buffer. Only
/// consulted when the key's source is [Source::VertexData].
#[derive(Clone, Debug)]
pub struct VertexLayout {
    pub stride: u32,
    pub attribs: Vec<VertexAttrib>,
}

/// A fully populated `VkGraphicsPipelineCreateInfo` together with
/// every sub-descriptor it points to. Each sub-descriptor lives in its
/// own heap allocation so that the internal pointers stay valid when
/// the `CreateInfo` value itself is moved. The root descriptor leaves
/// the shader stages, pipeline layout and render pass zeroed; the
/// creation layer copies the root and fills those in before calling
/// `vkCreateGraphicsPipelines`.
// The fields other than root are only ever read through the root's
// pointers; they keep the allocations alive.
#[allow(dead_code)]
pub struct CreateInfo {
    root: Box<vk::VkGraphicsPipelineCreateInfo>,

    vertex_input: Box<vk::VkPipelineVertexInputStateCreateInfo>,
    input_bindings: Vec<vk::VkVertexInputBindingDescription>,
    attribs: Vec<vk::VkVertexInputAttributeDescription>,
    input_assembly: Box<vk::VkPipelineInputAssemblyStateCreateInfo>,
    tessellation: Box<vk::VkPipelineTessellationStateCreateInfo>,
    viewport: Box<vk::VkViewport>,
    scissor: Box<vk::VkRect2D>,
    viewport_state: Box<vk::VkPipelineViewportStateCreateInfo>,
    rasterization: Box<vk::VkPipelineRasterizationStateCreateInfo>,
    multisample: Box<vk::VkPipelineMultisampleStateCreateInfo>,
    depth_stencil: Box<vk::VkPipelineDepthStencilStateCreateInfo>,
    color_blend: Box<vk::VkPipelineColorBlendStateCreateInfo>,
    blend_attachments: Vec<vk::VkPipelineColorBlendAttachmentState>,
}

impl CreateInfo {
    /// Builds the descriptor graph for `key`. Every required
    /// sub-descriptor is populated even when the key holds only
    /// default values. `vertex_layout` is only read when the key's
    /// source is [Source::VertexData]; with [Source::Rectangle] the
    /// vertex input state is the fixed full-viewport-quad
    /// configuration and any supplied layout is ignored.
    pub fn new(
        key: &Key,
        target: &RenderTarget,
        vertex_layout: Option<&VertexLayout>,
    ) -> CreateInfo {
        log::debug!(
            "building create info: source={:?}, {}x{}, {} attachment(s)",
            key.source(),
            target.width,
            target.height,
            target.n_color_attachments,
        );

        let mut input_assembly =
            Box::new(vk::VkPipelineInputAssemblyStateCreateInfo {
                sType:
                vk::VK_STRUCTURE_TYPE_PIPELINE_INPUT_ASSEMBLY_STATE_CREATE_INFO,
                pNext: ptr::null(),
                flags: 0,
                topology: 0,
                primitiveRestartEnable: vk::VK_FALSE,
            });

        let mut tessellation =
            Box::new(vk::VkPipelineTessellationStateCreateInfo {
                sType:
                vk::VK_STRUCTURE_TYPE_PIPELINE_TESSELLATION_STATE_CREATE_INFO,
                pNext: ptr::null(),
                flags: 0,
                patchControlPoints: 0,
            });

        let mut rasterization =
            Box::new(vk::VkPipelineRasterizationStateCreateInfo {
                sType:
                vk::VK_STRUCTURE_TYPE_PIPELINE_RASTERIZATION_STATE_CREATE_INFO,
                pNext: ptr::null(),
                flags: 0,
                depthClampEnable: vk::VK_FALSE,
                rasterizerDiscardEnable: vk::VK_FALSE,
                polygonMode: 0,
                cullMode: 0,
                frontFace: 0,
                depthBiasEnable: vk::VK_FALSE,
                depthBiasConstantFactor: 0.0,
                depthBiasClamp: 0.0,
                depthBiasSlopeFactor: 0.0,
                lineWidth: 0.0,
            });

        let mut depth_stencil =
            Box::new(vk::VkPipelineDepthStencilStateCreateInfo {
                sType:
                vk::VK_STRUCTURE_TYPE_PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO,
                pNext: ptr::null(),
                flags: 0,
                depthTestEnable: vk::VK_FALSE,
                depthWriteEnable: vk::VK_FALSE,
                depthCompareOp: 0,
                depthBoundsTestEnable: vk::VK_FALSE,
                stencilTestEnable: vk::VK_FALSE,
                front: Default::default(),
                back: Default::default(),
                minDepthBounds: 0.0,
                maxDepthBounds: 0.0,
            });

        let mut color_blend =
            Box::new(vk::VkPipelineColorBlendStateCreateInfo {
                sType:
                vk::VK_STRUCTURE_TYPE_PIPELINE_COLOR_BLEND_STATE_CREATE_INFO,
                pNext: ptr::null(),
                flags: 0,
                logicOpEnable: vk::VK_FALSE,
                logicOp: 0,
                attachmentCount: 0,
                pAttachments: ptr::null(),
                blendConstants: [0.0; 4],
            });

        let mut blend_attachment =
            vk::VkPipelineColorBlendAttachmentState::default();

        // One walk over the schema writes every slot into its
        // category's descriptor at the recorded field offset. All
        // target fields are four-byte scalars.
        for (prop, value) in schema::properties().iter().zip(key.values()) {
            let base: *mut u8 = match prop.category {
                Category::InputAssembly => {
                    ptr::addr_of_mut!(*input_assembly).cast()
                },
                Category::Tessellation => {
                    ptr::addr_of_mut!(*tessellation).cast()
                },
                Category::Rasterization => {
                    ptr::addr_of_mut!(*rasterization).cast()
                },
                Category::DepthStencil => {
                    ptr::addr_of_mut!(*depth_stencil).cast()
                },
                Category::StencilFront => {
                    ptr::addr_of_mut!(depth_stencil.front).cast()
                },
                Category::StencilBack => {
                    ptr::addr_of_mut!(depth_stencil.back).cast()
                },
                Category::ColorBlend => {
                    ptr::addr_of_mut!(*color_blend).cast()
                },
                Category::BlendAttachment => {
                    ptr::addr_of_mut!(blend_attachment).cast()
                },
            };

            // SAFETY: prop.offset comes from offset_of! on the struct
            // that base points to, so the write stays inside that
            // struct and lands on a correctly aligned scalar field.
            unsafe {
                let field = base.add(prop.offset);

                match value {
                    Value::Bool(v) => {
                        field.cast::<vk::VkBool32>()
                            .write(*v as vk::VkBool32);
                    },
                    Value::Int(v) => field.cast::<i32>().write(*v),
                    Value::Float(v) => field.cast::<f32>().write(*v),
                }
            }
        }

        // The key models one blend configuration applied uniformly to
        // every color attachment of the render target.
        let blend_attachments =
            vec![blend_attachment; target.n_color_attachments as usize];
        color_blend.attachmentCount = blend_attachments.len() as u32;
        color_blend.pAttachments = blend_attachments.as_ptr();

        let viewport = Box::new(vk::VkViewport {
            x: 0.0,
            y: 0.0,
            width: target.width as f32,
            height: target.height as f32,
            minDepth: 0.0,
            maxDepth: 0.0,
        });

        let scissor = Box::new(vk::VkRect2D {
            offset: vk::VkOffset2D { x: 0, y: 0 },
            extent: vk::VkExtent2D {
                width: target.width,
                height: target.height,
            },
        });

        let viewport_state =
            Box::new(vk::VkPipelineViewportStateCreateInfo {
                sType:
                vk::VK_STRUCTURE_TYPE_PIPELINE_VIEWPORT_STATE_CREATE_INFO,
                pNext: ptr::null(),
                flags: 0,
                viewportCount: 1,
                pViewports: &*viewport,
                scissorCount: 1,
                pScissors: &*scissor,
            });

        let multisample =
            Box::new(vk::VkPipelineMultisampleStateCreateInfo {
                sType:
                vk::VK_STRUCTURE_TYPE_PIPELINE_MULTISAMPLE_STATE_CREATE_INFO,
                pNext: ptr::null(),
                flags: 0,
                rasterizationSamples: vk::VK_SAMPLE_COUNT_1_BIT,
                sampleShadingEnable: vk::VK_FALSE,
                minSampleShading: 0.0,
                pSampleMask: ptr::null(),
                alphaToCoverageEnable: vk::VK_FALSE,
                alphaToOneEnable: vk::VK_FALSE,
            });

        let mut input_bindings = Vec::new();
        let mut attribs = Vec::new();

        match key.source() {
            Source::Rectangle => {
                input_bindings.push(vk::VkVertexInputBindingDescription {
                    binding: 0,
                    stride: mem::size_of::<RectangleVertex>() as u32,
                    inputRate: vk::VK_VERTEX_INPUT_RATE_VERTEX,
                });
                attribs.push(vk::VkVertexInputAttributeDescription {
                    location: 0,
                    binding: 0,
                    format: vk::VK_FORMAT_R32G32B32_SFLOAT,
                    offset: 0,
                });
            },
            Source::VertexData => {
                if let Some(layout) = vertex_layout {
                    input_bindings.push(
                        vk::VkVertexInputBindingDescription {
                            binding: 0,
                            stride: layout.stride,
                            inputRate: vk::VK_VERTEX_INPUT_RATE_VERTEX,
                        }
                    );

                    for attrib in layout.attribs.iter() {
                        attribs.push(
                            vk::VkVertexInputAttributeDescription {
                                location: attrib.location,
                                binding: 0,
                                format: attrib.format,
                                offset: attrib.offset,
                            }
                        );
                    }
                }
            },
        }

        let vertex_input =
            Box::new(vk::VkPipelineVertexInputStateCreateInfo {
                sType:
                vk::VK_STRUCTURE_TYPE_PIPELINE_VERTEX_INPUT_STATE_CREATE_INFO,
                pNext: ptr::null(),
                flags: 0,
                vertexBindingDescriptionCount: input_bindings.len() as u32,
                pVertexBindingDescriptions: input_bindings.as_ptr(),
                vertexAttributeDescriptionCount: attribs.len() as u32,
                pVertexAttributeDescriptions: attribs.as_ptr(),
            });

        let root = Box::new(vk::VkGraphicsPipelineCreateInfo {
            sType: vk::VK_STRUCTURE_TYPE_GRAPHICS_PIPELINE_CREATE_INFO,
            pNext: ptr::null(),
            flags: 0,
            stageCount: 0,
            pStages: ptr::null(),
            pVertexInputState: &*vertex_input,
            pInputAssemblyState: &*input_assembly,
            pTessellationState: &*tessellation,
            pViewportState: &*viewport_state,
            pRasterizationState: &*rasterization,
            pMultisampleState: &*multisample,
            pDepthStencilState: &*depth_stencil,
            pColorBlendState: &*color_blend,
            pDynamicState: ptr::null(),
            layout: 0,
            renderPass: 0,
            subpass: 0,
            basePipelineHandle: 0,
            basePipelineIndex: -1,
        });

        CreateInfo {
            root,
            vertex_input,
            input_bindings,
            attribs,
            input_assembly,
            tessellation,
            viewport,
            scissor,
            viewport_state,
            rasterization,
            multisample,
            depth_stencil,
            color_blend,
            blend_attachments,
        }
    }

    /// The root descriptor. The sub-descriptors can be reached by
    /// following its pointers.
    pub fn graphics_info(&self) -> &vk::VkGraphicsPipelineCreateInfo {
        &self.root
    }

    pub fn as_ptr(&self) -> *const vk::VkGraphicsPipelineCreateInfo {
        &*self.root
    }
}

impl Key {
    /// Builds the `VkGraphicsPipelineCreateInfo` graph for this key.
    /// See [CreateInfo::new].
    pub fn to_create_info(
        &self,
        target: &RenderTarget,
        vertex_layout: Option<&VertexLayout>,
    ) -> CreateInfo {
        CreateInfo::new(self, target, vertex_layout)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::enum_table::lookup_enum;

    const TARGET: RenderTarget = RenderTarget {
        width: 250,
        height: 250,
        n_color_attachments: 1,
    };

    fn set(key: &mut Key, name: &str, value: Value) {
        let (slot, kind) = key.lookup(name).unwrap();
        assert_eq!(kind, value.kind());
        *slot = value;
    }

    #[test]
    fn test_default_key_translation() {
        let ci = Key::new().to_create_info(&TARGET, None);
        let info = ci.graphics_info();

        assert_eq!(
            info.sType,
            vk::VK_STRUCTURE_TYPE_GRAPHICS_PIPELINE_CREATE_INFO,
        );
        assert_eq!(info.basePipelineIndex, -1);

        unsafe {
            let ia = &*info.pInputAssemblyState;
            assert_eq!(
                ia.sType,
                vk::VK_STRUCTURE_TYPE_PIPELINE_INPUT_ASSEMBLY_STATE_CREATE_INFO,
            );
            assert_eq!(ia.topology, vk::VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP);
            assert_eq!(ia.primitiveRestartEnable, vk::VK_FALSE);

            assert_eq!((*info.pTessellationState).patchControlPoints, 0);

            let rast = &*info.pRasterizationState;
            assert_eq!(rast.polygonMode, vk::VK_POLYGON_MODE_FILL);
            assert_eq!(rast.cullMode, vk::VK_CULL_MODE_NONE);
            assert_eq!(rast.frontFace, vk::VK_FRONT_FACE_COUNTER_CLOCKWISE);
            assert_eq!(rast.lineWidth, 1.0);
            assert_eq!(rast.depthBiasEnable, vk::VK_FALSE);

            let ds = &*info.pDepthStencilState;
            assert_eq!(
                ds.sType,
                vk::VK_STRUCTURE_TYPE_PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO,
            );
            assert_eq!(ds.depthTestEnable, vk::VK_FALSE);
            assert_eq!(ds.depthCompareOp, vk::VK_COMPARE_OP_LESS);
            assert_eq!(ds.front.compareOp, vk::VK_COMPARE_OP_ALWAYS);
            assert_eq!(ds.front.failOp, vk::VK_STENCIL_OP_KEEP);
            assert_eq!(ds.front.compareMask, u32::MAX);
            assert_eq!(ds.back.writeMask, u32::MAX);
            assert_eq!(ds.back.reference, 0);

            let cb = &*info.pColorBlendState;
            assert_eq!(
                cb.sType,
                vk::VK_STRUCTURE_TYPE_PIPELINE_COLOR_BLEND_STATE_CREATE_INFO,
            );
            assert_eq!(cb.logicOpEnable, vk::VK_FALSE);
            assert_eq!(cb.logicOp, vk::VK_LOGIC_OP_SET);
            assert_eq!(cb.attachmentCount, 1);

            let att = &*cb.pAttachments;
            assert_eq!(att.blendEnable, vk::VK_FALSE);
            assert_eq!(att.srcColorBlendFactor, vk::VK_BLEND_FACTOR_SRC_ALPHA);
            assert_eq!(
                att.dstColorBlendFactor,
                vk::VK_BLEND_FACTOR_ONE_MINUS_SRC_ALPHA,
            );
            assert_eq!(att.colorBlendOp, vk::VK_BLEND_OP_ADD);
            assert_eq!(att.colorWriteMask, 15);

            let vp = &*info.pViewportState;
            assert_eq!(vp.viewportCount, 1);
            assert_eq!((*vp.pViewports).width, 250.0);
            assert_eq!((*vp.pScissors).extent.height, 250);

            let ms = &*info.pMultisampleState;
            assert_eq!(ms.rasterizationSamples, vk::VK_SAMPLE_COUNT_1_BIT);
            assert_eq!(ms.sampleShadingEnable, vk::VK_FALSE);
        }
    }

    #[test]
    fn test_lookup_without_write_does_not_affect_translation() {
        let mut key = Key::new();

        assert!(key.lookup("cullMode").is_ok());
        assert!(key.lookup("lineWidth").is_ok());
        assert!(key.lookup("nonsense").is_err());

        let ci = key.to_create_info(&TARGET, None);
        let fresh = Key::new().to_create_info(&TARGET, None);

        unsafe {
            assert_eq!(
                (*ci.graphics_info().pRasterizationState).cullMode,
                (*fresh.graphics_info().pRasterizationState).cullMode,
            );
            assert_eq!(
                (*ci.graphics_info().pRasterizationState).lineWidth,
                (*fresh.graphics_info().pRasterizationState).lineWidth,
            );
        }
    }

    #[test]
    fn test_cull_and_depth_scenario() {
        let mut key = Key::new();

        let cull = lookup_enum("VK_CULL_MODE_BACK_BIT").unwrap();
        set(&mut key, "cullMode", Value::Int(cull));
        set(&mut key, "depthTestEnable", Value::Bool(true));

        assert_ne!(key, Key::new());

        let ci = key.to_create_info(&TARGET, None);
        let info = ci.graphics_info();

        unsafe {
            assert_eq!(
                (*info.pRasterizationState).cullMode,
                vk::VK_CULL_MODE_BACK_BIT,
            );
            assert_eq!((*info.pDepthStencilState).depthTestEnable, vk::VK_TRUE);

            // Untouched categories keep their defaults.
            assert_eq!(
                (*info.pInputAssemblyState).topology,
                vk::VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP,
            );
            assert_eq!(
                (*(*info.pColorBlendState).pAttachments).srcColorBlendFactor,
                vk::VK_BLEND_FACTOR_SRC_ALPHA,
            );
            assert_eq!((*info.pRasterizationState).lineWidth, 1.0);
        }
    }

    #[test]
    fn test_rectangle_vertex_input() {
        // With a rectangle source the vertex input is the fixed quad
        // configuration; a supplied layout is ignored.
        let layout = VertexLayout {
            stride: 20,
            attribs: vec![
                VertexAttrib { location: 0, format: 1, offset: 0 },
                VertexAttrib { location: 3, format: 1, offset: 8 },
            ],
        };

        let key = Key::new();
        let ci = key.to_create_info(&TARGET, Some(&layout));

        unsafe {
            let vi = &*ci.graphics_info().pVertexInputState;
            assert_eq!(vi.vertexBindingDescriptionCount, 1);
            assert_eq!((*vi.pVertexBindingDescriptions).stride, 12);
            assert_eq!(vi.vertexAttributeDescriptionCount, 1);
            assert_eq!(
                (*vi.pVertexAttributeDescriptions).format,
                vk::VK_FORMAT_R32G32B32_SFLOAT,
            );
        }
    }

    #[test]
    fn test_vertex_data_input() {
        let layout = VertexLayout {
            stride: 20,
            attribs: vec![
                VertexAttrib {
                    location: 0,
                    format: vk::VK_FORMAT_R32G32B32_SFLOAT,
                    offset: 0,
                },
                VertexAttrib { location: 3, format: 1, offset: 12 },
            ],
        };

        let mut key = Key::new();
        key.set_source(Source::VertexData);

        let ci = key.to_create_info(&TARGET, Some(&layout));

        unsafe {
            let vi = &*ci.graphics_info().pVertexInputState;
            assert_eq!(vi.vertexBindingDescriptionCount, 1);
            assert_eq!((*vi.pVertexBindingDescriptions).stride, 20);
            assert_eq!(vi.vertexAttributeDescriptionCount, 2);

            let attribs = std::slice::from_raw_parts(
                vi.pVertexAttributeDescriptions,
                2,
            );
            assert_eq!(attribs[0].location, 0);
            assert_eq!(attribs[1].location, 3);
            assert_eq!(attribs[1].offset, 12);
        }

        // Without layout metadata there is nothing to describe.
        let ci = key.to_create_info(&TARGET, None);
        unsafe {
            let vi = &*ci.graphics_info().pVertexInputState;
            assert_eq!(vi.vertexBindingDescriptionCount, 0);
            assert_eq!(vi.vertexAttributeDescriptionCount, 0);
        }
    }

    #[test]
    fn test_blend_state_replication() {
        let target = RenderTarget {
            width: 64,
            height: 64,
            n_color_attachments: 4,
        };

        let mut key = Key::new();
        set(&mut key, "blendEnable", Value::Bool(true));
        set(&mut key, "colorWriteMask", Value::Int(
            (vk::VK_COLOR_COMPONENT_R_BIT | vk::VK_COLOR_COMPONENT_G_BIT)
                as i32
        ));

        let ci = key.to_create_info(&target, None);

        unsafe {
            let cb = &*ci.graphics_info().pColorBlendState;
            assert_eq!(cb.attachmentCount, 4);

            let attachments = std::slice::from_raw_parts(cb.pAttachments, 4);
            for att in attachments {
                assert_eq!(att.blendEnable, vk::VK_TRUE);
                assert_eq!(att.colorWriteMask, 3);
                assert_eq!(att, &attachments[0]);
            }
        }
    }

    #[test]
    fn test_graph_survives_moves() {
        let mut graphs = Vec::new();

        for width in [10u32, 20, 30] {
            let target = RenderTarget {
                width,
                height: 16,
                n_color_attachments: 1,
            };
            graphs.push(Key::new().to_create_info(&target, None));
        }

        // Growing the vec moved the CreateInfo values; the heap
        // allocations the root points into did not move.
        for (ci, width) in graphs.iter().zip([10.0f32, 20.0, 30.0]) {
            unsafe {
                let vp = &*ci.graphics_info().pViewportState;
                assert_eq!((*vp.pViewports).width, width);
                assert_eq!(
                    (*ci.graphics_info().pInputAssemblyState).topology,
                    vk::VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP,
                );
            }
        }
    }
}
