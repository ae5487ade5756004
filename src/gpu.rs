//! GPU compute backend.
//!
//! The kernel in `escape_time.wgsl` runs one invocation per pixel and
//! writes packed `[alpha, blue, green, red]` words into a storage
//! buffer, which is copied to a staging buffer and read back blocking.
//! Device, queue, and compiled pipeline are process-scoped: built on
//! first use and reused by every render, so the kernel source is never
//! recompiled per frame.

use std::num::NonZeroU64;
use std::sync::mpsc;

use bytemuck::{Pod, Zeroable};
use log::{debug, trace};
use once_cell::sync::OnceCell;

use crate::engine::{FractalKind, JULIA_CONSTANT};
use crate::error::Error;
use crate::pixel::{PixelBuffer, Rgb};
use crate::plane::PlaneMapping;
use crate::typed_buffer;

const WORKGROUP_SIZE: u32 = 16;

/// Uniform parameter block, mirroring `escape_time.wgsl#Params`
/// field for field. The kernel works in single precision.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug)]
struct KernelParams {
    real_left: f32,
    imaginary_top: f32,
    real_factor: f32,
    imaginary_factor: f32,
    constant_re: f32,
    constant_im: f32,
    max_iterations: u32,
    width: u32,
    height: u32,
    use_constant: u32,
    _pad: [u32; 2],
}

impl KernelParams {
    fn new(kind: FractalKind, mapping: &PlaneMapping, width: u32, height: u32) -> Self {
        let (constant_re, constant_im) = JULIA_CONSTANT;
        Self {
            real_left: mapping.real_left as f32,
            imaginary_top: mapping.imaginary_top as f32,
            real_factor: mapping.real_factor as f32,
            imaginary_factor: mapping.imaginary_factor as f32,
            constant_re: constant_re as f32,
            constant_im: constant_im as f32,
            max_iterations: kind.max_iterations(),
            width,
            height,
            use_constant: u32::from(kind == FractalKind::Julia),
            _pad: [0; 2],
        }
    }
}

/// Long-lived GPU state: device, queue, and the compiled escape-time
/// pipeline.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline: wgpu::ComputePipeline,
}

static CONTEXT: OnceCell<GpuContext> = OnceCell::new();

/// The process-scoped context, initialised on first use.
///
/// Fails with [`Error::DeviceUnavailable`] when no compute adapter
/// exists (a later call will probe again) and with
/// [`Error::KernelBuildFailure`] when the kernel does not compile on the
/// selected device.
pub fn context() -> Result<&'static GpuContext, Error> {
    CONTEXT.get_or_try_init(GpuContext::new)
}

pub fn render(kind: FractalKind, width: u32, height: u32) -> Result<PixelBuffer, Error> {
    context()?.render(kind, width, height)
}

impl GpuContext {
    fn new() -> Result<Self, Error> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: None,
        }))
        .ok_or(Error::DeviceUnavailable)?;
        debug!("using adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("escape-time-device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))
        .map_err(|_| Error::DeviceUnavailable)?;

        // Validation errors from shader and pipeline creation land in
        // this scope instead of the device's uncaptured-error handler.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("escape-time-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("escape_time.wgsl").into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("escape-time-bind-group-layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: NonZeroU64::new(
                                std::mem::size_of::<KernelParams>() as u64
                            ),
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: false },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("escape-time-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("escape-time-pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader_module,
            entry_point: "escape_time",
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(Error::KernelBuildFailure(error.to_string()));
        }

        Ok(Self {
            device,
            queue,
            bind_group_layout,
            pipeline,
        })
    }

    /// Launch the kernel over a `width x height` grid and block until
    /// the packed output has been read back into host memory.
    pub fn render(&self, kind: FractalKind, width: u32, height: u32) -> Result<PixelBuffer, Error> {
        let mapping = PlaneMapping::new(kind.window(), width, height)?;
        let params = KernelParams::new(kind, &mapping, width, height);
        let pixel_count = u64::from(width) * u64::from(height);

        let params_buffer = typed_buffer::Builder::from(&[params][..])
            .with_label("escape-time-params")
            .with_usage(wgpu::BufferUsages::UNIFORM)
            .create(&self.device);

        let output_buffer = typed_buffer::Builder::<u32>::new(pixel_count)
            .with_label("escape-time-output")
            .with_usage(wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC)
            .create(&self.device);

        let staging_buffer = typed_buffer::Builder::<u32>::new(pixel_count)
            .with_label("escape-time-staging")
            .with_usage(wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST)
            .create(&self.device);

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("escape-time-bind-group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.binding_resource(0, None),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output_buffer.binding_resource(0, None),
                },
            ],
        });

        let mut command_encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        {
            let mut compute_pass =
                command_encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("escape-time-pass"),
                });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(
                (width + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE,
                (height + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE,
                1,
            );
        }
        typed_buffer::copy_buffer_to_buffer(
            &mut command_encoder,
            &output_buffer,
            0,
            &staging_buffer,
            0,
            pixel_count,
        );

        self.queue.submit([command_encoder.finish()]);
        trace!("kernel submitted for {} {}x{}", kind, width, height);

        // One blocking wait covers both the dispatch and the copy; no
        // result is observable before the full grid has completed.
        let slice = staging_buffer.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);
        receiver
            .recv()
            .map_err(|_| Error::DeviceUnavailable)?
            .map_err(|_| Error::DeviceUnavailable)?;

        let mut buffer = PixelBuffer::new(width, height);
        {
            let view = slice.get_mapped_range();
            for y in 0..height {
                for x in 0..width {
                    let word = view[y as usize * width as usize + x as usize];
                    // Low byte is alpha, then blue, green, red.
                    buffer.set_pixel(
                        x,
                        y,
                        Rgb {
                            red: (word >> 24) as u8,
                            green: (word >> 16) as u8,
                            blue: (word >> 8) as u8,
                        },
                    );
                }
            }
        }
        staging_buffer.unmap();

        params_buffer.destroy();
        output_buffer.destroy();
        staging_buffer.destroy();

        Ok(buffer)
    }
}
