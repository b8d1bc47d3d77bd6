use glam::Mat4;
use std::sync::Arc;
use winit::window::Window;

use math_monsters::config::{FAR_PLANE, FIELD_OF_VIEW_DEGREES, NEAR_PLANE, SKY_COLOR};
use math_monsters::scene::rgb;
use math_monsters::session::Session;

use crate::gpu::{create_depth_texture, srgb_to_linear};

pub mod blocks;
pub mod camera;

use blocks::BlockRenderer;
use camera::{CameraState, CameraUniform};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not create a drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("could not open the graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Physical pixel size of the browser viewport.
pub fn viewport_size() -> (u32, u32) {
    let Some(web_window) = web_sys::window() else {
        return (1, 1);
    };
    let dpr = web_window.device_pixel_ratio();
    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(1.0)
    };
    let w = (dimension(web_window.inner_width()) * dpr) as u32;
    let h = (dimension(web_window.inner_height()) * dpr) as u32;
    (w.max(1), h.max(1))
}

pub struct RenderContext {
    pub window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let (width, height) = viewport_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("Surface {}x{} ({:?})", width, height, surface_format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
        })
    }
}

pub struct Renderer {
    pub ctx: RenderContext,
    camera: CameraState,
    depth_view: wgpu::TextureView,
    block_renderer: BlockRenderer,
    sky: [f32; 3],
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let ctx = RenderContext::new(window).await?;

        let camera_layout = CameraState::layout(&ctx.device);
        let camera = CameraState::new(&ctx.device, &camera_layout);
        let (_, depth_view) =
            create_depth_texture(&ctx.device, ctx.config.width, ctx.config.height);

        let block_renderer = BlockRenderer::new(&ctx.device, &camera_layout, ctx.config.format);

        Ok(Self {
            ctx,
            camera,
            depth_view,
            block_renderer,
            sky: rgb(SKY_COLOR).map(srgb_to_linear),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);

            let (_, depth_view) = create_depth_texture(&self.ctx.device, width, height);
            self.depth_view = depth_view;
        }
    }

    pub fn render_frame(&mut self, session: &Session) -> Result<(), wgpu::SurfaceError> {
        let aspect = self.ctx.config.width as f32 / self.ctx.config.height as f32;
        let projection = Mat4::perspective_rh(
            FIELD_OF_VIEW_DEGREES.to_radians(),
            aspect,
            NEAR_PLANE,
            FAR_PLANE,
        );
        let view_proj = projection * session.player.view_matrix();

        self.camera.update(
            &self.ctx.queue,
            CameraUniform::new(view_proj, session.player.position, self.sky),
        );
        self.block_renderer.prepare(
            &self.ctx.device,
            &self.ctx.queue,
            &session.scene.instances(),
        );

        let output = self.ctx.surface.get_current_texture()?;
        let swapchain_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b] = self.sky;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &swapchain_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            self.block_renderer.render(&mut pass, &self.camera.bind_group);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    pub fn request_redraw(&self) {
        self.ctx.window.request_redraw();
    }

    pub fn width(&self) -> u32 {
        self.ctx.config.width
    }

    pub fn height(&self) -> u32 {
        self.ctx.config.height
    }
}
