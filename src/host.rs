//! Scene lifecycle
//!
//! `SceneHost` sits between the page and the simulation. It measures the
//! container, sizes the drawing surface, feeds pointer/click/theme input into the
//! frame loop and tears everything down again.
//!
//! Setup failures never reach the page: a scene without a container or drawing
//! context simply does nothing.

use glam::Vec2;

use crate::config::{ResizePolicy, SceneConfig};
use crate::error::SceneError;
use crate::renderer::{Surface2d, render};
use crate::scheduler::{FrameHandle, ManualScheduler, Scheduler};
use crate::sim::{Bounds, FrameInput, ParticleSystem, PointerState};
use crate::theme::ThemeSource;

/// Rendered box of the container in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// The element the scene fills
pub trait Container {
    /// Current layout box, or `None` if the element is gone
    fn bounding_box(&self) -> Option<BoundingBox>;
}

/// A fixed box is its own container (headless runs)
impl Container for BoundingBox {
    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(*self)
    }
}

/// One teardown step (listener removal and the like)
pub type Detach = Box<dyn FnOnce() -> Result<(), SceneError>>;

/// Owns one running scene
pub struct SceneHost<S: Scheduler, D: Surface2d> {
    system: ParticleSystem,
    scheduler: S,
    surface: Option<D>,
    container: Option<Box<dyn Container>>,
    theme: Box<dyn ThemeSource>,
    pointer: PointerState,
    /// Container origin from the last measurement
    origin: Vec2,
    /// Outstanding frame request
    frame: Option<FrameHandle>,
    detachers: Vec<Detach>,
    mounted: bool,
}

impl<S: Scheduler, D: Surface2d> SceneHost<S, D> {
    pub fn new(
        config: SceneConfig,
        seed: u64,
        scheduler: S,
        theme: impl ThemeSource + 'static,
    ) -> Self {
        Self {
            system: ParticleSystem::new(config, seed),
            scheduler,
            surface: None,
            container: None,
            theme: Box::new(theme),
            pointer: PointerState::default(),
            origin: Vec2::ZERO,
            frame: None,
            detachers: Vec::new(),
            mounted: false,
        }
    }

    /// Mount into a container, failing closed.
    ///
    /// Returns `true` if the loop started. A missing container, layout box or
    /// drawing surface is logged and otherwise ignored.
    pub fn mount<C: Container + 'static>(&mut self, container: Option<C>, surface: Option<D>) -> bool {
        match self.try_mount(container, surface) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Scene not mounted: {}", e);
                false
            }
        }
    }

    /// Mount into a container, reporting why it could not start
    pub fn try_mount<C: Container + 'static>(
        &mut self,
        container: Option<C>,
        surface: Option<D>,
    ) -> Result<(), SceneError> {
        if self.mounted {
            log::debug!("Scene already mounted");
            return Ok(());
        }

        let container = container.ok_or(SceneError::ContainerUnavailable)?;
        let surface = surface.ok_or(SceneError::ContextUnavailable)?;
        let bbox = container
            .bounding_box()
            .ok_or(SceneError::ContainerUnavailable)?;

        self.container = Some(Box::new(container));
        self.surface = Some(surface);
        self.apply_size(bbox);
        self.system.init();
        self.mounted = true;

        log::info!(
            "Scene mounted: {} bodies in {}x{}",
            self.system.len(),
            bbox.width,
            bbox.height
        );

        self.run_frame();
        self.frame = Some(self.scheduler.schedule_next());
        Ok(())
    }

    /// Register a teardown step to run on unmount
    pub fn on_teardown(&mut self, detach: Detach) {
        self.detachers.push(detach);
    }

    /// Re-measure the container after its box changed.
    ///
    /// What happens to bodies now outside the bounds depends on the configured
    /// [`ResizePolicy`].
    pub fn resize(&mut self) {
        if !self.mounted {
            return;
        }
        let Some(bbox) = self.container.as_ref().and_then(|c| c.bounding_box()) else {
            log::debug!("Resize skipped: container unavailable");
            return;
        };

        self.apply_size(bbox);
        match self.system.config.resize_policy {
            ResizePolicy::Lazy => {}
            ResizePolicy::Clamp => self.system.confine_all(),
            ResizePolicy::Reinit => self.system.init(),
        }
        log::debug!(
            "Scene resized to {}x{} ({})",
            bbox.width,
            bbox.height,
            self.system.config.resize_policy.as_str()
        );
    }

    fn apply_size(&mut self, bbox: BoundingBox) {
        self.origin = bbox.origin();
        self.system
            .set_bounds(Bounds::new(bbox.width.max(0.0), bbox.height.max(0.0)));
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(bbox.width.max(0.0) as u32, bbox.height.max(0.0) as u32);
        }
    }

    /// Pointer moved; coordinates are page coordinates
    pub fn on_pointer_move(&mut self, page_x: f32, page_y: f32) {
        if let Some(bbox) = self.container.as_ref().and_then(|c| c.bounding_box()) {
            self.origin = bbox.origin();
        }
        let local = Vec2::new(page_x, page_y) - self.origin;
        self.pointer = PointerState::at(local.x, local.y);
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer.leave();
    }

    /// Scatter every body in a random direction
    pub fn on_click(&mut self) {
        if self.mounted {
            self.system.explode();
        }
    }

    /// Frame callback. Ignored unless a frame is outstanding.
    pub fn on_animation_frame(&mut self) {
        if !self.mounted || self.frame.take().is_none() {
            return;
        }
        self.run_frame();
        self.frame = Some(self.scheduler.schedule_next());
    }

    fn run_frame(&mut self) {
        let input = FrameInput {
            pointer: self.pointer,
            theme: self.theme.theme(),
        };
        self.system.advance(&input);
        if let Some(surface) = self.surface.as_mut() {
            render(&self.system, input.theme, surface);
        }
    }

    /// Stop the loop and remove every listener.
    ///
    /// All teardown steps run even if earlier ones fail. Calling this again is a
    /// no-op.
    pub fn unmount(&mut self) {
        if !self.mounted && self.frame.is_none() && self.detachers.is_empty() {
            return;
        }

        let mut failures = 0;
        for detach in self.detachers.drain(..) {
            if let Err(e) = detach() {
                failures += 1;
                log::warn!("{}", e);
            }
        }
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel(handle);
        }

        self.mounted = false;
        self.container = None;
        self.surface = None;
        log::info!("Scene unmounted ({} teardown failures)", failures);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut ParticleSystem {
        &mut self.system
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn surface(&self) -> Option<&D> {
        self.surface.as_ref()
    }
}

impl<D: Surface2d> SceneHost<ManualScheduler, D> {
    /// Fire up to `frames` scheduled frames, returning how many ran
    pub fn advance(&mut self, frames: usize) -> usize {
        let mut ran = 0;
        for _ in 0..frames {
            if self.scheduler.fire().is_none() {
                break;
            }
            self.on_animation_frame();
            ran += 1;
        }
        ran
    }
}

impl<S: Scheduler, D: Surface2d> Drop for SceneHost<S, D> {
    fn drop(&mut self) {
        self.unmount();
    }
}
