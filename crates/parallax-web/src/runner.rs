use parallax_engine::{
    pack_frame, FrameBuffer, FrameClock, FrameMeta, FrameOutcome, InputEvent, InputQueue,
    ParallaxScene, ProtocolLayout, SceneConfig, SceneResult,
};
#[cfg(feature = "vectors")]
use parallax_engine::VectorState;
#[cfg(feature = "vectors")]
use glam::DVec2;

/// Canvas outline stroke width, matching the page's thick grey border.
#[cfg(feature = "vectors")]
const OUTLINE_WIDTH: f32 = 5.0;

/// Wires the scene controller to the host page.
///
/// The page pushes input as it arrives and calls `tick` once per animation
/// frame; after each tick the packed frame buffer holds both canvases.
pub struct SceneRunner {
    scene: ParallaxScene,
    input: InputQueue,
    clock: FrameClock,
    frame: FrameBuffer,
    layout: ProtocolLayout,
    /// Packed header + sections read by the page.
    buffer: Vec<f32>,
    last_outcome: FrameOutcome,
    #[cfg(feature = "vectors")]
    local_vectors: VectorState,
    #[cfg(feature = "vectors")]
    panel_vectors: VectorState,
}

impl SceneRunner {
    pub fn new(config: SceneConfig) -> SceneResult<Self> {
        let scene = ParallaxScene::new(config)?;
        Ok(Self::with_scene(scene))
    }

    pub fn reference() -> Self {
        Self::with_scene(ParallaxScene::reference())
    }

    fn with_scene(scene: ParallaxScene) -> Self {
        let mut frame = FrameBuffer::new(scene.config());
        scene.render_all(&mut frame);
        let layout = ProtocolLayout::from_config(scene.config());
        let buffer = layout.allocate(scene.config());

        let mut runner = Self {
            scene,
            input: InputQueue::new(),
            clock: FrameClock::new(),
            frame,
            layout,
            buffer,
            last_outcome: FrameOutcome::Idle,
            #[cfg(feature = "vectors")]
            local_vectors: VectorState::new(),
            #[cfg(feature = "vectors")]
            panel_vectors: VectorState::new(),
        };
        runner.pack();
        runner
    }

    pub fn scene(&self) -> &ParallaxScene {
        &self.scene
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// One display frame at page time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> FrameOutcome {
        let now = self.clock.advance_to(now_ms);
        self.last_outcome = self.scene.update(&self.input, now, &mut self.frame);

        // Drain input after update
        self.input.drain();

        self.pack();
        self.last_outcome
    }

    pub fn last_outcome(&self) -> FrameOutcome {
        self.last_outcome
    }

    #[cfg(feature = "vectors")]
    fn rebuild_vectors(&mut self) {
        let config = self.scene.config();
        let outline = config.palette.canvas_outline;

        self.local_vectors.clear();
        self.local_vectors.stroke_rect(
            DVec2::ZERO,
            config.local_width,
            config.local_height,
            OUTLINE_WIDTH,
            outline,
        );
        self.local_vectors.draw_instances(self.frame.local());

        self.panel_vectors.clear();
        self.panel_vectors.stroke_rect(
            DVec2::ZERO,
            config.panel_width,
            config.panel_height,
            OUTLINE_WIDTH,
            outline,
        );
        self.panel_vectors.draw_instances(self.frame.panel());
    }

    fn pack(&mut self) {
        let meta = FrameMeta {
            frame_counter: self.clock.frames(),
            animating: self.scene.is_animating(),
        };

        #[cfg(feature = "vectors")]
        {
            self.rebuild_vectors();
            pack_frame(
                &self.layout,
                &mut self.buffer,
                &self.frame,
                self.local_vectors.vertices(),
                self.panel_vectors.vertices(),
                meta,
            );
        }

        #[cfg(not(feature = "vectors"))]
        pack_frame(&self.layout, &mut self.buffer, &self.frame, &[], &[], meta);
    }

    // ---- Pointer accessors for host reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn local_instances_ptr(&self) -> *const f32 {
        self.frame.local_ptr()
    }

    pub fn local_instance_count(&self) -> u32 {
        self.frame.local_count()
    }

    pub fn panel_instances_ptr(&self) -> *const f32 {
        self.frame.panel_ptr()
    }

    pub fn panel_instance_count(&self) -> u32 {
        self.frame.panel_count()
    }

    #[cfg(feature = "vectors")]
    pub fn local_vectors_ptr(&self) -> *const f32 {
        self.local_vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn local_vector_count(&self) -> u32 {
        self.local_vectors.vertex_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn panel_vectors_ptr(&self) -> *const f32 {
        self.panel_vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn panel_vector_count(&self) -> u32 {
        self.panel_vectors.vertex_count() as u32
    }

    pub fn is_animating(&self) -> bool {
        self.scene.is_animating()
    }

    pub fn earth_angle(&self) -> f64 {
        self.scene.state().earth_angle()
    }
}
