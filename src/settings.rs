//! Render and window configuration.
//!
//! [`RenderSettings`] is an explicit struct threaded through context and
//! renderer construction instead of a pile of global mutable flags. The HUD
//! and keyboard shortcuts mutate it; the renderer reads it every frame.

/// Toggleable render settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    /// Distance fog on/off.
    pub fog: bool,
    /// Linear (true) vs nearest (false) magnification filtering.
    pub mag_linear: bool,
    /// Trilinear (true) vs bilinear (false) minification filtering.
    pub min_trilinear: bool,
    /// Level-of-detail bias applied to the scene sampler.
    pub lod_bias: i32,
    /// Multisample anti-aliasing. Tracked and displayed; applied when
    /// pipelines are (re)built.
    pub msaa: bool,
    /// Settings overlay visibility.
    pub hud: bool,
    /// Render resolution as a fraction of the window size.
    pub resolution_scale: f32,
}

impl RenderSettings {
    pub fn toggle_fog(&mut self) {
        self.fog = !self.fog;
    }

    pub fn toggle_mag_linear(&mut self) {
        self.mag_linear = !self.mag_linear;
    }

    pub fn toggle_min_trilinear(&mut self) {
        self.min_trilinear = !self.min_trilinear;
    }

    pub fn toggle_msaa(&mut self) {
        self.msaa = !self.msaa;
    }

    pub fn toggle_hud(&mut self) {
        self.hud = !self.hud;
    }

    pub fn set_lod_bias(&mut self, bias: i32) {
        self.lod_bias = bias;
    }

    /// The sampler-relevant subset, used to detect when samplers and the
    /// frame bind group have to be rebuilt. The LOD bias is not part of it;
    /// it travels to the shader through [`SamplingUniform`] instead.
    pub fn sampler_key(&self) -> (bool, bool) {
        (self.mag_linear, self.min_trilinear)
    }
}

/// Texture sampling parameters as laid out in the scene shader: the LOD
/// bias in x, the rest padding. wgpu samplers carry no bias, so it is
/// applied per fragment via `textureSampleBias`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SamplingUniform {
    params: [f32; 4],
}

impl SamplingUniform {
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            params: [settings.lod_bias as f32, 0.0, 0.0, 0.0],
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fog: true,
            mag_linear: false,
            min_trilinear: false,
            lod_bias: 0,
            msaa: false,
            hud: true,
            resolution_scale: 1.0,
        }
    }
}

/// Window parameters for [`crate::app::run`].
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// With vsync off the frame loop caps itself at
    /// [`crate::app::TARGET_FPS`] with a sleep/yield sync.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "shoreline".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_flip_and_restore() {
        let mut settings = RenderSettings::default();
        assert!(settings.fog);
        settings.toggle_fog();
        assert!(!settings.fog);
        settings.toggle_fog();
        assert!(settings.fog);
    }

    #[test]
    fn sampler_key_ignores_non_sampler_settings() {
        let mut settings = RenderSettings::default();
        let key = settings.sampler_key();
        settings.toggle_fog();
        settings.toggle_hud();
        settings.set_lod_bias(2);
        assert_eq!(key, settings.sampler_key());
        settings.toggle_mag_linear();
        assert_ne!(key, settings.sampler_key());
    }

    #[test]
    fn negative_lod_bias_reaches_the_sampling_uniform() {
        let mut settings = RenderSettings::default();
        settings.set_lod_bias(-5);
        let uniform = SamplingUniform::from_settings(&settings);
        assert_eq!(bytemuck::cast_slice::<_, f32>(&[uniform])[0], -5.0);
    }
}
