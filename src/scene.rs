//! Scene container: items, lighting, fog and the optional skybox.

use crate::data_structures::fog::Fog;
use crate::data_structures::item::GameItem;
use crate::data_structures::light::SceneLight;
use crate::skybox::SkyBox;

/// Everything the renderer draws in one frame.
///
/// Items are drawn in insertion order; there is no sorting or batching by
/// material.
pub struct Scene {
    pub items: Vec<GameItem>,
    pub light: SceneLight,
    pub fog: Fog,
    pub skybox: Option<SkyBox>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            light: SceneLight::default(),
            fog: Fog::default(),
            skybox: None,
        }
    }

    pub fn add_item(&mut self, item: GameItem) {
        self.items.push(item);
    }

    pub fn set_skybox(&mut self, skybox: SkyBox) {
        self.skybox = Some(skybox);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
