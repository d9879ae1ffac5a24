//! Island scene: a sand dome and a sea plane under a day-night cycle, with
//! optional palm, pier and streetlamp models loaded from `assets/`.
//!
//! Controls: WASD/Ctrl/Space move, left-drag looks around. N advances the
//! sun, M pulses the lamp. F toggles fog, H the overlay; 8/9/0 toggle
//! MSAA/magnification/trilinear filtering and 1/2/3 pick the LOD bias.

use std::sync::Arc;

use cgmath::Vector3;
use instant::Duration;

use shoreline::app::{run, FlowConstructor, SceneFlow};
use shoreline::camera::Camera;
use shoreline::context::{Context, InitContext};
use shoreline::data_structures::fog::Fog;
use shoreline::data_structures::item::GameItem;
use shoreline::data_structures::light::{Attenuation, DirectionalLight, PointLight};
use shoreline::data_structures::model::{Material, Mesh};
use shoreline::data_structures::texture::Texture;
use shoreline::geometry;
use shoreline::renderer::SceneLayouts;
use shoreline::resources::{load_mesh_obj, load_texture};
use shoreline::scene::Scene;
use shoreline::settings::{RenderSettings, WindowConfig};
use shoreline::skybox::SkyBox;
use winit::keyboard::KeyCode;

/// Sun sweep speed while N is held, in degrees per second.
const DAY_STEP: f32 = 45.0;
/// Lamp pulse speed while M is held, per second.
const LAMP_STEP: f32 = 0.75;

struct IslandFlow {
    scene: Scene,
    light_angle: f32,
    lamp: f32,
    n_held: bool,
    m_held: bool,
}

impl IslandFlow {
    fn new(scene: Scene) -> Self {
        Self {
            scene,
            light_angle: 0.0,
            lamp: 1.0,
            n_held: false,
            m_held: false,
        }
    }
}

impl SceneFlow for IslandFlow {
    fn on_init(&mut self, ctx: &mut Context, camera: &mut Camera) {
        ctx.clear_color = wgpu::Color {
            r: 0.5,
            g: 0.5,
            b: 0.5,
            a: 1.0,
        };
        camera.position = Vector3::new(0.0, 0.6, 0.0);
    }

    fn on_update(&mut self, _ctx: &Context, dt: Duration) {
        let step = dt.as_secs_f32();
        if self.n_held {
            self.light_angle += DAY_STEP * step;
        }
        if self.m_held {
            if self.lamp > 0.9 {
                self.lamp = 0.0;
            }
            self.lamp += LAMP_STEP * step;
        }

        let light = &mut self.scene.light;
        light.point_light.color = Vector3::new(1.0, self.lamp, 0.4);

        // Day cycle: full intensity up to 80 degrees, a fade to dark between
        // 80 and 90, night past 90, and a wrap back to dawn at 360.
        let directional = &mut light.directional_light;
        if self.light_angle > 90.0 {
            directional.intensity = 0.0;
            if self.light_angle >= 360.0 {
                self.light_angle = -90.0;
            }
            light.skybox_light = Vector3::new(0.3, 0.3, 0.3);
        } else if self.light_angle <= -80.0 || self.light_angle >= 80.0 {
            let factor = 1.0 - (self.light_angle.abs() - 80.0) / 10.0;
            light.skybox_light = Vector3::new(factor, factor, factor);
            directional.intensity = factor;
            directional.color.y = factor.max(0.9);
            directional.color.z = factor.max(0.5);
        } else {
            light.skybox_light = Vector3::new(1.0, 1.0, 1.0);
            directional.intensity = 1.0;
            directional.color = Vector3::new(1.0, 1.0, 1.0);
        }
        let rad = self.light_angle.to_radians();
        directional.direction.x = rad.sin();
        directional.direction.y = rad.cos();
    }

    fn on_key(&mut self, _ctx: &Context, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::KeyN => self.n_held = pressed,
            KeyCode::KeyM => self.m_held = pressed,
            _ => {}
        }
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }
}

/// Load a textured OBJ model as a single item.
async fn load_textured_obj(
    init: &InitContext,
    layouts: &SceneLayouts,
    obj: &str,
    tex: &str,
) -> anyhow::Result<GameItem> {
    let mesh = Arc::new(load_mesh_obj(obj, &init.device).await?);
    let texture = load_texture(tex, &init.device, &init.queue).await?;
    let material = Arc::new(Material::textured(
        &init.device,
        obj,
        texture,
        1.0,
        &layouts.material,
    ));
    Ok(GameItem::new(mesh, material))
}

async fn build_scene(init: InitContext, layouts: SceneLayouts) -> anyhow::Result<Scene> {
    let device = &init.device;
    let queue = &init.queue;
    let mut scene = Scene::new();

    let sea_mesh = Arc::new(Mesh::new(device, &geometry::plane()?, "sea"));
    let sea_material = match load_texture("textures/sea.png", device, queue).await {
        Ok(texture) => Material::textured(device, "sea", texture, 0.0, &layouts.material),
        Err(e) => {
            log::warn!("sea texture missing ({}), falling back to a flat colour", e);
            Material::colored(
                device,
                queue,
                "sea",
                [0.0, 0.4, 0.6, 1.0],
                1.0,
                &layouts.material,
            )
        }
    };
    let mut sea = GameItem::new(sea_mesh, Arc::new(sea_material));
    sea.set_scale(30.0);
    sea.set_position(0.0, -0.1, -2.5);
    sea.set_rotation(90.0, 0.0, 0.0);
    scene.add_item(sea);

    let island_mesh = Arc::new(Mesh::new(device, &geometry::sphere(1.0)?, "island"));
    let sand = Arc::new(Material::colored(
        device,
        queue,
        "sand",
        [0.9, 0.85, 0.5, 1.0],
        0.25,
        &layouts.material,
    ));
    let mut island = GameItem::new(island_mesh, sand);
    island.set_scale_vec(Vector3::new(3.0, 2.0, 2.0));
    island.set_position(0.0, -1.5, -5.0);
    island.set_rotation(0.0, 0.0, 180.0);
    scene.add_item(island);

    match load_textured_obj(
        &init,
        &layouts,
        "models/streetlamp.obj",
        "models/streetlamp-tex.png",
    )
    .await
    {
        Ok(mut lamp) => {
            lamp.set_scale(0.15);
            lamp.set_position(0.0, 0.4, -5.0);
            scene.add_item(lamp);
        }
        Err(e) => log::warn!("skipping streetlamp: {}", e),
    }

    match load_textured_obj(
        &init,
        &layouts,
        "models/palm_tree.obj",
        "models/palm-tex2.png",
    )
    .await
    {
        Ok(palm) => {
            // Two palms sharing mesh and material.
            let mut palm2 = palm.clone();
            let mut palm1 = palm;
            palm1.set_position(-0.5, 0.0, -5.0);
            palm1.set_rotation(0.0, 25.0, -10.0);
            palm1.set_scale(0.005);
            palm2.set_position(0.3, 0.0, -4.0);
            palm2.set_scale_vec(Vector3::new(0.005, 0.004, 0.005));
            scene.add_item(palm1);
            scene.add_item(palm2);
        }
        Err(e) => log::warn!("skipping palms: {}", e),
    }

    match load_textured_obj(&init, &layouts, "models/pier.obj", "models/pier-tex.png").await {
        Ok(mut pier) => {
            pier.set_scale(0.2);
            pier.set_position(-0.4, 0.0, -2.8);
            pier.set_rotation(0.0, 15.0, 0.0);
            scene.add_item(pier);
        }
        Err(e) => log::warn!("skipping pier: {}", e),
    }

    let sky_texture = match load_texture("skybox/skybox.png", device, queue).await {
        Ok(texture) => texture,
        Err(e) => {
            log::warn!("skybox texture missing ({}), using a flat sky", e);
            Texture::create_solid(device, queue, [135, 206, 235, 255], "sky")
        }
    };
    scene.set_skybox(SkyBox::new(device, sky_texture, 10.0, &layouts.skybox)?);

    scene.light.ambient_light = Vector3::new(0.8, 0.8, 0.8);
    scene.light.skybox_light = Vector3::new(1.0, 1.0, 1.0);
    scene.light.point_light = PointLight {
        color: Vector3::new(1.0, 1.0, 0.4),
        position: Vector3::new(0.0, 1.15, -5.0),
        intensity: 1.0,
        attenuation: Attenuation {
            constant: 0.0,
            linear: 0.0,
            exponent: 1.0,
        },
    };
    scene.light.directional_light =
        DirectionalLight::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(-1.0, 0.0, 0.0), 0.25);

    scene.fog = Fog::new(true, Vector3::new(0.5, 0.5, 0.5), 0.15);

    Ok(scene)
}

fn main() -> anyhow::Result<()> {
    let constructor: FlowConstructor = Box::new(|init, layouts| {
        Box::pin(async move {
            let scene = build_scene(init, layouts).await?;
            Ok(Box::new(IslandFlow::new(scene)) as Box<dyn SceneFlow>)
        })
    });

    run(
        WindowConfig {
            title: "island".to_string(),
            ..Default::default()
        },
        RenderSettings::default(),
        constructor,
    )
}
