//! Built-in demo scene.
//!
//! Stands in for a scene file: a checkerboard floor, a mirror sphere, a
//! glass sphere, a bitten CSG sphere, a small box cluster and an optional
//! G3DM model, under mixed point and directional lighting.

use std::path::Path;

use glint_core::{Medium, Surface};
use glint_math::{Camera, Vec3};
use glint_render::{
    Csg, CsgOp, Cuboid, DirectionalLight, Model, Plane, PointLight, Scene, Sphere,
};

// Classic Phong material table entries.
fn silver() -> Surface {
    Surface::new(
        Vec3::new(0.19225, 0.19225, 0.19225),
        Vec3::new(0.50754, 0.50754, 0.50754),
        Vec3::new(0.508273, 0.508273, 0.508273),
        51.2,
    )
}

fn chrome() -> Surface {
    Surface::new(
        Vec3::splat(0.25),
        Vec3::splat(0.4),
        Vec3::splat(0.774597),
        76.8,
    )
}

fn gold() -> Surface {
    Surface::new(
        Vec3::new(0.24725, 0.1995, 0.0745),
        Vec3::new(0.75164, 0.60648, 0.22648),
        Vec3::new(0.628281, 0.555802, 0.366065),
        51.2,
    )
}

fn emerald() -> Surface {
    Surface::new(
        Vec3::new(0.0215, 0.1745, 0.0215),
        Vec3::new(0.07568, 0.61424, 0.07568),
        Vec3::new(0.633, 0.727811, 0.633),
        76.8,
    )
}

/// Assemble the demo scene, pulling in an optional mesh model.
///
/// A model that fails to load is logged and skipped; the rest of the
/// scene renders without it.
pub fn build(model: Option<&Path>) -> Scene {
    let mut scene = Scene::new();
    scene.ambient = Vec3::splat(0.1);

    // Checkerboard floor with a hint of reflection.
    scene.add_shape(Box::new(
        Plane::new(
            Vec3::new(0.0, -1.5, 0.0),
            Vec3::Y,
            silver().with_reflection(Vec3::splat(0.1)),
        )
        .checkerboard(),
    ));

    // Mirror sphere.
    scene.add_shape(Box::new(Sphere::new(
        Vec3::new(-2.6, 0.0, 0.0),
        1.5,
        chrome().with_reflection(Vec3::splat(0.8)),
    )));

    // Glass sphere, non-absorbing interior.
    let glass = Surface::new(Vec3::splat(0.05), Vec3::splat(0.1), Vec3::splat(0.5), 96.0)
        .with_reflection(Vec3::splat(0.1))
        .with_transmission(Vec3::splat(0.9));
    scene.add_shape(Box::new(
        Sphere::new(Vec3::new(2.6, 0.0, 1.0), 1.5, glass).with_medium(Medium::new(1.5, 0.0)),
    ));

    // Gold sphere with a bite taken out of it.
    scene.add_shape(Box::new(Csg::new(
        CsgOp::Difference,
        Box::new(Sphere::new(Vec3::new(0.0, 0.3, -2.5), 1.2, gold())),
        Box::new(Sphere::new(Vec3::new(0.8, 0.9, -1.7), 0.8, gold())),
        gold(),
    )));

    // Box cluster off to the side.
    scene.add_shape(Box::new(Cuboid::new(
        Vec3::new(-5.5, -1.5, -4.0),
        Vec3::new(-4.0, 0.5, -2.5),
        emerald(),
    )));
    scene.add_shape(Box::new(Cuboid::new(
        Vec3::new(-4.6, 0.5, -3.6),
        Vec3::new(-3.8, 1.3, -2.8),
        emerald().with_reflection(Vec3::splat(0.3)),
    )));

    if let Some(path) = model {
        match Model::load(path, gold()) {
            Ok(model) => {
                log::info!(
                    "loaded {} triangles from {}",
                    model.triangle_count(),
                    path.display()
                );
                scene.add_shape(Box::new(model));
            }
            Err(err) => log::warn!("skipping model {}: {}", path.display(), err),
        }
    }

    scene.add_light(Box::new(PointLight::new(
        Vec3::new(0.0, 10.0, 5.0),
        Vec3::ONE,
        30.0,
    )));
    scene.add_light(Box::new(PointLight::new(
        Vec3::new(-8.0, 4.0, 6.0),
        Vec3::new(0.3, 0.4, 1.0),
        12.0,
    )));
    scene.add_light(Box::new(DirectionalLight::new(
        Vec3::new(0.0, -10.0, -4.0),
        Vec3::splat(0.4),
    )));

    scene
}

/// Camera over the demo scene, sized to the output frame.
pub fn camera(width: u32, height: u32) -> Camera {
    let mut cam = Camera::new();
    cam.set_loc_at_up(Vec3::new(3.0, 4.0, 10.0), Vec3::new(0.0, 0.0, -0.5), Vec3::Y)
        .set_proj(0.1, 0.1, 500.0)
        .resize(width, height);
    cam
}
