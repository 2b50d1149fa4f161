//! Recursive Whitted shading.

use glint_core::{Coef, Medium};
use glint_math::{Ray, Vec3, THRESHOLD};

use crate::hit::{Hit, SurfacePoint};
use crate::scene::Scene;

/// Trace a ray through the scene and return its color.
///
/// `medium` is the volume the ray currently travels through, `weight`
/// the accumulated contribution factor used to cut off negligible
/// refraction chains and `depth` the recursion level. Depth exhaustion
/// returns the background color without touching the scene.
pub fn trace(scene: &Scene, ray: &Ray, medium: &Medium, weight: f64, depth: u32) -> Vec3 {
    if depth >= scene.max_depth {
        return scene.background;
    }
    let hit = match scene.intersect(ray) {
        Some(hit) => hit,
        None => return scene.background,
    };
    let sp = hit.resolve(ray);
    let color = shade(scene, ray.direction, medium, &hit, &sp, weight, depth);

    // Light absorbed over the distance traveled through this medium.
    color * (-sp.t * medium.decay).exp()
}

fn shade(
    scene: &Scene,
    view: Vec3,
    medium: &Medium,
    hit: &Hit,
    sp: &SurfacePoint,
    weight: f64,
    depth: u32,
) -> Vec3 {
    let surface = hit.shape.surface();

    // Face-forward the normal; a positive view component means the ray
    // struck the back side and is leaving the solid.
    let mut normal = sp.normal;
    let mut entering = true;
    if view.dot(normal) > 0.0 {
        normal = -normal;
        entering = false;
    }

    let mut color = if hit.shape.checkered() {
        // Alternate the ambient weight on unit tiles of the x-z grid.
        let parity = (sp.point.x.floor() + sp.point.z.floor()) as i64;
        if parity.rem_euclid(2) == 1 {
            surface.ka.k * scene.ambient
        } else {
            (Vec3::ONE - surface.ka.k) * scene.ambient
        }
    } else {
        surface.ka.k * scene.ambient
    };

    // Mirror direction, shared by the highlight and the reflection ray.
    let reflect = view + normal * (2.0 * (-view).dot(normal));

    for light in scene.lights() {
        let sample = light.sample(sp.point);
        let shadow_ray = Ray::new(
            sp.point + sample.to_light * THRESHOLD,
            sample.to_light,
        );

        if let Some(occluder) = scene.first_intersect(&shadow_ray) {
            if occluder.t < sample.dist {
                let kt = &occluder.shape.surface().kt;
                if kt.max_component() > THRESHOLD {
                    // Light filtered through a transparent occluder.
                    color += kt.k * trace(scene, &shadow_ray, medium, weight, depth + 1);
                }
                continue;
            }
        }

        let nl = normal.dot(sample.to_light);
        if nl > THRESHOLD {
            color += surface.kd.k * sample.color * (nl * sample.intensity);

            let rl = reflect.dot(-sample.to_light);
            if rl > THRESHOLD {
                color +=
                    surface.ks.k * sample.color * (rl.powf(surface.shininess) * sample.intensity);
            }
        }
    }

    // Mirror reflection continues in the same medium with unchanged
    // weight.
    if surface.kr.in_use && Coef::new(surface.kr.k * weight).in_use {
        let reflect_ray = Ray::new(sp.point + reflect * THRESHOLD, reflect);
        color += surface.kr.k * trace(scene, &reflect_ray, medium, weight, depth + 1);
    }

    // Refraction, cut off once the carried weight drops below the
    // scene's color threshold. A negative discriminant skips the
    // transmitted ray entirely.
    let transmitted_weight = surface.kt.max_component() * weight;
    if transmitted_weight > scene.color_threshold {
        let eta = if entering {
            hit.shape.medium().refraction / medium.refraction
        } else {
            scene.air.refraction / medium.refraction
        };
        let cos_incident = (-view).dot(normal);
        let discriminant = 1.0 - (1.0 - cos_incident * cos_incident) * eta * eta;
        if discriminant >= 0.0 {
            let transmit =
                (view - normal * view.dot(normal)) * eta - normal * discriminant.sqrt();
            let next = if entering {
                *hit.shape.medium()
            } else {
                scene.air
            };
            let refract_ray = Ray::new(sp.point + transmit * THRESHOLD, transmit);
            color += surface.kt.k
                * trace(scene, &refract_ray, &next, transmitted_weight, depth + 1);
        }
    }

    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::PointLight;
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use glint_core::Surface;

    // Air with no absorption so color assertions stay exact.
    const CLEAR_AIR: Medium = Medium::new(1.0003, 0.0);

    fn diffuse_only() -> Surface {
        Surface::new(Vec3::splat(0.1), Vec3::splat(0.9), Vec3::ZERO, 47.0)
    }

    fn floor_scene() -> Scene {
        let mut scene = Scene::new();
        scene.air = CLEAR_AIR;
        scene.ambient = Vec3::ONE;
        scene.add_shape(Box::new(Plane::new(Vec3::ZERO, Vec3::Y, diffuse_only())));
        scene
    }

    fn down_ray(x: f64) -> Ray {
        Ray::new(Vec3::new(x, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_background_on_miss() {
        let mut scene = Scene::new();
        scene.air = CLEAR_AIR;
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(trace(&scene, &ray, &scene.air, 1.0, 0), scene.background);
    }

    #[test]
    fn test_diffuse_falls_off_away_from_light() {
        let mut scene = floor_scene();
        scene.add_light(Box::new(PointLight::new(
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::ONE,
            10.0,
        )));

        let mut previous = f64::INFINITY;
        for x in [0.0, 1.0, 2.0, 3.0] {
            let ray = down_ray(x);
            let color = trace(&scene, &ray, &scene.air, 1.0, 0);
            assert!(
                color.x < previous,
                "no falloff between x = {} and its neighbor",
                x
            );
            previous = color.x;
        }
    }

    #[test]
    fn test_opaque_occluder_leaves_only_ambient() {
        let mut lit = floor_scene();
        lit.add_light(Box::new(PointLight::new(
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::ONE,
            10.0,
        )));

        // Same scene with an opaque sphere between light and origin.
        let mut shadowed = floor_scene();
        shadowed.add_shape(Box::new(Sphere::new(
            Vec3::new(0.0, 2.0, 0.0),
            0.5,
            diffuse_only(),
        )));
        shadowed.add_light(Box::new(PointLight::new(
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::ONE,
            10.0,
        )));

        // Diagonal primary ray reaching the origin without crossing the
        // occluder.
        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::new(-3.0, -5.0, 0.0));

        let ambient_only = Vec3::splat(0.1);
        let occluded = trace(&shadowed, &ray, &shadowed.air, 1.0, 0);
        let unoccluded = trace(&lit, &ray, &lit.air, 1.0, 0);

        assert!((occluded - ambient_only).length() < 1e-12);
        assert!(unoccluded.x > occluded.x);
    }

    #[test]
    fn test_transparent_occluder_passes_light() {
        let glass = Surface::new(Vec3::splat(0.1), Vec3::ZERO, Vec3::ZERO, 47.0)
            .with_transmission(Vec3::splat(0.8));

        let mut scene = floor_scene();
        scene.add_shape(Box::new(
            Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5, glass)
                .with_medium(Medium::new(1.5, 0.0)),
        ));
        scene.add_light(Box::new(PointLight::new(
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::ONE,
            10.0,
        )));

        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::new(-3.0, -5.0, 0.0));
        let color = trace(&scene, &ray, &scene.air, 1.0, 0);

        // More than the hard-shadow ambient floor.
        assert!(color.x > 0.1 + 1e-9);
    }

    #[test]
    fn test_occluder_query_follows_insertion_order() {
        let glass = Surface::new(Vec3::splat(0.1), Vec3::ZERO, Vec3::ZERO, 47.0)
            .with_transmission(Vec3::splat(0.8));
        let opaque = diffuse_only();

        let build = |glass_first: bool| {
            let mut scene = floor_scene();
            let glass_sphere = Sphere::new(Vec3::new(0.0, 1.5, 0.0), 0.4, glass)
                .with_medium(Medium::new(1.5, 0.0));
            let opaque_sphere = Sphere::new(Vec3::new(0.0, 3.0, 0.0), 0.4, opaque);
            if glass_first {
                scene.add_shape(Box::new(glass_sphere));
                scene.add_shape(Box::new(opaque_sphere));
            } else {
                scene.add_shape(Box::new(opaque_sphere));
                scene.add_shape(Box::new(glass_sphere));
            }
            scene.add_light(Box::new(PointLight::new(
                Vec3::new(0.0, 5.0, 0.0),
                Vec3::ONE,
                10.0,
            )));
            scene
        };

        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::new(-3.0, -5.0, 0.0));
        let glass_first = trace(&build(true), &ray, &CLEAR_AIR, 1.0, 0);
        let opaque_first = trace(&build(false), &ray, &CLEAR_AIR, 1.0, 0);

        // Both occluders sit on the shadow path, yet the answer depends
        // on which shape the early-out query reaches first: the opaque
        // winner hard-shadows, the glass winner lets filtered light in.
        assert!((opaque_first - Vec3::splat(0.1)).length() < 1e-12);
        assert!(glass_first.x > opaque_first.x);
    }

    #[test]
    fn test_mirror_corridor_ends_at_background() {
        let mirror = Surface::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, 47.0)
            .with_reflection(Vec3::ONE);

        let mut scene = Scene::new();
        scene.air = CLEAR_AIR;
        scene.add_shape(Box::new(Plane::new(Vec3::ZERO, Vec3::X, mirror)));
        scene.add_shape(Box::new(Plane::new(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::X,
            mirror,
        )));

        // Bounces between the planes until the depth limit trips.
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let color = trace(&scene, &ray, &scene.air, 1.0, 0);
        assert_eq!(color, scene.background);
    }

    #[test]
    fn test_decay_over_travel_distance() {
        let ambient_only = Surface::new(Vec3::splat(0.1), Vec3::ZERO, Vec3::ZERO, 47.0);
        let mut scene = Scene::new();
        scene.ambient = Vec3::ONE;
        scene.add_shape(Box::new(Plane::new(Vec3::ZERO, Vec3::Y, ambient_only)));

        let misty = Medium::new(1.0003, 0.1);
        let near = trace(&scene, &down_ray(0.0), &misty, 1.0, 0);
        let far = trace(
            &scene,
            &Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0)),
            &misty,
            1.0,
            0,
        );

        //5 units versus 10 units of travel through the same medium.
        assert!((near.x / far.x - (0.5f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_checkerboard_alternates_ambient() {
        let mut scene = Scene::new();
        scene.air = CLEAR_AIR;
        scene.ambient = Vec3::ONE;
        scene.add_shape(Box::new(
            Plane::new(Vec3::ZERO, Vec3::Y, diffuse_only()).checkerboard(),
        ));

        let even = trace(
            &scene,
            &Ray::new(Vec3::new(0.5, 5.0, 0.5), Vec3::new(0.0, -1.0, 0.0)),
            &scene.air,
            1.0,
            0,
        );
        let odd = trace(
            &scene,
            &Ray::new(Vec3::new(1.5, 5.0, 0.5), Vec3::new(0.0, -1.0, 0.0)),
            &scene.air,
            1.0,
            0,
        );

        assert!((even.x - 0.9).abs() < 1e-12);
        assert!((odd.x - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_axial_ray_passes_through_glass() {
        let glass = Surface::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, 47.0)
            .with_transmission(Vec3::ONE);

        let mut scene = Scene::new();
        scene.air = CLEAR_AIR;
        scene.add_shape(Box::new(
            Sphere::new(Vec3::ZERO, 1.0, glass).with_medium(Medium::new(1.5, 0.0)),
        ));

        // Dead-center entry and exit leave the direction unchanged, so
        // the ray reaches the background at full transmission.
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let color = trace(&scene, &ray, &scene.air, 1.0, 0);
        assert_eq!(color, scene.background);
    }

    #[test]
    fn test_steep_entry_skips_refraction() {
        let glass = Surface::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, 47.0)
            .with_transmission(Vec3::ONE);

        let mut scene = Scene::new();
        scene.air = CLEAR_AIR;
        scene.add_shape(Box::new(
            Sphere::new(Vec3::ZERO, 1.0, glass).with_medium(Medium::new(1.5, 0.0)),
        ));

        // Far off axis the discriminant goes negative and no transmitted
        // ray is spawned, leaving the surface black.
        let ray = Ray::new(Vec3::new(0.8, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let color = trace(&scene, &ray, &scene.air, 1.0, 0);
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn test_specular_lobe_and_falloff() {
        let gloss = Surface::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, 1.0);
        let mut scene = Scene::new();
        scene.air = CLEAR_AIR;
        scene.add_shape(Box::new(Plane::new(Vec3::ZERO, Vec3::Y, gloss)));
        scene.add_light(Box::new(PointLight::new(
            Vec3::new(-2.0, 1.0, 0.0),
            Vec3::ONE,
            3.0,
        )));

        // 45 degree view onto the origin.
        let ray = Ray::new(Vec3::new(-5.0, 5.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let color = trace(&scene, &ray, &scene.air, 1.0, 0);

        // Highlight weight (1/sqrt(10)) times intensity (3/sqrt(5)).
        let expected = 3.0 / 50.0f64.sqrt();
        assert!((color.x - expected).abs() < 1e-9);
    }
}
