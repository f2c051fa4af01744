//! Demo: two physics scenes switchable from the keyboard

use keel::prelude::*;

/// Deterministic brick tint so the wall is not a single flat color
fn brick_color(row: usize, column: usize) -> Vec3 {
    let seed = (row * 31 + column * 17) % 97;
    let t = seed as f32 / 96.0;
    Vec3::new(0.4 + 0.5 * t, 0.35 + 0.3 * (1.0 - t), 0.3 + 0.2 * t)
}

/// A brick wall standing on a ground slab
fn make_wall_scene(commands: &CommandQueue) -> Scene {
    let mut scene = Scene::new("wall");

    let ground = EntityFactory::make_box(
        Vec3::new(40.0, 1.0, 40.0),
        Vec3::new(0.0, -0.5, 0.0),
        0.0,
        Quat::IDENTITY,
        Vec3::splat(0.8),
    );
    scene.add(ground);

    let brick_mass = 0.5;
    let brick_length = 1.2;
    let brick_depth = 0.6;
    let brick_height = brick_length * 0.5;
    let bricks_per_row = 6;
    let rows = 8;
    let z0 = -(bricks_per_row as f32) * brick_length * 0.5;

    let mut y = brick_height * 0.5;
    for row in 0..rows {
        let odd_row = row % 2 == 1;
        let row_length = if odd_row { bricks_per_row + 1 } else { bricks_per_row };
        let mut z = if odd_row { z0 - 0.25 * brick_length } else { z0 };

        for column in 0..row_length {
            let half_brick = odd_row && (column == 0 || column == row_length - 1);
            let length = if half_brick { brick_length * 0.5 } else { brick_length };
            let mass = if half_brick { brick_mass * 0.5 } else { brick_mass };

            let brick = EntityFactory::make_box(
                Vec3::new(brick_depth, brick_height, length),
                Vec3::new(0.0, y, z),
                mass,
                Quat::IDENTITY,
                brick_color(row, column),
            );
            scene.add(brick);

            z += if half_brick { 0.75 * brick_length } else { brick_length };
        }
        y += brick_height;
    }

    // The listener follows this scene's camera
    let mut microphone = AudioComponent::silent();
    microphone.enable_microphone();
    let mut listener = Entity::new();
    listener.attach(Component::Audio(microphone));
    scene.add(listener);

    scene.add_ambient_light(Vec3::splat(0.25));
    scene.add_directional_light(Vec3::new(-10.0, 10.0, 5.0), Vec3::ONE);
    scene.camera_mut().position = Vec3::new(-12.0, 7.0, 4.0);
    scene.enable_orbital_control(Vec3::new(0.0, 2.0, 0.0));

    bind_shared_controls(&mut scene, commands);
    scene
}

/// A tower of loose blocks that topples under its own weight
fn make_tower_scene(commands: &CommandQueue) -> Scene {
    let mut scene = Scene::new("tower");

    let ground = EntityFactory::make_box(
        Vec3::new(30.0, 1.0, 30.0),
        Vec3::new(0.0, -0.5, 0.0),
        0.0,
        Quat::IDENTITY,
        Vec3::splat(0.8),
    );
    scene.add(ground);

    let block = Vec3::new(0.9, 0.6, 2.7);
    for level in 0..10usize {
        let sideways = level % 2 == 1;
        let rotation = if sideways {
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)
        } else {
            Quat::IDENTITY
        };
        for i in 0..3usize {
            let offset = (i as f32 - 1.0) * block.x;
            let position = if sideways {
                Vec3::new(0.0, 0.3 + level as f32 * block.y, offset)
            } else {
                Vec3::new(offset, 0.3 + level as f32 * block.y, 0.0)
            };
            let piece = EntityFactory::make_box(
                block,
                position,
                0.4,
                rotation,
                brick_color(level, i),
            );
            scene.add(piece);
        }
    }

    scene.add_ambient_light(Vec3::splat(0.25));
    scene.add_directional_light(Vec3::new(8.0, 12.0, -6.0), Vec3::ONE);
    scene.camera_mut().position = Vec3::new(9.0, 6.0, 9.0);
    scene.enable_orbital_control(Vec3::new(0.0, 3.0, 0.0));

    bind_shared_controls(&mut scene, commands);
    scene
}

/// Controls common across all scenes
fn bind_shared_controls(scene: &mut Scene, commands: &CommandQueue) {
    let to_wall = commands.clone();
    let to_tower = commands.clone();
    let quit = commands.clone();

    scene.input_mut().bind_controls(
        ControlBindings::new()
            .key(KeyCode::Digit1, move |_| to_wall.change_scene("wall"))
            .key(KeyCode::Digit2, move |_| to_tower.change_scene("tower"))
            .key(KeyCode::Escape, move |_| quit.quit())
            .key(KeyCode::KeyW, |_| log::info!("W pressed"))
            .key(KeyCode::KeyA, |_| log::info!("A pressed"))
            .key(KeyCode::KeyS, |_| log::info!("S pressed"))
            .key(KeyCode::KeyD, |_| log::info!("D pressed"))
            .button("GP_X", |_, was_down| {
                if !was_down {
                    log::info!("X button pressed");
                }
            })
            .axis("GP_AXIS_LEFT_X", |value| {
                if value.abs() > 0.5 {
                    log::debug!("left stick x: {value:.2}");
                }
            }),
    );

    scene.input_mut().bind_mouse(|x, y| {
        log::info!("click at ({x:.0}, {y:.0})");
    });
}

fn main() {
    let config = EngineConfig::default()
        .with_title("keel demo")
        .with_size(1280, 720)
        .with_vsync(true);

    let mut engine = Engine::new(config);
    let commands = engine.commands();

    engine.scenes_mut().add_scene(make_wall_scene(&commands));
    engine.scenes_mut().add_scene(make_tower_scene(&commands));

    if let Err(e) = engine.run() {
        eprintln!("engine error: {e}");
    }
}
