use chatballs::sim::{Entity, ParticleSystem, World, resolve_collisions};
use chatballs::{FrameSignal, ImpulseEvent, Rgb, SimConfig, SimEvent, Simulation, tick};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn config() -> SimConfig {
    SimConfig {
        width: 800.0,
        height: 600.0,
        rng_seed: 2024,
        ..Default::default()
    }
}

/// Two entities 2r - 1 apart moving head-on end up exactly touching with swapped normal velocities.
#[test]
fn head_on_pair_separates_to_exact_contact() {
    let radius = config().radius;
    let mut a = Entity::new(1, "a", Rgb::RED, Vec2::new(200.0, 300.0), 0);
    let mut b = Entity::new(2, "b", Rgb::RED, Vec2::new(200.0 + 2.0 * radius - 1.0, 300.0), 0);
    a.vel = Vec2::new(4.0, 0.0);
    b.vel = Vec2::new(-1.5, 0.0);
    let mut entities = vec![a, b];

    let contacts = resolve_collisions(&mut entities, radius);

    assert_eq!(contacts.len(), 1);
    let sep = entities[0].pos.distance(entities[1].pos);
    assert!((sep - 2.0 * radius).abs() < 1e-3, "separation {sep}");
    assert!((entities[0].vel.x - -1.5).abs() < 1e-4);
    assert!((entities[1].vel.x - 4.0).abs() < 1e-4);
}

/// Repeated activity from one name never duplicates the entity.
#[test]
fn repeated_impulse_does_not_duplicate() {
    let mut sim = Simulation::new(config(), 0);
    sim.apply_impulse(&ImpulseEvent::new("Alice", None), 100);
    assert_eq!(sim.entities().len(), 1);
    let (pos, vel) = {
        let alice = sim.entity("Alice").unwrap();
        (alice.pos, alice.vel)
    };

    sim.apply_impulse(&ImpulseEvent::new("Alice", None), 250);
    let alice = sim.entity("Alice").unwrap();
    assert_eq!(sim.entities().len(), 1);
    assert_eq!(alice.pos, pos);
    assert_ne!(alice.vel, vel);
    assert_eq!(alice.last_active, 250);

    let created = sim
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SimEvent::EntityCreated { .. }))
        .count();
    assert_eq!(created, 1);
}

/// A burst is gone after exactly `particle_lifetime` steps.
#[test]
fn burst_expires_after_lifetime() {
    let config = config();
    let mut rng = Pcg32::seed_from_u64(1);
    let mut events = Vec::new();
    let mut particles = ParticleSystem::new(config.particle_lifetime, config.particle_speed);
    particles.spawn(&mut rng, Vec2::new(50.0, 50.0), Rgb::RED, 10, &mut events);

    for _ in 0..config.particle_lifetime {
        assert_eq!(particles.len(), 10);
        particles.step(&mut events);
    }
    assert!(particles.is_empty());
}

/// An entity past the left wall snaps to it, reverses, and sheds one burst of 10.
#[test]
fn left_wall_bounce_through_simulation() {
    let mut sim = Simulation::new(config(), 0);
    sim.apply_impulse(&ImpulseEvent::new("bouncer", Some(Rgb(0x00AAFF))), 0);
    let radius = sim.world().radius();
    {
        let e = sim.entity_mut("bouncer").unwrap();
        e.pos = Vec2::new(radius - 5.0, 300.0);
        e.vel = Vec2::new(-2.0, 0.0);
    }
    sim.drain_events();

    tick(&mut sim, FrameSignal::new(16));

    let e = sim.entity("bouncer").unwrap();
    assert_eq!(e.pos.x, radius);
    assert_eq!(e.vel.x, 2.0);
    let spawned: Vec<(Vec2, Rgb)> = sim
        .drain_events()
        .into_iter()
        .filter_map(|ev| match ev {
            SimEvent::ParticleSpawned { position, color, .. } => Some((position, color)),
            _ => None,
        })
        .collect();
    assert_eq!(spawned, vec![(Vec2::new(radius, 300.0), Rgb(0x00AAFF)); 10]);
}

/// Updating directly at entity level gives the same boundary behaviour.
#[test]
fn entity_update_clamps_below_radius() {
    let world = World::new(config());
    let r = world.radius();
    let mut e = Entity::new(1, "x", Rgb::RED, Vec2::new(r - 5.0, 100.0), 0);
    e.vel = Vec2::new(-0.5, 0.0);
    let bounce = e.update(&world);
    assert!(bounce.x && !bounce.y);
    assert_eq!(e.pos.x, r);
    assert!(e.vel.x > 0.0);
}

/// Activity from a producer thread lands before the next tick reads state.
#[test]
fn feed_thread_impulses_apply_at_tick_boundary() {
    let mut sim = Simulation::new(config(), 0);
    let sender = sim.impulse_sender();
    let producer = std::thread::spawn(move || {
        for name in ["x", "y", "x", "z"] {
            sender.send(ImpulseEvent::new(name, None));
        }
    });
    producer.join().unwrap();

    let summary = tick(&mut sim, FrameSignal::new(1_000));
    assert_eq!(summary.impulses, 4);
    let names: Vec<&str> = sim.entities().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y", "z"]);
}

/// Shrinking the world is lazy: entities snap inside on the next tick.
#[test]
fn resize_reclamps_on_next_tick() {
    let mut sim = Simulation::new(config(), 0);
    sim.apply_impulse(&ImpulseEvent::new("far", None), 0);
    sim.entity_mut("far").unwrap().pos = Vec2::new(700.0, 500.0);

    sim.set_world_bounds(300.0, -10.0);
    assert_eq!(sim.world().size, Vec2::new(300.0, 40.0));
    assert_eq!(sim.entity("far").unwrap().pos, Vec2::new(700.0, 500.0));

    tick(&mut sim, FrameSignal::new(16));
    let far = sim.entity("far").unwrap();
    assert!(far.pos.x <= 280.0 + 1e-4);
    assert!((far.pos.y - 20.0).abs() < 1e-4);
}
