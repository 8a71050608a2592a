use drape::{
    Aabb, ClothMesh, FlatPlane, LogObserver, NoOpStepObserver, PinSpec, Simulation,
    SimulationConfig, StepObserver,
};

#[test]
fn blanket_drapes_over_table() {
    let plane = FlatPlane::new(400.0f32, 400.0, 150.0);
    let mut sim = Simulation::<f32>::build(10, 10, 400.0, &plane, SimulationConfig::blanket())
        .unwrap()
        .with_collision(Some(Aabb::table()));

    let mut time = 0.0;
    for _ in 0..300 {
        sim.tick(time, &mut NoOpStepObserver);
        time += 16.0;
    }

    let mesh = sim.mesh();
    let center = mesh.particle_at(5, 5).position;
    assert!(center.y >= 50.0 - 1e-3, "center fell through the table: {:?}", center);
    assert!(center.y < 60.0, "center should rest on the table top: {:?}", center);

    let corner = mesh.particle_at(0, 0).position;
    assert!(corner.y < 50.0, "corner should hang below the table top: {:?}", corner);

    for p in sim.positions() {
        assert!(p.is_finite());
        assert!(p.y >= -249.0);
    }
}

#[test]
fn no_box_means_no_contacts() {
    struct Contacts(usize);
    impl StepObserver for Contacts {
        fn on_collisions(&mut self, _resolved: usize) {
            self.0 += 1;
        }
    }

    let mesh = ClothMesh::<f32>::flat(4, 4, 100.0, 0.1).unwrap();
    let mut sim = Simulation::new(mesh, SimulationConfig::blanket()).unwrap();
    let mut contacts = Contacts(0);
    for _ in 0..10 {
        sim.step(&mut contacts);
    }
    assert_eq!(contacts.0, 0);

    sim.set_collision(Some(Aabb::table()));
    sim.step(&mut contacts);
    assert_eq!(contacts.0, 1);
}

#[test]
fn flag_pole_column_holds_while_fly_end_moves() {
    let mesh = ClothMesh::<f32>::flat(12, 12, 240.0, 0.1).unwrap();
    let mut sim = Simulation::new(mesh, SimulationConfig::flag())
        .unwrap()
        .with_pin(PinSpec::Column(0))
        .unwrap();

    let mut observer = LogObserver::new();
    for frame in 0..120 {
        sim.tick(frame as f64 * 16.0, &mut observer);
    }
    assert_eq!(observer.steps(), 119);

    let mesh = sim.mesh();
    for v in 0..=mesh.height() {
        let p = mesh.particle_at(0, v);
        assert_eq!(p.position, p.original, "pole particle {} drifted", v);
    }
    let fly = mesh.particle_at(mesh.width(), 0);
    assert!(fly.position.z > fly.original.z, "fly end should droop along gravity");
}

#[test]
fn restart_keeps_dimensions_and_pin() {
    let plane = FlatPlane::<f64>::for_cloth(6, 3, 60.0);
    let mut sim = Simulation::<f64>::build(6, 3, 60.0, &plane, SimulationConfig::flag())
        .unwrap()
        .with_pin(PinSpec::Column(0))
        .unwrap();
    for frame in 0..20 {
        sim.tick(frame as f64, &mut NoOpStepObserver);
    }
    sim.restart(&FlatPlane::<f64>::blanket()).unwrap();
    assert_eq!(sim.mesh().width(), 6);
    assert_eq!(sim.mesh().height(), 3);
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.pin(), &PinSpec::Column(0));
    assert_eq!(sim.mesh().particle_at(0, 0).position.y, 150.0);
}
